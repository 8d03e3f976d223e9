//! Client-side store for fetched consumption records.
//!
//! # Design
//! `ConsumptionStore` is a plain value owned by the presentation shell and
//! mutated only through `&mut self`. It keeps the host-does-IO split of the
//! client: every fetch is a `begin_*` call that hands out a
//! [`PendingRequest`], followed by [`ConsumptionStore::complete`] once the
//! caller has a response. `fetch_all` / `fetch_by_id` run both halves
//! around a [`Transport`] for the common synchronous case.
//!
//! Requests are fenced per kind. Each `begin_*` takes the next generation of
//! its kind and only the newest generation may commit; anything older is
//! reported as [`Commit::Stale`] and leaves state alone.

use std::time::{Duration, Instant};

use crate::client::{parse_client_id, ConsumptionClient};
use crate::clock::{Clock, SystemClock};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::ConsumptionRecord;

/// How long a successful full fetch satisfies later `fetch_all` calls.
pub const CACHE_EXPIRY: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Full collection (`GET /client/`).
    List,
    /// Single record (`GET /client/{id}`).
    Detail,
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub kind: RequestKind,
    pub generation: u64,
}

/// A request the caller must execute and hand back to `complete`.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

/// What `complete` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The result was written into the store.
    Applied,
    /// The request failed and the error was recorded.
    Failed,
    /// A newer request of the same kind exists; nothing was written.
    Stale,
}

/// Generation bookkeeping for one request kind.
#[derive(Debug, Default, Clone, Copy)]
struct Fence {
    issued: u64,
    outstanding: bool,
}

impl Fence {
    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.outstanding = true;
        self.issued
    }

    fn is_current(&self, generation: u64) -> bool {
        self.outstanding && generation == self.issued
    }
}

pub struct ConsumptionStore<C: Clock = SystemClock> {
    client: ConsumptionClient,
    clock: C,
    records: Vec<ConsumptionRecord>,
    selected: Option<ConsumptionRecord>,
    error: Option<ApiError>,
    loaded: bool,
    last_fetch: Option<Instant>,
    list_fence: Fence,
    detail_fence: Fence,
}

impl ConsumptionStore<SystemClock> {
    pub fn new(client: ConsumptionClient) -> Self {
        Self::with_clock(client, SystemClock)
    }
}

impl<C: Clock> ConsumptionStore<C> {
    pub fn with_clock(client: ConsumptionClient, clock: C) -> Self {
        Self {
            client,
            clock,
            records: Vec::new(),
            selected: None,
            error: None,
            loaded: false,
            last_fetch: None,
            list_fence: Fence::default(),
            detail_fence: Fence::default(),
        }
    }

    pub fn records(&self) -> &[ConsumptionRecord] {
        &self.records
    }

    pub fn selected(&self) -> Option<&ConsumptionRecord> {
        self.selected.as_ref()
    }

    /// True while the newest request of either kind is unresolved.
    pub fn is_loading(&self) -> bool {
        self.list_fence.outstanding || self.detail_fence.outstanding
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// The error as the single line the UI shows.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Whether the collection has been fetched successfully at least once.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn last_fetch(&self) -> Option<Instant> {
        self.last_fetch
    }

    pub fn is_cache_valid(&self) -> bool {
        match self.last_fetch {
            Some(at) => self.clock.now().saturating_duration_since(at) < CACHE_EXPIRY,
            None => false,
        }
    }

    pub fn set_selected(&mut self, record: Option<ConsumptionRecord>) {
        self.selected = record;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Start a full fetch, or return `None` if the cached collection is
    /// still fresh.
    pub fn begin_fetch_all(&mut self) -> Option<PendingRequest> {
        if self.loaded && self.is_cache_valid() {
            tracing::debug!(records = self.records.len(), "client list served from cache");
            return None;
        }
        self.error = None;
        let generation = self.list_fence.issue();
        tracing::info!(generation, "fetching client list");
        Some(PendingRequest {
            ticket: Ticket {
                kind: RequestKind::List,
                generation,
            },
            request: self.client.build_list_clients(),
        })
    }

    /// Start a single-record fetch. Never served from cache.
    ///
    /// Returns `None` when the request cannot be built; the error is
    /// recorded and no request is counted as outstanding.
    pub fn begin_fetch_by_id(&mut self, id: u32) -> Option<PendingRequest> {
        let request = match self.client.build_get_client(id) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(id, error = %err, "rejected client lookup");
                self.error = Some(err);
                return None;
            }
        };
        self.error = None;
        let generation = self.detail_fence.issue();
        tracing::info!(id, generation, "fetching client");
        Some(PendingRequest {
            ticket: Ticket {
                kind: RequestKind::Detail,
                generation,
            },
            request,
        })
    }

    /// Start a single-record fetch from raw lookup input. Input that is not
    /// a client id is recorded as a `Local` error and nothing is sent.
    pub fn begin_fetch_by_query(&mut self, input: &str) -> Option<PendingRequest> {
        match parse_client_id(input) {
            Ok(id) => self.begin_fetch_by_id(id),
            Err(err) => {
                tracing::warn!(input, error = %err, "rejected client lookup");
                self.error = Some(err);
                None
            }
        }
    }

    /// Commit the outcome of a request started by `begin_*`.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<HttpResponse, ApiError>) -> Commit {
        match ticket.kind {
            RequestKind::List => {
                if !self.list_fence.is_current(ticket.generation) {
                    tracing::debug!(generation = ticket.generation, "discarding stale client list response");
                    return Commit::Stale;
                }
                self.list_fence.outstanding = false;
                match outcome.and_then(|response| self.client.parse_list_clients(response)) {
                    Ok(records) => {
                        tracing::info!(records = records.len(), "client list loaded");
                        self.records = records;
                        self.loaded = true;
                        self.last_fetch = Some(self.clock.now());
                        Commit::Applied
                    }
                    Err(err) => self.fail(err),
                }
            }
            RequestKind::Detail => {
                if !self.detail_fence.is_current(ticket.generation) {
                    tracing::debug!(generation = ticket.generation, "discarding stale client response");
                    return Commit::Stale;
                }
                self.detail_fence.outstanding = false;
                match outcome.and_then(|response| self.client.parse_get_client(response)) {
                    Ok(record) => {
                        self.selected = Some(record);
                        Commit::Applied
                    }
                    // The previous selection stays visible on failure.
                    Err(err) => self.fail(err),
                }
            }
        }
    }

    /// Fetch the full collection unless the cache is still valid.
    pub fn fetch_all<T: Transport>(&mut self, transport: &T) -> Option<Commit> {
        let pending = self.begin_fetch_all()?;
        let outcome = transport.execute(&pending.request);
        Some(self.complete(pending.ticket, outcome))
    }

    /// Fetch one record and select it.
    pub fn fetch_by_id<T: Transport>(&mut self, id: u32, transport: &T) -> Commit {
        let Some(pending) = self.begin_fetch_by_id(id) else {
            return Commit::Failed;
        };
        let outcome = transport.execute(&pending.request);
        self.complete(pending.ticket, outcome)
    }

    /// Look up a client from raw lookup input and select it.
    pub fn fetch_by_query<T: Transport>(&mut self, input: &str, transport: &T) -> Commit {
        let Some(pending) = self.begin_fetch_by_query(input) else {
            return Commit::Failed;
        };
        let outcome = transport.execute(&pending.request);
        self.complete(pending.ticket, outcome)
    }

    fn fail(&mut self, err: ApiError) -> Commit {
        tracing::warn!(error = %err, "request failed");
        self.error = Some(err);
        Commit::Failed
    }
}
