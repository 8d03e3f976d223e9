//! Composing shell: owns the session's store and drives it from commands.

use std::str::FromStr;

use consumption_core::{Clock, Commit, ConsumptionStore, SystemClock, Transport};
use thiserror::Error;

use super::detail::DetailView;
use super::list;

pub const HELP: &str = "commands: refresh | select N | find ID | clear | none | help | quit";

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Re-run the list fetch. Served from cache while it is fresh.
    Refresh,
    /// Select the Nth listed client (1-based).
    Select(usize),
    /// Look a client up by id. Holds the raw form input.
    Find(String),
    ClearError,
    Deselect,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`; type `help` for the list")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a list position")]
    InvalidPosition(String),
    #[error("no client at position {position}; the list has {len}")]
    OutOfRange { position: usize, len: usize },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };
        let arg = words.next();
        match verb.to_ascii_lowercase().as_str() {
            "refresh" | "r" | "retry" => Ok(Command::Refresh),
            "select" | "s" => {
                let raw = arg.ok_or(CommandError::MissingArgument("select"))?;
                raw.parse()
                    .map(Command::Select)
                    .map_err(|_| CommandError::InvalidPosition(raw.to_string()))
            }
            "find" | "id" => {
                let raw = arg.ok_or(CommandError::MissingArgument("find"))?;
                Ok(Command::Find(raw.to_string()))
            }
            "clear" => Ok(Command::ClearError),
            "none" => Ok(Command::Deselect),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Shell<T: Transport, C: Clock = SystemClock> {
    store: ConsumptionStore<C>,
    transport: T,
    detail: DetailView,
}

impl<T: Transport, C: Clock> Shell<T, C> {
    pub fn new(store: ConsumptionStore<C>, transport: T) -> Self {
        Self {
            store,
            transport,
            detail: DetailView::default(),
        }
    }

    pub fn store(&self) -> &ConsumptionStore<C> {
        &self.store
    }

    /// Initial load, as done when the dashboard first appears.
    pub fn mount(&mut self) {
        self.refresh();
    }

    pub fn handle(&mut self, command: Command) -> Result<Control, CommandError> {
        match command {
            Command::Refresh => self.refresh(),
            Command::Select(position) => {
                let len = self.store.records().len();
                let record = position
                    .checked_sub(1)
                    .and_then(|index| self.store.records().get(index))
                    .cloned()
                    .ok_or(CommandError::OutOfRange { position, len })?;
                self.store.set_selected(Some(record));
            }
            Command::Find(input) => {
                let query = self.detail.submit(&input);
                self.store.fetch_by_query(query, &self.transport);
            }
            Command::ClearError => self.store.clear_error(),
            Command::Deselect => self.store.set_selected(None),
            Command::Help => {}
            Command::Quit => return Ok(Control::Quit),
        }
        Ok(Control::Continue)
    }

    pub fn render(&self) -> String {
        format!(
            "{}\n{}",
            list::render(&self.store),
            self.detail.render(&self.store)
        )
    }

    fn refresh(&mut self) {
        // A freshly applied list always moves the selection to its first entry.
        if self.store.fetch_all(&self.transport) == Some(Commit::Applied) {
            let first = self.store.records().first().cloned();
            if first.is_some() {
                self.store.set_selected(first);
            }
        }
    }
}
