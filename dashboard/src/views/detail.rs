//! Detail panel: the lookup-by-id form plus the selected client's usage.

use std::fmt::Write;

use consumption_core::{Clock, ConsumptionRecord, ConsumptionStore};

use super::progress_bar;

/// Form state for the lookup-by-id box. Selection itself lives in the store.
#[derive(Debug, Default, Clone)]
pub struct DetailView {
    query: String,
}

impl DetailView {
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Record what the user typed and return it for lookup.
    pub fn submit(&mut self, input: &str) -> &str {
        self.query = input.trim().to_string();
        &self.query
    }

    pub fn render<C: Clock>(&self, store: &ConsumptionStore<C>) -> String {
        let mut out = String::from("== Client details ==\n");
        let _ = writeln!(out, "Find by id: [{}]", self.query);

        if store.is_loading() {
            out.push_str("Loading...\n");
            return out;
        }

        if let Some(message) = store.error_message() {
            let _ = writeln!(out, "[error] {message} (type `clear` to dismiss)");
        }

        match store.selected() {
            Some(record) => render_record(&mut out, record),
            None => {
                out.push_str("Select a client\n");
                out.push_str("Use `select N` on the list or `find ID` to look one up.\n");
            }
        }
        out
    }
}

fn render_record(out: &mut String, record: &ConsumptionRecord) {
    let _ = writeln!(out, "-- {} --", record.client_name);
    let _ = writeln!(out, "Balance: {:.2} {}", record.balance, record.currency);
    let _ = writeln!(
        out,
        "Data:    {} / {} {} {}",
        record.data_used,
        record.data_total,
        record.data_unit,
        progress_bar(record.data_usage_percent())
    );
    let _ = writeln!(
        out,
        "Minutes: {} / {} {} {}",
        record.minutes_used,
        record.minutes_total,
        record.minutes_unit,
        progress_bar(record.minutes_usage_percent())
    );
    let _ = writeln!(
        out,
        "Remaining: {} {} data, {} {} minutes",
        record.data_remaining(),
        record.data_unit,
        record.minutes_remaining(),
        record.minutes_unit
    );
}
