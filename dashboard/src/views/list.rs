//! Master panel: every fetched client with a short usage summary.

use std::fmt::Write;

use consumption_core::{Clock, ConsumptionRecord, ConsumptionStore};

pub fn render<C: Clock>(store: &ConsumptionStore<C>) -> String {
    let mut out = String::from("== Clients ==\n");

    if let Some(message) = store.error_message() {
        let _ = writeln!(out, "[error] Failed to load clients: {message}");
        out.push_str("        type `refresh` to retry\n");
    }

    // Entries are hidden while any request is in flight.
    if store.is_loading() {
        if !store.is_loaded() {
            out.push_str("Loading clients...\n");
        }
        return out;
    }

    let records = store.records();
    if records.is_empty() {
        if store.is_loaded() {
            out.push_str("No clients available.\n");
        }
        return out;
    }

    let selected = store.selected().map(|record| record.client_name.as_str());
    for (index, record) in records.iter().enumerate() {
        let marker = if selected == Some(record.client_name.as_str()) { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {:>2}. {}", index + 1, summary(record));
    }
    out
}

fn summary(record: &ConsumptionRecord) -> String {
    format!(
        "{} | balance {:.2} {} | data {}/{} {} | minutes {}/{} {}",
        record.client_name,
        record.balance,
        record.currency,
        record.data_used,
        record.data_total,
        record.data_unit,
        record.minutes_used,
        record.minutes_total,
        record.minutes_unit,
    )
}

#[cfg(test)]
mod tests {
    use consumption_core::{
        ApiError, ConsumptionClient, HttpRequest, HttpResponse, ManualClock, Transport,
    };

    use super::*;

    struct Fixed(Result<HttpResponse, ApiError>);

    impl Transport for Fixed {
        fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.0.clone()
        }
    }

    fn ok(body: &str) -> Fixed {
        Fixed(Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }))
    }

    fn store() -> ConsumptionStore<ManualClock> {
        ConsumptionStore::with_clock(ConsumptionClient::new("http://localhost:5000"), ManualClock::new())
    }

    const TWO: &str = r#"[
        {"client_name":"Ana","balance":100,"currency":"USD","data_used":2,"data_total":10,
         "data_unit":"GB","minutes_used":30,"minutes_total":200,"minutes_unit":"min"},
        {"client_name":"Bruno","balance":5.5,"currency":"USD","data_used":1.5,"data_total":3,
         "data_unit":"GB","minutes_used":10,"minutes_total":100,"minutes_unit":"Min"}]"#;

    #[test]
    fn shows_loading_before_first_load() {
        let mut store = store();
        store.begin_fetch_all();
        let text = render(&store);
        assert!(text.contains("Loading clients..."));
    }

    #[test]
    fn lists_records_and_marks_selection() {
        let mut store = store();
        store.fetch_all(&ok(TWO));
        store.set_selected(Some(store.records()[1].clone()));

        let text = render(&store);
        assert!(text.contains("   1. Ana | balance 100.00 USD | data 2/10 GB | minutes 30/200 min"));
        assert!(text.contains(">  2. Bruno | balance 5.50 USD | data 1.5/3 GB"));
    }

    #[test]
    fn hides_entries_while_a_request_is_outstanding() {
        let mut store = store();
        store.fetch_all(&ok(TWO));
        store.begin_fetch_by_id(3);

        let text = render(&store);
        assert!(!text.contains("Ana"));
        assert!(!text.contains("Loading clients..."));

        let pending = store.begin_fetch_by_id(4).unwrap();
        store.complete(pending.ticket, Err(ApiError::connectivity("reset")));
        assert!(render(&store).contains("1. Ana"));
    }

    #[test]
    fn shows_empty_notice_once_loaded() {
        let mut store = store();
        store.fetch_all(&ok("[]"));
        assert!(render(&store).contains("No clients available."));
    }

    #[test]
    fn shows_error_banner_with_retry_hint() {
        let mut store = store();
        store.fetch_all(&Fixed(Err(ApiError::connectivity("refused"))));

        let text = render(&store);
        assert!(text.contains("[error] Failed to load clients: could not connect to the server"));
        assert!(text.contains("`refresh`"));
        assert!(!text.contains("No clients available."));
    }
}
