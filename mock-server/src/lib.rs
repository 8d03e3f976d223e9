use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConsumption {
    pub id: u32,
    pub client_name: String,
    pub balance: f64,
    pub currency: String,
    pub data_used: f64,
    pub data_total: f64,
    pub data_unit: String,
    pub minutes_used: f64,
    pub minutes_total: f64,
    pub minutes_unit: String,
}

/// Error envelope in the backend's shape: numeric `code`, reason phrase in
/// `status`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub status: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            status: code.canonical_reason().unwrap_or_default().to_string(),
            message: message.into(),
        }
    }
}

pub type Db = Arc<RwLock<BTreeMap<u32, ClientConsumption>>>;

pub fn app() -> Router {
    app_with_db(seeded_db())
}

pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route("/client", get(list_clients))
        .route("/client/", get(list_clients))
        .route("/client/{id}", get(get_client))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_db(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_db(db)).await
}

pub fn empty_db() -> Db {
    Arc::new(RwLock::new(BTreeMap::new()))
}

/// Sample subscribers, ids 1..=10 in insertion order.
pub fn seeded_db() -> Db {
    let rows: [(&str, f64, f64, f64, f64, f64); 10] = [
        ("Juan Pérez García", 125.50, 2.3, 5.0, 180.5, 500.0),
        ("María López Rodríguez", 89.25, 4.7, 10.0, 450.0, 1000.0),
        ("Carlos Martínez Silva", 0.00, 8.9, 15.0, 890.0, 2000.0),
        ("Ana González Torres", 250.75, 1.2, 3.0, 95.0, 300.0),
        ("Roberto Fernández Díaz", 45.80, 12.5, 20.0, 1200.0, 3000.0),
        ("Laura Sánchez Moreno", 175.30, 0.8, 2.0, 45.0, 200.0),
        ("Miguel Ruiz Castro", 5.50, 6.2, 8.0, 650.0, 1500.0),
        ("Isabel Jiménez Vega", 300.00, 0.5, 1.0, 25.0, 100.0),
        ("David Herrera Luna", 78.90, 3.8, 6.0, 320.0, 800.0),
        ("Carmen Vargas Flores", 0.00, 9.5, 12.0, 1100.0, 2500.0),
    ];
    let clients = rows
        .into_iter()
        .zip(1..)
        .map(|((name, balance, data_used, data_total, minutes_used, minutes_total), id)| {
            let client = ClientConsumption {
                id,
                client_name: name.to_string(),
                balance,
                currency: "USD".to_string(),
                data_used,
                data_total,
                data_unit: "GB".to_string(),
                minutes_used,
                minutes_total,
                minutes_unit: "Min".to_string(),
            };
            (id, client)
        })
        .collect();
    Arc::new(RwLock::new(clients))
}

async fn list_clients(State(db): State<Db>) -> Json<Vec<ClientConsumption>> {
    let clients = db.read().await;
    tracing::info!(count = clients.len(), "listing clients");
    Json(clients.values().cloned().collect())
}

async fn get_client(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> Result<Json<ClientConsumption>, (StatusCode, Json<ErrorBody>)> {
    tracing::info!(id, "looking up client");
    let clients = db.read().await;
    clients.get(&id).cloned().map(Json).ok_or_else(|| {
        tracing::warn!(id, "client not found");
        (
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new(StatusCode::NOT_FOUND, "Client not found")),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_db_has_ten_clients_in_id_order() {
        let db = seeded_db();
        let clients = db.read().await;
        assert_eq!(clients.len(), 10);
        let ids: Vec<u32> = clients.keys().copied().collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(clients[&1].client_name, "Juan Pérez García");
        assert_eq!(clients[&10].client_name, "Carmen Vargas Flores");
    }

    #[tokio::test]
    async fn seeded_usage_never_exceeds_plan() {
        let db = seeded_db();
        for client in db.read().await.values() {
            assert!(client.data_used <= client.data_total, "{}", client.client_name);
            assert!(client.minutes_used <= client.minutes_total, "{}", client.client_name);
        }
    }

    #[test]
    fn client_serializes_with_schema_field_names() {
        let client = ClientConsumption {
            id: 1,
            client_name: "Test".to_string(),
            balance: 1.5,
            currency: "USD".to_string(),
            data_used: 1.0,
            data_total: 2.0,
            data_unit: "GB".to_string(),
            minutes_used: 3.0,
            minutes_total: 4.0,
            minutes_unit: "Min".to_string(),
        };
        let json = serde_json::to_value(&client).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["client_name"], "Test");
        assert_eq!(json["balance"], 1.5);
        assert_eq!(json["minutes_unit"], "Min");
    }
}
