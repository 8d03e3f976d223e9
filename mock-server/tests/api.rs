use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_db, empty_db, ClientConsumption, ErrorBody};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_clients_returns_seeded_records() {
    let resp = app().oneshot(get("/client/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let clients: Vec<ClientConsumption> = body_json(resp).await;
    assert_eq!(clients.len(), 10);
    assert_eq!(clients[0].id, 1);
    assert_eq!(clients[0].client_name, "Juan Pérez García");
    assert_eq!(clients[0].currency, "USD");
}

#[tokio::test]
async fn list_clients_without_trailing_slash() {
    let resp = app().oneshot(get("/client")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let clients: Vec<ClientConsumption> = body_json(resp).await;
    assert_eq!(clients.len(), 10);
}

#[tokio::test]
async fn list_clients_empty() {
    let resp = app_with_db(empty_db()).oneshot(get("/client/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let clients: Vec<ClientConsumption> = body_json(resp).await;
    assert!(clients.is_empty());
}

// --- get ---

#[tokio::test]
async fn get_client_returns_record() {
    let resp = app().oneshot(get("/client/4")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let client: ClientConsumption = body_json(resp).await;
    assert_eq!(client.id, 4);
    assert_eq!(client.client_name, "Ana González Torres");
    assert_eq!(client.balance, 250.75);
    assert_eq!(client.data_unit, "GB");
    assert_eq!(client.minutes_unit, "Min");
}

#[tokio::test]
async fn get_client_response_has_every_schema_field() {
    let resp = app().oneshot(get("/client/1")).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();

    for field in [
        "client_name",
        "balance",
        "currency",
        "data_used",
        "data_total",
        "data_unit",
        "minutes_used",
        "minutes_total",
        "minutes_unit",
    ] {
        assert!(body.get(field).is_some(), "missing field {field}");
    }
    assert!(body["balance"].is_number());
    assert!(body["client_name"].is_string());
}

#[tokio::test]
async fn get_client_not_found() {
    let resp = app().oneshot(get("/client/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["code"], 404);
    assert_eq!(body["status"], "Not Found");
    assert_eq!(body["message"], "Client not found");

    let resp = app().oneshot(get("/client/999")).await.unwrap();
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body, ErrorBody::new(StatusCode::NOT_FOUND, "Client not found"));
}

#[tokio::test]
async fn get_client_non_integer_id_returns_400() {
    let resp = app().oneshot(get("/client/abc")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- shared state ---

#[tokio::test]
async fn inserted_client_is_visible_through_shared_db() {
    use tower::Service;

    let db = empty_db();
    let mut app = app_with_db(db.clone()).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/client/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let seeded = mock_server::seeded_db();
    let first = seeded.read().await[&1].clone();
    db.write().await.insert(1, first.clone());

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/client/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: ClientConsumption = body_json(resp).await;
    assert_eq!(fetched, first);
}
