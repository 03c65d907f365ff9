mod common;

use axum::{Router, http::StatusCode};
use common::{memory_app, send, send_raw, sqlite_app};
use serde_json::{Value, json};

fn nomes(list: &Value) -> Vec<&str> {
    list.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|item| item["nome"].as_str().expect("nome is a string"))
        .collect()
}

/// Full create/list/update/delete walk; identical for every store backend.
async fn exercise_item_crud(app: &Router) {
    // 1) missing nome -> 400 and nothing stored
    let resp = send(app, "POST", "/itens", Some(json!({ "descricao": "x" }))).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, json!({ "message": "O item deve ter um campo \"nome\"." }));

    let resp = send(app, "POST", "/itens", Some(json!({ "nome": "" }))).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = send(app, "GET", "/itens", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!([]));

    // 2) create two items
    let resp = send(app, "POST", "/itens", Some(json!({ "nome": "Foo Bar" }))).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["message"], "Item criado e salvo em disco!");
    let foo_id = resp.body["item"]["id"].as_i64().expect("id is an integer");
    assert!(foo_id > 0);
    assert_eq!(resp.body["item"]["nome"], "Foo Bar");

    let resp = send(app, "POST", "/itens", Some(json!({ "nome": "Mouse sem fio" }))).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let mouse_id = resp.body["item"]["id"].as_i64().expect("id is an integer");
    assert_ne!(mouse_id, foo_id);

    // 3) list and substring search
    let resp = send(app, "GET", "/itens", None).await;
    assert_eq!(nomes(&resp.body), ["Foo Bar", "Mouse sem fio"]);

    let resp = send(app, "GET", "/itens?nome=oo", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(nomes(&resp.body), ["Foo Bar"]);

    let resp = send(app, "GET", "/itens?nome=MOUSE", None).await;
    assert_eq!(nomes(&resp.body), ["Mouse sem fio"]);

    let resp = send(app, "GET", "/itens?nome=", None).await;
    assert_eq!(nomes(&resp.body).len(), 2);

    let resp = send(app, "GET", "/itens?nome=teclado", None).await;
    assert_eq!(resp.body, json!([]));

    // 4) update
    let resp = send(
        app,
        "PUT",
        &format!("/itens/{foo_id}"),
        Some(json!({ "nome": "X" })),
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.body,
        json!({
            "message": format!("Item com ID {foo_id} atualizado."),
            "item": { "id": foo_id, "nome": "X" }
        })
    );

    let resp = send(app, "GET", &format!("/itens/{foo_id}"), None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!({ "id": foo_id, "nome": "X" }));

    let resp = send(app, "PUT", "/itens/9999", Some(json!({ "nome": "Y" }))).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, json!({ "message": "Item não encontrado para atualização." }));

    let resp = send(app, "PUT", &format!("/itens/{foo_id}"), Some(json!({}))).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.body,
        json!({ "message": "O corpo da requisição deve conter o campo \"nome\"." })
    );

    // 5) delete
    let resp = send(app, "DELETE", &format!("/itens/{mouse_id}"), None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.body,
        json!({ "message": format!("Item com ID {mouse_id} removido do banco de dados.") })
    );

    let resp = send(app, "GET", "/itens", None).await;
    assert_eq!(nomes(&resp.body), ["X"]);

    let resp = send(app, "DELETE", &format!("/itens/{mouse_id}"), None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, json!({ "message": "Item não encontrado no banco de dados." }));

    let resp = send(app, "GET", "/itens", None).await;
    assert_eq!(nomes(&resp.body), ["X"]);

    // 6) the deleted (newest) id is not handed out again
    let resp = send(app, "POST", "/itens", Some(json!({ "nome": "Teclado" }))).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let teclado_id = resp.body["item"]["id"].as_i64().expect("id is an integer");
    assert!(teclado_id > mouse_id);
}

#[tokio::test]
async fn item_crud_over_sqlite() {
    let (app, _db) = sqlite_app("itens-crud").await;
    exercise_item_crud(&app).await;
}

#[tokio::test]
async fn item_crud_over_memory_store() {
    let app = memory_app();
    exercise_item_crud(&app).await;
}

#[tokio::test]
async fn non_numeric_ids_behave_like_missing_rows() {
    let (app, _db) = sqlite_app("itens-ids").await;

    let resp = send(&app, "POST", "/itens", Some(json!({ "nome": "Livro" }))).await;
    let id = resp.body["item"]["id"].as_i64().expect("id is an integer");

    let resp = send(&app, "GET", "/itens/abc", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = send(&app, "PUT", "/itens/abc", Some(json!({ "nome": "Z" }))).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = send(&app, "DELETE", "/itens/abc", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    // Body validation runs before the id is looked at.
    let resp = send(&app, "PUT", "/itens/abc", Some(json!({}))).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    // Leading digits are honoured.
    let resp = send(&app, "GET", &format!("/itens/{id}abc"), None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["nome"], "Livro");

    let resp = send(&app, "GET", "/itens", None).await;
    assert_eq!(nomes(&resp.body), ["Livro"]);
}

#[tokio::test]
async fn malformed_item_bodies_are_rejected() {
    let app = memory_app();

    let resp = send_raw(&app, "POST", "/itens", Some("application/json"), "not-json").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, json!({ "message": "O item deve ter um campo \"nome\"." }));

    let resp = send_raw(&app, "POST", "/itens", None, r#"{"nome":"Sem content-type"}"#).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = send(&app, "POST", "/itens", Some(json!(["nome"]))).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = send(&app, "POST", "/itens", Some(json!({ "nome": 42 }))).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = send(&app, "GET", "/itens", None).await;
    assert_eq!(resp.body, json!([]));
}

#[tokio::test]
async fn unknown_routes_fall_back_to_404_and_carry_request_id() {
    let app = memory_app();

    let resp = send(&app, "GET", "/produtos", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, Value::Null);
    assert!(resp.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn client_request_id_is_echoed() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = memory_app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/itens")
                .header("x-request-id", "req-123")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-123")
    );
}

#[tokio::test]
async fn oversized_request_id_is_replaced() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = memory_app();
    let long = "x".repeat(200);
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/itens")
                .header("x-request-id", long.as_str())
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    let echoed = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id missing");
    assert_ne!(echoed, long);
    assert_eq!(echoed.len(), 16);
}

#[tokio::test]
async fn zstd_encoded_bodies_are_decompressed() {
    let app = memory_app();

    let body = json!({ "nome": "Caixa comprimida" }).to_string();
    let compressed = zstd::encode_all(body.as_bytes(), 3).expect("zstd encode failed");
    let resp = common::send_bytes(
        &app,
        "POST",
        "/itens",
        &[
            ("content-type", "application/json"),
            ("content-encoding", "zstd"),
        ],
        compressed,
    )
    .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["item"]["nome"], "Caixa comprimida");

    let resp = send(&app, "GET", "/itens", None).await;
    assert_eq!(nomes(&resp.body), ["Caixa comprimida"]);
}
