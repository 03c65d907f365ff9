use crate::server::routes::{caixas, itens};
use crate::store::SharedStore;

use axum::{
    Router,
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
};
use base64::Engine as _;
use std::time::Instant;
use tower_http::decompression::RequestDecompressionLayer;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request id sent by the client, if usable as a response header value.
fn client_request_id(headers: &HeaderMap) -> Option<HeaderValue> {
    headers
        .get(X_REQUEST_ID)
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN && v.to_str().is_ok())
        .cloned()
}

/// 12 random bytes as unpadded base64url (16 chars).
fn new_request_id() -> HeaderValue {
    let bytes: [u8; 12] = rand::random();
    let id = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes);
    HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("-"))
}

#[derive(Clone)]
pub struct AcervoState {
    pub store: SharedStore,
}

impl AcervoState {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// One structured event per request; level follows the status class.
async fn access_log(req: Request, next: Next) -> Response {
    let request_id = client_request_id(req.headers()).unwrap_or_else(new_request_id);
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let version = req.version();
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();

    let start = Instant::now();
    let mut resp = next.run(req).await;
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    let status = resp.status().as_u16();
    let rid = request_id.to_str().unwrap_or("-");
    macro_rules! request_event {
        ($level:ident) => {
            $level!(
                status,
                request_id = rid,
                method = %method,
                path = %path,
                ?version,
                latency_ms,
                user_agent = %user_agent,
                "request served"
            )
        };
    }
    match resp.status() {
        s if s.is_server_error() => request_event!(error),
        s if s.is_client_error() => request_event!(warn),
        _ => request_event!(info),
    }

    resp.headers_mut().insert(X_REQUEST_ID, request_id);
    resp
}

pub fn acervo_router(state: AcervoState) -> Router {
    Router::new()
        .merge(itens::router())
        .merge(caixas::router())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
        .layer(RequestDecompressionLayer::new())
}
