use crate::server::router::AcervoState;
use axum::{Router, routing::get};

pub mod extract;
pub mod handlers;

pub(crate) const MISSING_NOME_ON_CREATE: &str = "O item deve ter um campo \"nome\".";
pub(crate) const MISSING_NOME_ON_UPDATE: &str =
    "O corpo da requisição deve conter o campo \"nome\".";

pub fn router() -> Router<AcervoState> {
    Router::new()
        .route(
            "/itens",
            get(handlers::list_itens).post(handlers::create_item),
        )
        .route(
            "/itens/{id}",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
}
