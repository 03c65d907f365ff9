use crate::server::router::AcervoState;
use axum::{Router, routing::get};

pub mod extract;
pub mod handlers;

pub(crate) const MISSING_REQUIRED_FIELDS: &str = "A caixa deve ter os campos \"nome\" e \"tipo\".";
pub(crate) const EMPTY_PATCH: &str =
    "O corpo da requisição deve conter ao menos um campo para atualizar.";

pub fn router() -> Router<AcervoState> {
    Router::new()
        .route(
            "/caixas",
            get(handlers::list_caixas).post(handlers::create_caixa),
        )
        .route(
            "/caixas/{id}",
            get(handlers::get_caixa)
                .put(handlers::update_caixa)
                .delete(handlers::delete_caixa),
        )
}
