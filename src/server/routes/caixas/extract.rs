use crate::error::ApiError;
use crate::patches::{CaixaCreate, CaixaPatch};
use crate::utils::logging::debug_payload;
use acervo_schema::{CaixaInput, CaixaPatchBody};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use tracing::debug;

use super::{EMPTY_PATCH, MISSING_REQUIRED_FIELDS};

/// Validated body of `POST /caixas`.
///
/// `herois` and `nemeis` fall back to 0 only when absent or `null`.
pub struct NewCaixa(pub CaixaCreate);

impl<S> FromRequest<S> for NewCaixa
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<CaixaInput>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(error = %rejection, "caixa body rejected");
                ApiError::Validation(MISSING_REQUIRED_FIELDS)
            })?;

        debug_payload("caixa body", &body);

        let Some((nome, tipo)) = body.required() else {
            return Err(ApiError::Validation(MISSING_REQUIRED_FIELDS));
        };

        Ok(NewCaixa(CaixaCreate {
            nome: nome.to_string(),
            tipo: tipo.to_string(),
            herois: body.herois_or_default(),
            nemeis: body.nemeis_or_default(),
        }))
    }
}

/// Validated body of `PUT /caixas/{id}`.
///
/// Unknown keys are dropped; a body that sets none of the mutable columns
/// (including an empty body) is rejected.
pub struct CaixaUpdate(pub CaixaPatch);

impl<S> FromRequest<S> for CaixaUpdate
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<CaixaPatchBody>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(error = %rejection, "caixa patch rejected");
                ApiError::Validation(EMPTY_PATCH)
            })?;

        debug_payload("caixa patch", &body);

        if body.is_empty() {
            return Err(ApiError::Validation(EMPTY_PATCH));
        }
        Ok(CaixaUpdate(CaixaPatch::from(body)))
    }
}
