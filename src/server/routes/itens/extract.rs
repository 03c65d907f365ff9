use crate::error::ApiError;
use crate::patches::{ItemCreate, ItemPatch};
use crate::utils::logging::debug_payload;
use acervo_schema::ItemInput;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use tracing::debug;

use super::{MISSING_NOME_ON_CREATE, MISSING_NOME_ON_UPDATE};

/// Deserialize an item body and require a non-empty `nome`.
///
/// Malformed JSON, a non-object body, or a missing/empty `nome` all reject
/// with `message` before the store is touched.
async fn required_nome<S>(
    req: Request,
    state: &S,
    message: &'static str,
) -> Result<String, ApiError>
where
    S: Send + Sync,
{
    let Json(body) = Json::<ItemInput>::from_request(req, state)
        .await
        .map_err(|rejection| {
            debug!(error = %rejection, "item body rejected");
            ApiError::Validation(message)
        })?;

    debug_payload("item body", &body);

    body.nome()
        .map(str::to_string)
        .ok_or(ApiError::Validation(message))
}

/// Validated body of `POST /itens`.
pub struct NewItem(pub ItemCreate);

impl<S> FromRequest<S> for NewItem
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let nome = required_nome(req, state, MISSING_NOME_ON_CREATE).await?;
        Ok(NewItem(ItemCreate { nome }))
    }
}

/// Validated body of `PUT /itens/{id}`.
pub struct ItemUpdate(pub ItemPatch);

impl<S> FromRequest<S> for ItemUpdate
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let nome = required_nome(req, state, MISSING_NOME_ON_UPDATE).await?;
        Ok(ItemUpdate(ItemPatch { nome: Some(nome) }))
    }
}
