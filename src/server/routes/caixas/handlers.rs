use crate::db::DbCaixa;
use crate::error::{AcervoError, ApiError};
use crate::server::PathId;
use crate::server::router::AcervoState;
use acervo_schema::{CaixaEnvelope, MessageBody};
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use super::extract::{CaixaUpdate, NewCaixa};

const CREATE_FAILED: &str = "Erro ao criar caixa";
const LIST_FAILED: &str = "Erro ao buscar caixas";
const GET_FAILED: &str = "Erro ao buscar caixa";
const UPDATE_FAILED: &str = "Erro ao atualizar caixa.";
const DELETE_FAILED: &str = "Erro ao deletar caixa.";

const NOT_FOUND: &str = "Caixa não encontrada.";
const NOT_FOUND_FOR_UPDATE: &str = "Caixa não encontrada para atualização.";

/// POST /caixas
pub async fn create_caixa(
    State(state): State<AcervoState>,
    NewCaixa(create): NewCaixa,
) -> Result<(StatusCode, Json<CaixaEnvelope<DbCaixa>>), ApiError> {
    let store = &state.store;
    let id = store
        .insert_caixa(create)
        .await
        .map_err(|e| ApiError::store(CREATE_FAILED, e))?;

    let caixa = store
        .get_caixa(id)
        .await
        .map_err(|e| ApiError::store(CREATE_FAILED, e))?
        .ok_or_else(|| {
            ApiError::store(
                CREATE_FAILED,
                AcervoError::UnexpectedError(format!("caixa {id} missing right after insert")),
            )
        })?;

    info!(id, tipo = %caixa.tipo, "caixa created");
    Ok((
        StatusCode::CREATED,
        Json(CaixaEnvelope {
            message: "Caixa criada com sucesso!".to_string(),
            caixa,
        }),
    ))
}

/// GET /caixas
pub async fn list_caixas(
    State(state): State<AcervoState>,
) -> Result<Json<Vec<DbCaixa>>, ApiError> {
    let caixas = state
        .store
        .list_caixas()
        .await
        .map_err(|e| ApiError::store(LIST_FAILED, e))?;
    Ok(Json(caixas))
}

/// GET /caixas/{id}
pub async fn get_caixa(
    State(state): State<AcervoState>,
    id: PathId,
) -> Result<Json<DbCaixa>, ApiError> {
    let id = id.get().ok_or(ApiError::NotFound(NOT_FOUND))?;
    state
        .store
        .get_caixa(id)
        .await
        .map_err(|e| ApiError::store(GET_FAILED, e))?
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

/// PUT /caixas/{id}
pub async fn update_caixa(
    State(state): State<AcervoState>,
    id: PathId,
    CaixaUpdate(patch): CaixaUpdate,
) -> Result<Json<CaixaEnvelope<DbCaixa>>, ApiError> {
    let id = id.get().ok_or(ApiError::NotFound(NOT_FOUND_FOR_UPDATE))?;
    let store = &state.store;

    let affected = store
        .update_caixa(id, patch)
        .await
        .map_err(|e| ApiError::store(UPDATE_FAILED, e))?;
    if affected == 0 {
        return Err(ApiError::NotFound(NOT_FOUND_FOR_UPDATE));
    }

    let caixa = store
        .get_caixa(id)
        .await
        .map_err(|e| ApiError::store(UPDATE_FAILED, e))?
        .ok_or(ApiError::NotFound(NOT_FOUND_FOR_UPDATE))?;

    Ok(Json(CaixaEnvelope {
        message: format!("Caixa com ID {id} atualizada."),
        caixa,
    }))
}

/// DELETE /caixas/{id}
pub async fn delete_caixa(
    State(state): State<AcervoState>,
    id: PathId,
) -> Result<Json<MessageBody>, ApiError> {
    let id = id.get().ok_or(ApiError::NotFound(NOT_FOUND))?;

    let affected = state
        .store
        .delete_caixa(id)
        .await
        .map_err(|e| ApiError::store(DELETE_FAILED, e))?;
    if affected == 0 {
        return Err(ApiError::NotFound(NOT_FOUND));
    }

    info!(id, "caixa deleted");
    Ok(Json(MessageBody::new(format!("Caixa com ID {id} removida."))))
}
