use crate::db::DbItem;
use crate::error::{AcervoError, ApiError};
use crate::server::PathId;
use crate::server::router::AcervoState;
use acervo_schema::{ItemEnvelope, ItemQuery, MessageBody};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::info;

use super::extract::{ItemUpdate, NewItem};

const LIST_FAILED: &str = "Erro ao buscar itens";
const GET_FAILED: &str = "Erro ao buscar item";
const SAVE_FAILED: &str = "Erro ao salvar item";
const UPDATE_FAILED: &str = "Erro ao atualizar item.";
const DELETE_FAILED: &str = "Erro ao deletar item.";

const NOT_FOUND: &str = "Item não encontrado.";
const NOT_FOUND_FOR_UPDATE: &str = "Item não encontrado para atualização.";
const NOT_FOUND_FOR_DELETE: &str = "Item não encontrado no banco de dados.";

/// GET /itens[?nome=...]
pub async fn list_itens(
    State(state): State<AcervoState>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<Vec<DbItem>>, ApiError> {
    let itens = state
        .store
        .list_itens(query.search())
        .await
        .map_err(|e| ApiError::store(LIST_FAILED, e))?;
    Ok(Json(itens))
}

/// GET /itens/{id}
pub async fn get_item(
    State(state): State<AcervoState>,
    id: PathId,
) -> Result<Json<DbItem>, ApiError> {
    let id = id.get().ok_or(ApiError::NotFound(NOT_FOUND))?;
    state
        .store
        .get_item(id)
        .await
        .map_err(|e| ApiError::store(GET_FAILED, e))?
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

/// POST /itens
///
/// Inserts, then re-reads the row so the response carries the stored values.
pub async fn create_item(
    State(state): State<AcervoState>,
    NewItem(create): NewItem,
) -> Result<(StatusCode, Json<ItemEnvelope<DbItem>>), ApiError> {
    let store = &state.store;
    let id = store
        .insert_item(create)
        .await
        .map_err(|e| ApiError::store(SAVE_FAILED, e))?;

    let item = store
        .get_item(id)
        .await
        .map_err(|e| ApiError::store(SAVE_FAILED, e))?
        .ok_or_else(|| {
            ApiError::store(
                SAVE_FAILED,
                AcervoError::UnexpectedError(format!("item {id} missing right after insert")),
            )
        })?;

    info!(id, "item created");
    Ok((
        StatusCode::CREATED,
        Json(ItemEnvelope {
            message: "Item criado e salvo em disco!".to_string(),
            item,
        }),
    ))
}

/// PUT /itens/{id}
pub async fn update_item(
    State(state): State<AcervoState>,
    id: PathId,
    ItemUpdate(patch): ItemUpdate,
) -> Result<Json<ItemEnvelope<DbItem>>, ApiError> {
    let id = id.get().ok_or(ApiError::NotFound(NOT_FOUND_FOR_UPDATE))?;
    let store = &state.store;

    let affected = store
        .update_item(id, patch)
        .await
        .map_err(|e| ApiError::store(UPDATE_FAILED, e))?;
    if affected == 0 {
        return Err(ApiError::NotFound(NOT_FOUND_FOR_UPDATE));
    }

    // A delete racing in between update and re-read also lands here.
    let item = store
        .get_item(id)
        .await
        .map_err(|e| ApiError::store(UPDATE_FAILED, e))?
        .ok_or(ApiError::NotFound(NOT_FOUND_FOR_UPDATE))?;

    Ok(Json(ItemEnvelope {
        message: format!("Item com ID {id} atualizado."),
        item,
    }))
}

/// DELETE /itens/{id}
pub async fn delete_item(
    State(state): State<AcervoState>,
    id: PathId,
) -> Result<Json<MessageBody>, ApiError> {
    let id = id.get().ok_or(ApiError::NotFound(NOT_FOUND_FOR_DELETE))?;

    let affected = state
        .store
        .delete_item(id)
        .await
        .map_err(|e| ApiError::store_opaque(DELETE_FAILED, e))?;
    if affected == 0 {
        return Err(ApiError::NotFound(NOT_FOUND_FOR_DELETE));
    }

    info!(id, "item deleted");
    Ok(Json(MessageBody::new(format!(
        "Item com ID {id} removido do banco de dados."
    ))))
}
