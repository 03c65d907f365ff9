//! Crate-private create/patch payloads shared by the HTTP layer and the stores.
//!
//! The `db` module re-exports these so external paths remain stable
//! (e.g. `acervo::db::CaixaPatch`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Abstraction for applying a patch payload to one row of its table.
///
/// Returns the number of rows matched by `id`.
#[async_trait]
pub trait DbPatchable {
    async fn apply_patch(
        &self,
        pool: &SqlitePool,
        id: i64,
    ) -> Result<u64, crate::error::AcervoError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCreate {
    pub nome: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    /// `None` => do not change; `Some(v)` => update
    pub nome: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaixaCreate {
    pub nome: String,
    pub tipo: String,
    pub herois: i64,
    pub nemeis: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaixaPatch {
    /// `None` => do not change; `Some(v)` => update
    pub nome: Option<String>,
    /// `None` => do not change; `Some(v)` => update
    pub tipo: Option<String>,
    pub herois: Option<i64>,
    pub nemeis: Option<i64>,
}

impl From<acervo_schema::CaixaPatchBody> for CaixaPatch {
    fn from(body: acervo_schema::CaixaPatchBody) -> Self {
        let acervo_schema::CaixaPatchBody {
            nome,
            tipo,
            herois,
            nemeis,
        } = body;
        Self {
            nome,
            tipo,
            herois,
            nemeis,
        }
    }
}
