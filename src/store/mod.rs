//! Persistence abstraction shared by every handler.
//!
//! Handlers only see `dyn Store`; the backing engine is picked at start-up
//! (`basic.store` in config.toml).

mod like;
mod memory;
mod sqlite;

pub use like::like_matches;
pub use memory::MemoryStore;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::{BasicConfig, StoreBackend};
use crate::db::{CaixaCreate, CaixaPatch, DbCaixa, DbItem, ItemCreate, ItemPatch};
use crate::error::AcervoError;

/// Row-level primitives for the `itens` and `caixas` resources.
///
/// Inserts return the generated id, updates and deletes return the number of
/// rows matched by `id`.
#[async_trait]
pub trait Store: Send + Sync {
    /// All items ordered by id; `nome` keeps only rows matching `LIKE %nome%`.
    async fn list_itens(&self, nome: Option<&str>) -> Result<Vec<DbItem>, AcervoError>;

    async fn get_item(&self, id: i64) -> Result<Option<DbItem>, AcervoError>;

    async fn insert_item(&self, create: ItemCreate) -> Result<i64, AcervoError>;

    async fn update_item(&self, id: i64, patch: ItemPatch) -> Result<u64, AcervoError>;

    async fn delete_item(&self, id: i64) -> Result<u64, AcervoError>;

    async fn list_caixas(&self) -> Result<Vec<DbCaixa>, AcervoError>;

    async fn get_caixa(&self, id: i64) -> Result<Option<DbCaixa>, AcervoError>;

    async fn insert_caixa(&self, create: CaixaCreate) -> Result<i64, AcervoError>;

    async fn update_caixa(&self, id: i64, patch: CaixaPatch) -> Result<u64, AcervoError>;

    async fn delete_caixa(&self, id: i64) -> Result<u64, AcervoError>;
}

pub type SharedStore = Arc<dyn Store>;

/// Build the store selected by `basic.store`.
pub async fn open(basic: &BasicConfig) -> Result<SharedStore, AcervoError> {
    match basic.store {
        StoreBackend::Sqlite => {
            let handle = crate::db::spawn(&basic.database_url).await?;
            info!(database_url = %basic.database_url, "sqlite store ready");
            Ok(Arc::new(handle))
        }
        StoreBackend::Memory => {
            let store = if basic.seed_sample_items {
                MemoryStore::with_sample_items()
            } else {
                MemoryStore::new()
            };
            info!(seeded = basic.seed_sample_items, "memory store ready");
            Ok(Arc::new(store))
        }
    }
}
