use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Store, like_matches};
use crate::db::{CaixaCreate, CaixaPatch, DbCaixa, DbItem, ItemCreate, ItemPatch};
use crate::error::AcervoError;

/// Sample rows the in-process list shipped with.
const SAMPLE_ITEMS: [&str; 2] = ["Livro de Node.js", "Mouse sem fio"];

#[derive(Default)]
struct Tables {
    itens: BTreeMap<i64, DbItem>,
    caixas: BTreeMap<i64, DbCaixa>,
    // Last id handed out per table; never decremented so ids are not reused.
    last_item_id: i64,
    last_caixa_id: i64,
}

/// In-process store keyed by id.
///
/// Ids only grow, so map order is insertion order.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the two sample items (ids 1 and 2).
    pub fn with_sample_items() -> Self {
        let mut tables = Tables::default();
        for nome in SAMPLE_ITEMS {
            tables.last_item_id += 1;
            let id = tables.last_item_id;
            tables.itens.insert(
                id,
                DbItem {
                    id,
                    nome: nome.to_string(),
                },
            );
        }
        Self {
            tables: RwLock::new(tables),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_itens(&self, nome: Option<&str>) -> Result<Vec<DbItem>, AcervoError> {
        let tables = self.tables.read().await;
        let pattern = nome.map(|nome| format!("%{nome}%"));
        let rows = tables
            .itens
            .values()
            .filter(|item| {
                pattern
                    .as_deref()
                    .is_none_or(|pattern| like_matches(pattern, &item.nome))
            })
            .cloned()
            .collect();
        Ok(rows)
    }

    async fn get_item(&self, id: i64) -> Result<Option<DbItem>, AcervoError> {
        Ok(self.tables.read().await.itens.get(&id).cloned())
    }

    async fn insert_item(&self, create: ItemCreate) -> Result<i64, AcervoError> {
        let mut tables = self.tables.write().await;
        tables.last_item_id += 1;
        let id = tables.last_item_id;
        tables.itens.insert(
            id,
            DbItem {
                id,
                nome: create.nome,
            },
        );
        debug!(table = "itens", id, "memory row inserted");
        Ok(id)
    }

    async fn update_item(&self, id: i64, patch: ItemPatch) -> Result<u64, AcervoError> {
        let mut tables = self.tables.write().await;
        let Some(item) = tables.itens.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(nome) = patch.nome {
            item.nome = nome;
        }
        Ok(1)
    }

    async fn delete_item(&self, id: i64) -> Result<u64, AcervoError> {
        let removed = self.tables.write().await.itens.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn list_caixas(&self) -> Result<Vec<DbCaixa>, AcervoError> {
        Ok(self.tables.read().await.caixas.values().cloned().collect())
    }

    async fn get_caixa(&self, id: i64) -> Result<Option<DbCaixa>, AcervoError> {
        Ok(self.tables.read().await.caixas.get(&id).cloned())
    }

    async fn insert_caixa(&self, create: CaixaCreate) -> Result<i64, AcervoError> {
        let mut tables = self.tables.write().await;
        tables.last_caixa_id += 1;
        let id = tables.last_caixa_id;
        let CaixaCreate {
            nome,
            tipo,
            herois,
            nemeis,
        } = create;
        tables.caixas.insert(
            id,
            DbCaixa {
                id,
                nome,
                tipo,
                herois,
                nemeis,
            },
        );
        debug!(table = "caixas", id, "memory row inserted");
        Ok(id)
    }

    async fn update_caixa(&self, id: i64, patch: CaixaPatch) -> Result<u64, AcervoError> {
        let mut tables = self.tables.write().await;
        let Some(caixa) = tables.caixas.get_mut(&id) else {
            return Ok(0);
        };
        let CaixaPatch {
            nome,
            tipo,
            herois,
            nemeis,
        } = patch;
        if let Some(nome) = nome {
            caixa.nome = nome;
        }
        if let Some(tipo) = tipo {
            caixa.tipo = tipo;
        }
        if let Some(herois) = herois {
            caixa.herois = herois;
        }
        if let Some(nemeis) = nemeis {
            caixa.nemeis = nemeis;
        }
        Ok(1)
    }

    async fn delete_caixa(&self, id: i64) -> Result<u64, AcervoError> {
        let removed = self.tables.write().await.caixas.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}
