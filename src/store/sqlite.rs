use async_trait::async_trait;

use super::Store;
use crate::db::{CaixaCreate, CaixaPatch, DbActorHandle, DbCaixa, DbItem, ItemCreate, ItemPatch};
use crate::error::AcervoError;

#[async_trait]
impl Store for DbActorHandle {
    async fn list_itens(&self, nome: Option<&str>) -> Result<Vec<DbItem>, AcervoError> {
        DbActorHandle::list_itens(self, nome.map(str::to_string)).await
    }

    async fn get_item(&self, id: i64) -> Result<Option<DbItem>, AcervoError> {
        DbActorHandle::get_item(self, id).await
    }

    async fn insert_item(&self, create: ItemCreate) -> Result<i64, AcervoError> {
        self.create_item(create).await
    }

    async fn update_item(&self, id: i64, patch: ItemPatch) -> Result<u64, AcervoError> {
        self.patch_item(id, patch).await
    }

    async fn delete_item(&self, id: i64) -> Result<u64, AcervoError> {
        DbActorHandle::delete_item(self, id).await
    }

    async fn list_caixas(&self) -> Result<Vec<DbCaixa>, AcervoError> {
        DbActorHandle::list_caixas(self).await
    }

    async fn get_caixa(&self, id: i64) -> Result<Option<DbCaixa>, AcervoError> {
        DbActorHandle::get_caixa(self, id).await
    }

    async fn insert_caixa(&self, create: CaixaCreate) -> Result<i64, AcervoError> {
        self.create_caixa(create).await
    }

    async fn update_caixa(&self, id: i64, patch: CaixaPatch) -> Result<u64, AcervoError> {
        self.patch_caixa(id, patch).await
    }

    async fn delete_caixa(&self, id: i64) -> Result<u64, AcervoError> {
        DbActorHandle::delete_caixa(self, id).await
    }
}
