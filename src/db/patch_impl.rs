//! `ItemPatch` / `CaixaPatch` -> `DbPatchable` implementations.
//!
//! This sits in the `db` module because it contains SQL/table knowledge.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::AcervoError;
use crate::patches::{CaixaPatch, DbPatchable, ItemPatch};

#[async_trait]
impl DbPatchable for ItemPatch {
    async fn apply_patch(&self, pool: &SqlitePool, id: i64) -> Result<u64, AcervoError> {
        let ItemPatch { nome } = self.clone();
        let nome_set = nome.is_some();

        let res = sqlx::query(
            r#"
            UPDATE itens
            SET
                nome = COALESCE(?, nome)
            WHERE id = ?
            "#,
        )
        .bind(nome)
        .bind(id)
        .execute(pool)
        .await?;

        let affected = res.rows_affected();
        debug!(table = "itens", id, affected, nome_set, "db patch applied");

        Ok(affected)
    }
}

#[async_trait]
impl DbPatchable for CaixaPatch {
    async fn apply_patch(&self, pool: &SqlitePool, id: i64) -> Result<u64, AcervoError> {
        let CaixaPatch {
            nome,
            tipo,
            herois,
            nemeis,
        } = self.clone();

        let nome_set = nome.is_some();
        let tipo_set = tipo.is_some();
        let herois_set = herois.is_some();
        let nemeis_set = nemeis.is_some();

        let res = sqlx::query(
            r#"
            UPDATE caixas
            SET
                nome = COALESCE(?, nome),
                tipo = COALESCE(?, tipo),
                herois = COALESCE(?, herois),
                nemeis = COALESCE(?, nemeis)
            WHERE id = ?
            "#,
        )
        .bind(nome)
        .bind(tipo)
        .bind(herois)
        .bind(nemeis)
        .bind(id)
        .execute(pool)
        .await?;

        let affected = res.rows_affected();
        debug!(
            table = "caixas",
            id,
            affected,
            nome_set,
            tipo_set,
            herois_set,
            nemeis_set,
            "db patch applied"
        );

        Ok(affected)
    }
}
