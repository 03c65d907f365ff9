use crate::db::models::{DbCaixa, DbItem};
use crate::db::schema::migrate_up;
use crate::error::AcervoError;
use crate::patches::{CaixaCreate, CaixaPatch, DbPatchable, ItemCreate, ItemPatch};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::info;

type Reply<T> = RpcReplyPort<Result<T, AcervoError>>;

#[derive(Debug)]
pub enum DbActorMessage {
    /// List items, optionally filtered by a `nome` substring.
    ListItens(Option<String>, Reply<Vec<DbItem>>),

    /// Get one item by id.
    GetItem(i64, Reply<Option<DbItem>>),

    /// Insert an item and return its id.
    CreateItem(ItemCreate, Reply<i64>),

    /// Patch an item by id; replies with the matched row count.
    PatchItem(i64, ItemPatch, Reply<u64>),

    /// Delete an item by id; replies with the deleted row count.
    DeleteItem(i64, Reply<u64>),

    ListCaixas(Reply<Vec<DbCaixa>>),

    GetCaixa(i64, Reply<Option<DbCaixa>>),

    CreateCaixa(CaixaCreate, Reply<i64>),

    PatchCaixa(i64, CaixaPatch, Reply<u64>),

    DeleteCaixa(i64, Reply<u64>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn list_itens(&self, nome: Option<String>) -> Result<Vec<DbItem>, AcervoError> {
        ractor::call!(self.actor, DbActorMessage::ListItens, nome)
            .map_err(|e| AcervoError::RactorError(format!("DbActor ListItens RPC failed: {e}")))?
    }

    pub async fn get_item(&self, id: i64) -> Result<Option<DbItem>, AcervoError> {
        ractor::call!(self.actor, DbActorMessage::GetItem, id)
            .map_err(|e| AcervoError::RactorError(format!("DbActor GetItem RPC failed: {e}")))?
    }

    pub async fn create_item(&self, create: ItemCreate) -> Result<i64, AcervoError> {
        ractor::call!(self.actor, DbActorMessage::CreateItem, create)
            .map_err(|e| AcervoError::RactorError(format!("DbActor CreateItem RPC failed: {e}")))?
    }

    pub async fn patch_item(&self, id: i64, patch: ItemPatch) -> Result<u64, AcervoError> {
        ractor::call!(self.actor, DbActorMessage::PatchItem, id, patch)
            .map_err(|e| AcervoError::RactorError(format!("DbActor PatchItem RPC failed: {e}")))?
    }

    pub async fn delete_item(&self, id: i64) -> Result<u64, AcervoError> {
        ractor::call!(self.actor, DbActorMessage::DeleteItem, id)
            .map_err(|e| AcervoError::RactorError(format!("DbActor DeleteItem RPC failed: {e}")))?
    }

    pub async fn list_caixas(&self) -> Result<Vec<DbCaixa>, AcervoError> {
        ractor::call!(self.actor, DbActorMessage::ListCaixas)
            .map_err(|e| AcervoError::RactorError(format!("DbActor ListCaixas RPC failed: {e}")))?
    }

    pub async fn get_caixa(&self, id: i64) -> Result<Option<DbCaixa>, AcervoError> {
        ractor::call!(self.actor, DbActorMessage::GetCaixa, id)
            .map_err(|e| AcervoError::RactorError(format!("DbActor GetCaixa RPC failed: {e}")))?
    }

    pub async fn create_caixa(&self, create: CaixaCreate) -> Result<i64, AcervoError> {
        ractor::call!(self.actor, DbActorMessage::CreateCaixa, create).map_err(|e| {
            AcervoError::RactorError(format!("DbActor CreateCaixa RPC failed: {e}"))
        })?
    }

    pub async fn patch_caixa(&self, id: i64, patch: CaixaPatch) -> Result<u64, AcervoError> {
        ractor::call!(self.actor, DbActorMessage::PatchCaixa, id, patch).map_err(|e| {
            AcervoError::RactorError(format!("DbActor PatchCaixa RPC failed: {e}"))
        })?
    }

    pub async fn delete_caixa(&self, id: i64) -> Result<u64, AcervoError> {
        ractor::call!(self.actor, DbActorMessage::DeleteCaixa, id).map_err(|e| {
            AcervoError::RactorError(format!("DbActor DeleteCaixa RPC failed: {e}"))
        })?
    }

    /// Stop the actor; the pool is dropped with its state.
    pub fn stop(&self) {
        self.actor.stop(None);
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        // Every connection to `:memory:` opens its own database; pin a single one.
        let pool_opts = if is_in_memory(&database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_opts
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        let applied = migrate_up(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db migration failed: {e}")))?;

        info!(migrations_applied = applied.len(), "DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        let pool = &state.pool;
        match message {
            DbActorMessage::ListItens(nome, reply) => {
                let _ = reply.send(self.list_itens(pool, nome).await);
            }
            DbActorMessage::GetItem(id, reply) => {
                let _ = reply.send(self.get_item(pool, id).await);
            }
            DbActorMessage::CreateItem(create, reply) => {
                let _ = reply.send(self.create_item(pool, create).await);
            }
            DbActorMessage::PatchItem(id, patch, reply) => {
                let _ = reply.send(patch.apply_patch(pool, id).await);
            }
            DbActorMessage::DeleteItem(id, reply) => {
                let _ = reply.send(self.delete_row(pool, "itens", id).await);
            }
            DbActorMessage::ListCaixas(reply) => {
                let _ = reply.send(self.list_caixas(pool).await);
            }
            DbActorMessage::GetCaixa(id, reply) => {
                let _ = reply.send(self.get_caixa(pool, id).await);
            }
            DbActorMessage::CreateCaixa(create, reply) => {
                let _ = reply.send(self.create_caixa(pool, create).await);
            }
            DbActorMessage::PatchCaixa(id, patch, reply) => {
                let _ = reply.send(patch.apply_patch(pool, id).await);
            }
            DbActorMessage::DeleteCaixa(id, reply) => {
                let _ = reply.send(self.delete_row(pool, "caixas", id).await);
            }
        }
        Ok(())
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        state.pool.close().await;
        info!("DbActor stopped");
        Ok(())
    }
}

impl DbActor {
    async fn list_itens(
        &self,
        pool: &SqlitePool,
        nome: Option<String>,
    ) -> Result<Vec<DbItem>, AcervoError> {
        let rows = match nome {
            Some(nome) => {
                sqlx::query_as::<_, DbItem>(
                    r#"
                SELECT id, nome
                FROM itens
                WHERE nome LIKE ?
                ORDER BY id
                "#,
                )
                .bind(format!("%{nome}%"))
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DbItem>(
                    r#"
                SELECT id, nome
                FROM itens
                ORDER BY id
                "#,
                )
                .fetch_all(pool)
                .await?
            }
        };

        Ok(rows)
    }

    async fn get_item(&self, pool: &SqlitePool, id: i64) -> Result<Option<DbItem>, AcervoError> {
        let row = sqlx::query_as::<_, DbItem>(
            r#"
        SELECT id, nome
        FROM itens
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    async fn create_item(&self, pool: &SqlitePool, create: ItemCreate) -> Result<i64, AcervoError> {
        let id: i64 = sqlx::query_scalar(
            r#"
        INSERT INTO itens (nome)
        VALUES (?)
        RETURNING id
        "#,
        )
        .bind(create.nome)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    async fn list_caixas(&self, pool: &SqlitePool) -> Result<Vec<DbCaixa>, AcervoError> {
        let rows = sqlx::query_as::<_, DbCaixa>(
            r#"
        SELECT id, nome, tipo, herois, nemeis
        FROM caixas
        ORDER BY id
        "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn get_caixa(&self, pool: &SqlitePool, id: i64) -> Result<Option<DbCaixa>, AcervoError> {
        let row = sqlx::query_as::<_, DbCaixa>(
            r#"
        SELECT id, nome, tipo, herois, nemeis
        FROM caixas
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    async fn create_caixa(
        &self,
        pool: &SqlitePool,
        create: CaixaCreate,
    ) -> Result<i64, AcervoError> {
        let id: i64 = sqlx::query_scalar(
            r#"
        INSERT INTO caixas (nome, tipo, herois, nemeis)
        VALUES (?, ?, ?, ?)
        RETURNING id
        "#,
        )
        .bind(create.nome)
        .bind(create.tipo)
        .bind(create.herois)
        .bind(create.nemeis)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// `table` is always one of our own table names, never client input.
    async fn delete_row(
        &self,
        pool: &SqlitePool,
        table: &'static str,
        id: i64,
    ) -> Result<u64, AcervoError> {
        let res = sqlx::query(&format!("DELETE FROM {table} WHERE id = ?"))
            .bind(id)
            .execute(pool)
            .await?;

        Ok(res.rows_affected())
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Spawn the database actor and return a cloneable handle.
///
/// Fails when the database cannot be opened or migrated.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, AcervoError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| AcervoError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}
