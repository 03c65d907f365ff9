//! Database module: models, schema and the actor owning the SQLite pool.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: the embedded `migrations/` set and up/down helpers
//! - `actor.rs`: `DbActor`, the single owner of the connection pool

pub mod actor;
pub mod models;
pub mod schema;

mod patch_impl;

pub use crate::patches::{CaixaCreate, CaixaPatch, DbPatchable, ItemCreate, ItemPatch};
pub use models::{DbCaixa, DbItem};
pub use schema::{MIGRATOR, known_versions, migrate_down, migrate_up};

pub use actor::{DbActorHandle, spawn};
