pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod store;

mod patches;
mod utils;

pub use error::{AcervoError, ApiError};
pub use store::{MemoryStore, SharedStore, Store};
