use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of `itens`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct DbItem {
    pub id: i64,
    pub nome: String,
}

/// One row of `caixas`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct DbCaixa {
    pub id: i64,
    pub nome: String,
    /// Box kind, e.g. "Base" or "Expansão".
    pub tipo: String,
    pub herois: i64,
    pub nemeis: i64,
}
