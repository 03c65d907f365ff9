use serde::{Deserialize, Serialize};

/// Body of `POST /itens` and `PUT /itens/{id}`.
///
/// Any other key in the payload is ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ItemInput {
    #[serde(default)]
    pub nome: Option<String>,
}

impl ItemInput {
    /// `nome` when present and non-empty.
    pub fn nome(&self) -> Option<&str> {
        self.nome.as_deref().filter(|nome| !nome.is_empty())
    }
}

/// Query string of `GET /itens`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ItemQuery {
    #[serde(default)]
    pub nome: Option<String>,
}

impl ItemQuery {
    /// Search term; an empty `?nome=` means "no filter".
    pub fn search(&self) -> Option<&str> {
        self.nome.as_deref().filter(|nome| !nome.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemEnvelope<T> {
    pub message: String,
    pub item: T,
}
