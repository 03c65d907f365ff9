use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};

/// `herois` / `nemeis` on create: `null`, absent and `""` all mean "not given".
/// Any other non-integer value is a deserialization error.
fn count_or_blank<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Int(i64),
        Text(String),
    }

    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Int(n)) => Ok(Some(n)),
        Some(Count::Text(text)) if text.is_empty() => Ok(None),
        Some(Count::Text(text)) => Err(D::Error::custom(format!(
            "expected an integer, found string {text:?}"
        ))),
    }
}

/// Text column in a patch: `""` leaves the column alone, like an absent key.
fn text_or_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|text| !text.is_empty()))
}

/// Body of `POST /caixas`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CaixaInput {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    /// `None` (absent, `null` or `""`) => stored as 0.
    #[serde(default, deserialize_with = "count_or_blank")]
    pub herois: Option<i64>,
    /// `None` (absent, `null` or `""`) => stored as 0.
    #[serde(default, deserialize_with = "count_or_blank")]
    pub nemeis: Option<i64>,
}

impl CaixaInput {
    /// `(nome, tipo)` when both are present and non-empty.
    pub fn required(&self) -> Option<(&str, &str)> {
        let nome = self.nome.as_deref().filter(|v| !v.is_empty())?;
        let tipo = self.tipo.as_deref().filter(|v| !v.is_empty())?;
        Some((nome, tipo))
    }

    pub fn herois_or_default(&self) -> i64 {
        self.herois.unwrap_or(0)
    }

    pub fn nemeis_or_default(&self) -> i64 {
        self.nemeis.unwrap_or(0)
    }
}

/// Body of `PUT /caixas/{id}`.
///
/// Only the mutable columns are recognised; unknown keys are dropped during
/// deserialization. Empty `nome`/`tipo` are dropped too, since create
/// requires both to be non-empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CaixaPatchBody {
    /// `None` => do not change; `Some(v)` => update
    #[serde(default, deserialize_with = "text_or_blank")]
    pub nome: Option<String>,
    /// `None` => do not change; `Some(v)` => update
    #[serde(default, deserialize_with = "text_or_blank")]
    pub tipo: Option<String>,
    #[serde(default)]
    pub herois: Option<i64>,
    #[serde(default)]
    pub nemeis: Option<i64>,
}

impl CaixaPatchBody {
    pub fn is_empty(&self) -> bool {
        self.nome.is_none() && self.tipo.is_none() && self.herois.is_none() && self.nemeis.is_none()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaixaEnvelope<T> {
    pub message: String,
    pub caixa: T,
}
