use acervo_schema::MessageBody;
use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error as ThisError;
use tracing::error;

use super::AcervoError;

/// Failure of a single HTTP handler, rendered as `{message}` or `{message, error}`.
#[derive(Debug, ThisError)]
pub enum ApiError {
    /// Required body field missing or body malformed; the store was not touched.
    #[error("{0}")]
    Validation(&'static str),

    /// Target id matches no row (including ids that are not numbers).
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        #[source]
        source: AcervoError,
        /// Whether the underlying error text is echoed in the response.
        expose: bool,
    },
}

impl ApiError {
    pub fn store(message: &'static str, source: AcervoError) -> Self {
        ApiError::Store {
            message,
            source,
            expose: true,
        }
    }

    pub fn store_opaque(message: &'static str, source: AcervoError) -> Self {
        ApiError::Store {
            message,
            source,
            expose: false,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(message) | ApiError::NotFound(message) => {
                MessageBody::new(message)
            }
            ApiError::Store {
                message,
                source,
                expose,
            } => {
                error!(error = %source, "{message}");
                if expose {
                    MessageBody::with_error(message, source.to_string())
                } else {
                    MessageBody::new(message)
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn opaque_store_error_hides_error_text() {
        let err = ApiError::store_opaque(
            "Erro ao deletar item.",
            AcervoError::UnexpectedError("disk on fire".to_string()),
        );
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"message":"Erro ao deletar item."}"#);
    }

    #[tokio::test]
    async fn store_error_echoes_error_text() {
        let err = ApiError::store(
            "Erro ao buscar itens",
            AcervoError::UnexpectedError("boom".to_string()),
        );
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: MessageBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.message, "Erro ao buscar itens");
        assert_eq!(body.error.as_deref(), Some("Unexpected error: boom"));
    }
}
