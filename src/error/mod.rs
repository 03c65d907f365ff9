mod acervo;
mod api;

pub use acervo::AcervoError;
pub use api::ApiError;
