pub mod path_id;
pub mod router;
pub mod routes;

pub use path_id::PathId;
pub use router::{AcervoState, acervo_router};
