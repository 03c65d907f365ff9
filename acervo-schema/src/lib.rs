pub mod caixas;
pub mod itens;
pub mod message;

pub use caixas::{CaixaEnvelope, CaixaInput, CaixaPatchBody};
pub use itens::{ItemEnvelope, ItemInput, ItemQuery};
pub use message::MessageBody;
