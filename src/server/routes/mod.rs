pub mod caixas;
pub mod itens;
