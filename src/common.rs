pub mod cnpj;
pub mod error;
