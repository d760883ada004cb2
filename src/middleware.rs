pub mod auth;
pub mod company;
