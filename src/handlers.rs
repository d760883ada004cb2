pub mod admin;
pub mod auth;
pub mod company;
pub mod dashboard;
pub mod notifications;
pub mod reports;
