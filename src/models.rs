pub mod activity;
pub mod auth;
pub mod company;
pub mod dashboard;
pub mod notification;
pub mod prompt;
pub mod report;
