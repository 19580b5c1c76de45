pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod posts_api;
pub mod services;
pub mod state;
pub mod ui;
