pub mod ai;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod favorites;
pub mod pagination;
pub mod snacks;
pub mod state;
pub mod wizard;
