pub mod auth;
pub mod config;
pub mod roles;
pub mod state;
pub mod ws;
