pub mod auth;
pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod reference;
pub mod routes;
pub mod services;
pub mod state;
