pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod inputs;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::app;
pub use state::AppState;
