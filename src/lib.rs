pub mod auth;
pub mod avatar;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod sublist;
pub mod validate;
