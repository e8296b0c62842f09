// Library surface shared by the server and seed binaries and the tests
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod fixtures;
pub mod ml;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
