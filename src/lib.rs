pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod storage;
