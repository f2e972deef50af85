pub mod auth;
pub mod db;
pub mod domain;
pub mod error;
pub mod export;
pub mod handlers;
pub mod jobs;
pub mod models;

pub use db::create_pool;
