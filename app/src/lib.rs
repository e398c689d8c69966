pub mod cache;
pub mod config;
pub mod error;
pub mod persistence;
pub mod scheduler;
pub mod state;
pub mod utils;
