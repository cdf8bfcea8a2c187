//! Application service layer - use cases, config, loading, export

pub mod app;
pub mod config;
pub mod export;
pub mod repository;
