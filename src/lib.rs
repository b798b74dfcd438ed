pub mod config;
pub mod models;
pub mod sources;
pub mod storage;
pub mod stores;
