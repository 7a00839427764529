// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_api;
pub mod reading_store;
pub mod sensor_simulator;
