pub mod configuration;
pub mod domain;
pub mod export;
pub mod services;
pub mod startup;
pub mod store;
pub mod telemetry;
