pub mod config;
pub mod db;
pub mod models;
pub mod services;

pub use services::service_provider::{Connection, OAuth1ServiceProvider, ServiceApi};
