pub mod oauth1;
pub mod service_provider;
