pub mod connection;
pub mod token;
