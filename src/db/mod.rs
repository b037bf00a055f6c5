pub mod connection_repository;
pub mod in_memory_connection_repository;
