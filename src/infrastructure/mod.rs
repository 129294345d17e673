pub mod memory_repo;
pub mod static_directory;
