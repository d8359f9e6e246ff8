pub mod api_connection;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod fallback;
pub mod generation;
pub mod image;
pub mod model;
pub mod orchestrator;
pub mod prompt;
pub mod retry;
pub mod scan;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
