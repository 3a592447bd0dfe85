//! Marathon Results - Race Results Portal
//!
//! Backend for a race timing company's results site: runners look up their
//! finish by bib or name and see their placing, while administrators manage
//! events, upload result sheets and curate landing page posters.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic and transactions
//! - **Repositories**: Database access
//! - **Results**: Pure ranking, search and pace computations
//! - **Ingest**: Result sheet parsing
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod ingest;
pub mod middleware;
pub mod models;
pub mod results;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(all(test, feature = "db_integration"))]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
