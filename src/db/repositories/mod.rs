//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod admin_repo;
pub mod event_repo;
pub mod poster_repo;
pub mod record_repo;

pub use admin_repo::AdminRepository;
pub use event_repo::EventRepository;
pub use poster_repo::PosterRepository;
pub use record_repo::{RecordFilter, RecordRepository};
