//! Business logic services

pub mod auth_service;
pub mod event_service;
pub mod home_service;
pub mod poster_service;
pub mod record_service;

pub use auth_service::AuthService;
pub use event_service::EventService;
pub use home_service::HomeService;
pub use poster_service::PosterService;
pub use record_service::RecordService;
