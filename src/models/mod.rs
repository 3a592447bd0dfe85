//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod admin;
pub mod event;
pub mod poster;
pub mod record;

pub use admin::*;
pub use event::*;
pub use poster::*;
pub use record::*;
