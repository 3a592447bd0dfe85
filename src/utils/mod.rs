//! Utility functions

pub mod crypto;
pub mod time;
pub mod validation;

pub use crypto::{generate_secure_token, hash_string};
pub use time::{format_hms, format_pace, parse_hms, parse_pace, pace_to_minutes};
pub use validation::{sanitize_string, validate_courses, validate_poster_type};
