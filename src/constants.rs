//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default log output format
pub const DEFAULT_LOG_FORMAT: &str = "pretty";

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 12;

/// Default refresh token expiry in days
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Length of generated refresh tokens
pub const REFRESH_TOKEN_LENGTH: usize = 48;

/// Redis key prefix for refresh tokens
pub const REFRESH_TOKEN_PREFIX: &str = "refresh_token";

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 64;

// =============================================================================
// UPLOAD DEFAULTS
// =============================================================================

/// Default maximum upload body size in bytes (10 MB)
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Default maximum number of records in one upload
pub const DEFAULT_UPLOAD_MAX_RECORDS: usize = 20_000;

/// Maximum number of issues reported for a rejected upload
pub const MAX_REPORTED_UPLOAD_ISSUES: usize = 50;

/// Rows per multi-row INSERT statement during a records replace
pub const RECORD_INSERT_CHUNK_SIZE: usize = 1_000;

/// Multipart field carrying the spreadsheet
pub const UPLOAD_FILE_FIELD: &str = "file";

/// Maximum bib length, in characters
pub const MAX_BIB_LENGTH: usize = 32;

/// Maximum runner name length, in characters
pub const MAX_RUNNER_NAME_LENGTH: usize = 100;

/// Maximum gender label length, in characters
pub const MAX_GENDER_LENGTH: usize = 16;

// =============================================================================
// EVENT SETTINGS
// =============================================================================

/// Poster slider types
pub mod poster_types {
    pub const HERO: &str = "hero";
    pub const NEXT: &str = "next";

    /// All poster types
    pub const ALL: &[&str] = &[HERO, NEXT];
}

/// Known course labels and their distances in kilometers
pub const COURSE_DISTANCES_KM: &[(&str, f64)] = &[
    ("3Km", 3.0),
    ("5Km", 5.0),
    ("10Km", 10.0),
    ("하프", 21.1),
    ("Half", 21.1),
    ("풀코스", 42.195),
    ("Full", 42.195),
];

/// Maximum event name length
pub const MAX_EVENT_NAME_LENGTH: u64 = 200;

/// Maximum number of courses per event
pub const MAX_COURSES_PER_EVENT: u64 = 16;

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Login endpoint - max requests
    pub const LOGIN_MAX_REQUESTS: i64 = 5;
    /// Login endpoint - window in seconds
    pub const LOGIN_WINDOW_SECS: i64 = 60;

    /// Token refresh endpoint - max requests
    pub const REFRESH_MAX_REQUESTS: i64 = 30;
    /// Token refresh endpoint - window in seconds
    pub const REFRESH_WINDOW_SECS: i64 = 60;
}
