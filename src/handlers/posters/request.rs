//! Poster request DTOs

use serde::Deserialize;

/// Query parameters for listing posters
#[derive(Debug, Deserialize)]
pub struct ListPostersQuery {
    #[serde(rename = "type")]
    pub poster_type: Option<String>,
}
