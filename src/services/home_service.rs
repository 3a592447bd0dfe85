//! Landing page aggregate

use sqlx::PgPool;

use crate::{
    constants::poster_types,
    db::repositories::{EventRepository, PosterRepository},
    error::AppResult,
    models::{EventStatus, EventWithCount, Poster},
};

/// Everything the landing page renders
#[derive(Debug, Clone)]
pub struct HomePage {
    pub hero_posters: Vec<Poster>,
    pub next_posters: Vec<Poster>,
    pub past_events: Vec<EventWithCount>,
}

/// Home service
pub struct HomeService;

impl HomeService {
    /// Load posters of both sliders and past events in parallel
    pub async fn load(pool: &PgPool) -> AppResult<HomePage> {
        let (hero_posters, next_posters, past_events) = futures::try_join!(
            PosterRepository::list_by_type(pool, poster_types::HERO),
            PosterRepository::list_by_type(pool, poster_types::NEXT),
            EventRepository::list(pool, Some(EventStatus::Past.as_str())),
        )?;

        Ok(HomePage {
            hero_posters,
            next_posters,
            past_events,
        })
    }
}
