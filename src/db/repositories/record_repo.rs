//! Record repository
//!
//! Records are only ever written as a whole set per event. Reads come back
//! ordered by finish time, then upload position.

use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder, types::Json};
use uuid::Uuid;

use crate::{
    constants::RECORD_INSERT_CHUNK_SIZE,
    error::AppResult,
    models::{NewRecord, Record, RecordRow},
    results::splits,
};

/// Optional filters for listing an event's records
#[derive(Debug, Clone, Default)]
pub struct RecordFilter<'a> {
    /// Exact bib
    pub bib: Option<&'a str>,
    /// Name substring
    pub name: Option<&'a str>,
    /// Exact course label
    pub course: Option<&'a str>,
}

/// Repository for record database operations
pub struct RecordRepository;

impl RecordRepository {
    /// All records of an event
    pub async fn list_for_event(pool: &PgPool, event_id: &Uuid) -> AppResult<Vec<Record>> {
        Self::list_filtered(pool, event_id, &RecordFilter::default()).await
    }

    /// Records of an event matching every given filter
    pub async fn list_filtered(
        pool: &PgPool,
        event_id: &Uuid,
        filter: &RecordFilter<'_>,
    ) -> AppResult<Vec<Record>> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT * FROM records
            WHERE event_id = $1
                AND ($2::text IS NULL OR bib = $2)
                AND ($3::text IS NULL OR strpos(name, $3) > 0)
                AND ($4::text IS NULL OR course = $4)
            ORDER BY finish_seconds ASC, position ASC
            "#,
        )
        .bind(event_id)
        .bind(filter.bib)
        .bind(filter.name)
        .bind(filter.course)
        .fetch_all(pool)
        .await?;

        rows.into_iter()
            .map(|row| Record::try_from(row).map_err(Into::into))
            .collect()
    }

    /// Distinct course labels used by an event's records
    pub async fn courses_in_use(conn: &mut PgConnection, event_id: &Uuid) -> AppResult<Vec<String>> {
        let courses = sqlx::query_scalar::<_, String>(
            r#"SELECT DISTINCT course FROM records WHERE event_id = $1 ORDER BY course"#,
        )
        .bind(event_id)
        .fetch_all(conn)
        .await?;

        Ok(courses)
    }

    /// Delete every record of an event, returning how many were removed
    pub async fn delete_for_event(conn: &mut PgConnection, event_id: &Uuid) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM records WHERE event_id = $1"#)
            .bind(event_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Insert records in chunks, preserving their order as `position`
    pub async fn insert_many(
        conn: &mut PgConnection,
        event_id: &Uuid,
        records: &[NewRecord],
    ) -> AppResult<u64> {
        let mut inserted = 0;

        for (chunk_idx, chunk) in records.chunks(RECORD_INSERT_CHUNK_SIZE).enumerate() {
            let offset = chunk_idx * RECORD_INSERT_CHUNK_SIZE;
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO records (event_id, bib, name, course, gender, finish_time, \
                 finish_seconds, speed, pace, splits, position) ",
            );

            builder.push_values(chunk.iter().enumerate(), |mut b, (i, record)| {
                b.push_bind(*event_id)
                    .push_bind(&record.bib)
                    .push_bind(&record.name)
                    .push_bind(&record.course)
                    .push_bind(&record.gender)
                    .push_bind(&record.finish_time)
                    .push_bind(record.finish_seconds as i32)
                    .push_bind(record.speed)
                    .push_bind(&record.pace)
                    .push_bind(Json(splits::encode(&record.splits)))
                    .push_bind((offset + i) as i32);
            });

            let result = builder.build().execute(&mut *conn).await?;
            inserted += result.rows_affected();
        }

        Ok(inserted)
    }
}
