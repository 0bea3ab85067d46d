//! Repository for the `events` table.

use sqlx::PgPool;

use benchline_core::types::DbId;

use crate::models::event::Event;

/// Column list for `events` queries.
const COLUMNS: &str = "\
    id, event_type, source_entity_type, source_entity_id, payload, created_at";

/// Default page size when listing events.
const DEFAULT_LIMIT: i64 = 100;

/// Provides persistence for domain events.
pub struct EventRepo;

impl EventRepo {
    /// Insert one event row and return its id.
    pub async fn insert(
        pool: &PgPool,
        event_type: &str,
        source_entity_type: Option<&str>,
        source_entity_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO events (event_type, source_entity_type, source_entity_id, payload) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(event_type)
        .bind(source_entity_type)
        .bind(source_entity_id)
        .bind(payload)
        .fetch_one(pool)
        .await
    }

    /// List the most recent events, optionally filtered by type.
    pub async fn list_recent(
        pool: &PgPool,
        event_type: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        match event_type {
            Some(event_type) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM events \
                     WHERE event_type = $1 \
                     ORDER BY id DESC LIMIT $2"
                );
                sqlx::query_as::<_, Event>(&query)
                    .bind(event_type)
                    .bind(limit)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM events ORDER BY id DESC LIMIT $1"
                );
                sqlx::query_as::<_, Event>(&query)
                    .bind(limit)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}
