//! Repository for the `tag_sets` and `tags` tables.

use std::collections::{HashMap, HashSet};

use sqlx::PgPool;

use benchline_core::types::DbId;

use crate::models::tag::{CreateTag, CreateTagSet, Tag, TagSet};

/// Column list for `tag_sets` queries.
const SET_COLUMNS: &str = "id, name, uuid, created_at, updated_at";

/// Column list for `tags` queries.
const TAG_COLUMNS: &str = "id, oligo, group_id, tag_set_id, created_at, updated_at";

/// Provides CRUD operations for tag sets and their tags.
pub struct TagRepo;

impl TagRepo {
    /// Insert a new tag set.
    pub async fn create_set(pool: &PgPool, input: &CreateTagSet) -> Result<TagSet, sqlx::Error> {
        let query = format!(
            "INSERT INTO tag_sets (name) VALUES ($1) RETURNING {SET_COLUMNS}"
        );
        sqlx::query_as::<_, TagSet>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a tag set by its ID.
    pub async fn find_set_by_id(pool: &PgPool, id: DbId) -> Result<Option<TagSet>, sqlx::Error> {
        let query = format!("SELECT {SET_COLUMNS} FROM tag_sets WHERE id = $1");
        sqlx::query_as::<_, TagSet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a tag set by its unique name.
    pub async fn find_set_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<TagSet>, sqlx::Error> {
        let query = format!("SELECT {SET_COLUMNS} FROM tag_sets WHERE name = $1");
        sqlx::query_as::<_, TagSet>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all tag sets.
    pub async fn list_sets(pool: &PgPool) -> Result<Vec<TagSet>, sqlx::Error> {
        let query = format!("SELECT {SET_COLUMNS} FROM tag_sets ORDER BY name");
        sqlx::query_as::<_, TagSet>(&query).fetch_all(pool).await
    }

    /// Add tags to a set.
    pub async fn add_tags(
        pool: &PgPool,
        tag_set_id: DbId,
        tags: &[CreateTag],
    ) -> Result<Vec<Tag>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(tags.len());

        let query = format!(
            "INSERT INTO tags (oligo, group_id, tag_set_id) \
             VALUES ($1, $2, $3) \
             RETURNING {TAG_COLUMNS}"
        );
        for tag in tags {
            let row = sqlx::query_as::<_, Tag>(&query)
                .bind(&tag.oligo)
                .bind(&tag.group_id)
                .bind(tag_set_id)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// List the tags of a set, ordered by group id.
    pub async fn tags_for_set(pool: &PgPool, tag_set_id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!(
            "SELECT {TAG_COLUMNS} FROM tags WHERE tag_set_id = $1 ORDER BY group_id"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(tag_set_id)
            .fetch_all(pool)
            .await
    }

    /// The subset of `ids` that exist in the `tags` table.
    ///
    /// Used by the library factory to check tag references in one query.
    pub async fn existing_tag_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashSet<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let rows = sqlx::query_scalar::<_, DbId>("SELECT id FROM tags WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().collect())
    }

    /// Map oligo to tag id for every tag in the named set.
    ///
    /// The ONT plate factory loads this once per invocation and resolves
    /// sample tag oligos against it.
    pub async fn tag_ids_by_oligo(
        pool: &PgPool,
        set_name: &str,
    ) -> Result<HashMap<String, DbId>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (String, DbId)>(
            "SELECT t.oligo, t.id \
             FROM tags t \
             JOIN tag_sets ts ON ts.id = t.tag_set_id \
             WHERE ts.name = $1",
        )
        .bind(set_name)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().collect())
    }
}
