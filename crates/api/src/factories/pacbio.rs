//! PacBio library factory orchestration.

use std::collections::HashMap;

use sqlx::PgPool;

use benchline_core::factory::pacbio::{validate_libraries, LibraryAttributes, RequestRef};
use benchline_core::types::DbId;
use benchline_db::models::pacbio_library::PacbioLibrary;
use benchline_db::repositories::{PacbioLibraryRepo, PacbioRequestRepo, TagRepo};

use crate::error::{AppError, AppResult};

/// Validate and persist a batch of libraries.
///
/// Resolves every referenced request and tag in two queries, runs the
/// cross-graph validation, and writes the batch transactionally.
pub async fn create_libraries(
    pool: &PgPool,
    libraries: Vec<LibraryAttributes>,
) -> AppResult<Vec<PacbioLibrary>> {
    let request_ids: Vec<DbId> = libraries
        .iter()
        .flat_map(|library| library.requests.iter().map(|request| request.id))
        .collect();
    let tag_ids: Vec<DbId> = libraries
        .iter()
        .flat_map(|library| library.requests.iter().filter_map(|request| request.tag_id))
        .collect();

    let requests: HashMap<DbId, RequestRef> = PacbioRequestRepo::find_by_ids(pool, &request_ids)
        .await?
        .into_iter()
        .map(|request| {
            (
                request.id,
                RequestRef {
                    id: request.id,
                    cost_code: request.cost_code,
                },
            )
        })
        .collect();
    let known_tags = TagRepo::existing_tag_ids(pool, &tag_ids).await?;

    let errors = validate_libraries(&libraries, &requests, &known_tags);
    if !errors.is_empty() {
        return Err(AppError::FactoryValidation(errors));
    }

    let created = PacbioLibraryRepo::create_batch(pool, &libraries).await?;

    tracing::info!(count = created.len(), "PacBio libraries created");

    Ok(created)
}
