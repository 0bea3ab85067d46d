//! PacBio library factory validation.
//!
//! A library factory creates one or more libraries; each library pools
//! one or more sequencing requests. When a library holds more than one
//! request every request entry must carry a tag so the samples can be
//! demultiplexed later, and no tag or request may appear twice within
//! the same library.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::factory::ErrorList;
use crate::types::DbId;

/// Payload for one library to create.
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryAttributes {
    pub volume: f64,
    pub concentration: f64,
    pub template_prep_kit_box_barcode: String,
    pub fragment_size: i32,
    pub requests: Vec<RequestAttributes>,
}

/// One request entry within a library payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestAttributes {
    /// Existing `pacbio_requests.id`.
    pub id: DbId,
    /// Existing `tags.id`; required when the library pools several requests.
    pub tag_id: Option<DbId>,
}

/// The subset of a persisted request the validator needs.
#[derive(Debug, Clone)]
pub struct RequestRef {
    pub id: DbId,
    pub cost_code: String,
}

/// Cross-validate a batch of library payloads against resolved references.
///
/// `requests` maps request id to its persisted row; `tag_ids` holds every
/// known tag id. Every violation across the whole batch is collected.
pub fn validate_libraries(
    libraries: &[LibraryAttributes],
    requests: &HashMap<DbId, RequestRef>,
    tag_ids: &HashSet<DbId>,
) -> ErrorList {
    let mut errors = ErrorList::new();

    if libraries.is_empty() {
        errors.add("libraries", "cannot be empty");
        return errors;
    }

    for library in libraries {
        errors.extend(validate_library(library, requests, tag_ids));
    }

    errors
}

fn validate_library(
    library: &LibraryAttributes,
    requests: &HashMap<DbId, RequestRef>,
    tag_ids: &HashSet<DbId>,
) -> ErrorList {
    let mut errors = ErrorList::new();

    if library.volume <= 0.0 {
        errors.add("volume", "must be greater than 0");
    }
    if library.concentration <= 0.0 {
        errors.add("concentration", "must be greater than 0");
    }
    if library.template_prep_kit_box_barcode.trim().is_empty() {
        errors.add("template_prep_kit_box_barcode", "must be present");
    }
    if library.fragment_size <= 0 {
        errors.add("fragment_size", "must be greater than 0");
    }
    if library.requests.is_empty() {
        errors.add("requests", "cannot be empty");
        return errors;
    }

    check_requests(library, requests, &mut errors);
    check_tags(library, tag_ids, &mut errors);

    errors
}

/// Every referenced request must exist, carry a cost code, and appear
/// at most once within the library.
fn check_requests(
    library: &LibraryAttributes,
    requests: &HashMap<DbId, RequestRef>,
    errors: &mut ErrorList,
) {
    let mut seen = HashSet::new();

    for entry in &library.requests {
        match requests.get(&entry.id) {
            None => errors.add("request", format!("{} does not exist", entry.id)),
            Some(request) => {
                if request.cost_code.trim().is_empty() {
                    errors.add("cost code", "must be present");
                }
            }
        }
        if !seen.insert(entry.id) {
            errors.add("request", "is used more than once");
        }
    }
}

/// Tags are only checked when the library pools more than one request:
/// then every entry needs a tag, tags must be unique, and each must
/// reference an existing tag row.
fn check_tags(library: &LibraryAttributes, tag_ids: &HashSet<DbId>, errors: &mut ErrorList) {
    for entry in &library.requests {
        if let Some(tag_id) = entry.tag_id {
            if !tag_ids.contains(&tag_id) {
                errors.add("tag", format!("{tag_id} does not exist"));
            }
        }
    }

    if library.requests.len() < 2 {
        return;
    }

    if library.requests.iter().any(|entry| entry.tag_id.is_none()) {
        errors.add("tag", "must be present");
        return;
    }

    let mut seen = HashSet::new();
    for entry in &library.requests {
        if let Some(tag_id) = entry.tag_id {
            if !seen.insert(tag_id) {
                errors.add("tag", "is used more than once");
            }
        }
    }
}
