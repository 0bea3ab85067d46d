//! ONT plate factory validation.
//!
//! The plate factory builds a plate, its wells, and the sample requests
//! inside each well from one nested payload. Tag oligos in the payload
//! are resolved against a tag set loaded once per invocation.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::factory::ErrorList;
use crate::types::DbId;
use crate::well::WellPosition;

/// Payload for a plate with nested wells and samples.
#[derive(Debug, Clone, Deserialize)]
pub struct PlateAttributes {
    pub barcode: String,
    pub wells: Vec<WellAttributes>,
}

/// One well within a plate payload.
#[derive(Debug, Clone, Deserialize)]
pub struct WellAttributes {
    pub position: String,
    #[serde(default)]
    pub samples: Vec<SampleAttributes>,
}

/// One sample request within a well payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleAttributes {
    pub name: String,
    pub external_id: String,
    /// Oligo of a tag in the configured ONT tag set.
    pub tag_oligo: Option<String>,
}

/// Cross-validate a plate payload.
///
/// `tag_ids_by_oligo` is the pre-loaded tag set; `barcode_taken` reports
/// whether the plate barcode already exists.
pub fn validate_plate(
    plate: &PlateAttributes,
    tag_ids_by_oligo: &HashMap<String, DbId>,
    barcode_taken: bool,
) -> ErrorList {
    let mut errors = ErrorList::new();

    if plate.barcode.trim().is_empty() {
        errors.add("barcode", "must be present");
    } else if barcode_taken {
        errors.add("barcode", "has already been taken");
    }

    if plate.wells.is_empty() {
        errors.add("wells", "cannot be empty");
        return errors;
    }

    let mut positions = HashSet::new();
    for well in &plate.wells {
        match WellPosition::parse(&well.position) {
            Err(e) => errors.add("position", e.to_string()),
            Ok(position) => {
                if !positions.insert(position) {
                    errors.add("position", format!("{position} is used more than once"));
                }
            }
        }

        for sample in &well.samples {
            errors.extend(validate_sample(sample, tag_ids_by_oligo));
        }
    }

    errors
}

fn validate_sample(
    sample: &SampleAttributes,
    tag_ids_by_oligo: &HashMap<String, DbId>,
) -> ErrorList {
    let mut errors = ErrorList::new();

    if sample.name.trim().is_empty() {
        errors.add("sample name", "must be present");
    }
    if sample.external_id.trim().is_empty() {
        errors.add("sample external_id", "must be present");
    }
    if let Some(oligo) = &sample.tag_oligo {
        if !tag_ids_by_oligo.contains_key(oligo) {
            errors.add("tag oligo", format!("{oligo} is not in the tag set"));
        }
    }

    errors
}

/// Name for the `pool`-th library pooled from a plate.
pub fn pooled_library_name(plate_barcode: &str, pool: u32) -> String {
    format!("{plate_barcode}-{pool}")
}
