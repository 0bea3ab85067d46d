//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod event;
pub mod ont_library;
pub mod ont_plate;
pub mod ont_run;
pub mod pacbio_library;
pub mod pacbio_request;
pub mod pacbio_run;
pub mod pacbio_well;
pub mod sample;
pub mod tag;
pub mod tube;
