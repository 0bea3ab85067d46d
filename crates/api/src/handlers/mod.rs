//! HTTP handlers, one module per resource.

pub mod events;
pub mod ont_libraries;
pub mod ont_plates;
pub mod ont_runs;
pub mod pacbio_libraries;
pub mod pacbio_requests;
pub mod pacbio_runs;
pub mod pacbio_wells;
pub mod samples;
pub mod tag_sets;
