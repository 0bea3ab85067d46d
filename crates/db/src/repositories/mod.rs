//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Factory persistence
//! methods write whole entity graphs inside one transaction.

pub mod event_repo;
pub mod ont_library_repo;
pub mod ont_plate_repo;
pub mod ont_run_repo;
pub mod pacbio_library_repo;
pub mod pacbio_request_repo;
pub mod pacbio_run_repo;
pub mod pacbio_well_repo;
pub mod sample_repo;
pub mod tag_repo;

pub use event_repo::EventRepo;
pub use ont_library_repo::OntLibraryRepo;
pub use ont_plate_repo::OntPlateRepo;
pub use ont_run_repo::OntRunRepo;
pub use pacbio_library_repo::PacbioLibraryRepo;
pub use pacbio_request_repo::PacbioRequestRepo;
pub use pacbio_run_repo::PacbioRunRepo;
pub use pacbio_well_repo::PacbioWellRepo;
pub use sample_repo::SampleRepo;
pub use tag_repo::TagRepo;
