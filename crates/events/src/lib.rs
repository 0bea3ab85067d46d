//! Benchline event bus and outbound messaging infrastructure.
//!
//! This crate provides the building blocks for the platform-wide event
//! system:
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] — the canonical domain event envelope.
//! - [`EventPersistence`] — background service that durably writes every
//!   event to the `events` table.
//! - [`message`] — warehouse message payloads describing sequencing runs.
//! - [`delivery`] — webhook delivery to the external warehouse endpoint.
//! - [`WarehouseForwarder`] — background service forwarding run events
//!   to the configured warehouse URL.

pub mod bus;
pub mod delivery;
pub mod forwarder;
pub mod message;
pub mod persistence;

pub use bus::{EventBus, PlatformEvent};
pub use delivery::webhook::WebhookDelivery;
pub use forwarder::WarehouseForwarder;
pub use persistence::EventPersistence;
