//! Per-site bookings: events and the service packages offered for them.

pub mod events;
pub mod service_packages;

pub use events::EventManager;
pub use service_packages::ServicePackageManager;
