// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod api;
mod health;
mod home;
mod metrics;

// Core handlers
pub use health::health_check;
pub use metrics::metrics_handler;

// Content handlers
pub use api::list_entries;
pub use home::home_handler;
