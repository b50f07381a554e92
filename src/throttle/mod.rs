//! Call pacing against externally imposed rate limits.

mod composite;
mod window;

pub use composite::Throttle;
pub use window::WindowConfig;
