// Gateway module - only the layer types are visible to the router
mod instrument;

pub use instrument::{InstrumentLayer, Instrumented};
