//! thermoline: interactive time-series line chart engine.
//!
//! The crate maps domain data into pixel space, hit-tests touch input,
//! animates transitions between data updates, and materializes each frame as
//! backend-agnostic draw primitives. Hosts own the event loop and the frame
//! scheduler; the engine only reports whether another frame is needed.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, Theme};
pub use error::{ChartError, ChartResult};
