//! Tool definitions module.
//!
//! Each tool is defined in its own file with:
//! - Its name, description, and capability descriptor (legal actions and
//!   their parameter shapes)
//! - An action enum the dispatcher routes on
//! - An `execute()` method holding the handler logic and text rendering
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file (e.g., `my_tool.rs`) with a `DESCRIPTOR`
//! 2. Export it here
//! 3. Add the descriptor to `TOOLS` and a `Capability` variant in `registry.rs`
//! 4. Route the variant in `dispatcher.rs`

pub mod common;
pub mod weather;
pub mod weight_logger;

pub use common::NoParams;
pub use weather::{GetWeatherParams, WeatherAction, WeatherTool};
pub use weight_logger::{LogWeightParams, WeightAction, WeightLoggerTool};
