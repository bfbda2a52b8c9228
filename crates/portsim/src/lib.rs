//! Command-line front end for the portsim Monte Carlo engine
//!
//! Loads a YAML run file, applies command-line overrides, runs one portfolio
//! (or a side-by-side comparison) and renders the report as JSON.

pub mod logging;
pub mod run_file;
pub mod runner;
pub mod util;

pub use logging::init_logging;
pub use run_file::{RunFile, RunOverrides};
pub use runner::{RunOutput, execute, to_json};
