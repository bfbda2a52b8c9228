//! Core data types for the simulation engine
//!
//! - `assets` - Asset parameters, holdings and the ticker lookup table
//! - `paths` - Simulated trajectories and ensembles
//! - `results` - Metric records derived from an ensemble

mod assets;
mod paths;
mod results;

pub use assets::*;
pub use paths::*;
pub use results::*;
