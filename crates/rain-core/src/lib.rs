pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod obstacle;
pub mod palette;
pub mod particle;
pub mod registry;
pub mod signal;
pub mod sim;
pub mod spawner;
pub mod state;
pub mod sweep;

pub use config::*;
pub use error::ConfigError;
pub use obstacle::{FloatingBody, GroundRegion, Obstacles};
pub use palette::HueCycle;
pub use particle::*;
pub use registry::Registry;
pub use signal::{SignalFrame, SpectrumAnalyzer};
pub use sim::Simulation;
pub use state::*;
pub use sweep::{AgentMode, SweepAgent, SweepController, SweepPhase};
