//! # Archery Sim
//!
//! Arrow flight trajectory engine: converts bow and arrow parameters into a
//! launch velocity, integrates the flight under gravity with optional drag
//! and wind, and resolves the ground impact by interpolation.

// Re-export the main types and functions
pub use error::{Result, SimulationError};
pub use integrator::{
    simulate, simulate_with_config, FlightOutcome, SimulationResult, SimulationState,
    TrajectorySample, TrajectorySolver,
};
pub use launch::{launch_speed, launch_state, stored_energy_j, LaunchSpeed, LaunchState};
pub use params::{LaunchParameters, SimulationConfig, WindModel};
pub use sampling::{sample_at_distance, DistanceSample, SampleFlag};
pub use units::BowSetup;
pub use vacuum::VacuumFlight;

// Module declarations
pub mod constants;
mod error;
mod integrator;
mod launch;
mod params;
mod sampling;
pub mod units;
pub mod vacuum;
