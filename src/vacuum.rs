//! Closed-form flight in a vacuum.
//!
//! Reference values for drag-free shots with no wind; the integrator does
//! not use these, they exist to cross-check it and for display.

use serde::Serialize;

use crate::constants::G_ACCEL_MPS2;
use crate::error::{ensure_finite, ensure_non_negative, Result};
use crate::launch::launch_state;
use crate::params::LaunchParameters;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VacuumFlight {
    pub flight_time_s: f64,
    pub range_m: f64,
    pub apex_height_m: f64,
}

/// Time and range to ground for a launch at `height_m` with components `(vx, vy)`
///
/// `t = (vy + sqrt(vy² + 2gh)) / g`. The apex is the launch height when the
/// arrow is not rising.
pub fn flight_from_components(height_m: f64, vx: f64, vy: f64) -> Result<VacuumFlight> {
    ensure_non_negative("start_height_m", height_m)?;
    ensure_finite("vx", vx)?;
    ensure_finite("vy", vy)?;

    // Non-negative because h >= 0
    let disc = vy * vy + 2.0 * G_ACCEL_MPS2 * height_m;
    let flight_time_s = (vy + disc.sqrt()) / G_ACCEL_MPS2;
    let apex_height_m = if vy > 0.0 {
        height_m + vy * vy / (2.0 * G_ACCEL_MPS2)
    } else {
        height_m
    };

    Ok(VacuumFlight {
        flight_time_s,
        range_m: vx * flight_time_s,
        apex_height_m,
    })
}

/// Closed-form flight for `params`, ignoring drag and wind
pub fn flight_time_and_range(params: &LaunchParameters) -> Result<VacuumFlight> {
    let launch = launch_state(params)?;
    flight_from_components(params.start_height_m, launch.velocity.x, launch.velocity.y)
}

/// Height at time `t` of a drag-free flight
pub fn height_at(height_m: f64, vy: f64, time_s: f64) -> f64 {
    height_m + vy * time_s - 0.5 * G_ACCEL_MPS2 * time_s * time_s
}
