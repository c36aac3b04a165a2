//! Launch model: converts bow parameters into initial velocity.

use nalgebra::Vector2;
use serde::Serialize;

use crate::constants::MAX_LAUNCH_SPEED_MPS;
use crate::error::Result;
use crate::params::LaunchParameters;

/// Launch speed before and after the equipment ceiling
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaunchSpeed {
    pub raw_mps: f64,
    pub capped_mps: f64,
}

impl LaunchSpeed {
    pub fn is_capped(&self) -> bool {
        self.raw_mps > self.capped_mps
    }
}

/// Initial conditions handed to the integrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchState {
    pub speed: LaunchSpeed,
    /// Launch angle in radians
    pub angle_rad: f64,
    /// `(vx0, vy0)` in m/s, derived from the capped speed
    pub velocity: Vector2<f64>,
}

/// Energy stored in the drawn bow and delivered to the arrow (J)
pub fn stored_energy_j(params: &LaunchParameters) -> f64 {
    params.efficiency * params.draw_force_n * params.draw_length_m
}

/// `v0 = min(sqrt(2E / m), 70)`
///
/// Fails when the arrow mass (or any other launch input) is not usable;
/// mass is never clamped.
pub fn launch_speed(params: &LaunchParameters) -> Result<LaunchSpeed> {
    params.validate_launch()?;

    let raw_mps = (2.0 * stored_energy_j(params) / params.arrow_mass_kg).sqrt();
    Ok(LaunchSpeed {
        raw_mps,
        capped_mps: raw_mps.min(MAX_LAUNCH_SPEED_MPS),
    })
}

/// Split a speed into horizontal and vertical components
pub fn velocity_components(speed_mps: f64, angle_deg: f64) -> Vector2<f64> {
    let theta = angle_deg.to_radians();
    Vector2::new(speed_mps * theta.cos(), speed_mps * theta.sin())
}

pub fn launch_state(params: &LaunchParameters) -> Result<LaunchState> {
    let speed = launch_speed(params)?;
    Ok(LaunchState {
        speed,
        angle_rad: params.launch_angle_deg.to_radians(),
        velocity: velocity_components(speed.capped_mps, params.launch_angle_deg),
    })
}
