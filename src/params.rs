//! Input records for a simulation run.
//!
//! `LaunchParameters` describes one shot; `SimulationConfig` holds the
//! integration settings and safety bounds. Both are plain values created
//! per run and never shared mutably.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_MAX_DISTANCE_M, DEFAULT_MAX_TIME_S, DEFAULT_TIME_STEP_S, INCHES_TO_METERS,
    LBF_TO_NEWTONS, MAX_INTEGRATION_STEPS, STANDARD_AIR_DENSITY,
};
use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, Result, SimulationError};

/// Physical description of a single shot, in SI units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchParameters {
    pub draw_force_n: f64,
    pub draw_length_m: f64,
    pub arrow_mass_kg: f64,
    /// Fraction of stored energy converted to kinetic energy, in (0, 1]
    pub efficiency: f64,
    pub launch_angle_deg: f64,
    pub start_height_m: f64,
    /// Signed; positive opposes the direction of flight (headwind)
    pub wind_speed_mps: f64,
    pub drag_coefficient: f64,
    pub air_density_kg_m3: f64,
    pub frontal_area_m2: f64,
}

impl Default for LaunchParameters {
    fn default() -> Self {
        // 40 lbf bow, 28" draw, 30 g arrow, shot from shoulder height
        Self {
            draw_force_n: 40.0 * LBF_TO_NEWTONS,
            draw_length_m: 28.0 * INCHES_TO_METERS,
            arrow_mass_kg: 0.030,
            efficiency: 1.0,
            launch_angle_deg: 45.0,
            start_height_m: 1.5,
            wind_speed_mps: 0.0,
            drag_coefficient: 0.0,
            air_density_kg_m3: STANDARD_AIR_DENSITY,
            frontal_area_m2: 0.0,
        }
    }
}

impl LaunchParameters {
    /// Drag is modelled only when both the coefficient and the frontal area are positive
    pub fn drag_enabled(&self) -> bool {
        self.drag_coefficient > 0.0 && self.frontal_area_m2 > 0.0
    }

    /// Lumped drag constant `0.5 * rho * Cd * A`, zero when drag is disabled
    pub fn drag_constant(&self) -> f64 {
        if self.drag_enabled() {
            0.5 * self.air_density_kg_m3 * self.drag_coefficient * self.frontal_area_m2
        } else {
            0.0
        }
    }

    /// Inputs consumed by the launch model
    pub fn validate_launch(&self) -> Result<()> {
        ensure_positive("draw_force_n", self.draw_force_n)?;
        ensure_positive("draw_length_m", self.draw_length_m)?;
        ensure_positive("arrow_mass_kg", self.arrow_mass_kg)?;
        ensure_positive("efficiency", self.efficiency)?;
        if self.efficiency > 1.0 {
            return Err(SimulationError::invalid(
                "efficiency",
                format!("must not exceed 1.0, got {}", self.efficiency),
            ));
        }
        ensure_finite("launch_angle_deg", self.launch_angle_deg)
    }

    /// Inputs consumed by the integrator
    pub fn validate_environment(&self) -> Result<()> {
        ensure_non_negative("start_height_m", self.start_height_m)?;
        ensure_finite("wind_speed_mps", self.wind_speed_mps)?;
        ensure_non_negative("drag_coefficient", self.drag_coefficient)?;
        ensure_non_negative("air_density_kg_m3", self.air_density_kg_m3)?;
        ensure_non_negative("frontal_area_m2", self.frontal_area_m2)
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_launch()?;
        self.validate_environment()
    }
}

/// How the horizontal wind term enters the equations of motion
///
/// The two modes are not numerically equivalent; a run uses exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindModel {
    /// Wind speed is subtracted once from the initial horizontal velocity
    #[default]
    VelocityOffset,
    /// Wind value is applied every step as a constant horizontal
    /// deceleration, numerically in m/s²
    Acceleration,
}

impl FromStr for WindModel {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "velocity_offset" | "offset" => Ok(WindModel::VelocityOffset),
            "acceleration" | "accel" => Ok(WindModel::Acceleration),
            _ => Err(SimulationError::invalid("wind_model", format!("unknown wind model `{s}`"))),
        }
    }
}

impl fmt::Display for WindModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindModel::VelocityOffset => write!(f, "velocity-offset"),
            WindModel::Acceleration => write!(f, "acceleration"),
        }
    }
}

/// Integration settings and safety bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub time_step_s: f64,
    pub max_time_s: f64,
    pub max_distance_m: f64,
    pub wind_model: WindModel,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step_s: DEFAULT_TIME_STEP_S,
            max_time_s: DEFAULT_MAX_TIME_S,
            max_distance_m: DEFAULT_MAX_DISTANCE_M,
            wind_model: WindModel::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("time_step_s", self.time_step_s)?;
        ensure_positive("max_time_s", self.max_time_s)?;
        ensure_positive("max_distance_m", self.max_distance_m)?;

        let steps = self.max_time_s / self.time_step_s;
        if steps > MAX_INTEGRATION_STEPS as f64 {
            return Err(SimulationError::invalid(
                "time_step_s",
                format!(
                    "{steps:.0} steps needed to cover {} s, limit is {MAX_INTEGRATION_STEPS}",
                    self.max_time_s
                ),
            ));
        }
        Ok(())
    }
}
