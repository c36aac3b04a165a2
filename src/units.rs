//! Archer-unit conversions.
//!
//! Bows are specified in pounds and inches and arrows in grams; the engine
//! works in SI. The factors here are fixed for numerical compatibility
//! with existing score sheets and must not be refined.

use serde::{Deserialize, Serialize};

use crate::constants::{GRAMS_PER_KG, INCHES_TO_METERS, LBF_TO_NEWTONS, STANDARD_AIR_DENSITY};
use crate::params::LaunchParameters;

pub fn lbf_to_newtons(lbf: f64) -> f64 {
    lbf * LBF_TO_NEWTONS
}

pub fn newtons_to_lbf(newtons: f64) -> f64 {
    newtons / LBF_TO_NEWTONS
}

pub fn inches_to_meters(inches: f64) -> f64 {
    inches * INCHES_TO_METERS
}

pub fn meters_to_inches(meters: f64) -> f64 {
    meters / INCHES_TO_METERS
}

pub fn grams_to_kg(grams: f64) -> f64 {
    grams / GRAMS_PER_KG
}

pub fn kg_to_grams(kg: f64) -> f64 {
    kg * GRAMS_PER_KG
}

/// A shot described the way an archer would dial it in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowSetup {
    pub draw_weight_lbf: f64,
    pub draw_length_in: f64,
    pub arrow_weight_g: f64,
    /// Percentage of stored energy delivered to the arrow (0-100]
    pub efficiency_pct: f64,
    pub launch_angle_deg: f64,
    pub start_height_m: f64,
    pub wind_speed_mps: f64,
    pub drag_coefficient: f64,
    /// Arrow shaft diameter in millimetres; the frontal area is the shaft's cross-section
    pub shaft_diameter_mm: f64,
}

impl Default for BowSetup {
    fn default() -> Self {
        Self {
            draw_weight_lbf: 40.0,
            draw_length_in: 28.0,
            arrow_weight_g: 30.0,
            efficiency_pct: 100.0,
            launch_angle_deg: 45.0,
            start_height_m: 1.5,
            wind_speed_mps: 0.0,
            drag_coefficient: 0.0,
            shaft_diameter_mm: 0.0,
        }
    }
}

impl BowSetup {
    pub fn frontal_area_m2(&self) -> f64 {
        let radius_m = self.shaft_diameter_mm / 2000.0;
        std::f64::consts::PI * radius_m * radius_m
    }

    pub fn to_launch_parameters(&self) -> LaunchParameters {
        LaunchParameters {
            draw_force_n: lbf_to_newtons(self.draw_weight_lbf),
            draw_length_m: inches_to_meters(self.draw_length_in),
            arrow_mass_kg: grams_to_kg(self.arrow_weight_g),
            efficiency: self.efficiency_pct / 100.0,
            launch_angle_deg: self.launch_angle_deg,
            start_height_m: self.start_height_m,
            wind_speed_mps: self.wind_speed_mps,
            drag_coefficient: self.drag_coefficient,
            air_density_kg_m3: STANDARD_AIR_DENSITY,
            frontal_area_m2: self.frontal_area_m2(),
        }
    }
}

impl From<&BowSetup> for LaunchParameters {
    fn from(setup: &BowSetup) -> Self {
        setup.to_launch_parameters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_conversion_factors() {
        assert_eq!(lbf_to_newtons(1.0), 4.44822);
        assert_eq!(inches_to_meters(1.0), 0.0254);
        assert_eq!(grams_to_kg(30.0), 0.03);
        assert!((lbf_to_newtons(40.0) - 177.9288).abs() < 1e-9);
        assert!((inches_to_meters(28.0) - 0.7112).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_conversions() {
        assert!((newtons_to_lbf(lbf_to_newtons(55.0)) - 55.0).abs() < 1e-12);
        assert!((meters_to_inches(inches_to_meters(31.0)) - 31.0).abs() < 1e-12);
        assert!((kg_to_grams(grams_to_kg(42.0)) - 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_default_setup_matches_default_parameters() {
        let params = BowSetup::default().to_launch_parameters();
        assert_eq!(params, LaunchParameters::default());
    }

    #[test]
    fn test_shaft_diameter_sets_frontal_area() {
        let setup = BowSetup {
            shaft_diameter_mm: 8.0,
            drag_coefficient: 2.0,
            efficiency_pct: 75.0,
            ..Default::default()
        };
        let params = LaunchParameters::from(&setup);
        let expected_area = std::f64::consts::PI * 0.004 * 0.004;
        assert!((params.frontal_area_m2 - expected_area).abs() < 1e-15);
        assert_eq!(params.efficiency, 0.75);
        assert!(params.drag_enabled());
    }
}
