/// Physical constants and default limits used by the trajectory engine

/// Gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.81;

/// Hard ceiling on launch speed (m/s)
///
/// Models the practical limit of archery equipment. Applied to the scalar
/// launch speed before it is split into components.
pub const MAX_LAUNCH_SPEED_MPS: f64 = 70.0;

/// Conversion factor: pounds-force to newtons
pub const LBF_TO_NEWTONS: f64 = 4.44822;

/// Conversion factor: inches to meters
pub const INCHES_TO_METERS: f64 = 0.0254;

/// Grams per kilogram
pub const GRAMS_PER_KG: f64 = 1000.0;

/// Standard air density at sea level (kg/m³)
pub const STANDARD_AIR_DENSITY: f64 = 1.225;

/// Default integration step (s)
pub const DEFAULT_TIME_STEP_S: f64 = 0.01;

/// Default safety bound on elapsed flight time (s)
///
/// With the default step this caps a run at 2000 iterations.
pub const DEFAULT_MAX_TIME_S: f64 = 20.0;

/// Default safety bound on horizontal distance (m)
pub const DEFAULT_MAX_DISTANCE_M: f64 = 250.0;

// Numerical stability constants
/// General numerical tolerance for floating point comparisons
pub const NUMERICAL_TOLERANCE: f64 = 1e-9;

/// Upper bound on the number of samples reserved up front
pub const MAX_PREALLOCATED_SAMPLES: usize = 1 << 16;

/// Upper bound on `max_time_s / time_step_s` accepted by a config
///
/// Every step records a sample, so this also bounds the memory of a run.
pub const MAX_INTEGRATION_STEPS: usize = 1_000_000;
