//! Fixed-step trajectory integrator.
//!
//! Explicit Euler stepping in the vertical plane: velocity is updated from
//! gravity, optional quadratic drag and the wind term, then position is
//! advanced with the new velocity. A run ends in one of three terminal
//! states. When a step crosses the ground (or the distance bound) the
//! terminal sample is placed on the crossing by linear interpolation
//! instead of keeping the overshoot.

use log::{debug, warn};
use nalgebra::Vector2;
use serde::Serialize;
use std::fmt;

use crate::constants::{G_ACCEL_MPS2, MAX_PREALLOCATED_SAMPLES, NUMERICAL_TOLERANCE};
use crate::error::Result;
use crate::launch::{launch_state, LaunchState};
use crate::params::{LaunchParameters, SimulationConfig, WindModel};

/// Mutable integration state, owned by a single run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub time: f64,
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
}

impl SimulationState {
    pub fn position_x(&self) -> f64 {
        self.position.x
    }

    pub fn position_y(&self) -> f64 {
        self.position.y
    }

    pub fn velocity_x(&self) -> f64 {
        self.velocity.x
    }

    pub fn velocity_y(&self) -> f64 {
        self.velocity.y
    }

    fn sample(&self) -> TrajectorySample {
        TrajectorySample {
            time: self.time,
            x: self.position.x,
            y: self.position.y,
            vx: self.velocity.x,
            vy: self.velocity.y,
        }
    }

    /// State a fraction `frac` of the way from `self` to `next`
    fn lerp(&self, next: &SimulationState, frac: f64) -> SimulationState {
        SimulationState {
            time: self.time + frac * (next.time - self.time),
            position: self.position + (next.position - self.position) * frac,
            velocity: self.velocity + (next.velocity - self.velocity) * frac,
        }
    }
}

/// Snapshot recorded after every step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl TrajectorySample {
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }
}

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightOutcome {
    /// The arrow reached the ground
    Grounded,
    /// Elapsed time reached `max_time_s` before impact
    TimedOut,
    /// Horizontal distance reached `max_distance_m` before impact
    OutOfRange,
}

impl FlightOutcome {
    /// Only `Grounded` is a genuine landing
    pub fn is_impact(&self) -> bool {
        matches!(self, FlightOutcome::Grounded)
    }
}

impl fmt::Display for FlightOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightOutcome::Grounded => write!(f, "ground impact"),
            FlightOutcome::TimedOut => write!(f, "time limit reached"),
            FlightOutcome::OutOfRange => write!(f, "distance limit reached"),
        }
    }
}

/// Output of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub samples: Vec<TrajectorySample>,
    /// Horizontal position of the final sample
    pub range_m: f64,
    /// Time of the final sample
    pub flight_time_s: f64,
    pub outcome: FlightOutcome,
    pub launch_speed_mps: f64,
    pub raw_launch_speed_mps: f64,
    pub speed_capped: bool,
    pub max_height_m: f64,
    pub max_height_distance_m: f64,
    pub impact_speed_mps: f64,
    pub impact_energy_j: f64,
    pub step_count: usize,
}

impl SimulationResult {
    pub fn is_impact(&self) -> bool {
        self.outcome.is_impact()
    }

    pub fn final_sample(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    /// `(distance, height)` pairs for plotting
    pub fn plot_series(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.x, s.y)).collect()
    }
}

/// Fraction of a step at which a coordinate moving from `previous` to
/// `next` crosses `level`. A flat step yields 0.
fn crossing_fraction(previous: f64, next: f64, level: f64) -> f64 {
    let delta = next - previous;
    if delta == 0.0 {
        0.0
    } else {
        ((level - previous) / delta).clamp(0.0, 1.0)
    }
}

/// Number of steps that fit in `max_time_s`
fn step_budget(max_time_s: f64, time_step_s: f64) -> usize {
    ((max_time_s / time_step_s) - NUMERICAL_TOLERANCE).ceil().max(1.0) as usize
}

/// Push the terminal sample. One that does not advance past the previous
/// time replaces the previous sample, keeping times strictly increasing.
fn record_terminal(
    samples: &mut Vec<TrajectorySample>,
    previous_time: f64,
    last: &SimulationState,
) {
    if last.time <= previous_time {
        samples.pop();
    }
    samples.push(last.sample());
}

/// Trajectory solver for a single shot
pub struct TrajectorySolver {
    params: LaunchParameters,
    config: SimulationConfig,
    launch: LaunchState,
    drag_constant: f64,
}

impl TrajectorySolver {
    pub fn new(params: LaunchParameters, config: SimulationConfig) -> Result<Self> {
        params.validate_environment()?;
        let launch = launch_state(&params)?;
        let drag_constant = params.drag_constant();

        Ok(Self {
            params,
            config,
            launch,
            drag_constant,
        })
    }

    pub fn set_time_step(&mut self, step: f64) {
        self.config.time_step_s = step;
    }

    pub fn set_max_time(&mut self, max_time: f64) {
        self.config.max_time_s = max_time;
    }

    pub fn set_max_distance(&mut self, max_distance: f64) {
        self.config.max_distance_m = max_distance;
    }

    pub fn set_wind_model(&mut self, model: WindModel) {
        self.config.wind_model = model;
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn launch(&self) -> &LaunchState {
        &self.launch
    }

    fn initial_state(&self) -> SimulationState {
        let mut velocity = self.launch.velocity;
        if self.config.wind_model == WindModel::VelocityOffset {
            velocity.x -= self.params.wind_speed_mps;
        }

        SimulationState {
            time: 0.0,
            position: Vector2::new(0.0, self.params.start_height_m),
            velocity,
        }
    }

    /// Gravity, quadratic drag along the velocity, and the per-step wind term
    fn acceleration(&self, velocity: &Vector2<f64>) -> Vector2<f64> {
        let mut acceleration = Vector2::new(0.0, -G_ACCEL_MPS2);

        if self.drag_constant > 0.0 {
            let speed = velocity.x.hypot(velocity.y);
            // At rest there is no drag direction
            if speed > 0.0 {
                let drag_force = self.drag_constant * speed * speed;
                acceleration -= velocity * (drag_force / (speed * self.params.arrow_mass_kg));
            }
        }

        if self.config.wind_model == WindModel::Acceleration {
            acceleration.x -= self.params.wind_speed_mps;
        }

        acceleration
    }

    fn step(&self, state: &SimulationState, step_index: usize) -> SimulationState {
        let dt = self.config.time_step_s;
        let velocity = state.velocity + self.acceleration(&state.velocity) * dt;

        SimulationState {
            time: step_index as f64 * dt,
            position: state.position + velocity * dt,
            velocity,
        }
    }

    pub fn solve(&self) -> Result<SimulationResult> {
        self.config.validate()?;

        let max_steps = step_budget(self.config.max_time_s, self.config.time_step_s);
        let max_time = self.config.max_time_s;
        let max_distance = self.config.max_distance_m;

        debug!(
            "launch at {:.2} m/s (raw {:.2} m/s{}), angle {:.1}°, drag {}, wind {:.2} m/s as {}",
            self.launch.speed.capped_mps,
            self.launch.speed.raw_mps,
            if self.launch.speed.is_capped() { ", capped" } else { "" },
            self.params.launch_angle_deg,
            if self.drag_constant > 0.0 { "on" } else { "off" },
            self.params.wind_speed_mps,
            self.config.wind_model,
        );

        let mut state = self.initial_state();
        let mut samples = Vec::with_capacity((max_steps + 1).min(MAX_PREALLOCATED_SAMPLES));
        samples.push(state.sample());

        let mut outcome = FlightOutcome::TimedOut;
        let mut step_count = 0;

        for step_index in 1..=max_steps {
            let next = self.step(&state, step_index);
            step_count = step_index;

            let ground = (next.position.y < 0.0)
                .then(|| crossing_fraction(state.position.y, next.position.y, 0.0));
            let boundary = (next.position.x >= max_distance)
                .then(|| crossing_fraction(state.position.x, next.position.x, max_distance));
            let timeout = (next.time > max_time)
                .then(|| crossing_fraction(state.time, next.time, max_time));

            // Earliest crossing wins, ties go to the first listed
            let terminal = [
                (FlightOutcome::Grounded, ground),
                (FlightOutcome::OutOfRange, boundary),
                (FlightOutcome::TimedOut, timeout),
            ]
            .into_iter()
            .filter_map(|(kind, frac)| frac.map(|f| (kind, f)))
            .fold(None, |best: Option<(FlightOutcome, f64)>, (kind, frac)| match best {
                Some((_, earliest)) if earliest <= frac => best,
                _ => Some((kind, frac)),
            });

            if let Some((kind, frac)) = terminal {
                let mut last = state.lerp(&next, frac);
                match kind {
                    FlightOutcome::Grounded => last.position.y = 0.0,
                    FlightOutcome::OutOfRange => last.position.x = max_distance,
                    FlightOutcome::TimedOut => last.time = max_time,
                }
                record_terminal(&mut samples, state.time, &last);
                state = last;
                outcome = kind;
                break;
            }

            state = next;
            samples.push(state.sample());
        }

        // First sample at the greatest height
        let apex = samples
            .iter()
            .fold(samples[0], |best, s| if s.y > best.y { *s } else { best });

        let impact_speed = state.velocity.x.hypot(state.velocity.y);
        let result = SimulationResult {
            range_m: state.position.x,
            flight_time_s: state.time,
            outcome,
            launch_speed_mps: self.launch.speed.capped_mps,
            raw_launch_speed_mps: self.launch.speed.raw_mps,
            speed_capped: self.launch.speed.is_capped(),
            max_height_m: apex.y,
            max_height_distance_m: apex.x,
            impact_speed_mps: impact_speed,
            impact_energy_j: 0.5 * self.params.arrow_mass_kg * impact_speed * impact_speed,
            step_count,
            samples,
        };

        if result.is_impact() {
            debug!(
                "landed at {:.2} m after {:.3} s ({} samples)",
                result.range_m,
                result.flight_time_s,
                result.samples.len()
            );
        } else {
            warn!(
                "trajectory did not land: {} at x = {:.2} m, y = {:.2} m, t = {:.3} s",
                result.outcome, state.position.x, state.position.y, result.flight_time_s
            );
        }

        Ok(result)
    }
}

/// Run a complete trajectory with the default configuration
pub fn simulate(params: LaunchParameters) -> Result<SimulationResult> {
    simulate_with_config(params, &SimulationConfig::default())
}

pub fn simulate_with_config(
    params: LaunchParameters,
    config: &SimulationConfig,
) -> Result<SimulationResult> {
    config.validate()?;
    TrajectorySolver::new(params, config.clone())?.solve()
}
