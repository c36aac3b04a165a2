use serde::Serialize;
use std::fmt;

use crate::integrator::{SimulationResult, TrajectorySample};

/// Notable points in a resampled trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleFlag {
    Apex,
    Terminal,
}

impl fmt::Display for SampleFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleFlag::Apex => write!(f, "apex"),
            SampleFlag::Terminal => write!(f, "terminal"),
        }
    }
}

/// Trajectory state at a fixed horizontal distance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceSample {
    pub distance_m: f64,
    pub height_m: f64,
    pub time_s: f64,
    pub speed_mps: f64,
    pub flags: Vec<SampleFlag>,
}

/// Resample a finished trajectory every `step_m` metres downrange
///
/// Each distance uses the first segment of the path that reaches it, so a
/// trajectory blown backwards by an acceleration-mode headwind is sampled
/// on its outbound leg only. The terminal point is always included.
pub fn sample_at_distance(result: &SimulationResult, step_m: f64) -> Vec<DistanceSample> {
    let step_size = if step_m <= 0.0 || !step_m.is_finite() {
        return Vec::new();
    } else if step_m < 0.1 {
        0.1
    } else {
        step_m
    };

    let samples = &result.samples;
    let Some(last) = samples.last() else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut cursor = 0;
    let mut distance = 0.0;
    let mut index = 0usize;

    while distance < result.range_m - 1e-9 {
        match find_crossing(samples, cursor, distance) {
            Some((segment, sample)) => {
                cursor = segment;
                out.push(sample);
            }
            None => break,
        }
        index += 1;
        distance = index as f64 * step_size;
    }

    out.push(to_distance_sample(last));
    if let Some(terminal) = out.last_mut() {
        terminal.flags.push(SampleFlag::Terminal);
    }

    if result.max_height_m > samples[0].y {
        if let Some(idx) = closest_index(&out, result.max_height_distance_m) {
            out[idx].flags.insert(0, SampleFlag::Apex);
        }
    }

    out
}

fn to_distance_sample(sample: &TrajectorySample) -> DistanceSample {
    DistanceSample {
        distance_m: sample.x,
        height_m: sample.y,
        time_s: sample.time,
        speed_mps: sample.speed(),
        flags: Vec::new(),
    }
}

/// First segment at or after `from` whose x-span contains `distance`
fn find_crossing(
    samples: &[TrajectorySample],
    from: usize,
    distance: f64,
) -> Option<(usize, DistanceSample)> {
    for i in from..samples.len().saturating_sub(1) {
        let a = &samples[i];
        let b = &samples[i + 1];
        if a.x <= distance && distance <= b.x {
            let span = b.x - a.x;
            let frac = if span.abs() < f64::EPSILON { 0.0 } else { (distance - a.x) / span };
            let lerp = |p: f64, q: f64| p + (q - p) * frac;
            return Some((
                i,
                DistanceSample {
                    distance_m: distance,
                    height_m: lerp(a.y, b.y),
                    time_s: lerp(a.time, b.time),
                    speed_mps: lerp(a.speed(), b.speed()),
                    flags: Vec::new(),
                },
            ));
        }
    }

    None
}

fn closest_index(samples: &[DistanceSample], target_distance: f64) -> Option<usize> {
    samples
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let da = (a.distance_m - target_distance).abs();
            let db = (b.distance_m - target_distance).abs();
            da.total_cmp(&db)
        })
        .map(|(i, _)| i)
}
