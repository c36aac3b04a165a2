use archery_sim::constants::{G_ACCEL_MPS2, MAX_LAUNCH_SPEED_MPS};
use archery_sim::{
    simulate, simulate_with_config, vacuum, FlightOutcome, LaunchParameters, SimulationConfig,
    SimulationError, WindModel,
};

/// 20 lbf, 24", 50 g arrow, 50% efficiency: about 32.9 m/s
fn light_bow() -> LaunchParameters {
    LaunchParameters {
        draw_force_n: 88.9644,
        draw_length_m: 0.6096,
        arrow_mass_kg: 0.05,
        efficiency: 0.5,
        launch_angle_deg: 30.0,
        start_height_m: 1.5,
        ..Default::default()
    }
}

fn with_drag(params: LaunchParameters) -> LaunchParameters {
    LaunchParameters {
        drag_coefficient: 2.0,
        air_density_kg_m3: 1.225,
        frontal_area_m2: 5.0e-5,
        ..params
    }
}

#[test]
fn test_flat_shot_matches_free_fall() {
    for height in [0.5, 1.5, 2.0] {
        let params = LaunchParameters {
            launch_angle_deg: 0.0,
            start_height_m: height,
            ..light_bow()
        };
        let result = simulate(params).unwrap();
        assert_eq!(result.outcome, FlightOutcome::Grounded);

        let dt = SimulationConfig::default().time_step_s;
        let expected_time = (2.0 * height / G_ACCEL_MPS2).sqrt();
        let v0 = result.launch_speed_mps;
        assert!(
            (result.flight_time_s - expected_time).abs() < 2.0 * dt,
            "h = {height}: t = {} vs {expected_time}",
            result.flight_time_s
        );
        assert!(
            (result.range_m - v0 * expected_time).abs() < v0 * 2.0 * dt,
            "h = {height}: range = {} vs {}",
            result.range_m,
            v0 * expected_time
        );
    }
}

#[test]
fn test_speed_cap_freezes_range() {
    let base = LaunchParameters {
        draw_force_n: 177.9,
        draw_length_m: 0.711,
        arrow_mass_kg: 0.030,
        efficiency: 1.0,
        launch_angle_deg: 10.0,
        start_height_m: 1.5,
        ..Default::default()
    };
    let capped = simulate(base.clone()).unwrap();
    let stronger = simulate(LaunchParameters {
        draw_force_n: 300.0,
        ..base.clone()
    })
    .unwrap();

    assert!(capped.is_impact());
    assert!(capped.speed_capped);
    assert_eq!(capped.launch_speed_mps, MAX_LAUNCH_SPEED_MPS);
    assert_eq!(stronger.launch_speed_mps, MAX_LAUNCH_SPEED_MPS);
    assert_eq!(capped.range_m, stronger.range_m);
    assert_eq!(capped.flight_time_s, stronger.flight_time_s);

    // Below the cap more force still means more range
    let weak = simulate(LaunchParameters {
        draw_force_n: 60.0,
        ..base.clone()
    })
    .unwrap();
    let less_weak = simulate(LaunchParameters {
        draw_force_n: 80.0,
        ..base
    })
    .unwrap();
    assert!(!weak.speed_capped);
    assert!(less_weak.range_m > weak.range_m);
}

#[test]
fn test_sample_times_strictly_increase() {
    let configs = [
        light_bow(),
        with_drag(light_bow()),
        LaunchParameters { launch_angle_deg: -15.0, ..light_bow() },
        LaunchParameters { launch_angle_deg: 90.0, ..light_bow() },
        LaunchParameters { start_height_m: 0.0, ..light_bow() },
        LaunchParameters::default(),
    ];

    for params in configs {
        let result = simulate(params).unwrap();
        assert_eq!(result.samples[0].time, 0.0);
        for pair in result.samples.windows(2) {
            assert!(pair[0].time < pair[1].time, "{:?} !< {:?}", pair[0], pair[1]);
        }
    }
}

#[test]
fn test_impact_lands_exactly_on_ground() {
    for angle in [-15.0, -5.0, 0.0, 10.0, 25.0, 45.0, 60.0, 80.0] {
        for params in [
            LaunchParameters { launch_angle_deg: angle, ..light_bow() },
            with_drag(LaunchParameters { launch_angle_deg: angle, ..light_bow() }),
        ] {
            let result = simulate(params).unwrap();
            assert_eq!(result.outcome, FlightOutcome::Grounded, "angle {angle}");

            let last = result.final_sample().unwrap();
            assert_eq!(last.y, 0.0, "angle {angle}");
            assert_eq!(result.range_m, last.x);
            assert_eq!(result.flight_time_s, last.time);
            assert!(result.samples.iter().all(|s| s.y >= 0.0));
        }
    }
}

#[test]
fn test_drag_reduces_range() {
    for angle in [5.0, 15.0, 30.0, 45.0, 60.0, 75.0, 85.0] {
        let params = LaunchParameters {
            launch_angle_deg: angle,
            ..light_bow()
        };
        let plain = simulate(params.clone()).unwrap();
        let draggy = simulate(with_drag(params)).unwrap();

        assert!(plain.is_impact() && draggy.is_impact());
        assert!(
            draggy.range_m < plain.range_m,
            "angle {angle}: {} !< {}",
            draggy.range_m,
            plain.range_m
        );
        assert!(draggy.max_height_m < plain.max_height_m);
    }
}

#[test]
fn test_capped_scenario_stops_at_distance_bound() {
    let params = LaunchParameters {
        draw_force_n: 177.9,
        draw_length_m: 0.711,
        arrow_mass_kg: 0.030,
        efficiency: 1.0,
        launch_angle_deg: 45.0,
        start_height_m: 1.5,
        ..Default::default()
    };
    let reference = vacuum::flight_time_and_range(&params).unwrap();
    let result = simulate(params).unwrap();

    assert!((result.raw_launch_speed_mps - 91.8).abs() < 0.1);
    assert_eq!(result.launch_speed_mps, 70.0);
    let first = result.samples[0];
    assert!((first.vx - 49.497).abs() < 1e-3);
    assert!((first.vy - 49.497).abs() < 1e-3);

    assert!(reference.range_m > 250.0);
    assert_eq!(result.outcome, FlightOutcome::OutOfRange);
    assert!(!result.is_impact());
    assert_eq!(result.range_m, 250.0);
    assert!(result.final_sample().unwrap().y > 0.0);
    assert!((result.flight_time_s - 250.0 / 49.497).abs() < 0.01);
}

#[test]
fn test_integrator_agrees_with_closed_form() {
    let params = light_bow();
    let reference = vacuum::flight_time_and_range(&params).unwrap();
    let coarse = simulate(params.clone()).unwrap();
    let fine = simulate_with_config(
        params,
        &SimulationConfig {
            time_step_s: 0.001,
            ..Default::default()
        },
    )
    .unwrap();

    assert!((coarse.range_m - reference.range_m).abs() < 0.5);
    assert!((fine.range_m - reference.range_m).abs() < 0.05);
    assert!((fine.flight_time_s - reference.flight_time_s).abs() < 0.002);
    assert!((coarse.max_height_m - reference.apex_height_m).abs() < 0.15);

    // Euler lags the parabola by g·t·dt/2, under 0.02 m here
    let (h0, vy0) = (fine.samples[0].y, fine.samples[0].vy);
    for s in &fine.samples {
        let expected = vacuum::height_at(h0, vy0, s.time);
        assert!((s.y - expected).abs() < 0.05, "t = {}: {} vs {expected}", s.time, s.y);
    }
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let cases = [
        (LaunchParameters { arrow_mass_kg: 0.0, ..light_bow() }, "arrow_mass_kg"),
        (LaunchParameters { arrow_mass_kg: -0.02, ..light_bow() }, "arrow_mass_kg"),
        (LaunchParameters { start_height_m: -1.0, ..light_bow() }, "start_height_m"),
        (LaunchParameters { frontal_area_m2: -1.0e-5, ..with_drag(light_bow()) }, "frontal_area_m2"),
        (LaunchParameters { drag_coefficient: -0.5, ..light_bow() }, "drag_coefficient"),
    ];

    for (params, field) in cases {
        match simulate(params) {
            Err(SimulationError::InvalidParameter { field: f, .. }) => assert_eq!(f, field),
            Ok(result) => panic!("expected rejection of {field}, got range {}", result.range_m),
        }
    }

    for time_step_s in [0.0, -0.01] {
        let config = SimulationConfig { time_step_s, ..Default::default() };
        let err = simulate_with_config(light_bow(), &config).unwrap_err();
        assert_eq!(err.field(), "time_step_s");
    }
}

#[test]
fn test_extreme_inputs_still_terminate() {
    for wind_model in [WindModel::VelocityOffset, WindModel::Acceleration] {
        let config = SimulationConfig { wind_model, ..Default::default() };
        for angle in [-90.0, -45.0, 0.0, 45.0, 89.9, 90.0] {
            for wind in [-10.0, 0.0, 10.0] {
                let params = LaunchParameters {
                    launch_angle_deg: angle,
                    wind_speed_mps: wind,
                    ..light_bow()
                };
                let result = simulate_with_config(params, &config).unwrap();
                assert!(result.range_m.is_finite());
                assert!(result.flight_time_s.is_finite());
                assert!(result.step_count <= 2000);
                assert!(result.flight_time_s <= config.max_time_s);
            }
        }
    }
}

#[test]
fn test_headwind_past_launch_speed_goes_backwards() {
    let config = SimulationConfig {
        wind_model: WindModel::VelocityOffset,
        ..Default::default()
    };
    let params = LaunchParameters {
        launch_angle_deg: 80.0,
        wind_speed_mps: 10.0,
        ..light_bow()
    };
    let result = simulate_with_config(params, &config).unwrap();
    assert!(result.is_impact());
    assert!(result.range_m < 0.0);
}

#[test]
fn test_parallel_runs_are_independent() {
    let angles = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0];
    let sequential: Vec<f64> = angles
        .iter()
        .map(|&a| simulate(LaunchParameters { launch_angle_deg: a, ..light_bow() }).unwrap().range_m)
        .collect();

    let handles: Vec<_> = angles
        .iter()
        .map(|&a| {
            std::thread::spawn(move || {
                simulate(with_drag(LaunchParameters { launch_angle_deg: a, ..light_bow() })).unwrap();
                simulate(LaunchParameters { launch_angle_deg: a, ..light_bow() }).unwrap().range_m
            })
        })
        .collect();

    let parallel: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(sequential, parallel);
}
