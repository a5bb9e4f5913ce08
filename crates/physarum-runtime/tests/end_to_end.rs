//! Whole-loop behavior of the simulator.
//!
//! 1. A single deposit spreads to exactly one 3×3 block and decays
//! 2. Field mass follows the deposit/decay recurrence on a torus
//! 3. Reflective grids lose mass at the edges
//! 4. Sensing in one step never sees another agent's move from the same step
//! 5. Seeded runs are reproducible

use physarum_runtime::prelude::*;
use std::f64::consts::FRAC_PI_4;

fn pixel_config(size: usize, boundary: BoundaryMode) -> SimulationConfig {
    SimulationConfig {
        domain: DomainShape::PixelGrid {
            width: size,
            height: size,
        },
        steps: 1,
        agent_count: 1,
        sensor: SensorGeometry {
            count: 3,
            angle: FRAC_PI_4,
            offset: 2.0,
        },
        rotation_angle: FRAC_PI_4,
        step_length: 1.0,
        deposit: 1.0,
        decay: 0.5,
        boundary,
        kernel: DiffusionKernel::Uniform,
        export_every: None,
        rotation_noise: 0.0,
        max_concentration: None,
        seed: Some(2024),
        log_every: 0,
    }
}

#[test]
fn single_agent_first_step_fills_one_block() {
    let config = pixel_config(10, BoundaryMode::Periodic);
    let mut sim = SimulationBuilder::new()
        .with_config(config.clone())
        .with_agents(vec![Agent::new(Position::new(5.0, 5.0), 0.0)])
        .build()
        .unwrap();

    sim.step().unwrap();

    let agent = sim.population().agents()[0];
    let cell = config.domain.cell_of(&agent.position);
    let expected = 1.0 / 9.0 * 0.5;

    let field = sim.field();
    for y in 0..10i64 {
        for x in 0..10i64 {
            let dx = (x - cell.x).rem_euclid(10);
            let dy = (y - cell.y).rem_euclid(10);
            let near = [0, 1, 9].contains(&dx) && [0, 1, 9].contains(&dy);
            let value = field.get(x as usize, y as usize);
            if near {
                assert!((value - expected).abs() < 1e-12, "cell ({}, {}) = {}", x, y, value);
            } else {
                assert_eq!(value, 0.0, "cell ({}, {})", x, y);
            }
        }
    }
    assert!((field.total() - 0.5).abs() < 1e-12);
}

#[test]
fn periodic_mass_follows_recurrence() {
    let mut config = SimulationConfig::from_preset(Preset::Small).with_seed(5);
    config.steps = 40;
    config.agent_count = 300;
    config.decay = 0.2;

    let mut sim = Simulation::new(config.clone()).unwrap();
    let mut expected = 0.0;
    while !sim.is_finished() {
        let report = sim.step().unwrap();
        expected = (expected + config.agent_count as f64 * config.deposit) * (1.0 - config.decay);
        assert!(
            (report.total_mass - expected).abs() < 1e-9 * expected.max(1.0),
            "step {}: {} vs {}",
            report.step,
            report.total_mass,
            expected
        );
    }
}

#[test]
fn decay_alone_scales_total_mass() {
    let mut config = pixel_config(8, BoundaryMode::Periodic);
    config.deposit = 0.0;
    config.decay = 0.25;
    config.steps = 5;
    config.kernel = DiffusionKernel::Peaked;

    let values: Vec<f64> = (0..64).map(|i| (i % 5) as f64).collect();
    let initial: f64 = values.iter().sum();
    let mut sim = SimulationBuilder::new()
        .with_config(config)
        .with_initial_field(values)
        .build()
        .unwrap();

    let mut before = initial;
    for _ in 0..5 {
        let report = sim.step().unwrap();
        assert!((report.total_mass - before * 0.75).abs() < 1e-9);
        before = report.total_mass;
    }
}

#[test]
fn reflective_grid_leaks_mass() {
    let mut periodic = SimulationConfig::from_preset(Preset::Small).with_seed(8);
    periodic.steps = 60;
    periodic.agent_count = 400;
    let reflective = SimulationConfig {
        boundary: BoundaryMode::Reflective,
        ..periodic.clone()
    };

    let periodic_total = Simulation::new(periodic).unwrap().run().unwrap().final_stats.total;
    let mut sim = Simulation::new(reflective).unwrap();
    let summary = sim.run().unwrap();

    assert!(summary.total_reflected > 0);
    assert!(summary.final_stats.total < periodic_total);
}

#[test]
fn sensing_ignores_other_agents_moves() {
    let config = pixel_config(20, BoundaryMode::Periodic);
    let values: Vec<f64> = (0..400).map(|i| ((i * 13) % 7) as f64).collect();
    let field = TrailField::from_values(
        20,
        20,
        BoundaryMode::Periodic,
        DiffusionKernel::Uniform,
        values,
    )
    .unwrap();

    let watched = Agent::new(Position::new(10.0, 10.0), 0.3);
    let before = AgentPopulation::from_agents(vec![Agent::new(Position::new(3.0, 4.0), 1.0), watched]);
    let after = AgentPopulation::from_agents(vec![Agent::new(Position::new(11.0, 10.0), 2.0), watched]);

    let a = before.sense_all(&field, &config);
    let b = after.sense_all(&field, &config);
    assert_eq!(a[1], b[1]);
}

#[test]
fn deposits_land_after_every_agent_sensed() {
    // Agent 0 goes straight and ends its move on agent 1's center probe.
    // If deposits happened mid-pass, agent 1 would see it and go straight.
    let mut config = pixel_config(20, BoundaryMode::Periodic);
    config.deposit = 10.0;
    let values = {
        let mut v = vec![0.0; 400];
        // Agent 0's center probe, so it holds its heading.
        v[10 * 20 + 13] = 2.0;
        // Agent 1 at (10, 10) heading +x: left probe lands on cell (11, 9).
        v[9 * 20 + 11] = 1.0;
        v
    };
    let mut sim = SimulationBuilder::new()
        .with_config(config)
        .with_initial_field(values)
        .with_agents(vec![
            Agent::new(Position::new(11.0, 10.0), 0.0),
            Agent::new(Position::new(10.0, 10.0), 0.0),
        ])
        .build()
        .unwrap();

    let readings = sim.population().sense_all(sim.field(), sim.config());
    assert_eq!(readings[1].center, 0.0);
    assert_eq!(readings[1].left, 1.0);

    sim.step().unwrap();
    let turned = sim.population().agents()[1].heading;
    assert!((turned + FRAC_PI_4).abs() < 1e-12);
}

#[test]
fn seeded_runs_are_reproducible() {
    let mut config = SimulationConfig::from_preset(Preset::Small).with_seed(77);
    config.steps = 30;
    config.agent_count = 200;
    config.rotation_noise = 0.05;

    let mut a = Simulation::new(config.clone()).unwrap();
    let mut b = Simulation::new(config.clone()).unwrap();
    a.run().unwrap();
    b.run().unwrap();
    assert_eq!(a.field().values(), b.field().values());
    assert_eq!(a.population().agents(), b.population().agents());

    let mut c = Simulation::new(config.with_seed(78)).unwrap();
    c.run().unwrap();
    assert_ne!(a.field().values(), c.field().values());
}

#[test]
fn clamp_bounds_every_cell() {
    let mut config = SimulationConfig::from_preset(Preset::Small).with_seed(3);
    config.steps = 25;
    config.agent_count = 500;
    config.deposit = 5.0;
    config.max_concentration = Some(0.75);

    let mut sim = Simulation::new(config).unwrap();
    let summary = sim.run().unwrap();
    assert!(summary.final_stats.max <= 0.75);
}

#[test]
fn invalid_config_never_starts() {
    let mut config = pixel_config(10, BoundaryMode::Periodic);
    config.sensor.count = 5;
    let err = Simulation::new(config).unwrap_err();
    assert_eq!(err.as_config().map(|e| e.field()), Some("sensor.count"));
}
