use approx::assert_relative_eq;
use closest_planet::analysis::AverageAnalyzer;
use closest_planet::astro::{distance, Planet};
use closest_planet::config::{Mode, PlanetConfig, SimulationConfig};
use closest_planet::consts::DAYS_PER_YEAR;
use closest_planet::sampling::{DistanceSampler, SamplingMode, Schedule};
use closest_planet::simulation::Simulation;
use closest_planet::SimError;

fn earth_mercury_venus() -> Vec<Planet> {
    vec![
        Planet::circular("Earth", 1.0, 365.0, 0.0).unwrap(),
        Planet::circular("Mercury", 0.39, 88.0, 0.0).unwrap(),
        Planet::circular("Venus", 0.72, 225.0, 0.0).unwrap(),
    ]
}

/// The whole point: averaged over time, Mercury is nearer to Earth than
/// Venus is.
#[test]
fn mercury_beats_venus_on_average() {
    let planets = earth_mercury_venus();
    let schedule = Schedule::new(
        10.0 * DAYS_PER_YEAR,
        SamplingMode::MonteCarlo {
            samples: 100_000,
            seed: 2019,
        },
    )
    .unwrap();

    let report = Simulation::new(planets, schedule).unwrap().run().unwrap();
    let mercury = report.mean_distance("Earth", "Mercury").unwrap();
    let venus = report.mean_distance("Earth", "Venus").unwrap();

    assert!(mercury < venus, "Mercury {} vs Venus {}", mercury, venus);
    assert_eq!(report.closest_to("Earth"), Some("Mercury"));

    // Both are close to the circular-orbit averages
    assert_relative_eq!(mercury, 1.038, max_relative = 0.01);
    assert_relative_eq!(venus, 1.13, max_relative = 0.02);

    // With only two neighbours, one of them is always the nearest
    let earth = report.planet("Earth").unwrap();
    let venus_nearest = earth.neighbors["Venus"].nearest_fraction.unwrap();
    let mercury_nearest = earth.neighbors["Mercury"].nearest_fraction.unwrap();
    assert_relative_eq!(venus_nearest + mercury_nearest, 1.0, max_relative = 1e-12);
}

#[test]
fn mercury_is_everyones_closest_neighbour() {
    let mut config = SimulationConfig::inner_planets();
    config.step_or_sample_count = 20_000;

    let report = Simulation::from_config(&config).unwrap().run().unwrap();
    for name in ["Venus", "Earth", "Mars"] {
        assert_eq!(report.closest_to(name), Some("Mercury"), "for {}", name);
    }
    assert_eq!(report.closest_to("Mercury"), Some("Venus"));
}

#[test]
fn grid_and_monte_carlo_agree() {
    let mut config = SimulationConfig::inner_planets();
    config.step_or_sample_count = 50_000;
    config.horizon = 50.0 * DAYS_PER_YEAR;

    let random = Simulation::from_config(&config).unwrap().run().unwrap();
    config.mode = Mode::Grid;
    let grid = Simulation::from_config(&config).unwrap().run().unwrap();

    for (r, g) in random.planets.iter().zip(&grid.planets) {
        assert_eq!(r.closest, g.closest);
        for (name, stats) in &r.neighbors {
            assert_relative_eq!(
                stats.mean_distance,
                g.neighbors[name].mean_distance,
                max_relative = 0.01
            );
        }
    }
}

#[test]
fn same_seed_same_report() {
    let mut config = SimulationConfig::inner_planets();
    config.step_or_sample_count = 5_000;
    config.seed = Some(7);

    let first = Simulation::from_config(&config).unwrap().run().unwrap();
    let second = Simulation::from_config(&config).unwrap().run().unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    config.seed = Some(8);
    let third = Simulation::from_config(&config).unwrap().run().unwrap();
    assert_ne!(first, third);
}

#[test]
fn chunked_run_matches_single_threaded() {
    let mut config = SimulationConfig::inner_planets();
    config.step_or_sample_count = 30_000;
    let simulation = Simulation::from_config(&config).unwrap();

    let serial = simulation.run().unwrap();
    for chunks in [2, 3, 8] {
        let parallel = simulation.run_parallel(chunks).unwrap();
        assert_eq!(serial.epochs, parallel.epochs);
        for (s, p) in serial.planets.iter().zip(&parallel.planets) {
            assert_eq!(s.closest, p.closest);
            for (name, stats) in &s.neighbors {
                assert_relative_eq!(
                    stats.mean_distance,
                    p.neighbors[name].mean_distance,
                    max_relative = 1e-9
                );
            }
        }
    }
}

#[test]
fn streaming_records_feed_the_analyzer() {
    let planets = earth_mercury_venus();
    let schedule = Schedule::new(365.0, SamplingMode::Grid { steps: 365 }).unwrap();
    let sampler = DistanceSampler::new(&planets, schedule).unwrap();

    let mut analyzer = AverageAnalyzer::new(&planets).unwrap();
    for record in sampler.records() {
        assert_eq!(
            record.distance,
            distance(&planets[record.b.0], &planets[record.a.0], record.time)
        );
        analyzer.record(&record).unwrap();
    }
    assert_eq!(analyzer.sample_count(), 3 * 365);

    let report = analyzer.finalize().unwrap();
    // Only records went in, so there's no per-epoch nearest tally
    assert_eq!(report.epochs, 0);
    assert!(matches!(analyzer.finalize(), Err(SimError::InvalidState(_))));
}

#[test]
fn eccentric_orbits_are_supported() {
    let mut config = SimulationConfig::inner_planets();
    config.step_or_sample_count = 5_000;
    // Mercury's real eccentricity
    config.planets[0] = PlanetConfig {
        eccentricity: 0.2056,
        inclination: 7f64.to_radians(),
        ..config.planets[0].clone()
    };

    let report = Simulation::from_config(&config).unwrap().run().unwrap();
    let mercury = report.planet("Mercury").unwrap();
    let to_sun_min = config.planets[0].radius * (1.0 - 0.2056);
    for stats in mercury.neighbors.values() {
        assert!(stats.min_distance > 0.0);
        assert!(stats.max_distance < 1.524 + config.planets[0].radius * 1.2056 + 1e-9);
        assert!(stats.mean_distance > to_sun_min);
    }
}
