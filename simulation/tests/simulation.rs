//! Scenario tests for whole simulation runs

use std::collections::HashSet;
use std::time::{Duration, Instant};

use simulation::{AnimalKind, ExitPolicy, Schedule, SimConfig, SimulationWorld, Status};

fn stepped_config(seed: u64, hunters: usize) -> SimConfig {
    SimConfig {
        hunters,
        seed: Some(seed),
        schedule: Schedule::Stepped,
        ..SimConfig::default()
    }
}

fn run(config: SimConfig) -> SimulationWorld {
    let mut world = SimulationWorld::new(config).expect("valid config");
    world.seed_population();
    world.run().expect("run completes");
    world
}

/// Every listed entity sits where its location says, is listed once, and
/// every listed animal is alive.
fn assert_consistent(world: &SimulationWorld) {
    let habitat = &world.habitat;
    let mut seen = HashSet::new();

    for site in habitat.grid.sites() {
        let occupants = site.lock();
        for id in occupants.animals() {
            assert!(seen.insert(id.0), "animal {} listed twice", id.index());
            assert_eq!(habitat.arena.status(*id), Status::Alive);
            assert_eq!(habitat.arena.location_of(id.0), Some(site.location()));
        }
        for id in occupants.hunters() {
            assert!(seen.insert(id.0), "hunter {} listed twice", id.index());
            assert_eq!(habitat.arena.location_of(id.0), Some(site.location()));
        }
    }
}

#[test]
fn test_seeded_stepped_runs_are_identical() {
    let first = run(stepped_config(42, 2));
    let second = run(stepped_config(42, 2));

    assert_eq!(first.report().to_string(), second.report().to_string());
    assert_eq!(first.hunter_tallies().len(), 2);
    let points = |w: &SimulationWorld| -> Vec<u64> {
        w.hunter_tallies().iter().map(|t| t.points).collect()
    };
    assert_eq!(points(&first), points(&second));
}

#[test]
fn test_report_shape() {
    let world = run(stepped_config(7, 2));
    let text = world.report().to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 5);
    for line in lines {
        assert_eq!(line.matches("||").count(), 4);
        assert!(line.starts_with('|') && line.ends_with('|'));
    }
    assert_eq!(world.report().hunter_total(), 2);
}

#[test]
fn test_zero_hunters() {
    for seed in 0..8 {
        let world = run(stepped_config(seed, 0));
        let report = world.report();

        assert!(report.cells().all(|cell| cell.hunters == 0));
        assert!(world.hunter_tallies().is_empty());
        assert_consistent(&world);
    }
}

#[test]
fn test_counts_match_arena_after_stepped_run() {
    for seed in 0..8 {
        let world = run(stepped_config(seed, 3));
        assert_consistent(&world);

        // Dead animals have all been released
        let (animals, hunters) = world.habitat.grid.census();
        assert_eq!(hunters, 3);
        assert_eq!(world.habitat.arena.len(), animals + hunters);
        assert_eq!(world.report().animal_total() as usize, animals);
    }
}

#[test]
fn test_linger_policy_terminates() {
    let config = SimConfig {
        exit_policy: ExitPolicy::Linger,
        duration_ms: 200,
        ..stepped_config(3, 2)
    };
    let world = run(config);
    assert_consistent(&world);
}

#[test]
fn test_pool_run_finishes_near_deadline() {
    let config = SimConfig {
        seed: Some(5),
        duration_ms: 100,
        schedule: Schedule::Pool { workers: 4 },
        ..SimConfig::default()
    };

    let started = Instant::now();
    let world = run(config);

    assert!(started.elapsed() >= Duration::from_millis(100));
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_consistent(&world);
    let (animals, hunters) = world.habitat.grid.census();
    assert_eq!(hunters, 2);
    assert_eq!(world.habitat.arena.len(), animals + hunters);
}

#[test]
fn test_pool_contention_on_tiny_grids() {
    let crowd: Vec<AnimalKind> = AnimalKind::ALL.iter().copied().cycle().take(20).collect();

    for (width, height) in [(1, 1), (2, 1)] {
        for exit_policy in [ExitPolicy::Prompt, ExitPolicy::Linger] {
            for seed in 0..3 {
                let config = SimConfig {
                    width,
                    height,
                    hunters: 6,
                    animals: crowd.clone(),
                    duration_ms: 80,
                    seed: Some(seed),
                    schedule: Schedule::Pool { workers: 8 },
                    exit_policy,
                    ..SimConfig::default()
                };
                let world = run(config);

                assert_consistent(&world);
                let (animals, hunters) = world.habitat.grid.census();
                assert_eq!(hunters, 6, "{}x{} {:?} seed {}", width, height, exit_policy, seed);
                assert_eq!(
                    world.habitat.arena.len(),
                    animals + hunters,
                    "{}x{} {:?} seed {}",
                    width,
                    height,
                    exit_policy,
                    seed
                );
            }
        }
    }
}

#[test]
fn test_larger_grid_with_many_hunters() {
    let config = SimConfig {
        width: 12,
        height: 9,
        hunters: 16,
        duration_ms: 150,
        ..stepped_config(11, 16)
    };
    let world = run(config);

    assert_consistent(&world);
    assert_eq!(world.report().rows.len(), 12);
    assert!(world.report().rows.iter().all(|row| row.len() == 9));
    assert_eq!(world.report().hunter_total(), 16);
}
