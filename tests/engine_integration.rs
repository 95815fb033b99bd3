//! Encounter engine integration tests
//!
//! Deterministic traces with fixed damage, crit extremes and haste timing.

use rotation_sim::aggregate::{aggregate, run_rng};
use rotation_sim::core::types::{Action, Buff};
use rotation_sim::core::{load_config, EncounterConfig};
use rotation_sim::simulation::{Balanced, Engine, FastPriority, SlowPriority};

fn fixed_damage(damage: f64) -> EncounterConfig {
    EncounterConfig {
        min_damage: damage,
        max_damage: damage,
        basic_crit_chance: 0.0,
        fast_crit_chance: 0.0,
        slow_crit_chance: 0.0,
        ..Default::default()
    }
}

fn formula(action: Action, weapon: f64) -> f64 {
    match action {
        Action::BasicStrike => weapon,
        Action::FastSpecial => weapon * 0.8 + 135.0,
        Action::SlowSpecial => weapon * 1.2 + 160.0,
    }
}

/// Hand-traced: slow@0, fast@1, basic@301, fast@401, slow@701, basic@702, fast@801
#[test]
fn test_golden_fast_priority_scenario() {
    let experiment = load_config("data/rotations/golden.toml").expect("golden config");
    let config = experiment.encounter;
    let engine = Engine::new(&config, &FastPriority).unwrap();

    let (state, log) = engine.run_traced(&mut run_rng(experiment.seed, 0));

    let trace: Vec<_> = log.hits().map(|(tick, action, _, _)| (tick, action)).collect();
    assert_eq!(
        trace,
        vec![
            (0, Action::SlowSpecial),
            (1, Action::FastSpecial),
            (301, Action::BasicStrike),
            (401, Action::FastSpecial),
            (701, Action::SlowSpecial),
            (702, Action::BasicStrike),
            (801, Action::FastSpecial),
        ]
    );

    // 2 * 760 + 3 * 535 + 2 * 500
    assert!((state.totals.total_damage - 4125.0).abs() < 1e-9);
    assert_eq!(state.totals.basic_strikes, 2);
    assert_eq!(state.totals.fast_specials, 3);
    assert_eq!(state.totals.slow_specials, 2);
    assert!((state.elapsed(&config) - 10.0).abs() < 1e-9);
}

#[test]
fn test_golden_scenario_through_aggregator() {
    let experiment = load_config("data/rotations/golden.toml").expect("golden config");
    let result = aggregate(&FastPriority, &experiment.encounter, experiment.runs, experiment.seed)
        .unwrap();

    assert_eq!(result.runs, 1);
    assert!((result.mean_damage - 4125.0).abs() < 1e-9);
    assert_eq!(result.mean_basic_strikes, 2.0);
    assert_eq!(result.mean_fast_specials, 3.0);
    assert_eq!(result.mean_slow_specials, 2.0);
}

#[test]
fn test_fixed_damage_without_crits() {
    let config = fixed_damage(540.0);
    let policy = Balanced::new(1.0).unwrap();
    let engine = Engine::new(&config, &policy).unwrap();

    for seed in 0..5 {
        let (_, log) = engine.run_traced(&mut run_rng(seed, 0));
        let mut seen = [false; 3];
        for (_, action, damage, crit) in log.hits() {
            seen[action as usize] = true;
            assert!(!crit);
            assert!(
                (damage - formula(action, 540.0)).abs() < 1e-9,
                "{:?} dealt {}",
                action,
                damage
            );
        }
        assert_eq!(seen, [true; 3], "every ability should land in 180s");
    }
}

#[test]
fn test_certain_crits_multiply_every_hit() {
    let config = EncounterConfig {
        basic_crit_chance: 1.0,
        fast_crit_chance: 1.0,
        slow_crit_chance: 1.0,
        ..fixed_damage(500.0)
    };
    let engine = Engine::new(&config, &SlowPriority).unwrap();
    let (_, log) = engine.run_traced(&mut run_rng(17, 0));

    assert!(log.hits().count() > 0);
    for (_, action, damage, crit) in log.hits() {
        assert!(crit);
        assert!((damage - formula(action, 500.0) * config.crit_multiplier).abs() < 1e-9);
    }
}

#[test]
fn test_trace_totals_are_monotonic_and_consistent() {
    let config = EncounterConfig::default();
    let policy = Balanced::new(0.7).unwrap();
    let engine = Engine::new(&config, &policy).unwrap();
    let (state, log) = engine.run_traced(&mut run_rng(2024, 0));

    let mut running = 0.0;
    let mut last_tick = 0;
    for (tick, _, damage, _) in log.hits() {
        assert!(damage >= 0.0);
        assert!(tick >= last_tick);
        running += damage;
        last_tick = tick;
    }
    assert!((running - state.totals.total_damage).abs() < 1e-6);

    for action in Action::ALL {
        let logged = log.hits().filter(|(_, a, _, _)| *a == action).count() as u32;
        assert_eq!(logged, state.totals.count(action));
    }
}

#[test]
fn test_periodic_haste_speeds_up_swings() {
    let config = EncounterConfig {
        swing_speed: 3.0,
        fast_cooldown: 1000.0,
        slow_cooldown: 1000.0,
        periodic_buff_cooldown: 2.0,
        periodic_buff_duration: 100.0,
        proc_chance: 0.0,
        duration: 10.0,
        ..fixed_damage(500.0)
    };
    let engine = Engine::new(&config, &FastPriority).unwrap();
    let (_, log) = engine.run_traced(&mut run_rng(0, 0));

    // Swing set at tick 1 without haste, later swings at 3.0 * 0.6 = 1.8s
    let trace: Vec<_> = log.hits().map(|(tick, action, _, _)| (tick, action)).collect();
    assert_eq!(
        trace,
        vec![
            (0, Action::SlowSpecial),
            (1, Action::FastSpecial),
            (301, Action::BasicStrike),
            (481, Action::BasicStrike),
            (661, Action::BasicStrike),
            (841, Action::BasicStrike),
        ]
    );
    // Activations at 2, 4, 6, 8 and on the closing tick at 10 seconds
    assert_eq!(log.buff_applications(Buff::Periodic), 5);
}

#[test]
fn test_short_encounter_never_sees_periodic_haste() {
    let config = EncounterConfig {
        duration: 299.0,
        ..Default::default()
    };
    let engine = Engine::new(&config, &FastPriority).unwrap();
    let (_, log) = engine.run_traced(&mut run_rng(5, 0));
    assert_eq!(log.buff_applications(Buff::Periodic), 0);

    let config = EncounterConfig {
        duration: 301.0,
        ..Default::default()
    };
    let engine = Engine::new(&config, &FastPriority).unwrap();
    let (_, log) = engine.run_traced(&mut run_rng(5, 0));
    assert_eq!(log.buff_applications(Buff::Periodic), 1);
}

#[test]
fn test_termination_time_bounds() {
    for duration in [1.0, 10.0, 10.005, 33.333, 180.0] {
        let config = EncounterConfig {
            duration,
            ..Default::default()
        };
        let engine = Engine::new(&config, &FastPriority).unwrap();
        let state = engine.run(&mut run_rng(0, 0));
        let elapsed = state.elapsed(&config);
        assert!(elapsed >= duration - 1e-9, "{} < {}", elapsed, duration);
        assert!(elapsed < duration + config.tick_size, "{} too late", elapsed);
    }
}
