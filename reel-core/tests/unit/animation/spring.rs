use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn configs() -> Vec<SpringConfig> {
    vec![
        SpringConfig::default(),
        SpringConfig::SLIDE,
        SpringConfig::SCALE,
        SpringConfig::new(20.0, 100.0, 1.0).unwrap(),
        SpringConfig::new(200.0, 120.0, 1.0).unwrap(),
        SpringConfig::new(500.0, 20.0, 20.0).unwrap(),
        SpringConfig::new(50.0, 100.0, 1.0).unwrap(),
    ]
}

#[test]
fn starts_at_zero_and_ignores_negative_time() {
    for cfg in configs() {
        for fps in [fps30(), Fps::new(60, 1).unwrap(), Fps::new(30000, 1001).unwrap()] {
            assert_eq!(spring(0, fps, cfg), 0.0);
            assert_eq!(spring(-1, fps, cfg), 0.0);
            assert_eq!(spring(-10_000, fps, cfg), 0.0);
        }
    }
}

#[test]
fn converges_to_one() {
    for cfg in configs() {
        for fps in [fps30(), Fps::new(60, 1).unwrap()] {
            let v = spring(200_000, fps, cfg);
            assert!((v - 1.0).abs() < 1e-9, "{cfg:?} -> {v}");
        }
    }
}

#[test]
fn heavily_overdamped_springs_still_settle() {
    for damping in [2e7, 2e8, 2e9] {
        let cfg = SpringConfig::new(damping, 1.0, 1.0).unwrap();
        let far = spring(i64::MAX / 4, fps30(), cfg);
        assert!((far - 1.0).abs() < 1e-9, "damping {damping} -> {far}");

        // Slow root is 1 / damping, so one time constant is `damping` seconds.
        let one_tau = (damping * 30.0) as i64;
        let v = spring(one_tau, fps30(), cfg);
        assert!((v - (1.0 - (-1.0f64).exp())).abs() < 1e-3, "damping {damping} -> {v}");
    }
}

#[test]
fn damped_configs_are_monotonic() {
    for cfg in [
        SpringConfig::SLIDE,
        SpringConfig::SCALE,
        SpringConfig::new(20.0, 100.0, 1.0).unwrap(),
        SpringConfig::new(500.0, 20.0, 20.0).unwrap(),
    ] {
        assert!(cfg.damping_ratio() >= 1.0 - 1e-9);
        let mut prev = spring(0, fps30(), cfg);
        for f in 1..600 {
            let v = spring(f, fps30(), cfg);
            assert!(v >= prev - 1e-12, "{cfg:?} frame {f}: {v} < {prev}");
            assert!(v <= 1.0 + 1e-12);
            prev = v;
        }
    }
}

#[test]
fn underdamped_overshoot_is_preserved() {
    let cfg = SpringConfig::default();
    assert!(cfg.damping_ratio() < 1.0);
    let peak = (0..120)
        .map(|f| spring(f, fps30(), cfg))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.05, "peak {peak}");
}

#[test]
fn overshoot_clamping_caps_at_target() {
    let cfg = SpringConfig::default().with_overshoot_clamping(true);
    for f in 0..120 {
        assert!(spring(f, fps30(), cfg) <= 1.0);
    }
}

#[test]
fn critical_branch_is_continuous_with_neighbors() {
    let critical = SpringConfig::new(20.0, 100.0, 1.0).unwrap();
    let under = critical.with_damping(20.0 - 1e-6);
    let over = critical.with_damping(20.0 + 1e-6);
    for f in [1, 3, 7, 15, 40] {
        let c = spring(f, fps30(), critical);
        assert!((c - spring(f, fps30(), under)).abs() < 1e-5);
        assert!((c - spring(f, fps30(), over)).abs() < 1e-5);
    }
}

#[test]
fn sampling_order_does_not_matter() {
    let cfg = SpringConfig::default();
    let forward: Vec<f64> = (0..90).map(|f| spring(f, fps30(), cfg)).collect();
    let backward: Vec<f64> = (0..90).rev().map(|f| spring(f, fps30(), cfg)).collect();
    let mut backward = backward;
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn config_validation_rejects_non_positive_values() {
    assert!(SpringConfig::new(0.0, 100.0, 1.0).is_err());
    assert!(SpringConfig::new(10.0, -1.0, 1.0).is_err());
    assert!(SpringConfig::new(10.0, 100.0, f64::NAN).is_err());
    assert!(matches!(
        SpringConfig::new(10.0, 100.0, 0.0),
        Err(ReelError::Config(_))
    ));
}

#[test]
fn degenerate_config_never_panics() {
    let cfg = SpringConfig {
        damping: -5.0,
        stiffness: 0.0,
        mass: 0.0,
        overshoot_clamping: false,
    };
    for f in [-3, 0, 1, 30, 10_000] {
        assert!(spring(f, fps30(), cfg).is_finite());
    }
}

#[test]
fn config_deserializes_partial_overrides() {
    let cfg: SpringConfig = serde_json::from_str(r#"{"damping": 200}"#).unwrap();
    assert_eq!(cfg.damping, 200.0);
    assert_eq!(cfg.stiffness, 100.0);
    assert_eq!(cfg.mass, 1.0);
}

#[test]
fn measured_settle_frame_stays_settled() {
    for cfg in configs() {
        let n = measure_spring(fps30(), cfg, DEFAULT_SETTLE_THRESHOLD);
        assert!(n > 0);
        for f in n..n + 60 {
            let v = spring(f as i64, fps30(), cfg);
            assert!((1.0 - v).abs() < DEFAULT_SETTLE_THRESHOLD, "{cfg:?} frame {f}");
        }
    }
}

#[test]
fn options_delay_and_map() {
    let opts = SpringOptions {
        from: 10.0,
        to: 20.0,
        delay_frames: 15,
        ..SpringOptions::default()
    };
    assert_eq!(spring_with(0, fps30(), &opts), 10.0);
    assert_eq!(spring_with(15, fps30(), &opts), 10.0);
    let base = spring(10, fps30(), opts.config);
    let v = spring_with(25, fps30(), &opts);
    assert!((v - (10.0 + 10.0 * base)).abs() < 1e-9);
    assert!((spring_with(100_000, fps30(), &opts) - 20.0).abs() < 1e-9);
}

#[test]
fn options_duration_stretches_settle_time() {
    let cfg = SpringConfig::new(20.0, 100.0, 1.0).unwrap();
    let opts = SpringOptions {
        config: cfg,
        duration_frames: Some(90),
        ..SpringOptions::default()
    };
    let natural = measure_spring(fps30(), cfg, DEFAULT_SETTLE_THRESHOLD);
    assert!(natural < 90);
    // Halfway through the stretched window matches halfway through the natural one.
    let half = spring_with(45, fps30(), &opts);
    let expected = spring_at_secs(
        45.0 * natural as f64 / 90.0 * fps30().frame_duration_secs(),
        &cfg,
    );
    assert!((half - expected).abs() < 1e-12);
    assert!((1.0 - spring_with(90, fps30(), &opts)).abs() < DEFAULT_SETTLE_THRESHOLD);
}

#[test]
fn options_reverse_runs_backwards() {
    let opts = SpringOptions {
        config: SpringConfig::new(20.0, 100.0, 1.0).unwrap(),
        duration_frames: Some(60),
        reverse: true,
        ..SpringOptions::default()
    };
    assert!(spring_with(0, fps30(), &opts) > 1.0 - DEFAULT_SETTLE_THRESHOLD);
    assert_eq!(spring_with(60, fps30(), &opts), 0.0);
    assert_eq!(spring_with(90, fps30(), &opts), 0.0);
}
