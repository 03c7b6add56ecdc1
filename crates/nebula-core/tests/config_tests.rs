// Host-side tests for application configuration loading.

use nebula_core::*;

#[test]
fn empty_object_is_the_stock_config() {
    let cfg = AppConfig::from_json("{}").unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert!(cfg.smoother.frame_rate_independent);
    assert_eq!(cfg.smoother.rates.position, 0.25);
    assert_eq!(cfg.thresholds.pinch, 0.05);
    assert_eq!((cfg.tracker.width, cfg.tracker.height, cfg.tracker.frame_rate), (320, 240, 60));
    assert_eq!(cfg.tracker.num_hands, 2);
    assert_eq!(cfg.tracker.min_confidence, 0.5);
    assert_eq!(cfg.generator.model, "gemini-2.5-flash");
    assert_eq!(cfg.generator.recovery_ms, 3000);
    assert_eq!(cfg.initial, VisualParameters::default());
    assert_eq!(cfg.seed, None);
}

#[test]
fn partial_overrides_keep_other_defaults() {
    let cfg = AppConfig::from_json(
        r##"{
            "smoother": { "frame_rate_independent": false, "rates": { "force": 0.3 } },
            "mapping": { "mirror_x": false },
            "initial": {
                "count": 2000, "size": 1.0, "speed": 1.0, "noiseStrength": 0.0,
                "colorStart": "#fff", "colorEnd": "#000", "dispersion": 3.0, "shapeBias": 1.0
            },
            "seed": 7
        }"##,
    )
    .unwrap();
    assert!(!cfg.smoother.frame_rate_independent);
    assert_eq!(cfg.smoother.rates.force, 0.3);
    assert_eq!(cfg.smoother.rates.position, 0.25);
    assert_eq!(cfg.smoother.forces, ForceTable::default());
    assert!(!cfg.mapping.mirror_x);
    assert_eq!(cfg.mapping.width, 24.0);
    assert_eq!(cfg.initial.count, 2000);
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.particle_seed(), 7);
    assert!(!cfg.session_options().mapping.mirror_x);
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let cases = [
        r#"{ "smoother": { "rates": { "cosmetic": 0.0 } } }"#,
        r#"{ "smoother": { "rates": { "position": 1.5 } } }"#,
        r#"{ "smoother": { "forces": { "separation_min": 2.0 } } }"#,
        r#"{ "thresholds": { "pinch": -0.1 } }"#,
        r#"{ "thresholds": { "fist_min_folded": 5 } }"#,
        r#"{ "tracker": { "width": 0 } }"#,
        r#"{ "tracker": { "min_confidence": 1.5 } }"#,
        r#"{ "generator": { "model": " " } }"#,
    ];
    for text in cases {
        assert!(
            matches!(AppConfig::from_json(text), Err(ConfigError::Invalid { .. })),
            "{text} should be invalid"
        );
    }
    assert!(matches!(AppConfig::from_json("{"), Err(ConfigError::Parse(_))));
    let out_of_range = r##"{ "initial": {
        "count": 50, "size": 1.0, "speed": 1.0, "noiseStrength": 0.0,
        "colorStart": "#fff", "colorEnd": "#000", "dispersion": 3.0, "shapeBias": 1.0 } }"##;
    assert!(AppConfig::from_json(out_of_range).is_err());
}
