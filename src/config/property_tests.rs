//! Property-based tests for configuration module
//!
//! Random valid configurations must validate and survive a TOML round trip;
//! cascade placement must stay within its bounded band.

use super::*;
use proptest::prelude::*;

prop_compose! {
    fn valid_stack_config()(
        base_z_index in 0u64..1_000_000,
        metrics_history in 1usize..10_000,
    ) -> StackConfig {
        StackConfig { base_z_index, metrics_history }
    }
}

prop_compose! {
    fn valid_window_defaults()(
        x in -2000i32..2000,
        y in -2000i32..2000,
        width in 1u32..8000,
        height in 1u32..8000,
        cascade_offset in 0i32..200,
        cascade_limit in 0u32..50,
    ) -> WindowDefaults {
        WindowDefaults { x, y, width, height, cascade_offset, cascade_limit }
    }
}

prop_compose! {
    fn valid_logging_config()(
        level in prop_oneof![
            Just("error".to_string()),
            Just("warn".to_string()),
            Just("info".to_string()),
            Just("debug".to_string()),
            Just("trace".to_string()),
        ],
        events in any::<bool>(),
    ) -> LoggingConfig {
        LoggingConfig { level, events }
    }
}

prop_compose! {
    fn valid_config()(
        stack in valid_stack_config(),
        defaults in valid_window_defaults(),
        logging in valid_logging_config(),
    ) -> PanestackConfig {
        PanestackConfig { stack, defaults, logging }
    }
}

proptest! {
    #[test]
    fn prop_valid_configs_validate(config in valid_config()) {
        prop_assert!(config.validate().is_ok());
    }

    #[test]
    fn prop_toml_round_trip(config in valid_config()) {
        let text = toml::to_string(&config).unwrap();
        let parsed: PanestackConfig = toml::from_str(&text).unwrap();
        prop_assert_eq!(parsed, config);
    }

    #[test]
    fn prop_cascade_stays_in_band(defaults in valid_window_defaults(), open_count in 0usize..10_000) {
        let (x, y) = defaults.cascade_position(open_count);
        let max_step = defaults.cascade_limit.max(1) as i32 - 1;
        let band = max_step * defaults.cascade_offset;

        prop_assert!(x >= defaults.x && x <= defaults.x + band);
        prop_assert!(y >= defaults.y && y <= defaults.y + band);
    }
}
