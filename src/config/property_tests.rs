//! Property-based tests for configuration module
//!
//! These tests use proptest to generate random configurations and verify
//! validation invariants and serialization round-trips.

use super::*;
use proptest::prelude::*;

// Strategy for generating valid border configurations
prop_compose! {
    fn valid_border_config()(
        border_width in 0i32..64,
        title_height in 0i32..128,
    ) -> BorderConfig {
        BorderConfig {
            border_width,
            title_height,
        }
    }
}

// Strategy for generating valid desktop configurations
prop_compose! {
    fn valid_desktop_config()(count in 1u32..32)(
        count in Just(count),
        initial in 0..count,
    ) -> DesktopConfig {
        DesktopConfig { count, initial }
    }
}

prop_compose! {
    fn valid_config()(
        border in valid_border_config(),
        desktops in valid_desktop_config(),
        debug in any::<bool>(),
    ) -> PlacementConfig {
        PlacementConfig {
            border,
            desktops,
            general: GeneralConfig { debug },
        }
    }
}

proptest! {
    #[test]
    fn prop_valid_configs_pass_validation(config in valid_config()) {
        prop_assert!(config.validate().is_ok());
    }

    #[test]
    fn prop_toml_roundtrip(config in valid_config()) {
        let text = toml::to_string(&config).unwrap();
        let parsed: PlacementConfig = toml::from_str(&text).unwrap();
        prop_assert_eq!(parsed, config);
    }

    #[test]
    fn prop_negative_border_rejected(width in i32::MIN..0) {
        let mut config = PlacementConfig::default();
        config.border.border_width = width;
        prop_assert_eq!(config.validate(), Err(ConfigError::NegativeBorderWidth(width)));
    }

    #[test]
    fn prop_initial_desktop_must_be_in_range(count in 1u32..32, extra in 0u32..32) {
        let mut config = PlacementConfig::default();
        config.desktops.count = count;
        config.desktops.initial = count + extra;
        prop_assert!(config.validate().is_err());
    }

    #[test]
    fn prop_cascade_step_is_sum(border in valid_border_config()) {
        prop_assert_eq!(border.cascade_step(), border.border_width + border.title_height);
    }
}
