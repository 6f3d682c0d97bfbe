//! Property-based tests for the configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat, ScanConfig};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Human),
        Just(OutputFormat::Json),
        Just(OutputFormat::Plain),
    ]
}

fn scan_config_strategy() -> impl Strategy<Value = ScanConfig> {
    (
        prop::option::of(1usize..64),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(max_depth, include_hidden, broken_only)| ScanConfig {
            max_depth,
            include_hidden,
            broken_only,
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(output_format_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(scan_config_strategy()),
    )
        .prop_map(
            |(output_format, show_chain, expand_tilde, must_exist, scan)| Config {
                output_format,
                show_chain,
                expand_tilde,
                must_exist,
                scan,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // Higher precedence wins field by field, lower persists where it is None
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.output_format, high.output_format.or(low.output_format));
        prop_assert_eq!(result.show_chain, high.show_chain.or(low.show_chain));
        prop_assert_eq!(result.expand_tilde, high.expand_tilde.or(low.expand_tilde));
        prop_assert_eq!(result.must_exist, high.must_exist.or(low.must_exist));

        let low_depth = low.scan.as_ref().and_then(|s| s.max_depth);
        let high_depth = high.scan.as_ref().and_then(|s| s.max_depth);
        prop_assert_eq!(
            result.scan.as_ref().and_then(|s| s.max_depth),
            high_depth.or(low_depth)
        );
    }

    // Empty config is identity element for merge
    #[test]
    fn config_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(&merged, &config);

        let mut from_empty = Config::default();
        ConfigMerger::merge_into(&mut from_empty, &config);
        prop_assert_eq!(from_empty, config);
    }

    // Merging valid configs yields a valid config
    #[test]
    fn valid_configs_stay_valid_after_merge(a in config_strategy(), b in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&a).is_ok());
        let mut merged = a;
        ConfigMerger::merge_into(&mut merged, &b);
        prop_assert!(ConfigValidator::validate(&merged).is_ok());
    }

    // YAML written from a config reads back as the same config
    #[test]
    fn yaml_round_trip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
