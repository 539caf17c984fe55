//! Property-based tests using proptest
//!
//! These tests verify the pure mapping functions that turn loosely typed
//! tool arguments into upstream payloads: CPU tiers, environment strings,
//! truncation, credential masking and lenient integer parsing.

use cloudru_mcp::mapper::{
    cpu_resources, mask_sensitive, parse_env_vars, scan_int, split_list, truncate, CPU_TIERS,
};
use proptest::prelude::*;

/// Environment variable names and values without the separators
fn arb_env_pair() -> impl Strategy<Value = (String, String)> {
    ("[A-Z][A-Z0-9_]{0,15}", "[a-zA-Z0-9 ./:-]{0,20}")
}

mod cpu_tests {
    use super::*;

    proptest! {
        /// Anything outside the known tiers falls back to the smallest one
        #[test]
        fn unknown_cpu_falls_back(cpu in "\\PC{0,8}") {
            prop_assume!(!CPU_TIERS.iter().any(|(tier, _)| *tier == cpu));
            prop_assert_eq!(cpu_resources(&cpu), ("0.1", "256Mi"));
        }
    }

    #[test]
    fn known_tiers() {
        assert_eq!(cpu_resources("0.1"), ("0.1", "256Mi"));
        assert_eq!(cpu_resources("0.2"), ("0.2", "512Mi"));
        assert_eq!(cpu_resources("0.5"), ("0.5", "1Gi"));
        assert_eq!(cpu_resources("1"), ("1", "2Gi"));
        assert_eq!(cpu_resources("1.0"), ("0.1", "256Mi"));
    }
}

mod env_tests {
    use super::*;

    proptest! {
        /// Quoted pairs joined with ';' parse back to the same names and values
        #[test]
        fn quoted_pairs_parse(pairs in prop::collection::vec(arb_env_pair(), 0..10)) {
            let input = pairs
                .iter()
                .map(|(name, value)| format!("{}='{}'", name, value))
                .collect::<Vec<_>>()
                .join(";");

            let parsed = parse_env_vars(&input);
            prop_assert_eq!(parsed.len(), pairs.len());
            for (var, (name, value)) in parsed.iter().zip(&pairs) {
                prop_assert_eq!(&var.name, name);
                prop_assert_eq!(&var.value, value);
                prop_assert_eq!(var.var_type.as_str(), "plain");
            }
        }

        /// Entries without '=' never produce a variable
        #[test]
        fn entries_without_equals_are_dropped(junk in "[a-z ]{1,20}") {
            prop_assert!(parse_env_vars(&junk).is_empty());
        }
    }

    #[test]
    fn mixed_input() {
        let parsed = parse_env_vars("A='1';broken;B='two words'; ;=nameless;C=raw");
        let pairs: Vec<(&str, &str)> = parsed
            .iter()
            .map(|v| (v.name.as_str(), v.value.as_str()))
            .collect();
        assert_eq!(pairs, vec![("A", "1"), ("B", "two words"), ("C", "raw")]);
    }

    #[test]
    fn comma_lists() {
        assert!(split_list("").is_empty());
        assert_eq!(split_list("python, -m ,app"), vec!["python", "-m", "app"]);
    }
}

mod truncate_tests {
    use super::*;

    proptest! {
        /// Truncation keeps the leading elements in order
        #[test]
        fn keeps_prefix(items in prop::collection::vec(any::<u32>(), 0..400), limit in 0usize..300) {
            let kept = truncate(items.clone(), limit);
            prop_assert_eq!(kept.len(), items.len().min(limit));
            prop_assert_eq!(&kept[..], &items[..kept.len()]);
        }
    }
}

mod mask_tests {
    use super::*;

    proptest! {
        /// Long values keep three characters on each side
        #[test]
        fn long_values_keep_edges(value in "[a-zA-Z0-9]{5,64}") {
            let masked = mask_sensitive(&value);
            prop_assert_eq!(masked.len(), 9);
            prop_assert!(masked.starts_with(&value[..3]));
            prop_assert!(masked.ends_with(&value[value.len() - 3..]));
            prop_assert_ne!(&masked, &value);
        }

        /// Short values are fully hidden
        #[test]
        fn short_values_hidden(value in "[a-zA-Z0-9]{1,4}") {
            prop_assert_eq!(mask_sensitive(&value), "***");
        }
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(mask_sensitive(""), "");
    }
}

mod scan_int_tests {
    use super::*;

    proptest! {
        /// Any integer survives formatting and scanning
        #[test]
        fn round_trips_integers(n in -1_000_000i64..1_000_000) {
            prop_assert_eq!(scan_int(&n.to_string()), n);
        }

        /// Trailing garbage after the digits is ignored
        #[test]
        fn ignores_suffix(n in 0i64..100_000, suffix in "[a-z ]{0,8}") {
            prop_assert_eq!(scan_int(&format!("{}{}", n, suffix)), n);
        }

        /// Input without leading digits scans to zero
        #[test]
        fn non_numeric_is_zero(input in "[a-zA-Z][a-zA-Z0-9]{0,10}") {
            prop_assert_eq!(scan_int(&input), 0);
        }
    }

    #[test]
    fn leading_whitespace_and_sign() {
        assert_eq!(scan_int("  42"), 42);
        assert_eq!(scan_int("+7"), 7);
        assert_eq!(scan_int("-3x"), -3);
        assert_eq!(scan_int("8000s"), 8000);
        assert_eq!(scan_int(""), 0);
    }
}
