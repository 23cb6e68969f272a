// ABOUTME: Property tests for the environment-string parser.
// ABOUTME: Quoted whitespace must survive parsing byte-for-byte.

use proptest::prelude::*;
use slipway::deploy::parse_environment_string;

proptest! {
    #[test]
    fn unquoted_pairs_round_trip(
        key in "[a-zA-Z][a-zA-Z0-9_.]{0,15}",
        value in "[a-zA-Z0-9_./:=]{1,20}",
    ) {
        let input = format!("-{key} {value}");
        let map = parse_environment_string(&input);
        prop_assert_eq!(map.get(key.as_str()).map(String::as_str), Some(value.as_str()));
    }

    #[test]
    fn quoted_values_preserve_interior_whitespace(
        key in "[a-z]{1,8}",
        value in "[a-zA-Z0-9 \t]{0,24}",
    ) {
        let input = format!("-{key} \"{value}\"");
        let map = parse_environment_string(&input);
        prop_assert_eq!(map.get(key.as_str()).map(String::as_str), Some(value.as_str()));
    }

    #[test]
    fn many_pairs_all_land(
        pairs in proptest::collection::btree_map(
            "[a-z]{1,8}",
            "[a-zA-Z0-9]{1,12}",
            0..6,
        ),
    ) {
        let input = pairs
            .iter()
            .map(|(k, v)| format!("-{k} {v}"))
            .collect::<Vec<_>>()
            .join("  ");
        let map = parse_environment_string(&input);
        prop_assert_eq!(map, pairs);
    }
}

#[test]
fn duplicate_keys_keep_the_last_value() {
    let map = parse_environment_string("-key one -key two");
    assert_eq!(map.get("key").map(String::as_str), Some("two"));
}

#[test]
fn unterminated_quote_takes_the_rest() {
    let map = parse_environment_string(r#"-key "a b c"#);
    assert_eq!(map.get("key").map(String::as_str), Some("a b c"));
}
