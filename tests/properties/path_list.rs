//! Property tests for reading the newline-delimited path list.

use proptest::prelude::*;

use watchrun::read_path_list;

fn path_line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 ._/\\-]{1,24}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The parser never panics and never returns more than the cap.
    #[test]
    fn property_never_exceeds_cap(
        bytes in proptest::collection::vec(any::<u8>(), 0..512),
        cap in 0usize..16,
    ) {
        let paths = read_path_list(bytes.as_slice(), cap).unwrap();
        prop_assert!(paths.len() <= cap);
        for path in &paths {
            prop_assert!(!path.contains('\n'));
        }
    }

    /// PROPERTY: Below the cap every line comes back in order, none dropped.
    #[test]
    fn property_keeps_lines_in_order(
        lines in proptest::collection::vec(path_line(), 0..12),
        trailing_newline in any::<bool>(),
    ) {
        let mut input = lines.join("\n");
        if trailing_newline && !lines.is_empty() {
            input.push('\n');
        }

        let paths = read_path_list(input.as_bytes(), lines.len() + 1).unwrap();

        prop_assert_eq!(paths, lines);
    }

    /// PROPERTY: With more lines than the cap, the result is exactly the first `cap` lines.
    #[test]
    fn property_cap_keeps_prefix(
        lines in proptest::collection::vec(path_line(), 1..12),
        cap in 0usize..12,
    ) {
        let input = lines.join("\n");

        let paths = read_path_list(input.as_bytes(), cap).unwrap();

        let expected: Vec<String> = lines.iter().take(cap).cloned().collect();
        prop_assert_eq!(paths, expected);
    }
}
