//! Property tests for line-ending normalization.

use proptest::prelude::*;

use vmconf::domain::services::normalize_line_endings;

fn crlf_heavy_bytes() -> impl Strategy<Value = Vec<u8>> {
    // Bias toward CR/LF so runs like "\r\r\n" show up often.
    proptest::collection::vec(
        prop_oneof![Just(b'\r'), Just(b'\n'), any::<u8>()],
        0..256,
    )
}

fn contains_crlf(data: &[u8]) -> bool {
    data.windows(2).any(|w| w == b"\r\n")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Output never contains CRLF.
    #[test]
    fn property_output_has_no_crlf(data in crlf_heavy_bytes()) {
        prop_assert!(!contains_crlf(&normalize_line_endings(&data)));
    }

    /// PROPERTY: Normalizing twice equals normalizing once.
    #[test]
    fn property_normalize_is_idempotent(data in crlf_heavy_bytes()) {
        let once = normalize_line_endings(&data);
        prop_assert_eq!(normalize_line_endings(&once), once);
    }

    /// PROPERTY: Only CR bytes are removed; every other byte survives in order.
    #[test]
    fn property_only_carriage_returns_removed(data in crlf_heavy_bytes()) {
        let out = normalize_line_endings(&data);
        let strip = |d: &[u8]| d.iter().copied().filter(|b| *b != b'\r').collect::<Vec<u8>>();
        prop_assert_eq!(strip(&out), strip(&data));
    }

    /// PROPERTY: Input without CRLF passes through untouched.
    #[test]
    fn property_lf_only_input_unchanged(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        prop_assume!(!contains_crlf(&data));
        prop_assert_eq!(normalize_line_endings(&data), data);
    }
}
