//! Property tests for backup file naming and key matching.

use chrono::DateTime;
use proptest::prelude::*;

use vmconf::domain::value_objects::{sanitize_remote_path, BackupKey, BackupStamp};

fn remote_path() -> impl Strategy<Value = String> {
    proptest::string::string_regex("(/[A-Za-z0-9._-]{1,12}){1,5}").unwrap()
}

fn alias() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9-]{0,10}").unwrap()
}

fn stamp() -> impl Strategy<Value = BackupStamp> {
    // 2000-01-01 .. 2100-01-01
    (946_684_800i64..4_102_444_800i64, 0u32..4).prop_map(|(secs, bumps)| {
        let time = DateTime::from_timestamp(secs, 0)
            .unwrap_or_default()
            .naive_utc();
        (0..bumps).fold(BackupStamp::new(time), |s, _| s.next())
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Sanitized paths contain no separators.
    #[test]
    fn property_sanitize_has_no_separators(path in "[A-Za-z0-9/\\\\._ -]{0,64}") {
        let sanitized = sanitize_remote_path(&path);
        prop_assert!(!sanitized.contains('/'));
        prop_assert!(!sanitized.contains('\\'));
        prop_assert_eq!(sanitized.len(), path.len());
    }

    /// PROPERTY: A key recognizes its own backups, with the stamp intact.
    #[test]
    fn property_key_recognizes_own_backup(
        alias in alias(),
        path in remote_path(),
        stamp in stamp(),
    ) {
        let key = BackupKey::new(alias, path);
        prop_assert_eq!(key.stamp_of(&key.file_name(&stamp)), Some(stamp));
    }

    /// PROPERTY: A path never claims backups of a longer sibling path.
    #[test]
    fn property_no_prefix_false_match(
        alias in alias(),
        path in remote_path(),
        ext in "\\.[a-z]{1,5}",
        stamp in stamp(),
    ) {
        let key = BackupKey::new(alias.clone(), path.clone());
        let sibling = BackupKey::new(alias, format!("{}{}", path, ext));
        prop_assert_eq!(key.stamp_of(&sibling.file_name(&stamp)), None);
    }

    /// PROPERTY: Later stamps sort after earlier ones.
    #[test]
    fn property_next_stamp_orders_after(stamp in stamp()) {
        prop_assert!(stamp.next() > stamp);
        prop_assert_eq!(stamp.next().time(), stamp.time());
    }
}
