//! Backup key and file naming
//!
//! A backup is identified by `(host alias, remote path)` and stored as a flat
//! file named `<alias><sanitized remote path>_<YYYYMMDD-HHMMSS>`. When two
//! backups of the same key land in the same second, the later one gets a
//! `.N` suffix so that no backup is ever overwritten.
//!
//! Matching a file name against a key is exact: the part after the key prefix
//! must parse as a stamp. A plain prefix test would let `/etc/app.conf` claim
//! the backups of `/etc/app.conf.bak`.

use chrono::{NaiveDateTime, Timelike};

/// `chrono` format of the timestamp part of a backup file name
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

const TIMESTAMP_LEN: usize = 15;

/// Replace every path separator with an underscore
pub fn sanitize_remote_path(remote_path: &str) -> String {
    remote_path.replace(['/', '\\'], "_")
}

/// Composite identity of a backup history
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackupKey {
    alias: String,
    remote_path: String,
}

impl BackupKey {
    pub fn new(alias: impl Into<String>, remote_path: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            remote_path: remote_path.into(),
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn remote_path(&self) -> &str {
        &self.remote_path
    }

    /// File name prefix shared by every backup of this key
    pub fn prefix(&self) -> String {
        format!("{}{}", self.alias, sanitize_remote_path(&self.remote_path))
    }

    /// File name for a backup of this key taken at `stamp`
    pub fn file_name(&self, stamp: &BackupStamp) -> String {
        format!("{}{}", self.prefix(), stamp.suffix())
    }

    /// Parse the stamp out of `file_name` if it belongs to this key
    pub fn stamp_of(&self, file_name: &str) -> Option<BackupStamp> {
        let rest = file_name.strip_prefix(&self.prefix())?;
        BackupStamp::parse_suffix(rest)
    }
}

/// Second-resolution timestamp plus a same-second sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BackupStamp {
    time: NaiveDateTime,
    seq: u32,
}

impl BackupStamp {
    /// Stamp for `time`, truncated to whole seconds
    pub fn new(time: NaiveDateTime) -> Self {
        Self {
            time: time.with_nanosecond(0).unwrap_or(time),
            seq: 0,
        }
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    pub fn seq(&self) -> u32 {
        self.seq
    }

    /// The stamp to try after a same-second collision
    pub fn next(&self) -> Self {
        Self {
            time: self.time,
            seq: self.seq + 1,
        }
    }

    fn suffix(&self) -> String {
        let ts = self.time.format(TIMESTAMP_FORMAT);
        if self.seq == 0 {
            format!("_{ts}")
        } else {
            format!("_{ts}.{}", self.seq)
        }
    }

    /// Parse `_<timestamp>` or `_<timestamp>.<seq>`
    fn parse_suffix(suffix: &str) -> Option<Self> {
        let rest = suffix.strip_prefix('_')?;
        let ts = rest.get(..TIMESTAMP_LEN)?;
        let time = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok()?;
        let seq = match &rest[TIMESTAMP_LEN..] {
            "" => 0,
            tail => {
                let digits = tail.strip_prefix('.')?;
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                digits.parse().ok()?
            }
        };
        Some(Self { time, seq })
    }

    /// Parse the trailing stamp of any backup file name, whatever its key
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let idx = file_name.rfind('_')?;
        Self::parse_suffix(&file_name[idx..])
    }
}
