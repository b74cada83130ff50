//! Line-ending normalizer
//!
//! Files are pushed with LF line endings regardless of the platform they were
//! edited on. Any run of CR bytes directly before an LF is dropped, so a
//! single pass leaves no CRLF behind and a second pass changes nothing.

use std::path::Path;

use crate::error::{VmconfError, VmconfResult};

/// Convert CRLF line endings to LF
pub fn normalize_line_endings(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for &byte in data {
        if byte == b'\n' {
            while out.last() == Some(&b'\r') {
                out.pop();
            }
        }
        out.push(byte);
    }
    out
}

/// Read a local file and normalize its line endings
pub fn normalize_file(path: &Path) -> VmconfResult<Vec<u8>> {
    let data = std::fs::read(path).map_err(|e| VmconfError::reading(path, e))?;
    Ok(normalize_line_endings(&data))
}
