//! Property tests for vmconf.
//!
//! Properties use randomized input generation to protect invariants of the
//! pure transforms: line-ending normalization and backup naming.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/normalize.rs"]
mod normalize;

#[path = "properties/backup_naming.rs"]
mod backup_naming;
