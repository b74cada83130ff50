//! Domain Layer
//!
//! The core of vmconf: hosts, file actions, tasks, results and the rules
//! that govern them.
//!
//! ## Structure
//!
//! - `entities/` - Host targets, file actions, task steps, execution results
//! - `value_objects/` - Result status and backup key/naming
//! - `services/` - Line-ending normalizer
//! - `ports/` - Interface definitions for infrastructure (remote session, backup store)
//!
//! ## Design Principles
//!
//! 1. **No network I/O** - Remote access only goes through the session ports
//! 2. **Immutable inputs** - Hosts and tasks are read-only during a run
//! 3. **Ports & Adapters** - All remote and backup I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
