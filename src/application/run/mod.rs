//! Run Module
//!
//! Named-task fan-out. Steps run in task order on each host and the first
//! failing step ends that host's run.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`RunOptions`)
//! - `use_case` - Core use case logic (`RunUseCase`)

mod options;
mod use_case;

pub use options::RunOptions;
pub use use_case::RunUseCase;
