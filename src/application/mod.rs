//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Manifest deploy (files independent) and single-file push
//! - `RunUseCase` - Named tasks with per-host fail-fast, ad-hoc exec
//! - `RollbackUseCase` - Restore a backup to its remote path
//! - `PingUseCase` - Connectivity check
//! - `BackupsUseCase` - Backup listing
//!
//! ## Services
//!
//! - `StepExecutor` - One file push or command against an open session
//! - `for_each_host` - Bounded host fan-out, results in host order

pub mod backups;
pub mod deploy;
pub mod fanout;
pub mod ping;
pub mod rollback;
pub mod run;
pub mod session;
pub mod step_executor;

pub use backups::BackupsUseCase;
pub use deploy::{DeployOptions, DeployResult, DeployUseCase};
pub use fanout::{for_each_host, HostRef};
pub use ping::{PingResult, PingUseCase};
pub use rollback::{RollbackResult, RollbackUseCase};
pub use run::{RunOptions, RunUseCase};
pub use session::{SessionGuard, TransferGuard};
pub use step_executor::StepExecutor;
