//! Ping Use Case - connectivity check against one host

use serde::Serialize;

use crate::application::session::SessionGuard;
use crate::domain::entities::HostTarget;
use crate::domain::ports::SessionConnector;
use crate::error::VmconfResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PingResult {
    pub success: bool,
    pub hostname: String,
    pub host: String,
    pub user: String,
}

pub struct PingUseCase<C: SessionConnector> {
    connector: C,
}

impl<C: SessionConnector> PingUseCase<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Open a session and report the remote `hostname`
    pub fn execute(&self, host: &HostTarget) -> VmconfResult<PingResult> {
        let mut session = SessionGuard::open(&self.connector, host)?;
        let output = session
            .session()
            .execute("hostname")?
            .into_result("hostname")?;

        Ok(PingResult {
            success: true,
            hostname: output.trim().to_string(),
            host: host.address().to_string(),
            user: host.user().to_string(),
        })
    }
}
