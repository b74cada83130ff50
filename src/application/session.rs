//! Scoped session and transfer handles
//!
//! Both guards close their handle when dropped, so every exit path of a
//! host's processing releases it. Declare the transfer after the session:
//! locals drop in reverse order, which closes the transfer first.

use tracing::warn;

use crate::domain::entities::HostTarget;
use crate::domain::ports::{RemoteSession, SessionConnector, Transfer};
use crate::error::VmconfResult;

pub struct SessionGuard {
    alias: String,
    session: Box<dyn RemoteSession>,
}

impl SessionGuard {
    pub fn open<C>(connector: &C, host: &HostTarget) -> VmconfResult<Self>
    where
        C: SessionConnector + ?Sized,
    {
        let session = connector.open(host)?;
        Ok(Self {
            alias: host.alias().to_string(),
            session,
        })
    }

    pub fn open_transfer(&mut self) -> VmconfResult<TransferGuard> {
        let transfer = self.session.open_transfer()?;
        Ok(TransferGuard {
            alias: self.alias.clone(),
            transfer,
        })
    }

    pub fn session(&mut self) -> &mut dyn RemoteSession {
        self.session.as_mut()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Err(e) = self.session.close() {
            warn!(host = %self.alias, error = %e, "closing session failed");
        }
    }
}

pub struct TransferGuard {
    alias: String,
    transfer: Box<dyn Transfer>,
}

impl TransferGuard {
    pub fn transfer(&mut self) -> &mut dyn Transfer {
        self.transfer.as_mut()
    }
}

impl Drop for TransferGuard {
    fn drop(&mut self) {
        if let Err(e) = self.transfer.close() {
            warn!(host = %self.alias, error = %e, "closing transfer failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{host, MemoryConnector, MemoryHost};

    #[test]
    fn guards_close_transfer_then_session() {
        let memory = MemoryHost::new().into_shared();
        let connector = MemoryConnector::new().with_host("web1", memory.clone());
        {
            let mut session = SessionGuard::open(&connector, &host("web1")).unwrap();
            let _transfer = session.open_transfer().unwrap();
            assert_eq!(memory.sessions_closed(), 0);
        }
        assert_eq!(memory.transfers_closed(), 1);
        assert_eq!(memory.sessions_closed(), 1);
    }

    #[test]
    fn session_is_closed_when_transfer_fails() {
        let memory = MemoryHost::new().refusing_transfer().into_shared();
        let connector = MemoryConnector::new().with_host("web1", memory.clone());
        let result = SessionGuard::open(&connector, &host("web1")).and_then(|mut s| {
            s.open_transfer()?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(memory.sessions_closed(), 1);
        assert_eq!(memory.transfers_closed(), 0);
    }

    #[test]
    fn open_failure_maps_to_connect_error() {
        let connector = MemoryConnector::new();
        let err = SessionGuard::open(&connector, &host("ghost")).err().unwrap();
        assert!(matches!(err, crate::error::VmconfError::Connect(_)));
    }
}
