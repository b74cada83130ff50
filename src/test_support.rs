//! In-memory remote hosts for unit tests
//!
//! `MemoryHost` models one machine: its files, which paths refuse reads or
//! writes, scripted command outputs, and counters for session/transfer
//! release. `MemoryConnector` hands out sessions to a set of such hosts.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::entities::HostTarget;
use crate::domain::ports::{
    CommandOutput, RemoteSession, SessionConnector, SessionError, SessionResult, Transfer,
};

#[derive(Default)]
pub struct MemoryHost {
    files: Mutex<HashMap<String, Vec<u8>>>,
    unreadable: HashSet<String>,
    unwritable: HashSet<String>,
    responses: HashMap<String, CommandOutput>,
    refuse_connect: bool,
    refuse_transfer: bool,
    commands: Mutex<Vec<String>>,
    writes: Mutex<Vec<String>>,
    sessions_opened: AtomicUsize,
    sessions_closed: AtomicUsize,
    transfers_closed: AtomicUsize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, data: &[u8]) -> Self {
        self.put_file(path, data);
        self
    }

    pub fn with_unreadable(mut self, path: &str) -> Self {
        self.unreadable.insert(path.to_string());
        self
    }

    pub fn with_unwritable(mut self, path: &str) -> Self {
        self.unwritable.insert(path.to_string());
        self
    }

    pub fn with_command(mut self, command: &str, output: CommandOutput) -> Self {
        self.responses.insert(command.to_string(), output);
        self
    }

    pub fn refusing_connections(mut self) -> Self {
        self.refuse_connect = true;
        self
    }

    pub fn refusing_transfer(mut self) -> Self {
        self.refuse_transfer = true;
        self
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn transfer(self: &Arc<Self>) -> MemoryTransfer {
        MemoryTransfer {
            host: Arc::clone(self),
        }
    }

    pub fn put_file(&self, path: &str, data: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), data.to_vec());
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn sessions_opened(&self) -> usize {
        self.sessions_opened.load(Ordering::SeqCst)
    }

    pub fn sessions_closed(&self) -> usize {
        self.sessions_closed.load(Ordering::SeqCst)
    }

    pub fn transfers_closed(&self) -> usize {
        self.transfers_closed.load(Ordering::SeqCst)
    }
}

pub struct MemoryTransfer {
    host: Arc<MemoryHost>,
}

impl Transfer for MemoryTransfer {
    fn exists(&mut self, remote_path: &str) -> bool {
        self.host.files.lock().unwrap().contains_key(remote_path)
    }

    fn read_all(&mut self, remote_path: &str) -> SessionResult<Vec<u8>> {
        if self.host.unreadable.contains(remote_path) {
            return Err(SessionError::Transfer(format!(
                "opening remote file {}: permission denied",
                remote_path
            )));
        }
        self.host.file(remote_path).ok_or_else(|| {
            SessionError::Transfer(format!("opening remote file {}: not found", remote_path))
        })
    }

    fn write_all(&mut self, data: &[u8], remote_path: &str) -> SessionResult<()> {
        if self.host.unwritable.contains(remote_path) {
            return Err(SessionError::Transfer(format!(
                "creating remote file {}: permission denied",
                remote_path
            )));
        }
        self.host.writes.lock().unwrap().push(remote_path.to_string());
        self.host.put_file(remote_path, data);
        Ok(())
    }

    fn close(&mut self) -> SessionResult<()> {
        self.host.transfers_closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct MemorySession {
    host: Arc<MemoryHost>,
}

impl RemoteSession for MemorySession {
    fn execute(&mut self, command: &str) -> SessionResult<CommandOutput> {
        self.host.commands.lock().unwrap().push(command.to_string());
        Ok(self
            .host
            .responses
            .get(command)
            .cloned()
            .unwrap_or_else(|| CommandOutput::success("")))
    }

    fn open_transfer(&mut self) -> SessionResult<Box<dyn Transfer>> {
        if self.host.refuse_transfer {
            return Err(SessionError::Transfer(
                "creating SFTP client: subsystem request failed".to_string(),
            ));
        }
        Ok(Box::new(self.host.transfer()))
    }

    fn close(&mut self) -> SessionResult<()> {
        self.host.sessions_closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Connector over a fixed set of in-memory hosts, keyed by alias
#[derive(Default)]
pub struct MemoryConnector {
    hosts: HashMap<String, Arc<MemoryHost>>,
    opens: AtomicUsize,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, alias: &str, host: Arc<MemoryHost>) -> Self {
        self.hosts.insert(alias.to_string(), host);
        self
    }

    /// Number of open attempts across all hosts
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl SessionConnector for MemoryConnector {
    fn open(&self, host: &HostTarget) -> SessionResult<Box<dyn RemoteSession>> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let Some(memory) = self.hosts.get(host.alias()) else {
            return Err(SessionError::Connect(format!(
                "{}: no route to host",
                host.address()
            )));
        };
        if memory.refuse_connect {
            return Err(SessionError::Auth("permission denied (publickey)".to_string()));
        }
        memory.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemorySession {
            host: Arc::clone(memory),
        }))
    }
}

/// Host target with password auth, alias == address
pub fn host(alias: &str) -> HostTarget {
    HostTarget::new(
        alias,
        alias,
        "admin",
        crate::domain::entities::Credentials::password("secret"),
    )
}
