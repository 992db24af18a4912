//! In-memory [`Database`] double for exercising the installer without a server.
use crate::*;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Fault(pub String);

/// Catalog of routine names plus a table of scripts and what they create.
/// Counts every execution and catalog query, and records call order.
#[derive(Default)]
pub struct Memory {
    routines: Mutex<HashSet<String>>,
    scripts: HashMap<&'static str, Vec<&'static str>>,
    events: Mutex<Vec<String>>,
    executions: AtomicUsize,
    queries: AtomicUsize,
    failing_query: Option<usize>,
    failing_execute: bool,
    failing_unlock: bool,
}

impl Memory {
    /// Executing the group's payload creates all of its expected routines.
    pub fn with(self, group: &Group) -> Self {
        self.creates(group.payload, group.expected)
    }
    /// Executing the group's payload creates only its first `n` routines.
    pub fn partial(self, group: &Group, n: usize) -> Self {
        self.creates(group.payload, &group.expected[..n])
    }
    pub fn creates(mut self, payload: &'static str, names: &[&'static str]) -> Self {
        self.scripts.insert(payload, names.to_vec());
        self
    }
    /// Routines already in the catalog before any install.
    pub fn present(self, names: &[&str]) -> Self {
        if let Ok(mut routines) = self.routines.lock() {
            routines.extend(names.iter().map(|n| n.to_string()));
        }
        self
    }
    /// The `k`-th catalog query (1-based, counted over the double's lifetime) fails.
    pub fn failing_query(mut self, k: usize) -> Self {
        self.failing_query = Some(k);
        self
    }
    pub fn failing_execute(mut self) -> Self {
        self.failing_execute = true;
        self
    }
    pub fn failing_unlock(mut self) -> Self {
        self.failing_unlock = true;
        self
    }
    pub fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
    pub fn events(&self) -> Vec<String> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
    fn record(&self, event: String) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[async_trait::async_trait]
impl Database for Memory {
    type Error = Fault;
    async fn execute(&self, sql: &str) -> Result<(), Self::Error> {
        self.record("execute".to_string());
        if self.failing_execute {
            return Err(Fault("syntax error at or near \"FUNCTON\"".to_string()));
        }
        self.executions.fetch_add(1, Ordering::SeqCst);
        let created = self.scripts.get(sql).cloned().unwrap_or_default();
        let mut routines = self.routines.lock().map_err(|e| Fault(e.to_string()))?;
        routines.extend(created.into_iter().map(String::from));
        Ok(())
    }
    async fn scalar(&self, _: &str, args: &[&str]) -> Result<bool, Self::Error> {
        let k = self.queries.fetch_add(1, Ordering::SeqCst) + 1;
        let name = args.last().copied().unwrap_or_default();
        self.record(format!("probe {}", name));
        if self.failing_query == Some(k) {
            return Err(Fault("connection reset by peer".to_string()));
        }
        if cfg!(feature = "schema") && args.len() == 2 && args[0] != "public" {
            return Ok(false);
        }
        let routines = self.routines.lock().map_err(|e| Fault(e.to_string()))?;
        Ok(routines.contains(name))
    }
    async fn lock(&self, key: &str) -> Result<(), Self::Error> {
        self.record(format!("lock {}", key));
        Ok(())
    }
    async fn unlock(&self, key: &str) -> Result<(), Self::Error> {
        self.record(format!("unlock {}", key));
        match self.failing_unlock {
            true => Err(Fault("lock not held".to_string())),
            false => Ok(()),
        }
    }
}
