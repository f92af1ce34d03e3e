use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use crate::ticket::{Ticket, TicketStatus};

/// Shared in-memory ticket store.
///
/// A cheap-to-clone handle around the authoritative ticket list for the
/// process lifetime. Every operation is a single critical section; the lock
/// is never held across an await point. Lock poisoning surfaces as an error
/// instead of a panic.
#[derive(Clone, Default)]
pub struct TicketStore {
    inner: Arc<Mutex<Vec<Ticket>>>,
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Ticket>>> {
        self.inner
            .lock()
            .map_err(|e| anyhow::anyhow!("Ticket store lock poisoned: {}", e))
    }

    /// Snapshot of all tickets in insertion order.
    pub fn list(&self) -> Result<Vec<Ticket>> {
        Ok(self.lock()?.clone())
    }

    /// Append a batch. Callers guarantee id uniqueness (uuid v4 stamping);
    /// no dedup is performed here.
    pub fn add(&self, tickets: Vec<Ticket>) -> Result<Vec<Ticket>> {
        let mut guard = self.lock()?;
        guard.extend(tickets.iter().cloned());
        Ok(tickets)
    }

    /// Set a ticket's status and refresh its `updated_at`. Returns the
    /// updated ticket, or `None` if no ticket has that id. The status enum
    /// is pre-validated at the API boundary.
    pub fn update_status(&self, id: Uuid, status: TicketStatus) -> Result<Option<Ticket>> {
        let mut guard = self.lock()?;
        match guard.iter_mut().find(|t| t.id == id) {
            Some(ticket) => {
                ticket.status = status;
                ticket.updated_at = Utc::now();
                Ok(Some(ticket.clone()))
            }
            None => Ok(None),
        }
    }

    /// Remove a ticket. Returns `true` iff one was removed.
    pub fn delete(&self, id: Uuid) -> Result<bool> {
        let mut guard = self.lock()?;
        let initial = guard.len();
        guard.retain(|t| t.id != id);
        Ok(guard.len() != initial)
    }

    /// Empty the store unconditionally.
    pub fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }
}
