//! Board state controller.
//!
//! `BoardState` is the client's working copy of the ticket list plus the
//! active-drag capture; all of its mutations are local and optimistic.
//! `BoardController` pairs the state with the API client and owns the
//! reconciliation rule: a drag commit the server rejects discards the
//! optimistic state and refetches the authoritative list in full.

use uuid::Uuid;

use super::ApiClient;
use crate::errors::ClientError;
use crate::ticket::{Ticket, TicketStatus};

/// Number of display color buckets for category labels.
pub const CATEGORY_PALETTE_SIZE: usize = 5;

/// Deterministically map a category label to a palette bucket.
///
/// Reproduces the classic string-hash over UTF-16 code units
/// (`hash = code + ((hash << 5) - hash)` with wrapping 32-bit arithmetic)
/// so the same category always lands on the same color across sessions.
pub fn category_color_index(category: &str) -> usize {
    let mut hash: i32 = 0;
    for unit in category.encode_utf16() {
        hash = (unit as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash));
    }
    hash.unsigned_abs() as usize % CATEGORY_PALETTE_SIZE
}

/// What the pointer is currently over during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Ticket(Uuid),
    Column(TicketStatus),
}

/// The payload a finished drag commits to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragCommit {
    pub id: Uuid,
    pub status: TicketStatus,
}

/// Client-visible ticket list and drag state. Array order is presentation
/// state only; the server remains authoritative.
#[derive(Default)]
pub struct BoardState {
    tickets: Vec<Ticket>,
    active: Option<Uuid>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn get(&self, id: Uuid) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// The ticket captured at drag start, for overlay rendering.
    pub fn active(&self) -> Option<&Ticket> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn by_status(&self, status: TicketStatus) -> Vec<&Ticket> {
        self.tickets.iter().filter(|t| t.status == status).collect()
    }

    pub fn total_estimated_hours(&self) -> f64 {
        self.tickets.iter().map(|t| t.estimated_hours).sum()
    }

    /// Replace the working copy with the server's authoritative list.
    pub fn replace_all(&mut self, tickets: Vec<Ticket>) {
        self.tickets = tickets;
        self.active = None;
    }

    pub fn append(&mut self, tickets: Vec<Ticket>) {
        self.tickets.extend(tickets);
    }

    pub fn remove(&mut self, id: Uuid) {
        self.tickets.retain(|t| t.id != id);
    }

    pub fn clear(&mut self) {
        self.tickets.clear();
        self.active = None;
    }

    /// Capture the dragged ticket. Returns it for overlay rendering, or
    /// `None` if the id is unknown.
    pub fn drag_start(&mut self, id: Uuid) -> Option<&Ticket> {
        if self.tickets.iter().any(|t| t.id == id) {
            self.active = Some(id);
            self.get(id)
        } else {
            self.active = None;
            None
        }
    }

    /// Local-only reordering while the pointer hovers. Over another ticket:
    /// the dragged ticket is spliced to the hovered ticket's position,
    /// adopting its status when the columns differ. Over a column: status
    /// reassignment only, list position untouched (append semantics).
    pub fn drag_over(&mut self, target: DragTarget) {
        let Some(active_id) = self.active else {
            return;
        };

        match target {
            DragTarget::Ticket(over_id) => {
                if over_id == active_id {
                    return;
                }
                let Some(active_idx) = self.tickets.iter().position(|t| t.id == active_id) else {
                    return;
                };
                let Some(over_idx) = self.tickets.iter().position(|t| t.id == over_id) else {
                    return;
                };

                let over_status = self.tickets[over_idx].status;
                let mut dragged = self.tickets.remove(active_idx);
                dragged.status = over_status;

                // The hovered ticket may have shifted after the removal;
                // insert at its current slot so the dragged card takes its place.
                let insert_at = self
                    .tickets
                    .iter()
                    .position(|t| t.id == over_id)
                    .unwrap_or(self.tickets.len());
                self.tickets.insert(insert_at, dragged);
            }
            DragTarget::Column(status) => {
                if let Some(ticket) = self.tickets.iter_mut().find(|t| t.id == active_id) {
                    ticket.status = status;
                }
            }
        }
    }

    /// End the drag: release the capture and yield the commit payload for
    /// the server round trip.
    pub fn drag_end(&mut self) -> Option<DragCommit> {
        let id = self.active.take()?;
        let ticket = self.get(id)?;
        Some(DragCommit {
            id,
            status: ticket.status,
        })
    }
}

/// Pairs the board state with the API client and applies the
/// server-confirmation rules for each interaction pattern.
pub struct BoardController {
    api: ApiClient,
    state: BoardState,
}

impl BoardController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: BoardState::new(),
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut BoardState {
        &mut self.state
    }

    /// Initial load: fetch the full list. On failure the list stays empty
    /// and the error is surfaced to the caller.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let tickets = self.api.list_tickets().await?;
        self.state.replace_all(tickets);
        Ok(())
    }

    /// Generation is not optimistic: tickets are appended only after the
    /// server confirms creation.
    pub async fn generate(&mut self, prompt: &str) -> Result<Vec<Ticket>, ClientError> {
        let tickets = self.api.generate_tickets(prompt).await?;
        self.state.append(tickets.clone());
        Ok(tickets)
    }

    /// Commit the finished drag. On rejection the optimistic local state is
    /// discarded and the authoritative list refetched — a full resync, since
    /// the local mutation keeps no pre-image to roll back to.
    pub async fn finish_drag(&mut self) -> Result<Option<Ticket>, ClientError> {
        let Some(commit) = self.state.drag_end() else {
            return Ok(None);
        };

        match self.api.update_status(commit.id, commit.status).await {
            Ok(ticket) => Ok(Some(ticket)),
            Err(err) => {
                if let Ok(tickets) = self.api.list_tickets().await {
                    self.state.replace_all(tickets);
                }
                Err(err)
            }
        }
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<(), ClientError> {
        self.api.delete_ticket(id).await?;
        self.state.remove(id);
        Ok(())
    }

    pub async fn clear(&mut self) -> Result<(), ClientError> {
        self.api.clear_all().await?;
        self.state.clear();
        Ok(())
    }
}
