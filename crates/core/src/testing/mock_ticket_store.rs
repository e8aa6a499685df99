//! Mock ticket store for testing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::ticket::{Ticket, TicketError, TicketStore};

/// In-memory implementation of the TicketStore trait.
///
/// Provides controllable behavior for testing:
/// - Seed tickets directly, bypassing the service
/// - Simulate storage failures on every call
/// - Count inserts and updates for assertions
#[derive(Debug, Default)]
pub struct MockTicketStore {
    tickets: Mutex<BTreeMap<i64, Ticket>>,
    fail: AtomicBool,
    inserts: AtomicUsize,
    updates: AtomicUsize,
}

impl MockTicketStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a ticket in the store as-is.
    pub fn seed(&self, ticket: Ticket) {
        self.tickets.lock().unwrap().insert(ticket.id, ticket);
    }

    /// When set, every store call fails with `TicketError::Database`.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of successful inserts.
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    /// Number of update calls that reached the store.
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), TicketError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(TicketError::Database("simulated storage failure".to_string()));
        }
        Ok(())
    }

    fn filtered(&self, predicate: impl Fn(&Ticket) -> bool) -> Vec<Ticket> {
        self.tickets
            .lock()
            .unwrap()
            .values()
            .filter(|t| predicate(t))
            .cloned()
            .collect()
    }
}

impl TicketStore for MockTicketStore {
    fn insert(&self, ticket: Ticket) -> Result<Ticket, TicketError> {
        self.check()?;
        let mut tickets = self.tickets.lock().unwrap();

        let id = if ticket.is_new() {
            tickets.keys().next_back().copied().unwrap_or(0) + 1
        } else if tickets.contains_key(&ticket.id) {
            return Err(TicketError::Database(format!(
                "duplicate ticket id {}",
                ticket.id
            )));
        } else {
            ticket.id
        };

        let stored = Ticket { id, ..ticket };
        tickets.insert(id, stored.clone());
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(stored)
    }

    fn get(&self, id: i64) -> Result<Option<Ticket>, TicketError> {
        self.check()?;
        Ok(self.tickets.lock().unwrap().get(&id).cloned())
    }

    fn list_all(&self) -> Result<Vec<Ticket>, TicketError> {
        self.check()?;
        Ok(self.filtered(|_| true))
    }

    fn update(&self, ticket: Ticket) -> Result<Ticket, TicketError> {
        self.check()?;
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut tickets = self.tickets.lock().unwrap();

        match tickets.get_mut(&ticket.id) {
            Some(existing) => {
                existing.title = ticket.title;
                existing.description = ticket.description;
                existing.status = ticket.status;
                existing.customer_id = ticket.customer_id;
                Ok(existing.clone())
            }
            None => Ok(ticket),
        }
    }

    fn delete(&self, id: i64) -> Result<bool, TicketError> {
        self.check()?;
        Ok(self.tickets.lock().unwrap().remove(&id).is_some())
    }

    fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Ticket>, TicketError> {
        self.check()?;
        Ok(self.filtered(|t| t.customer_id == customer_id))
    }

    fn find_by_status(&self, status: &str) -> Result<Vec<Ticket>, TicketError> {
        self.check()?;
        Ok(self.filtered(|t| t.status == status))
    }

    fn count_by_status(&self) -> Result<Vec<(String, i64)>, TicketError> {
        self.check()?;
        let mut counts: BTreeMap<String, i64> = BTreeMap::new();
        for ticket in self.tickets.lock().unwrap().values() {
            *counts.entry(ticket.status.clone()).or_insert(0) += 1;
        }
        Ok(counts.into_iter().collect())
    }
}
