//! SQLite-backed ticket store implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use super::{Ticket, TicketError, TicketStore};

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, status, created_at, customer_id FROM tickets";

/// SQLite-backed ticket store.
pub struct SqliteTicketStore {
    conn: Mutex<Connection>,
}

impl SqliteTicketStore {
    /// Create a new SQLite ticket store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, TicketError> {
        let conn = Connection::open(path)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite ticket store (useful for testing).
    pub fn in_memory() -> Result<Self, TicketError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), TicketError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tickets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                customer_id INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tickets_customer_id ON tickets(customer_id);
            CREATE INDEX IF NOT EXISTS idx_tickets_status ON tickets(status);
            "#,
        )?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, TicketError> {
        self.conn
            .lock()
            .map_err(|_| TicketError::Database("connection lock poisoned".to_string()))
    }

    fn row_to_ticket(row: &rusqlite::Row) -> rusqlite::Result<Ticket> {
        let created_at_str: String = row.get(4)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

        Ok(Ticket {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            status: row.get(3)?,
            created_at,
            customer_id: row.get(5)?,
        })
    }

    fn query_tickets(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Ticket>, TicketError> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, Self::row_to_ticket)?;

        let mut tickets = Vec::new();
        for row_result in rows {
            tickets.push(row_result?);
        }

        Ok(tickets)
    }

    fn get_locked(conn: &Connection, id: i64) -> Result<Option<Ticket>, TicketError> {
        let ticket = conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_COLUMNS),
                params![id],
                Self::row_to_ticket,
            )
            .optional()?;
        Ok(ticket)
    }
}

impl TicketStore for SqliteTicketStore {
    fn insert(&self, ticket: Ticket) -> Result<Ticket, TicketError> {
        let conn = self.conn()?;

        // NULL into an INTEGER PRIMARY KEY column makes SQLite assign the id.
        let explicit_id = (!ticket.is_new()).then_some(ticket.id);

        conn.execute(
            "INSERT INTO tickets (id, title, description, status, created_at, customer_id) VALUES (?, ?, ?, ?, ?, ?)",
            params![
                explicit_id,
                ticket.title,
                ticket.description,
                ticket.status,
                ticket.created_at.to_rfc3339(),
                ticket.customer_id,
            ],
        )?;

        Ok(Ticket {
            id: conn.last_insert_rowid(),
            ..ticket
        })
    }

    fn get(&self, id: i64) -> Result<Option<Ticket>, TicketError> {
        let conn = self.conn()?;
        Self::get_locked(&conn, id)
    }

    fn list_all(&self) -> Result<Vec<Ticket>, TicketError> {
        let conn = self.conn()?;
        Self::query_tickets(&conn, &format!("{} ORDER BY id ASC", SELECT_COLUMNS), params![])
    }

    fn update(&self, ticket: Ticket) -> Result<Ticket, TicketError> {
        let conn = self.conn()?;

        let changed = conn.execute(
            "UPDATE tickets SET title = ?, description = ?, status = ?, customer_id = ? WHERE id = ?",
            params![
                ticket.title,
                ticket.description,
                ticket.status,
                ticket.customer_id,
                ticket.id,
            ],
        )?;

        if changed == 0 {
            return Ok(ticket);
        }

        // Re-read so the caller sees the stored created_at.
        Ok(Self::get_locked(&conn, ticket.id)?.unwrap_or(ticket))
    }

    fn delete(&self, id: i64) -> Result<bool, TicketError> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM tickets WHERE id = ?", params![id])?;
        Ok(removed > 0)
    }

    fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Ticket>, TicketError> {
        let conn = self.conn()?;
        Self::query_tickets(
            &conn,
            &format!("{} WHERE customer_id = ? ORDER BY id ASC", SELECT_COLUMNS),
            params![customer_id],
        )
    }

    fn find_by_status(&self, status: &str) -> Result<Vec<Ticket>, TicketError> {
        let conn = self.conn()?;
        Self::query_tickets(
            &conn,
            &format!("{} WHERE status = ? ORDER BY id ASC", SELECT_COLUMNS),
            params![status],
        )
    }

    fn count_by_status(&self) -> Result<Vec<(String, i64)>, TicketError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT status, COUNT(*) FROM tickets GROUP BY status ORDER BY status ASC",
        )?;
        let rows = stmt.query_map(params![], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut counts = Vec::new();
        for row_result in rows {
            counts.push(row_result?);
        }

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::status;
    use chrono::TimeZone;

    fn create_test_store() -> SqliteTicketStore {
        SqliteTicketStore::in_memory().unwrap()
    }

    fn create_test_ticket(customer_id: i64) -> Ticket {
        Ticket::new("No puedo acceder a mi curso", customer_id)
            .with_description("El curso de Rust no carga")
            .with_status(status::OPEN)
    }

    #[test]
    fn test_insert_assigns_id() {
        let store = create_test_store();

        let first = store.insert(create_test_ticket(100)).unwrap();
        let second = store.insert(create_test_ticket(100)).unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(first.title, "No puedo acceder a mi curso");
        assert_eq!(first.status, "ABIERTA");
    }

    #[test]
    fn test_insert_with_explicit_id() {
        let store = create_test_store();
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let ticket = Ticket {
            id: 42,
            created_at,
            ..create_test_ticket(7).with_status(status::CLOSED)
        };

        let stored = store.insert(ticket).unwrap();
        assert_eq!(stored.id, 42);

        let fetched = store.get(42).unwrap().unwrap();
        assert_eq!(fetched.status, "CERRADA");
        assert_eq!(fetched.created_at, created_at);
    }

    #[test]
    fn test_insert_duplicate_explicit_id_fails() {
        let store = create_test_store();
        let ticket = Ticket {
            id: 5,
            ..create_test_ticket(1)
        };
        store.insert(ticket.clone()).unwrap();

        let result = store.insert(ticket);
        assert!(matches!(result, Err(TicketError::Database(_))));
    }

    #[test]
    fn test_get_round_trips_all_fields() {
        let store = create_test_store();
        let created = store.insert(create_test_ticket(100)).unwrap();

        let fetched = store.get(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_get_nonexistent_ticket() {
        let store = create_test_store();
        assert!(store.get(999).unwrap().is_none());
    }

    #[test]
    fn test_description_is_optional() {
        let store = create_test_store();
        let ticket = Ticket::new("Sin descripcion", 3).with_status(status::OPEN);

        let created = store.insert(ticket).unwrap();
        let fetched = store.get(created.id).unwrap().unwrap();
        assert!(fetched.description.is_none());
    }

    #[test]
    fn test_list_all_ordered_by_id() {
        let store = create_test_store();
        assert!(store.list_all().unwrap().is_empty());

        for customer in [3, 1, 2] {
            store.insert(create_test_ticket(customer)).unwrap();
        }

        let tickets = store.list_all().unwrap();
        assert_eq!(tickets.len(), 3);
        assert!(tickets.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(
            tickets.iter().map(|t| t.customer_id).collect::<Vec<_>>(),
            vec![3, 1, 2]
        );
    }

    #[test]
    fn test_update_replaces_fields_but_not_created_at() {
        let store = create_test_store();
        let created = store.insert(create_test_ticket(100)).unwrap();

        let changed = Ticket {
            title: "Problema resuelto".to_string(),
            description: None,
            status: status::IN_PROGRESS.to_string(),
            customer_id: 200,
            created_at: Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
            ..created.clone()
        };

        let updated = store.update(changed).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Problema resuelto");
        assert!(updated.description.is_none());
        assert_eq!(updated.status, "EN_PROCESO");
        assert_eq!(updated.customer_id, 200);
        assert_eq!(updated.created_at, created.created_at);

        let fetched = store.get(created.id).unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[test]
    fn test_update_missing_ticket_is_noop() {
        let store = create_test_store();
        let ghost = Ticket {
            id: 77,
            ..create_test_ticket(1)
        };

        let result = store.update(ghost.clone()).unwrap();
        assert_eq!(result, ghost);
        assert!(store.get(77).unwrap().is_none());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_ticket() {
        let store = create_test_store();
        let created = store.insert(create_test_ticket(100)).unwrap();

        assert!(store.delete(created.id).unwrap());
        assert!(store.get(created.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = create_test_store();
        let created = store.insert(create_test_ticket(100)).unwrap();

        assert!(store.delete(created.id).unwrap());
        assert!(!store.delete(created.id).unwrap());
        assert!(!store.delete(12345).unwrap());
    }

    #[test]
    fn test_find_by_customer_id() {
        let store = create_test_store();
        store.insert(create_test_ticket(100)).unwrap();
        store.insert(create_test_ticket(101)).unwrap();
        store.insert(create_test_ticket(100)).unwrap();

        let tickets = store.find_by_customer_id(100).unwrap();
        assert_eq!(tickets.len(), 2);
        assert!(tickets.iter().all(|t| t.customer_id == 100));

        assert!(store.find_by_customer_id(42).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_status_is_exact_match() {
        let store = create_test_store();
        store.insert(create_test_ticket(1)).unwrap();
        store
            .insert(create_test_ticket(2).with_status(status::CLOSED))
            .unwrap();

        let open = store.find_by_status("ABIERTA").unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].customer_id, 1);

        let closed = store.find_by_status("CERRADA").unwrap();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].customer_id, 2);

        // Case-sensitive: callers normalize before querying.
        assert!(store.find_by_status("abierta").unwrap().is_empty());
    }

    #[test]
    fn test_count_by_status() {
        let store = create_test_store();
        assert!(store.count_by_status().unwrap().is_empty());

        store.insert(create_test_ticket(1)).unwrap();
        store.insert(create_test_ticket(2)).unwrap();
        store
            .insert(create_test_ticket(3).with_status(status::CLOSED))
            .unwrap();
        let in_progress = store
            .insert(create_test_ticket(4).with_status(status::IN_PROGRESS))
            .unwrap();
        store.delete(in_progress.id).unwrap();

        assert_eq!(
            store.count_by_status().unwrap(),
            vec![("ABIERTA".to_string(), 2), ("CERRADA".to_string(), 1)]
        );
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("tickets.db");

        let id = {
            let store = SqliteTicketStore::new(&db_path).unwrap();
            store.insert(create_test_ticket(100)).unwrap().id
        };

        let store = SqliteTicketStore::new(&db_path).unwrap();
        let fetched = store.get(id).unwrap().unwrap();
        assert_eq!(fetched.customer_id, 100);
    }
}
