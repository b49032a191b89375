use super::{RowRef, RowStore, StoreResult};
use crate::models::sheet_row::SheetRow;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// Sheet kept in a SQLite file that several desks can open.
pub struct SqliteRowStore {
    conn: Connection,
}

impl SqliteRowStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS sheet (
                row_no  INTEGER PRIMARY KEY AUTOINCREMENT,
                id      TEXT NOT NULL DEFAULT '',
                nome    TEXT NOT NULL DEFAULT '',
                tipo    TEXT NOT NULL DEFAULT '',
                idade   TEXT NOT NULL DEFAULT '',
                status  TEXT NOT NULL DEFAULT '',
                hora    TEXT NOT NULL DEFAULT '',
                data    TEXT NOT NULL DEFAULT '',
                evento  TEXT NOT NULL DEFAULT ''
            );

            CREATE INDEX IF NOT EXISTS idx_sheet_id ON sheet(id);
            "#,
        )?;
        Ok(Self { conn })
    }
}

impl RowStore for SqliteRowStore {
    fn append_row(&mut self, row: &SheetRow) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO sheet (id, nome, tipo, idade, status, hora, data, evento)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                row.id, row.name, row.kind, row.age, row.status, row.time, row.date, row.event
            ],
        )?;
        Ok(())
    }

    fn all_rows(&mut self) -> StoreResult<Vec<SheetRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, nome, tipo, idade, status, hora, data, evento
             FROM sheet ORDER BY row_no ASC",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(SheetRow {
                id: r.get(0)?,
                name: r.get(1)?,
                kind: r.get(2)?,
                age: r.get(3)?,
                status: r.get(4)?,
                time: r.get(5)?,
                date: r.get(6)?,
                event: r.get(7)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn find_row(&mut self, id: &str) -> StoreResult<Option<RowRef>> {
        let found = self
            .conn
            .query_row(
                "SELECT row_no FROM sheet WHERE id = ?1 ORDER BY row_no ASC LIMIT 1",
                [id],
                |r| r.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.map(RowRef))
    }

    fn delete_row(&mut self, row: RowRef) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM sheet WHERE row_no = ?1", [row.0])?;
        Ok(())
    }
}
