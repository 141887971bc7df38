use crate::error::{Result, StoreError};
use crate::Db;

impl Db {
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let cnt: i64 = self.conn.query_row(
            "SELECT COUNT(1) FROM sqlite_master WHERE type='table' AND name=?",
            [name],
            |r| r.get(0),
        )?;
        Ok(cnt > 0)
    }

    /// User tables in the store, sorted by name.
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name")?;
        let names = stmt.query_map([], |r| r.get(0))?.collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Column names of `table` in declaration order.
    pub fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        // PRAGMA arguments cannot be bound, so only names known to sqlite_master
        // are ever interpolated.
        if !self.table_exists(table)? {
            return Err(StoreError::NoSuchTable(table.to_string()));
        }
        let sql = format!("PRAGMA table_info(\"{}\")", table.replace('"', "\"\""));
        let mut stmt = self.conn.prepare(&sql)?;
        let cols = stmt.query_map([], |r| r.get(1))?.collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(cols)
    }
}
