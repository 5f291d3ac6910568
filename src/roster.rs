use crate::db::RecordStore;
use crate::error::RosterResult;
use crate::model::Student;
use serde_json::json;

pub const COLUMNS: [&str; 6] = ["Id", "Name", "Gender", "D.O.B.", "Mobile", "Email"];

/// The rows the form surface is currently showing.
///
/// Holds no state of its own beyond the last result set: every refresh throws
/// the old rows away and takes the new ones in the order the store returned them.
#[derive(Debug, Default)]
pub struct RosterView {
    rows: Vec<Student>,
}

impl RosterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Student] {
        &self.rows
    }

    pub fn replace(&mut self, rows: Vec<Student>) {
        self.rows = rows;
    }

    /// Re-queries the whole table. On error the previous rows stay on screen.
    pub fn refresh(&mut self, store: &RecordStore) -> RosterResult<()> {
        let rows = store.list_all()?;
        self.replace(rows);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|s| {
                json!([
                    s.id,
                    s.fields.name,
                    s.fields.gender.as_str(),
                    s.fields.dob,
                    s.fields.mobile,
                    s.fields.email
                ])
            })
            .collect();
        json!({ "columns": COLUMNS, "rows": rows })
    }
}
