use crate::error::{DbOp, RosterError, RosterResult};
use crate::model::{Student, StudentFields};
use anyhow::Context;
use rusqlite::{Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DB_FILE_NAME: &str = "roster.sqlite3";

pub fn db_path(workspace: &Path) -> PathBuf {
    workspace.join(DB_FILE_NAME)
}

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace).with_context(|| {
        format!(
            "failed to create workspace {}",
            workspace.to_string_lossy()
        )
    })?;
    let conn = Connection::open(db_path(workspace))?;
    Ok(conn)
}

fn row_to_student(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student::new(
        row.get(0)?,
        StudentFields {
            name: row.get(1)?,
            dob: row.get(2)?,
            gender: row.get(3)?,
            mobile: row.get(4)?,
            email: row.get(5)?,
        },
    ))
}

fn is_primary_key_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

/// Handle to the record store. Owns the single connection for the process;
/// every operation fails with [`RosterError::Connection`] until `connect` succeeds.
#[derive(Default)]
pub struct RecordStore {
    workspace: Option<PathBuf>,
    conn: Option<Connection>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens (creating if needed) `<workspace>/roster.sqlite3` and makes sure the
    /// table exists. Replaces any open handle.
    pub fn connect(&mut self, workspace: &Path) -> anyhow::Result<()> {
        let conn = open_db(workspace)?;
        self.close();
        self.conn = Some(conn);
        if let Err(e) = self.ensure_schema() {
            self.close();
            return Err(anyhow::Error::new(e).context("failed to create students table"));
        }
        info!(workspace = %workspace.display(), "record store connected");
        self.workspace = Some(workspace.to_path_buf());
        Ok(())
    }

    pub fn close(&mut self) {
        self.workspace = None;
        if let Some(conn) = self.conn.take() {
            if let Err((_, e)) = conn.close() {
                warn!(error = %e, "record store did not close cleanly");
            } else {
                debug!("record store closed");
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    pub fn workspace(&self) -> Option<&Path> {
        self.workspace.as_deref()
    }

    fn conn(&self) -> RosterResult<&Connection> {
        self.conn.as_ref().ok_or(RosterError::Connection)
    }

    /// Creates the roster table if it does not exist yet. Safe to run on every connect.
    pub fn ensure_schema(&self) -> RosterResult<()> {
        // Bounds match the form-side checks in validate.rs.
        self.conn()?
            .execute(
                "CREATE TABLE IF NOT EXISTS students(
                    id INTEGER PRIMARY KEY CHECK(id > 0),
                    name TEXT NOT NULL CHECK(length(name) BETWEEN 1 AND 50),
                    dob TEXT NOT NULL CHECK(length(dob) <= 15),
                    gender TEXT NOT NULL CHECK(gender IN ('Male', 'Female', 'Other')),
                    mobile TEXT NOT NULL CHECK(length(mobile) <= 15),
                    email TEXT NOT NULL CHECK(length(email) <= 50)
                )",
                [],
            )
            .map_err(RosterError::transport(DbOp::Query))?;
        Ok(())
    }

    pub fn insert(&self, student: &Student) -> RosterResult<()> {
        let conn = self.conn()?;
        let id = student.id;
        let tx = conn
            .unchecked_transaction()
            .map_err(RosterError::transport(DbOp::Tx))?;

        let exists: Option<i64> = tx
            .query_row("SELECT 1 FROM students WHERE id = ?", [id], |r| r.get(0))
            .optional()
            .map_err(RosterError::transport(DbOp::Query))?;
        if exists.is_some() {
            return Err(RosterError::DuplicateKey(id));
        }

        let f = &student.fields;
        debug!(id, "insert student");
        tx.execute(
            "INSERT INTO students(id, name, dob, gender, mobile, email) VALUES(?, ?, ?, ?, ?, ?)",
            (id, &f.name, &f.dob, f.gender, &f.mobile, &f.email),
        )
        .map_err(|e| {
            if is_primary_key_violation(&e) {
                RosterError::DuplicateKey(id)
            } else {
                RosterError::Transport {
                    op: DbOp::Insert,
                    source: e,
                }
            }
        })?;
        tx.commit().map_err(RosterError::transport(DbOp::Tx))?;
        info!(id, "student inserted");
        Ok(())
    }

    /// Absence is `Ok(None)`, never an error.
    pub fn find_by_id(&self, id: i64) -> RosterResult<Option<Student>> {
        let conn = self.conn()?;
        debug!(id, "find student");
        conn.query_row(
            "SELECT id, name, dob, gender, mobile, email FROM students WHERE id = ?",
            [id],
            row_to_student,
        )
        .optional()
        .map_err(RosterError::transport(DbOp::Query))
    }

    pub fn list_all(&self) -> RosterResult<Vec<Student>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT id, name, dob, gender, mobile, email FROM students ORDER BY id")
            .map_err(RosterError::transport(DbOp::Query))?;
        let rows = stmt
            .query_map([], row_to_student)
            .and_then(|it| it.collect::<Result<Vec<_>, _>>())
            .map_err(RosterError::transport(DbOp::Query))?;
        debug!(count = rows.len(), "listed students");
        Ok(rows)
    }

    pub fn count(&self) -> RosterResult<i64> {
        self.conn()?
            .query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))
            .map_err(RosterError::transport(DbOp::Query))
    }

    /// Overwrites every mutable field of the student with `id`.
    pub fn update(&self, id: i64, fields: &StudentFields) -> RosterResult<()> {
        let conn = self.conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(RosterError::transport(DbOp::Tx))?;
        debug!(id, "update student");
        let changed = tx
            .execute(
                "UPDATE students
                 SET name = ?, gender = ?, dob = ?, mobile = ?, email = ?
                 WHERE id = ?",
                (
                    &fields.name,
                    fields.gender,
                    &fields.dob,
                    &fields.mobile,
                    &fields.email,
                    id,
                ),
            )
            .map_err(RosterError::transport(DbOp::Update))?;
        if changed == 0 {
            return Err(RosterError::NotFound(id));
        }
        tx.commit().map_err(RosterError::transport(DbOp::Tx))?;
        info!(id, "student updated");
        Ok(())
    }

    pub fn delete(&self, id: i64) -> RosterResult<()> {
        let conn = self.conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(RosterError::transport(DbOp::Tx))?;
        debug!(id, "delete student");
        let changed = tx
            .execute("DELETE FROM students WHERE id = ?", [id])
            .map_err(RosterError::transport(DbOp::Delete))?;
        if changed == 0 {
            return Err(RosterError::NotFound(id));
        }
        tx.commit().map_err(RosterError::transport(DbOp::Tx))?;
        info!(id, "student deleted");
        Ok(())
    }
}
