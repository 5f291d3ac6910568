use super::{log_rejected, refresh_after_commit, require_id, IdRequest, Notice};
use crate::db::RecordStore;
use crate::error::{RosterError, RosterResult};
use crate::roster::RosterView;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "phase")]
pub enum DeletePhase {
    #[default]
    Collecting,
    Submitting,
    /// The operator has been asked to confirm deleting this student.
    Confirming { id: i64, name: String },
}

#[derive(Debug, Default)]
pub struct DeleteForm {
    id: String,
    phase: DeletePhase,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePrompt {
    pub id: i64,
    pub name: String,
    pub confirm: Notice,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    /// `None` when the operator answered no.
    pub deleted: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_error: Option<Notice>,
}

impl DeleteForm {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> &DeletePhase {
        &self.phase
    }

    /// Looks the student up and asks for confirmation. Nothing is deleted yet.
    pub fn prepare(&mut self, req: IdRequest, store: &RecordStore) -> RosterResult<DeletePrompt> {
        self.id = req.id;
        self.phase = DeletePhase::Submitting;
        let result = require_id(&self.id, "ID is required to delete").and_then(|id| {
            store
                .find_by_id(id)?
                .ok_or(RosterError::NotFound(id))
        });

        let student = match result {
            Ok(s) => s,
            Err(e) => {
                self.phase = DeletePhase::Collecting;
                log_rejected("delete", &e);
                return Err(e);
            }
        };

        let name = student.name().to_string();
        self.phase = DeletePhase::Confirming {
            id: student.id,
            name: name.clone(),
        };
        Ok(DeletePrompt {
            id: student.id,
            confirm: Notice::confirm(
                "Confirm Delete",
                format!(
                    "Are you sure you want to delete:\n\nID: {}\nName: {}",
                    student.id, name
                ),
            ),
            name,
        })
    }

    /// Answers the pending prompt. "No" aborts with no change to store, view or form.
    pub fn confirm(
        &mut self,
        yes: bool,
        store: &RecordStore,
        view: &mut RosterView,
    ) -> RosterResult<DeleteResponse> {
        let DeletePhase::Confirming { id, name } = std::mem::take(&mut self.phase) else {
            return Err(RosterError::validation(
                "No deletion is awaiting confirmation",
            ));
        };
        if !yes {
            info!(id, "delete cancelled");
            return Ok(DeleteResponse {
                deleted: None,
                notice: None,
                refresh_error: None,
            });
        }

        self.phase = DeletePhase::Submitting;
        let result = store.delete(id);
        self.phase = DeletePhase::Collecting;
        result.inspect_err(|e| log_rejected("delete", e))?;

        self.id.clear();
        let refresh_error = refresh_after_commit(view, store);
        Ok(DeleteResponse {
            deleted: Some(id),
            notice: Some(Notice::info(
                "Success",
                format!("Student '{name}' deleted successfully"),
            )),
            refresh_error,
        })
    }
}
