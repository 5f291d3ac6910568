use super::{
    log_rejected, refresh_after_commit, require_id, validate_record, FormFields, FormPhase,
    IdRequest, Notice, ID_VALID,
};
use crate::db::RecordStore;
use crate::error::{RosterError, RosterResult};
use crate::model::Student;
use crate::roster::RosterView;
use serde::Serialize;
use tracing::info;

/// Two sub-actions on one dialog: Load fills the fields from the store, Save writes them back.
#[derive(Debug, Default)]
pub struct UpdateForm {
    fields: FormFields,
    phase: FormPhase,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLoadResponse {
    pub form: FormFields,
    pub notice: Notice,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaveResponse {
    pub student: Student,
    pub notice: Notice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_error: Option<Notice>,
}

impl UpdateForm {
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Whatever an earlier load put in the editable fields is dropped first, so a
    /// miss never leaves another student's data on the dialog.
    pub fn load(&mut self, req: IdRequest, store: &RecordStore) -> RosterResult<UpdateLoadResponse> {
        self.fields = FormFields {
            id: req.id,
            ..FormFields::default()
        };
        self.phase = FormPhase::Submitting;
        let result = require_id(&self.fields.id, "Enter Student ID first").and_then(|id| {
            store
                .find_by_id(id)?
                .ok_or(RosterError::NotFound(id))
        });
        self.phase = FormPhase::Collecting;

        let student = result.inspect_err(|e| log_rejected("update", e))?;
        // Keep the id as typed; only the editable fields are populated.
        let id = std::mem::take(&mut self.fields.id);
        self.fields = FormFields {
            id,
            ..FormFields::from_student(&student)
        };
        Ok(UpdateLoadResponse {
            form: self.fields.clone(),
            notice: Notice::info("Success", "Student data loaded"),
        })
    }

    pub fn save(
        &mut self,
        input: FormFields,
        store: &RecordStore,
        view: &mut RosterView,
    ) -> RosterResult<UpdateSaveResponse> {
        self.fields = input;
        self.phase = FormPhase::Submitting;
        let result = validate_record(&self.fields, ID_VALID).and_then(|student| {
            store.update(student.id, &student.fields)?;
            Ok(student)
        });
        self.phase = FormPhase::Collecting;

        let student = result.inspect_err(|e| log_rejected("update", e))?;
        self.fields = FormFields::default();
        info!(id = student.id, "update form committed");

        let refresh_error = refresh_after_commit(view, store);
        let notice = Notice::info(
            "Success",
            format!("Student ID {} updated successfully!", student.id),
        );
        Ok(UpdateSaveResponse {
            student,
            notice,
            refresh_error,
        })
    }
}
