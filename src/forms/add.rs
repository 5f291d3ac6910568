use super::{
    log_rejected, refresh_after_commit, validate_record, FormFields, FormPhase, Notice,
    ID_POSITIVE,
};
use crate::db::RecordStore;
use crate::error::RosterResult;
use crate::model::Student;
use crate::roster::RosterView;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Default)]
pub struct AddForm {
    fields: FormFields,
    phase: FormPhase,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResponse {
    pub student: Student,
    pub notice: Notice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_error: Option<Notice>,
}

impl AddForm {
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn submit(
        &mut self,
        input: FormFields,
        store: &RecordStore,
        view: &mut RosterView,
    ) -> RosterResult<AddResponse> {
        self.fields = input;
        self.phase = FormPhase::Submitting;
        let result = validate_record(&self.fields, ID_POSITIVE).and_then(|student| {
            store.insert(&student)?;
            Ok(student)
        });
        self.phase = FormPhase::Collecting;

        let student = result.inspect_err(|e| log_rejected("add", e))?;
        self.fields = FormFields::default();
        info!(id = student.id, "add form committed");

        let refresh_error = refresh_after_commit(view, store);
        let notice = Notice::info(
            "Success",
            format!(
                "Student '{}' (ID: {}) added successfully!",
                student.name(),
                student.id
            ),
        );
        Ok(AddResponse {
            student,
            notice,
            refresh_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use crate::forms::test_support::{alice_form, connected};

    #[test]
    fn successful_add_clears_form_and_refreshes_view() {
        let (store, workspace) = connected("roster-add-ok");
        let mut form = AddForm::default();
        let mut view = RosterView::new();

        let res = form
            .submit(alice_form(), &store, &mut view)
            .expect("add");
        assert_eq!(res.student.id, 1);
        assert_eq!(
            res.notice.message,
            "Student 'Alice' (ID: 1) added successfully!"
        );
        assert!(res.refresh_error.is_none());
        assert_eq!(form.fields(), &FormFields::default());
        assert_eq!(form.phase(), FormPhase::Collecting);
        assert_eq!(view.rows().len(), 1);
        let _ = std::fs::remove_dir_all(workspace);
    }

    #[test]
    fn duplicate_id_keeps_form_and_view() {
        let (store, workspace) = connected("roster-add-dup");
        let mut form = AddForm::default();
        let mut view = RosterView::new();
        form.submit(alice_form(), &store, &mut view).expect("first add");

        let mut again = alice_form();
        again.name = "Alicia".into();
        let err = form
            .submit(again.clone(), &store, &mut view)
            .expect_err("duplicate");
        assert!(matches!(err, RosterError::DuplicateKey(1)));
        assert_eq!(err.to_string(), "Student with ID 1 already exists!");
        assert_eq!(form.fields(), &again);
        assert_eq!(view.rows()[0].name(), "Alice");
        let _ = std::fs::remove_dir_all(workspace);
    }

    #[test]
    fn validation_runs_before_connection_check() {
        let store = RecordStore::new();
        let mut form = AddForm::default();
        let mut view = RosterView::new();

        let mut bad = alice_form();
        bad.mobile = "123".into();
        let err = form.submit(bad, &store, &mut view).expect_err("invalid");
        assert!(matches!(err, RosterError::Validation(_)));

        let err = form
            .submit(alice_form(), &store, &mut view)
            .expect_err("not connected");
        assert!(matches!(err, RosterError::Connection));
        assert_eq!(form.fields(), &alice_form());
    }
}
