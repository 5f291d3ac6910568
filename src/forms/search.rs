use super::{log_rejected, require_id, FormPhase, IdRequest, Notice};
use crate::db::RecordStore;
use crate::error::RosterResult;
use crate::model::Student;
use crate::roster::RosterView;
use serde::Serialize;

#[derive(Debug, Default)]
pub struct SearchForm {
    id: String,
    phase: FormPhase,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub found: Option<Student>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl SearchForm {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// A hit replaces the roster with that one row. A miss is reported and
    /// leaves the roster exactly as it was.
    pub fn submit(
        &mut self,
        req: IdRequest,
        store: &RecordStore,
        view: &mut RosterView,
    ) -> RosterResult<SearchResponse> {
        self.id = req.id;
        self.phase = FormPhase::Submitting;
        let result = require_id(&self.id, "Please enter a student ID")
            .and_then(|id| Ok((id, store.find_by_id(id)?)));
        self.phase = FormPhase::Collecting;

        let (id, found) = result.inspect_err(|e| log_rejected("search", e))?;
        let Some(student) = found else {
            return Ok(SearchResponse {
                found: None,
                notice: Some(Notice::info(
                    "No Result",
                    format!("No student found with ID {id}"),
                )),
            });
        };

        self.id.clear();
        view.replace(vec![student.clone()]);
        Ok(SearchResponse {
            found: Some(student),
            notice: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use crate::forms::test_support::{alice_form, connected};
    use crate::forms::AddForm;

    fn id(s: &str) -> IdRequest {
        IdRequest { id: s.into() }
    }

    #[test]
    fn hit_replaces_view_with_single_row() {
        let (store, workspace) = connected("roster-search-hit");
        let mut view = RosterView::new();
        let mut add = AddForm::default();
        add.submit(alice_form(), &store, &mut view).expect("add");
        let mut bob = alice_form();
        bob.id = "2".into();
        bob.name = "Bob".into();
        add.submit(bob, &store, &mut view).expect("add bob");
        assert_eq!(view.rows().len(), 2);

        let mut form = SearchForm::default();
        let res = form.submit(id("2"), &store, &mut view).expect("search");
        assert_eq!(res.found.as_ref().map(|s| s.id), Some(2));
        assert_eq!(view.rows().len(), 1);
        assert_eq!(view.rows()[0].name(), "Bob");
        let _ = std::fs::remove_dir_all(workspace);
    }

    #[test]
    fn miss_reports_and_leaves_view_untouched() {
        let (store, workspace) = connected("roster-search-miss");
        let mut view = RosterView::new();
        AddForm::default()
            .submit(alice_form(), &store, &mut view)
            .expect("add");

        let mut form = SearchForm::default();
        let res = form.submit(id("99"), &store, &mut view).expect("search");
        assert!(res.found.is_none());
        assert_eq!(
            res.notice.map(|n| n.message),
            Some("No student found with ID 99".to_string())
        );
        assert_eq!(view.rows().len(), 1);
        assert_eq!(form.id(), "99");
        let _ = std::fs::remove_dir_all(workspace);
    }

    #[test]
    fn bad_id_is_rejected() {
        let (store, workspace) = connected("roster-search-bad");
        let mut view = RosterView::new();
        let mut form = SearchForm::default();
        let err = form.submit(id(""), &store, &mut view).expect_err("empty");
        assert_eq!(err.to_string(), "Please enter a student ID");
        let err = form.submit(id("x1"), &store, &mut view).expect_err("bad");
        assert!(matches!(err, RosterError::Validation(_)));
        assert_eq!(form.phase(), FormPhase::Collecting);
        let _ = std::fs::remove_dir_all(workspace);
    }
}
