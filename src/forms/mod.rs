//! Per-operation form controllers.
//!
//! Each dialog of the form surface has one controller here. A controller owns
//! only the fields its dialog shows plus a [`FormPhase`]; the record store and
//! the roster view are passed in on every call. A submission always moves
//! Collecting → Submitting → Collecting. Successful mutations clear the form;
//! failures keep what was typed so the operator can correct it and resubmit.

mod add;
mod delete;
mod search;
mod update;

pub use add::AddForm;
pub use delete::DeleteForm;
pub use search::SearchForm;
pub use update::UpdateForm;

use crate::db::RecordStore;
use crate::error::{RosterError, RosterResult};
use crate::model::{Gender, Student, StudentFields};
use crate::roster::RosterView;
use crate::validate::{
    parse_id, validate_email, validate_id, validate_mobile, within_len, DOB_MAX_CHARS, EMAIL_MAX_CHARS,
    NAME_MAX_CHARS,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

pub(crate) const ID_POSITIVE: &str = "ID must be a positive number";
pub(crate) const ID_VALID: &str = "ID must be a valid number";
pub(crate) const ID_TOO_LARGE: &str = "ID is too large";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormPhase {
    #[default]
    Collecting,
    Submitting,
}

/// The six entry widgets of the add/update dialogs, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormFields {
    #[serde(deserialize_with = "text_or_number")]
    pub id: String,
    pub name: String,
    pub gender: String,
    pub dob: String,
    #[serde(deserialize_with = "text_or_number")]
    pub mobile: String,
    pub email: String,
}

impl FormFields {
    pub fn from_student(student: &Student) -> Self {
        let f = &student.fields;
        Self {
            id: student.id.to_string(),
            name: f.name.clone(),
            gender: f.gender.as_str().to_string(),
            dob: f.dob.clone(),
            mobile: f.mobile.clone(),
            email: f.email.clone(),
        }
    }
}

/// Params of the single-id dialogs (search, delete, update-load).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdRequest {
    #[serde(deserialize_with = "text_or_number")]
    pub id: String,
}

/// Form widgets hold text, but callers may send a bare JSON number for the id.
fn text_or_number<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!("expected text, got {other}"))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Error,
    Confirm,
}

/// A modal message for the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn confirm(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Confirm,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// Well-formed ids that the `INTEGER` column cannot hold get their own message.
fn checked_id(raw: &str, bad_id: &str) -> RosterResult<i64> {
    if !validate_id(raw) {
        return Err(RosterError::validation(bad_id));
    }
    parse_id(raw).ok_or_else(|| RosterError::validation(ID_TOO_LARGE))
}

/// Id checks for the single-id dialogs: present, then well-formed.
pub(crate) fn require_id(raw: &str, missing: &str) -> RosterResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RosterError::validation(missing));
    }
    checked_id(raw, ID_VALID)
}

/// Full-record validation shared by Add and Update-Save.
pub(crate) fn validate_record(fields: &FormFields, bad_id: &str) -> RosterResult<Student> {
    let id = fields.id.trim();
    let name = fields.name.trim();
    let gender = fields.gender.as_str();
    let dob = fields.dob.trim();
    let mobile = fields.mobile.trim();
    let email = fields.email.trim();

    if [id, name, gender, dob, mobile, email]
        .iter()
        .any(|v| v.is_empty())
    {
        return Err(RosterError::validation("All fields are required"));
    }
    let id = checked_id(id, bad_id)?;
    if !validate_mobile(mobile) {
        return Err(RosterError::validation("Mobile must be exactly 10 digits"));
    }
    if !validate_email(email) {
        return Err(RosterError::validation("Invalid email format"));
    }
    let Some(gender) = Gender::parse(gender) else {
        return Err(RosterError::validation(
            "Gender must be one of Male, Female, Other",
        ));
    };
    if !within_len(name, NAME_MAX_CHARS) {
        return Err(RosterError::validation(format!(
            "Name must be at most {NAME_MAX_CHARS} characters"
        )));
    }
    if !within_len(dob, DOB_MAX_CHARS) {
        return Err(RosterError::validation(format!(
            "D.O.B must be at most {DOB_MAX_CHARS} characters"
        )));
    }
    if !within_len(email, EMAIL_MAX_CHARS) {
        return Err(RosterError::validation(format!(
            "Email must be at most {EMAIL_MAX_CHARS} characters"
        )));
    }

    Ok(Student::new(
        id,
        StudentFields {
            name: name.to_string(),
            gender,
            dob: dob.to_string(),
            mobile: mobile.to_string(),
            email: email.to_string(),
        },
    ))
}

/// Refresh after a committed mutation. The mutation already succeeded, so a
/// failed re-query is reported separately instead of failing the submission.
pub(crate) fn refresh_after_commit(view: &mut RosterView, store: &RecordStore) -> Option<Notice> {
    match view.refresh(store) {
        Ok(()) => None,
        Err(e) => {
            warn!(error = %e, "roster refresh failed after commit");
            Some(Notice::error("Error", format!("Failed to load data:\n{e}")))
        }
    }
}

pub(crate) fn log_rejected(form: &str, e: &RosterError) {
    warn!(form, code = e.code(), error = %e, "submission rejected");
}

/// Show All has no dialog: re-query and redraw.
pub fn show_all(store: &RecordStore, view: &mut RosterView) -> RosterResult<usize> {
    view.refresh(store)?;
    Ok(view.rows().len())
}

/// One controller per dialog.
#[derive(Debug, Default)]
pub struct Forms {
    pub add: AddForm,
    pub search: SearchForm,
    pub delete: DeleteForm,
    pub update: UpdateForm,
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn record_validation_reports_first_problem() {
        let mut f = alice_form();
        f.email.clear();
        assert_eq!(
            validate_record(&f, ID_POSITIVE).unwrap_err().to_string(),
            "All fields are required"
        );

        let mut f = alice_form();
        f.id = "0".into();
        assert_eq!(
            validate_record(&f, ID_POSITIVE).unwrap_err().to_string(),
            ID_POSITIVE
        );

        let mut f = alice_form();
        f.mobile = "98765 4321".into();
        assert_eq!(
            validate_record(&f, ID_POSITIVE).unwrap_err().to_string(),
            "Mobile must be exactly 10 digits"
        );

        let mut f = alice_form();
        f.email = "a.b@c".into();
        assert_eq!(
            validate_record(&f, ID_POSITIVE).unwrap_err().to_string(),
            "Invalid email format"
        );

        let mut f = alice_form();
        f.gender = "female".into();
        assert!(matches!(
            validate_record(&f, ID_POSITIVE),
            Err(RosterError::Validation(_))
        ));
    }

    #[test]
    fn record_validation_trims_text_fields() {
        let mut f = alice_form();
        f.id = " 12 ".into();
        f.name = "  Alice  ".into();
        let s = validate_record(&f, ID_POSITIVE).expect("valid");
        assert_eq!(s.id, 12);
        assert_eq!(s.fields.name, "Alice");
        assert_eq!(s.fields.gender, Gender::Female);
    }

    #[test]
    fn id_request_accepts_number_or_text() {
        let a: IdRequest = serde_json::from_value(serde_json::json!({ "id": 4 })).expect("num");
        let b: IdRequest = serde_json::from_value(serde_json::json!({ "id": "4" })).expect("str");
        let c: IdRequest = serde_json::from_value(serde_json::json!({})).expect("missing");
        assert_eq!(a.id, "4");
        assert_eq!(b.id, "4");
        assert_eq!(c.id, "");
        assert_eq!(
            require_id(&c.id, "Please enter a student ID")
                .unwrap_err()
                .to_string(),
            "Please enter a student ID"
        );
    }

    #[test]
    fn oversized_id_is_reported_as_too_large() {
        let mut f = alice_form();
        f.id = "99999999999999999999".into();
        assert_eq!(
            validate_record(&f, ID_POSITIVE).unwrap_err().to_string(),
            ID_TOO_LARGE
        );
        assert_eq!(
            require_id(" 99999999999999999999 ", "Please enter a student ID")
                .unwrap_err()
                .to_string(),
            ID_TOO_LARGE
        );
        assert_eq!(
            require_id("-4", "Please enter a student ID")
                .unwrap_err()
                .to_string(),
            ID_VALID
        );
    }

    #[test]
    fn transport_failure_keeps_view_and_form() {
        let (store, workspace) = connected("roster-forms-transport");
        let mut view = RosterView::new();
        AddForm::default()
            .submit(alice_form(), &store, &mut view)
            .expect("add");
        let before = view.rows().to_vec();

        let other = rusqlite::Connection::open(crate::db::db_path(&workspace)).expect("open");
        other
            .execute_batch("DROP TABLE students")
            .expect("drop table");
        drop(other);

        let mut add = AddForm::default();
        let mut bob = alice_form();
        bob.id = "2".into();
        bob.name = "Bob".into();
        let err = add
            .submit(bob.clone(), &store, &mut view)
            .expect_err("table gone");
        assert!(matches!(err, RosterError::Transport { .. }));
        assert_eq!(add.fields(), &bob);
        assert_eq!(add.phase(), FormPhase::Collecting);
        assert_eq!(view.rows(), before.as_slice());

        let mut update = UpdateForm::default();
        let mut edited = alice_form();
        edited.mobile = "1234567890".into();
        let err = update
            .save(edited.clone(), &store, &mut view)
            .expect_err("table gone");
        assert!(matches!(err, RosterError::Transport { .. }));
        assert_eq!(update.fields(), &edited);
        assert_eq!(view.rows(), before.as_slice());
        let _ = std::fs::remove_dir_all(workspace);
    }

    #[test]
    fn show_all_requires_connection() {
        let store = RecordStore::new();
        let mut view = RosterView::new();
        assert!(matches!(
            show_all(&store, &mut view),
            Err(RosterError::Connection)
        ));
    }
}
