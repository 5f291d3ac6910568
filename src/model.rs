use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Exact match, as offered by the form's read-only gender picker.
    pub fn parse(s: &str) -> Option<Self> {
        Gender::ALL.into_iter().find(|g| g.as_str() == s)
    }
}

impl ToSql for Gender {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Gender {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Gender::parse(s).ok_or_else(|| FromSqlError::Other(format!("unknown gender {s:?}").into()))
    }
}

/// Everything about a student except the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFields {
    pub name: String,
    pub gender: Gender,
    pub dob: String,
    pub mobile: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    #[serde(flatten)]
    pub fields: StudentFields,
}

impl Student {
    pub fn new(id: i64, fields: StudentFields) -> Self {
        Self { id, fields }
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }
}
