use crate::ipc::error::{err, ok, roster_err};
use crate::ipc::types::{AppState, Request};
use crate::model::Student;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

const CSV_HEADER: &str = "id,name,gender,dob,mobile,email\n";

fn csv_quote(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn roster_csv(students: &[Student]) -> String {
    let mut csv = String::from(CSV_HEADER);
    for s in students {
        let f = &s.fields;
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            s.id,
            csv_quote(&f.name),
            f.gender.as_str(),
            csv_quote(&f.dob),
            csv_quote(&f.mobile),
            csv_quote(&f.email)
        ));
    }
    csv
}

fn required_path(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    match req.params.get(key).and_then(|v| v.as_str()) {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(err(&req.id, "bad_params", format!("missing {key}"), None)),
    }
}

fn handle_exchange_export_roster_csv(state: &mut AppState, req: &Request) -> serde_json::Value {
    let out_path = match required_path(req, "outPath") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let students = match state.store.list_all() {
        Ok(v) => v,
        Err(e) => return roster_err(&req.id, &e, None),
    };

    let out = PathBuf::from(&out_path);
    if let Some(parent) = out.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            return err(
                &req.id,
                "io_failed",
                e.to_string(),
                Some(json!({ "path": out_path })),
            );
        }
    }
    if let Err(e) = std::fs::write(&out, roster_csv(&students)) {
        return err(
            &req.id,
            "io_failed",
            e.to_string(),
            Some(json!({ "path": out_path })),
        );
    }
    info!(path = %out_path, rows = students.len(), "roster exported");

    ok(
        &req.id,
        json!({ "ok": true, "rowsExported": students.len(), "path": out_path }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "exchange.exportRosterCsv" => Some(handle_exchange_export_roster_csv(state, req)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, StudentFields};

    #[test]
    fn csv_quotes_only_when_needed() {
        let rows = vec![Student::new(
            3,
            StudentFields {
                name: "Doe, \"JJ\"".into(),
                gender: Gender::Male,
                dob: "05/06/2007".into(),
                mobile: "5550001111".into(),
                email: "jj@doe.net".into(),
            },
        )];
        assert_eq!(
            roster_csv(&rows),
            "id,name,gender,dob,mobile,email\n3,\"Doe, \"\"JJ\"\"\",Male,05/06/2007,5550001111,jj@doe.net\n"
        );
    }
}
