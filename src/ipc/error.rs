use crate::error::RosterError;
use serde_json::json;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

/// Error reply for a failed store or form operation. `form` carries the
/// fields the dialog should keep showing.
pub fn roster_err(
    id: &str,
    e: &RosterError,
    form: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut details = match e {
        RosterError::NotFound(sid) | RosterError::DuplicateKey(sid) => json!({ "studentId": sid }),
        _ => json!({}),
    };
    if let Some(f) = form {
        details["form"] = f;
    }
    let details = match details.as_object() {
        Some(m) if m.is_empty() => None,
        _ => Some(details),
    };
    err(id, e.code(), e.to_string(), details)
}
