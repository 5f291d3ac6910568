use crate::forms::{Forms, Notice};
use crate::ipc::error::{err, ok, roster_err};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_count = state.store.count().ok();
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.store.workspace().map(|p| p.to_string_lossy().to_string()),
            "connected": state.store.is_connected(),
            "studentCount": student_count
        }),
    )
}

fn handle_db_connect(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    if let Err(e) = state.store.connect(&path) {
        return err(
            &req.id,
            "db_open_failed",
            format!("{e:#}"),
            Some(json!({ "path": path.to_string_lossy() })),
        );
    }
    state.forms = Forms::default();

    // Existing rows are shown straight away.
    let refresh_error = match state.roster.refresh(&state.store) {
        Ok(()) => None,
        Err(e) => Some(Notice::error("Error", format!("Failed to load data:\n{e}"))),
    };
    ok(
        &req.id,
        json!({
            "workspacePath": path.to_string_lossy(),
            "notice": Notice::info("Success", "Database connected successfully!"),
            "refreshError": refresh_error,
            "roster": state.roster.to_json()
        }),
    )
}

fn handle_db_close(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.disconnect();
    ok(&req.id, json!({ "ok": true }))
}

fn handle_roster_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    if !state.store.is_connected() {
        return roster_err(&req.id, &crate::error::RosterError::Connection, None);
    }
    ok(&req.id, json!({ "roster": state.roster.to_json() }))
}

fn handle_app_exit(state: &mut AppState, req: &Request) -> serde_json::Value {
    info!("exit requested");
    state.disconnect();
    state.exit_requested = true;
    ok(&req.id, json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "db.connect" => Some(handle_db_connect(state, req)),
        "db.close" => Some(handle_db_close(state, req)),
        "roster.get" => Some(handle_roster_get(state, req)),
        "app.exit" => Some(handle_app_exit(state, req)),
        _ => None,
    }
}
