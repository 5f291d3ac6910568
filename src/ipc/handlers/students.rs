use super::parse_params;
use crate::forms::{show_all, FormFields, IdRequest};
use crate::ipc::error::{err, ok, roster_err};
use crate::ipc::types::{AppState, Request};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfirmRequest {
    confirm: Option<bool>,
}

fn handle_students_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let input: FormFields = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let form = &mut state.forms.add;
    match form.submit(input, &state.store, &mut state.roster) {
        Ok(res) => {
            let mut result = json!(res);
            result["form"] = json!(form.fields());
            result["phase"] = json!(form.phase());
            result["roster"] = state.roster.to_json();
            ok(&req.id, result)
        }
        Err(e) => roster_err(&req.id, &e, Some(json!(form.fields()))),
    }
}

fn handle_students_search(state: &mut AppState, req: &Request) -> serde_json::Value {
    let input: IdRequest = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let form = &mut state.forms.search;
    match form.submit(input, &state.store, &mut state.roster) {
        Ok(res) => {
            let mut result = json!(res);
            result["phase"] = json!(form.phase());
            result["roster"] = state.roster.to_json();
            ok(&req.id, result)
        }
        Err(e) => roster_err(&req.id, &e, Some(json!({ "id": form.id() }))),
    }
}

fn handle_students_delete_prepare(state: &mut AppState, req: &Request) -> serde_json::Value {
    let input: IdRequest = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let form = &mut state.forms.delete;
    match form.prepare(input, &state.store) {
        Ok(prompt) => {
            let mut result = json!(prompt);
            result["phase"] = json!(form.phase());
            ok(&req.id, result)
        }
        Err(e) => roster_err(&req.id, &e, Some(json!({ "id": form.id() }))),
    }
}

fn handle_students_delete_confirm(state: &mut AppState, req: &Request) -> serde_json::Value {
    let input: ConfirmRequest = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(yes) = input.confirm else {
        return err(&req.id, "bad_params", "missing confirm", None);
    };
    let form = &mut state.forms.delete;
    match form.confirm(yes, &state.store, &mut state.roster) {
        Ok(res) => {
            let mut result = json!(res);
            result["form"] = json!({ "id": form.id() });
            result["roster"] = state.roster.to_json();
            ok(&req.id, result)
        }
        Err(e) => roster_err(&req.id, &e, Some(json!({ "id": form.id() }))),
    }
}

fn handle_students_update_load(state: &mut AppState, req: &Request) -> serde_json::Value {
    let input: IdRequest = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let form = &mut state.forms.update;
    match form.load(input, &state.store) {
        Ok(res) => ok(&req.id, json!(res)),
        Err(e) => roster_err(&req.id, &e, Some(json!(form.fields()))),
    }
}

fn handle_students_update_save(state: &mut AppState, req: &Request) -> serde_json::Value {
    let input: FormFields = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let form = &mut state.forms.update;
    match form.save(input, &state.store, &mut state.roster) {
        Ok(res) => {
            let mut result = json!(res);
            result["form"] = json!(form.fields());
            result["phase"] = json!(form.phase());
            result["roster"] = state.roster.to_json();
            ok(&req.id, result)
        }
        Err(e) => roster_err(&req.id, &e, Some(json!(form.fields()))),
    }
}

fn handle_students_show_all(state: &mut AppState, req: &Request) -> serde_json::Value {
    match show_all(&state.store, &mut state.roster) {
        Ok(count) => ok(
            &req.id,
            json!({ "count": count, "roster": state.roster.to_json() }),
        ),
        Err(e) => roster_err(&req.id, &e, None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.add" => Some(handle_students_add(state, req)),
        "students.search" => Some(handle_students_search(state, req)),
        "students.deletePrepare" => Some(handle_students_delete_prepare(state, req)),
        "students.deleteConfirm" => Some(handle_students_delete_confirm(state, req)),
        "students.updateLoad" => Some(handle_students_update_load(state, req)),
        "students.updateSave" => Some(handle_students_update_save(state, req)),
        "students.showAll" => Some(handle_students_show_all(state, req)),
        _ => None,
    }
}
