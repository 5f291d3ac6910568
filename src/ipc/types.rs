use crate::db::RecordStore;
use crate::forms::Forms;
use crate::roster::RosterView;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Default)]
pub struct AppState {
    pub store: RecordStore,
    pub roster: RosterView,
    pub forms: Forms,
    /// Set by `app.exit`; the main loop stops after writing that reply.
    pub exit_requested: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: RecordStore::new(),
            roster: RosterView::new(),
            forms: Forms::default(),
            exit_requested: false,
        }
    }

    /// Drops the connection and everything derived from it.
    pub fn disconnect(&mut self) {
        self.store.close();
        self.roster.clear();
        self.forms = Forms::default();
    }
}
