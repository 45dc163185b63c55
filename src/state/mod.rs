use crate::api::ApiClient;
use crate::models::{Book, Session};
use crate::storage::load_session_from_storage;
use leptos::prelude::*;

#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Established on login, persisted by `storage`. Read-only elsewhere.
    pub session: RwSignal<Option<Session>>,

    /// Book handed from a listing into the registration form. One-shot:
    /// reading it through `take_edit_item` clears it.
    pub edit_item: RwSignal<Option<Book>>,
}

impl AppState {
    pub fn new() -> Self {
        let stored_client = ApiClient::load_from_storage();
        let stored_session = load_session_from_storage();

        Self {
            api_client: RwSignal::new(stored_client),
            session: RwSignal::new(stored_session),
            edit_item: RwSignal::new(None),
        }
    }

    pub fn take_edit_item(&self) -> Option<Book> {
        let item = self.edit_item.get_untracked();
        if item.is_some() {
            self.edit_item.set(None);
        }
        item
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
