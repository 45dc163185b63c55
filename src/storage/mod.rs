use crate::models::Session;

pub(crate) const SESSION_KEY: &str = "bookstore_session";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn save_session_to_storage(session: &Session) {
    if let Ok(json) = serde_json::to_string(session) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(SESSION_KEY, &json);
        }
    }
}

/// Loads the persisted session. A session past its expiration is treated as
/// absent and removed from storage.
pub(crate) fn load_session_from_storage() -> Option<Session> {
    let storage = local_storage()?;
    let json = storage.get_item(SESSION_KEY).ok().flatten()?;
    let session: Session = serde_json::from_str(&json).ok()?;
    if session.is_expired_at(now_secs()) {
        clear_session_storage();
        return None;
    }
    Some(session)
}

pub(crate) fn clear_session_storage() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}

pub(crate) fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0).round() as i64
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn sample_session(expiration: i64) -> Session {
        Session {
            id: 1,
            jwt: "jwt-token".to_string(),
            expiration,
            role: "user".to_string(),
        }
    }

    #[wasm_bindgen_test]
    fn session_storage_roundtrip() {
        clear_session_storage();
        assert!(load_session_from_storage().is_none());

        let session = sample_session(now_secs() + 3600);
        save_session_to_storage(&session);
        assert_eq!(load_session_from_storage(), Some(session));

        clear_session_storage();
        assert!(load_session_from_storage().is_none());
    }

    #[wasm_bindgen_test]
    fn expired_session_is_dropped_on_load() {
        save_session_to_storage(&sample_session(now_secs() - 1));
        assert!(load_session_from_storage().is_none());

        // The stale entry is also cleared from storage itself.
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .expect("localStorage should be available");
        assert_eq!(storage.get_item(SESSION_KEY).ok().flatten(), None);
    }
}
