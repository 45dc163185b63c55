use serde::{Deserialize, Serialize};

/// Book as it appears in the catalog listing.
///
/// The backend keeps `price` as a formatted string; listings that return a
/// JSON number are normalized in `ApiClient::parse_book_list_response`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Book {
    pub idbook: i64,
    pub name: String,
    pub price: String,
    pub img_src: String,
    pub description: String,
}

/// Request body for creating or updating a book.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct BookPayload {
    pub name: String,

    /// Fixed-point string with two fractional digits, see `forms::normalize_price`.
    pub price: String,

    // The backend expects the camelCase key on the wire.
    #[serde(rename = "imgSrc")]
    pub img_src: String,

    pub description: String,
}

/// Authenticated session returned by `POST /user` and persisted in
/// `localStorage`. Read-only after login.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Session {
    pub id: i64,
    pub jwt: String,

    /// Unix seconds.
    pub expiration: i64,

    #[serde(default)]
    pub role: String,
}

impl Session {
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        self.expiration <= now_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_payload_uses_camel_case_img_src_key() {
        let payload = BookPayload {
            name: "The Rust Programming Language".to_string(),
            price: "29.90".to_string(),
            img_src: "https://example.com/cover.jpg".to_string(),
            description: "An introduction to Rust.".to_string(),
        };
        let v = serde_json::to_value(payload).expect("should serialize");
        assert_eq!(v["imgSrc"], "https://example.com/cover.jpg");
        assert!(v.get("img_src").is_none());
    }

    #[test]
    fn session_contract_deserialize() {
        let json = r#"{
            "id": 7,
            "jwt": "jwt-token",
            "expiration": 1767225600,
            "role": "user"
        }"#;
        let session: Session = serde_json::from_str(json).expect("session should parse");
        assert_eq!(session.id, 7);
        assert_eq!(session.jwt, "jwt-token");
        assert_eq!(session.role, "user");
    }

    #[test]
    fn session_role_defaults_to_empty() {
        let json = r#"{"id": 1, "jwt": "t", "expiration": 0}"#;
        let session: Session = serde_json::from_str(json).expect("session should parse");
        assert_eq!(session.role, "");
    }

    #[test]
    fn session_expiry_is_inclusive() {
        let session = Session {
            id: 1,
            jwt: "t".to_string(),
            expiration: 1_000,
            role: String::new(),
        };
        assert!(!session.is_expired_at(999));
        assert!(session.is_expired_at(1_000));
        assert!(session.is_expired_at(1_001));
    }
}
