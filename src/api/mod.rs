use crate::models::{Book, BookPayload, Session};
use crate::storage::load_session_from_storage;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://localhost:8080".to_string();

        // The deployment injects `window.ENV.API_URL`; `window.ENV.api_url`
        // is accepted as a legacy spelling.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"API_URL".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }

                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"api_url".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }
                }
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn get_api_url() -> String {
    EnvConfig::new().api_url
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    #[allow(dead_code)]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    /// Base URL from `window.ENV`, bearer token from the persisted session.
    pub fn load_from_storage() -> Self {
        let base_url = get_api_url();
        let token = load_session_from_storage().map(|s| s.jwt);

        Self { base_url, token }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);
        let mut req = client.request(method, url);

        if let Some(header) = self.auth_header() {
            req = req.header("Authorization", header);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        req.send().await.map_err(ApiError::network)
    }

    async fn expect_status(
        res: reqwest::Response,
        expected: reqwest::StatusCode,
        ctx: &str,
    ) -> ApiResult<()> {
        let status = res.status();
        if status == expected {
            return Ok(());
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::unauthorized());
        }
        let body = res.text().await.unwrap_or_default();
        Err(ApiError::http(status, body, ctx))
    }

    /// `POST /books`. The backend signals success with 201 only.
    pub async fn register_book(&self, book: &BookPayload) -> ApiResult<()> {
        let res = self.send(reqwest::Method::POST, "/books", Some(book)).await?;
        Self::expect_status(res, reqwest::StatusCode::CREATED, "Adding book failed").await
    }

    /// `PUT /editbook/{id}`. The backend signals success with 204 only.
    pub async fn edit_book(&self, idbook: i64, book: &BookPayload) -> ApiResult<()> {
        let res = self
            .send(
                reqwest::Method::PUT,
                &format!("/editbook/{idbook}"),
                Some(book),
            )
            .await?;
        Self::expect_status(res, reqwest::StatusCode::NO_CONTENT, "Editing book failed").await
    }

    pub async fn list_books(&self) -> ApiResult<Vec<Book>> {
        let res = self
            .send(reqwest::Method::GET, "/books", None::<&()>)
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::http(status, body, "Loading books failed"));
        }

        let data: serde_json::Value = res.json().await.map_err(ApiError::parse)?;
        Ok(Self::parse_book_list_response(data))
    }

    /// `GET /users/{email}`: checks that an account exists. The payload is
    /// only inspected for presence, so it stays an opaque JSON value.
    pub async fn fetch_user_by_email(&self, email: &str) -> ApiResult<serde_json::Value> {
        let path = format!("/users/{}", urlencoding::encode(email));
        let res = self.send(reqwest::Method::GET, &path, None::<&()>).await?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Account lookup failed"))
        }
    }

    /// `POST /user`: verifies the password and returns the session payload.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> ApiResult<Session> {
        let res = self
            .send(
                reqwest::Method::POST,
                "/user",
                Some(&LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                }),
            )
            .await?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Credential check failed"))
        }
    }

    /// The listing has been observed both as a bare array and wrapped in a
    /// `books` object; `price` arrives as a string or a number.
    pub(crate) fn parse_book_list_response(data: serde_json::Value) -> Vec<Book> {
        let list = data
            .as_array()
            .cloned()
            .or_else(|| data.get("books").and_then(|v| v.as_array()).cloned())
            .unwrap_or_default();

        let mut out: Vec<Book> = Vec::with_capacity(list.len());
        for item in list {
            let get_s = |k: &str| item.get(k).and_then(|v| v.as_str()).map(|s| s.to_string());

            let Some(idbook) = item.get("idbook").and_then(|v| v.as_i64()) else {
                continue;
            };

            let price = match item.get("price") {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Number(n)) => n.to_string(),
                _ => String::new(),
            };

            out.push(Book {
                idbook,
                name: get_s("name").unwrap_or_default(),
                price,
                img_src: get_s("img_src").unwrap_or_default(),
                description: get_s("description").unwrap_or_default(),
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_client_new() {
        let client = ApiClient::new("http://localhost:8080".to_string());
        assert_eq!(client.base_url, "http://localhost:8080");
        assert!(client.token.is_none());
    }

    #[test]
    fn api_client_auth_header() {
        let mut client = ApiClient::new("http://localhost:8080".to_string());
        assert!(client.auth_header().is_none());

        client.set_token("my-jwt-token".to_string());
        assert_eq!(client.auth_header().as_deref(), Some("Bearer my-jwt-token"));

        client.clear_token();
        assert!(client.auth_header().is_none());
    }

    #[test]
    fn api_error_kind_and_message() {
        assert_eq!(ApiError::unauthorized().kind, ApiErrorKind::Unauthorized);

        let e = ApiError::http(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "boom".to_string(),
            "Adding book failed",
        );
        assert_eq!(e.kind, ApiErrorKind::Http);
        assert_eq!(e.to_string(), "Adding book failed (500 Internal Server Error): boom");
    }

    #[test]
    fn login_request_serialization() {
        let req = LoginRequest {
            email: "user@example.com".to_string(),
            password: "secret".to_string(),
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["email"], "user@example.com");
        assert_eq!(v["password"], "secret");
    }

    #[test]
    fn parse_book_list_bare_array() {
        let data = serde_json::json!([
            {
                "idbook": 1,
                "name": "Dune",
                "price": "25.00",
                "img_src": "https://example.com/dune.jpg",
                "description": "Desert planet."
            }
        ]);
        let books = ApiClient::parse_book_list_response(data);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].idbook, 1);
        assert_eq!(books[0].price, "25.00");
    }

    #[test]
    fn parse_book_list_wrapped_and_numeric_price() {
        let data = serde_json::json!({
            "books": [
                { "idbook": 2, "name": "Neuromancer", "price": 19.9, "img_src": "", "description": "" },
                { "name": "missing id is skipped", "price": "1.00" }
            ]
        });
        let books = ApiClient::parse_book_list_response(data);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].idbook, 2);
        assert_eq!(books[0].price, "19.9");
    }

    #[test]
    fn parse_book_list_rejects_non_list_payloads() {
        assert!(ApiClient::parse_book_list_response(serde_json::json!({})).is_empty());
        assert!(ApiClient::parse_book_list_response(serde_json::json!("nope")).is_empty());
    }
}
