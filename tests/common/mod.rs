#![allow(dead_code)]

use std::collections::HashMap;

use qencode::{Client, ClientBuilder};
use wiremock::{Match, MockServer, Request};

pub const GET_TOKEN_RESPONSE: &str = r#"
    {
        "token": "1357924680",
        "expire": "2021-09-19T01:35:57"
    }"#;

pub const CREATE_TASK_RESPONSE: &str = r#"
    {
        "error": 0,
        "upload_url": "https://storage.qencode.com/v1/upload_file",
        "task_token": "471272a512d76c22665db9dcee893409"
    }"#;

pub const START_TASK_RESPONSE: &str = r#"
    {
        "error": 0,
        "status_url": "https://api.qencode.com/v1/status"
    }"#;

/// Client pointed at the mock server.
pub fn client_for(server: &MockServer) -> Client {
    ClientBuilder::new()
        .base_url(server.uri())
        .build()
        .expect("client should build")
}

/// Client whose requests can never reach a server.
pub fn unreachable_client() -> Client {
    ClientBuilder::new()
        .base_url("http://127.0.0.1:1")
        .build()
        .expect("client should build")
}

/// Client whose base URL cannot form a valid request URL.
pub fn invalid_url_client() -> Client {
    ClientBuilder::new()
        .base_url("::::")
        .build()
        .expect("client should build")
}

pub fn form_fields(request: &Request) -> HashMap<String, String> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}

/// Matches requests whose form body has `name` set to exactly `value`.
pub struct FormField {
    name: String,
    value: String,
}

pub fn form_field(name: impl Into<String>, value: impl Into<String>) -> FormField {
    FormField {
        name: name.into(),
        value: value.into(),
    }
}

impl Match for FormField {
    fn matches(&self, request: &Request) -> bool {
        form_fields(request).get(&self.name) == Some(&self.value)
    }
}
