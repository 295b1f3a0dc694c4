#![allow(dead_code)]

use actix_web::{http::header, test, web};
use babaji_signal_server::{AppState, Settings};
use serde_json::Value;

pub fn state() -> web::Data<AppState> {
    let config = Settings::new_for_test().expect("Failed to load test config");
    web::Data::new(AppState::new(config))
}

pub fn signup_request(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(&format!("/signup?username={}&password={}", username, password))
}

pub fn token_request(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/token")
        .set_form([("username", username), ("password", password)])
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub fn access_token(body: &Value) -> String {
    body["access_token"]
        .as_str()
        .expect("response should carry an access_token")
        .to_string()
}
