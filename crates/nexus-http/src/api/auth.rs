//! Authentication endpoints.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use nexus_core::{AuthData, Credentials, Envelope, RefreshToken, Registration, Result};

use crate::client::{ApiClient, OnUnauthorized};

pub const REGISTER: &str = "/auth/register";
pub const LOGIN: &str = "/auth/login";
pub const LOGOUT: &str = "/auth/logout";
pub const REFRESH: &str = "/auth/refresh";
pub const ME: &str = "/auth/me";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    remember_me: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

pub async fn register(
    client: &ApiClient,
    registration: &Registration,
) -> Result<Envelope<AuthData>> {
    client.post(REGISTER, registration).await
}

/// The login identifier is sent as `username`.
pub async fn login(client: &ApiClient, credentials: &Credentials) -> Result<Envelope<AuthData>> {
    let request = LoginRequest {
        username: credentials.identifier(),
        password: credentials.password(),
        remember_me: credentials.is_remember_me(),
    };
    client.post(LOGIN, &request).await
}

/// A 401 here is returned as-is; the caller is already logging out.
pub async fn logout(client: &ApiClient) -> Result<Envelope<Value>> {
    client
        .send(Method::POST, LOGOUT, OnUnauthorized::PassThrough, |r| r)
        .await
}

pub async fn refresh(client: &ApiClient, token: &RefreshToken) -> Result<Envelope<AuthData>> {
    let request = RefreshRequest {
        refresh_token: token.as_str(),
    };
    client.post(REFRESH, &request).await
}

pub async fn me(client: &ApiClient) -> Result<Envelope<Value>> {
    client.get(ME).await
}
