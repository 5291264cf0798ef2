//! Admin console endpoints.

use serde_json::Value;

use nexus_core::{Envelope, Result};

use super::PageQuery;
use super::roles::RoleRequest;
use crate::client::ApiClient;

pub const PUBLIC_ROLES: &str = "/admin/roles/public";
pub const USERS: &str = "/admin/users";

pub async fn public_roles(client: &ApiClient, query: &PageQuery) -> Result<Envelope<Value>> {
    client.get_with(PUBLIC_ROLES, query).await
}

pub async fn update_public_role(
    client: &ApiClient,
    id: i64,
    role: &RoleRequest,
) -> Result<Envelope<Value>> {
    client.put(&format!("{}/{}", PUBLIC_ROLES, id), role).await
}

pub async fn delete_public_role(client: &ApiClient, id: i64) -> Result<Envelope<Value>> {
    client.delete(&format!("{}/{}", PUBLIC_ROLES, id)).await
}

pub async fn users(client: &ApiClient, query: &PageQuery) -> Result<Envelope<Value>> {
    client.get_with(USERS, query).await
}
