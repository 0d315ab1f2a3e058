//! Authenticated Graph session and application resolution.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::auth::credentials::acquire_token;
use crate::auth::secure::AccessToken;
use crate::config::Settings;
use crate::error::{AppError, NotFoundError, RemoteError};
use crate::graph::models::ApplicationIdentity;

/// HTTP request timeout.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// HTTP connection timeout.
const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Authenticated connection context for directory-API calls.
///
/// Owns the HTTP client, the bearer token and the resolved application
/// identity. Constructed once per run; all reader and writer calls go
/// through it.
#[derive(Debug)]
pub struct GraphSession {
    http_client: reqwest::Client,
    token: AccessToken,
    base_url: String,
    app: ApplicationIdentity,
}

impl GraphSession {
    /// Authenticate and resolve the target application.
    pub async fn connect(settings: &Settings) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .build()
            .map_err(RemoteError::Network)?;

        let token = acquire_token(
            &http_client,
            &settings.authority_url,
            &settings.tenant_id,
            &settings.client_id,
            &settings.client_secret,
        )
        .await?;

        let app = resolve_application(
            &http_client,
            &settings.graph_base_url,
            &token,
            &settings.app_name,
        )
        .await?;

        info!(
            "Resolved enterprise application: appId={} objectId={} roleId={}",
            app.app_id, app.object_id, app.role_id
        );

        Ok(Self {
            http_client,
            token,
            base_url: settings.graph_base_url.clone(),
            app,
        })
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub fn bearer_token(&self) -> &str {
        self.token.as_str()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn app(&self) -> &ApplicationIdentity {
        &self.app
    }
}

/// Resolve the application by case-sensitive display-name prefix.
///
/// Requests a single result; when several applications share the prefix,
/// the first one returned by the service wins. The managed role is the
/// first entry of the application's role list.
async fn resolve_application(
    http_client: &reqwest::Client,
    base_url: &str,
    token: &AccessToken,
    display_name_prefix: &str,
) -> Result<ApplicationIdentity, AppError> {
    let url = format!(
        "{}/servicePrincipals?$filter=startswith(displayName,'{}')&$count=true&$top=1",
        base_url,
        urlencoding::encode(display_name_prefix)
    );

    debug!("Resolving service principal via {}", url);

    let response = http_client
        .get(&url)
        .bearer_auth(token.as_str())
        .send()
        .await
        .map_err(RemoteError::Network)?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            "Service principal lookup failed: HTTP {} - {}",
            status,
            body
        );
        return Err(RemoteError::RequestFailed { status, body }.into());
    }

    let list: ServicePrincipalList = response
        .json()
        .await
        .map_err(|e| RemoteError::MalformedResponse(e.to_string()))?;

    let sp = list
        .value
        .into_iter()
        .next()
        .ok_or_else(|| NotFoundError(display_name_prefix.to_string()))?;

    let role = sp.app_roles.into_iter().next().ok_or_else(|| {
        RemoteError::MalformedResponse(format!(
            "service principal {} defines no app roles",
            sp.id
        ))
    })?;

    Ok(ApplicationIdentity {
        app_id: sp.app_id,
        role_id: role.id,
        object_id: sp.id,
    })
}

// --- API Response Types ---

#[derive(Debug, Deserialize)]
struct ServicePrincipalList {
    value: Vec<ServicePrincipalItem>,
}

#[derive(Debug, Deserialize)]
struct ServicePrincipalItem {
    #[serde(rename = "appId")]
    app_id: String,
    id: String,
    #[serde(rename = "appRoles", default)]
    app_roles: Vec<AppRoleItem>,
}

#[derive(Debug, Deserialize)]
struct AppRoleItem {
    id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_principal_deserialization() {
        let json = serde_json::json!({
            "value": [{
                "appId": "11111111-0000-0000-0000-000000000000",
                "id": "22222222-0000-0000-0000-000000000000",
                "displayName": "team-app",
                "appRoles": [
                    { "id": "33333333-0000-0000-0000-000000000000", "displayName": "User" },
                    { "id": "44444444-0000-0000-0000-000000000000", "displayName": "Admin" }
                ]
            }]
        });

        let list: ServicePrincipalList = serde_json::from_value(json).unwrap();
        assert_eq!(list.value.len(), 1);

        let sp = &list.value[0];
        assert_eq!(sp.app_id, "11111111-0000-0000-0000-000000000000");
        // First role wins
        assert_eq!(
            sp.app_roles[0].id,
            "33333333-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_service_principal_without_roles() {
        let json = serde_json::json!({
            "value": [{ "appId": "a", "id": "b" }]
        });

        let list: ServicePrincipalList = serde_json::from_value(json).unwrap();
        assert!(list.value[0].app_roles.is_empty());
    }
}
