//! Client-credentials token acquisition for Azure AD daemon authentication.

use serde::Deserialize;

use crate::auth::secure::{AccessToken, SecureString};
use crate::error::AuthError;

/// Scope granting the permissions consented to the service principal.
const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Exchange client credentials for a Graph bearer token.
///
/// One exchange per process run; the token is never refreshed. A rejected
/// exchange surfaces the remote status and body unmodified.
pub async fn acquire_token(
    http_client: &reqwest::Client,
    authority: &str,
    tenant_id: &str,
    client_id: &str,
    client_secret: &SecureString,
) -> Result<AccessToken, AuthError> {
    let token_endpoint = format!("{}/{}/oauth2/v2.0/token", authority, tenant_id);

    let params = [
        ("client_id", client_id),
        ("scope", GRAPH_DEFAULT_SCOPE),
        ("client_secret", client_secret.as_str()),
        ("grant_type", "client_credentials"),
    ];

    let response = http_client
        .post(&token_endpoint)
        .form(&params)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Token request failed: HTTP {} - {}", status, body);
        return Err(AuthError::TokenRequestFailed { status, body });
    }

    let token_response: TokenResponse = response
        .json()
        .await
        .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

    tracing::debug!(
        "Acquired Graph token (expires in {}s)",
        token_response.expires_in
    );

    Ok(AccessToken::new(token_response.access_token))
}

/// Token response from Azure AD.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}
