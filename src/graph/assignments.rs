//! Read and mutate the application's role-assignment collection.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RemoteError;
use crate::graph::models::Assignment;
use crate::graph::session::GraphSession;

/// Fetch the complete current assignment list, following pagination.
///
/// Every page is accumulated before returning, regardless of collection
/// size. A failed page aborts the whole read with no partial result.
pub async fn list_assignments(session: &GraphSession) -> Result<Vec<Assignment>, RemoteError> {
    let mut assignments = Vec::new();
    let mut next_url = Some(assigned_to_url(session));

    while let Some(url) = next_url {
        debug!("Fetching assignment page: {}", url);

        let response = session
            .http_client()
            .get(&url)
            .bearer_auth(session.bearer_token())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Assignment listing failed: HTTP {} - {}", status, body);
            return Err(RemoteError::RequestFailed { status, body });
        }

        let page: AssignmentPage = response
            .json()
            .await
            .map_err(|e| RemoteError::MalformedResponse(e.to_string()))?;

        assignments.extend(page.value.into_iter().map(into_assignment));
        next_url = page.next_link;
    }

    info!("Fetched {} current assignments", assignments.len());
    Ok(assignments)
}

/// Grant the application's role to `principal_id`.
///
/// A duplicate grant is rejected by the service with a conflict status and
/// surfaces as an error like any other; callers must only pass principals
/// that are not already assigned.
pub async fn add_assignment(
    session: &GraphSession,
    principal_id: &str,
) -> Result<(), RemoteError> {
    let app = session.app();
    let post_data = NewAssignment {
        principal_id,
        resource_id: &app.object_id,
        app_role_id: &app.role_id,
    };

    info!("add_assignment: principalId={}", principal_id);

    let response = session
        .http_client()
        .post(assigned_to_url(session))
        .bearer_auth(session.bearer_token())
        .json(&post_data)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::error!("add_assignment failed: HTTP {} - {}", status, body);
        return Err(RemoteError::RequestFailed { status, body });
    }

    Ok(())
}

/// Delete the assignment identified by its server-assigned id.
///
/// Deleting an already-removed assignment is an error, not a no-op.
pub async fn remove_assignment(
    session: &GraphSession,
    assignment_id: &str,
) -> Result<(), RemoteError> {
    info!("remove_assignment: assignmentId={}", assignment_id);

    let url = format!("{}/{}", assigned_to_url(session), assignment_id);

    let response = session
        .http_client()
        .delete(&url)
        .bearer_auth(session.bearer_token())
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::error!("remove_assignment failed: HTTP {} - {}", status, body);
        return Err(RemoteError::RequestFailed { status, body });
    }

    Ok(())
}

fn assigned_to_url(session: &GraphSession) -> String {
    format!(
        "{}/servicePrincipals/{}/appRoleAssignedTo",
        session.base_url(),
        session.app().object_id
    )
}

fn into_assignment(entry: AssignmentEntry) -> Assignment {
    Assignment {
        principal_id: entry.principal_id,
        assignment_id: entry.id,
        principal_display_name: entry
            .principal_display_name
            .unwrap_or_default()
            .to_lowercase(),
    }
}

// --- API Types ---

/// One page of the appRoleAssignedTo collection.
#[derive(Debug, Deserialize)]
struct AssignmentPage {
    value: Vec<AssignmentEntry>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssignmentEntry {
    id: String,
    #[serde(rename = "principalId")]
    principal_id: String,
    #[serde(rename = "principalDisplayName")]
    principal_display_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct NewAssignment<'a> {
    #[serde(rename = "principalId")]
    principal_id: &'a str,
    #[serde(rename = "resourceId")]
    resource_id: &'a str,
    #[serde(rename = "appRoleId")]
    app_role_id: &'a str,
}
