//! The diff-and-apply core.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use tracing::debug;

use crate::error::AppError;
use crate::graph::assignments::{add_assignment, list_assignments, remove_assignment};
use crate::graph::models::Assignment;
use crate::graph::session::GraphSession;
use crate::sync::report::SyncReport;

/// The add/remove operations needed to reach the desired state.
#[derive(Debug)]
pub struct SyncPlan {
    /// Principal ids to grant the role to.
    pub additions: Vec<String>,

    /// Existing assignments to delete.
    pub removals: Vec<Assignment>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }
}

/// Compute the diff between current and desired membership.
///
/// The diff key is the principal id, never the display name, so principal
/// renames do not produce churn. Iteration order of the inputs is
/// irrelevant; each id appears in the plan at most once.
pub fn plan(current: &HashMap<String, Assignment>, desired: &HashSet<String>) -> SyncPlan {
    let additions = desired
        .iter()
        .filter(|id| !current.contains_key(*id))
        .cloned()
        .collect();

    let removals = current
        .iter()
        .filter(|(principal_id, _)| !desired.contains(*principal_id))
        .map(|(_, assignment)| assignment.clone())
        .collect();

    SyncPlan {
        additions,
        removals,
    }
}

/// Fetch the current assignments and apply the diff against `desired`.
///
/// Additions are applied before removals, one blocking call at a time.
/// The first failing call aborts the run; mutations applied up to that
/// point stay in place.
pub async fn reconcile(
    session: &GraphSession,
    desired: &HashSet<String>,
) -> Result<SyncReport, AppError> {
    let started_at = Utc::now();

    // Index by principal id, last write wins on duplicates.
    let current: HashMap<String, Assignment> = list_assignments(session)
        .await?
        .into_iter()
        .map(|a| (a.principal_id.clone(), a))
        .collect();

    let sync_plan = plan(&current, desired);

    if sync_plan.is_empty() {
        debug!("Current assignments already match the desired set");
    }

    let mut report = SyncReport::new(started_at);
    report.unchanged = current.len() - sync_plan.removals.len();

    for principal_id in &sync_plan.additions {
        add_assignment(session, principal_id).await?;
        report.record_added();
    }

    for assignment in &sync_plan.removals {
        remove_assignment(session, &assignment.assignment_id).await?;
        report.record_removed();
    }

    Ok(report.complete())
}
