//! Domain models for the directory objects this tool manages.

/// The resolved identity of the target enterprise application.
///
/// Resolved once per run by display-name prefix match.
#[derive(Debug, Clone)]
pub struct ApplicationIdentity {
    /// Application (client) id of the registration.
    pub app_id: String,

    /// Id of the app role being managed. The first role defined on the
    /// matched application; applications with several roles are not
    /// disambiguated beyond that.
    pub role_id: String,

    /// Directory object id of the service principal. All assignment
    /// endpoints are addressed through this id.
    pub object_id: String,
}

/// One existing grant of the application's role to a principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Stable principal identifier, the key used for diffing.
    pub principal_id: String,

    /// Server-assigned id, required to delete the assignment.
    pub assignment_id: String,

    /// Principal display name, lowercased on read. Informational only.
    pub principal_display_name: String,
}
