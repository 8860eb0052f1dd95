//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
///
/// Profiles are created by the identity provider when an account is
/// provisioned; this service only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Stable user ID (also used as document ID)
    pub user_id: String,
    /// Email address
    pub email: String,
    /// Name shown in the UI and the export header
    pub display_name: String,
    /// When the account was created (ISO 8601)
    pub created_at: String,
}
