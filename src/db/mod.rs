//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ACTIVITIES: &str = "activities";
    /// One document per calendar day, keyed by ISO date string
    pub const GRID_INTENSITY: &str = "grid_intensity";
}
