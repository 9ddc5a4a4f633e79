use serde::{Deserialize, Serialize};

/// An account as returned by the authenticated user endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}
