//! Partial profile update value object.

use serde::{Deserialize, Serialize};

/// Explicit partial update enumerating exactly the fields a caller may
/// change. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Avatar selection, validated against the closed set 1..=6.
    pub avatar: Option<i32>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.avatar.is_none()
    }
}
