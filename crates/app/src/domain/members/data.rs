//! Member Data

/// Profile fields a member may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: String,
    pub email: String,
    pub phone: Option<String>,
}
