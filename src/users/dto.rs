use serde::{Deserialize, Serialize};

/// Public projection of a user record. This is what goes out on the wire
/// and what gets embedded in token claims; the password hash never
/// appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub code: u16,
    pub msg: &'static str,
    pub users: Vec<PublicUser>,
}
