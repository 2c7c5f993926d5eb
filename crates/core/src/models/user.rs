//! Auth session models and locally saved logins

use serde::{Deserialize, Serialize};

/// Session returned by the auth token endpoints (password and
/// refresh-token grants)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub refresh_token: String,
    pub user: AuthUser,
}

/// The authenticated user identity gating all store operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: String,
}

/// Response of a sign-up call. Depending on project settings the
/// session may be absent until the email is confirmed.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

impl SignUpResponse {
    /// Convert to a usable session when the project signs users in
    /// immediately on registration.
    pub fn into_session(self) -> Option<AuthSession> {
        match (self.access_token, self.refresh_token, self.user) {
            (Some(access_token), Some(refresh_token), Some(user)) => Some(AuthSession {
                access_token,
                token_type: "bearer".to_string(),
                expires_in: None,
                refresh_token,
                user,
            }),
            _ => None,
        }
    }
}

/// Locally stored login (encrypted refresh token stored separately)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub user_id: Option<String>,
    pub last_verified: Option<chrono::DateTime<chrono::Utc>>,
    pub is_active: bool,
}

/// Summary of a saved login for display (no sensitive data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: i64,
    pub email: String,
    pub last_verified: Option<String>,
}

impl From<Profile> for ProfileSummary {
    fn from(p: Profile) -> Self {
        ProfileSummary {
            id: p.id,
            email: p.email,
            last_verified: p.last_verified.map(|dt| dt.to_rfc3339()),
        }
    }
}
