//! Authentication response value objects.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::{Account, Role};

/// Public projection of an account, safe to return to callers. Never carries
/// the password hash or history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: i32,
}

impl From<&Account> for PublicUser {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
            avatar: account.avatar,
        }
    }
}

/// Outcome of a login attempt that passed credential verification.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// First factor accepted; a one-time code was mailed and must be
    /// presented before a session token is issued.
    OtpRequired,

    /// Both factors accepted; a session token was minted.
    Authenticated { token: String, user: PublicUser },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_omits_secrets() {
        let account = Account::new(
            "Ann".to_string(),
            "ann@x.com".to_string(),
            "$2b$10$secret-hash".to_string(),
        );
        let user = PublicUser::from(&account);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hash"));
        assert!(json.contains("ann@x.com"));
        assert_eq!(user.role, Role::User);
    }
}
