use serde::{Deserialize, Serialize};

/* -------------------------------------------------------------------------- */
/*                                  users                                     */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UserDocument")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ward_number: Option<serde_json::Value>,
    #[serde(default)]
    pub is_verified: bool,
}

/// Wire shape of a user. Documents may carry `_id`, `id` or both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDocument {
    #[serde(rename = "_id", default)]
    document_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    name: String,
    email: String,
    role: Role,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    ward_number: Option<serde_json::Value>,
    #[serde(default)]
    is_verified: bool,
}

impl TryFrom<UserDocument> for User {
    type Error = &'static str;

    fn try_from(doc: UserDocument) -> Result<Self, Self::Error> {
        let id = doc.document_id.or(doc.id).ok_or("missing field `_id`")?;
        Ok(User {
            id,
            name: doc.name,
            email: doc.email,
            role: doc.role,
            address: doc.address,
            phone_number: doc.phone_number,
            ward_number: doc.ward_number,
            is_verified: doc.is_verified,
        })
    }
}

impl User {
    /// First letter of the display name, used by the avatar bubbles.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/* -------------------------------------------------------------------------- */
/*                                 session                                    */
/* -------------------------------------------------------------------------- */

/// Snapshot read by guards and layouts.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: true,
        }
    }
}

impl Session {
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

/* -------------------------------------------------------------------------- */
/*                          bodies exchanged with the API                     */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub phone_number: String,
    pub ward_number: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VerifyEmailRequest {
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VerifyEmailResponse {
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn user(role: Role) -> User {
        let (name, email) = match role {
            Role::User => ("John Doe", "john@example.com"),
            Role::Admin => ("Admin", "admin@example.com"),
        };
        User {
            id: format!("{}-1", role.as_str()),
            name: name.into(),
            email: email.into(),
            role,
            address: None,
            phone_number: None,
            ward_number: None,
            is_verified: true,
        }
    }

    pub fn signed_in(role: Role) -> Session {
        Session {
            user: Some(user(role)),
            is_authenticated: true,
            is_loading: false,
        }
    }

    pub fn signed_out() -> Session {
        Session {
            user: None,
            is_authenticated: false,
            is_loading: false,
        }
    }
}
