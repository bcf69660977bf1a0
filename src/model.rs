//! Typed shapes for the user-management API's request and response bodies.
//!
//! Decoding a response into one of these via [`crate::ApiResponse::json`]
//! doubles as the schema check: missing required fields or wrong types fail
//! the decode.

use serde::{Deserialize, Serialize};

/// A user record as returned by `GET /api/users`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

/// Support blurb attached to list and single-resource responses.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Support {
    pub url: String,
    pub text: String,
}

/// One page of the user collection.
#[derive(Clone, Debug, Deserialize)]
pub struct UserPage {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
    pub data: Vec<User>,
    #[serde(default)]
    pub support: Option<Support>,
}

/// Envelope around a single user.
#[derive(Clone, Debug, Deserialize)]
pub struct SingleUser {
    pub data: User,
    #[serde(default)]
    pub support: Option<Support>,
}

/// An entry of the secondary resource collection (`/api/unknown`).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Resource {
    pub id: u64,
    pub name: String,
    pub year: u64,
    pub color: String,
    pub pantone_value: String,
}

/// One page of the secondary resource collection.
#[derive(Clone, Debug, Deserialize)]
pub struct ResourcePage {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
    pub data: Vec<Resource>,
    #[serde(default)]
    pub support: Option<Support>,
}

/// Payload for creating or updating a user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub job: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: job.into(),
        }
    }
}

/// Response to a successful `POST /api/users`.
#[derive(Clone, Debug, Deserialize)]
pub struct CreatedUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Response to a successful `PUT`/`PATCH /api/users/{id}`.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdatedUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Login or registration payload. The password is omitted from the wire
/// format when absent, which is how the negative-path tests provoke a 400.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Some(password.into()),
        }
    }

    /// Credentials deliberately missing the password.
    pub fn email_only(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: None,
        }
    }
}

/// Successful login response.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthToken {
    pub token: String,
}

/// Successful registration response.
#[derive(Clone, Debug, Deserialize)]
pub struct Registration {
    pub id: u64,
    pub token: String,
}

/// Error body returned by the API on 4xx responses.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
