use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full user row as provisioned by the account service.
/// The password hash never leaves the process.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub preferred_position: Option<String>,
    pub speed: i32,
    pub finishing: i32,
    pub passing: i32,
    pub technique: i32,
    pub tackling: i32,
    pub strength: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The profile shape joined onto slots and roster rows: everything except
/// the password hash, plus the derived overall rating.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PublicUserProfile {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub preferred_position: Option<String>,
    pub speed: i32,
    pub finishing: i32,
    pub passing: i32,
    pub technique: i32,
    pub tackling: i32,
    pub strength: i32,
    pub overall: i32,
}

impl PublicUserProfile {
    /// Overall rating: rounded mean of the six 0-100 skill attributes.
    pub fn overall_rating(
        speed: i32,
        finishing: i32,
        passing: i32,
        technique: i32,
        tackling: i32,
        strength: i32,
    ) -> i32 {
        let sum = speed + finishing + passing + technique + tackling + strength;
        (sum as f64 / 6.0).round() as i32
    }
}
