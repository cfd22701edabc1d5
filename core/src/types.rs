//! Domain DTOs for the employee API.
//!
//! # Design
//! Reads and writes use different shapes. `Employee` is what the service
//! returns and never carries a password. `EmployeeRecord` is the body sent on
//! create and update and always carries one: either the real password or the
//! `MASKED_PASSWORD` placeholder that the service reads as "unchanged".
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-assigned employee identifier.
pub type EmployeeId = i64;

/// Placeholder sent in place of a password the user did not change.
pub const MASKED_PASSWORD: &str = "********";

/// Role tags accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    JavaDev,
    SeniorDev,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::User, Role::JavaDev, Role::SeniorDev, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::JavaDev => "JAVA_DEV",
            Role::SeniorDev => "SENIOR_DEV",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();
        write!(f, "unknown role '{}' (expected one of {})", self.0, tags.join(", "))
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// An employee as returned by the service. A `password` field in the
/// response, if any, is dropped on decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

/// Request body for create and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

/// Input for creating an employee. The password is required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

impl From<NewEmployee> for EmployeeRecord {
    fn from(input: NewEmployee) -> Self {
        EmployeeRecord {
            id: None,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            role: input.role,
            password: input.password,
        }
    }
}

/// Input for editing an employee. `password: None` keeps the stored password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeChanges {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub password: Option<String>,
}

impl EmployeeChanges {
    /// Changes that rewrite every field of `employee` with its current value.
    pub fn from_employee(employee: &Employee) -> Self {
        EmployeeChanges {
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            role: employee.role,
            password: None,
        }
    }

    /// The full replacement body for `id`.
    pub fn into_record(self, id: EmployeeId) -> EmployeeRecord {
        EmployeeRecord {
            id: Some(id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            role: self.role,
            password: self
                .password
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| MASKED_PASSWORD.to_string()),
        }
    }
}
