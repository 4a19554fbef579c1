use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::users::dto::role_dto::RoleDto;

/// Roles an administrator can assign. The set is fixed on the client and is
/// never fetched from the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
  SuperAdmin,
  Admin,
  Employee,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

pub const ROLES: [Role; 3] = [Role::SuperAdmin, Role::Admin, Role::Employee];

impl Role {
  pub fn id(&self) -> &'static str {
    match self {
      Role::SuperAdmin => "AB6BCC2B-02A5-474D-8901-131485ED7DF8",
      Role::Admin => "A70AE654-FB49-4370-9646-AB88FED4B501",
      Role::Employee => "5D7A6B8B-B3CB-4F32-A039-39332FCF245F",
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Role::SuperAdmin => "Super Admin",
      Role::Admin => "Admin",
      Role::Employee => "Employee",
    }
  }

  /// Ids coming back from the directory are not guaranteed to keep their case.
  pub fn from_id(role_id: &str) -> Option<Role> {
    ROLES
      .into_iter()
      .find(|role| role.id().eq_ignore_ascii_case(role_id))
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Role {
  type Err = UnknownRole;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    let normalized = value
      .chars()
      .filter(|c| c.is_ascii_alphanumeric())
      .collect::<String>()
      .to_ascii_lowercase();
    match normalized.as_str() {
      "superadmin" => Ok(Role::SuperAdmin),
      "admin" => Ok(Role::Admin),
      "employee" => Ok(Role::Employee),
      _ => Role::from_id(value).ok_or_else(|| UnknownRole(value.to_string())),
    }
  }
}

impl From<Role> for RoleDto {
  fn from(role: Role) -> Self {
    Self {
      role_id: role.id().to_string(),
      role_name: role.name().to_string(),
    }
  }
}
