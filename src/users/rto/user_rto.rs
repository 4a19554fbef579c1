use serde::{Deserialize, Serialize};

use crate::users::dto::permission_dto::PermissionDto;
use crate::users::dto::role_dto::RoleDto;

/// A user as stored and returned by the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRto {
  pub user_id: String,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub user_name: String,
  #[serde(default)]
  pub password: String,
  #[serde(default)]
  pub role: Option<RoleDto>,
  #[serde(default)]
  pub permissions: Vec<PermissionDto>,
}
