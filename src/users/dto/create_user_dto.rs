use serde::{Deserialize, Serialize};

use super::permission_dto::PermissionDto;
use super::role_dto::RoleDto;

/// Body sent on both create and update. The user id is never part of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub user_name: String,
  pub password: String,
  pub role: RoleDto,
  pub permissions: Vec<PermissionDto>,
}
