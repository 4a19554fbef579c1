use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleDto {
  #[serde(rename = "roleId")]
  pub role_id: String,
  #[serde(rename = "roleName")]
  pub role_name: String,
}
