use serde::{Deserialize, Serialize};

/// Modules a permission entry can be granted on, in display order.
pub const PERMISSION_MODULES: [&str; 3] = ["Super Admin", "Admin", "Employee"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDto {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub permission_id: Option<String>,
  pub permission_name: String,
  #[serde(default)]
  pub is_readable: bool,
  #[serde(default)]
  pub is_writable: bool,
  #[serde(default)]
  pub is_deletable: bool,
}

impl PermissionDto {
  pub fn unset(permission_name: &str) -> Self {
    Self {
      permission_id: None,
      permission_name: permission_name.to_string(),
      is_readable: false,
      is_writable: false,
      is_deletable: false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_flags_default_to_false() {
    let json = r#"{ "permissionId": "p-1", "permissionName": "Admin", "isReadable": true }"#;

    let dto: PermissionDto =
      serde_json::from_str(json).expect("Failed to deserialize");
    assert_eq!(dto.permission_id.as_deref(), Some("p-1"));
    assert!(dto.is_readable);
    assert!(!dto.is_writable);
    assert!(!dto.is_deletable);
  }

  #[test]
  fn test_unset_omits_permission_id() {
    let value = serde_json::to_value(PermissionDto::unset("Employee"))
      .expect("Failed to serialize");

    assert_eq!(
      value,
      serde_json::json!({
        "permissionName": "Employee",
        "isReadable": false,
        "isWritable": false,
        "isDeletable": false
      })
    );
  }
}
