use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;
use validator::{ValidationError, ValidationErrors};
use validator_derive::Validate;

use crate::shared::role::Role;
use crate::users::dto::create_user_dto::CreateUserDto;
use crate::users::dto::permission_dto::{PermissionDto, PERMISSION_MODULES};
use crate::users::rto::user_rto::UserRto;

const PASSWORDS_MISMATCH: &str = "passwords_mismatch";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
  FirstName,
  LastName,
  Email,
  Phone,
  UserName,
  Password,
  ConfirmPassword,
  Role,
  Permissions,
}

impl Field {
  pub const ALL: [Field; 9] = [
    Field::FirstName,
    Field::LastName,
    Field::Email,
    Field::Phone,
    Field::UserName,
    Field::Password,
    Field::ConfirmPassword,
    Field::Role,
    Field::Permissions,
  ];

  /// Key used for the field in validation reports.
  pub fn key(&self) -> &'static str {
    match self {
      Field::FirstName => "first_name",
      Field::LastName => "last_name",
      Field::Email => "email",
      Field::Phone => "phone",
      Field::UserName => "user_name",
      Field::Password => "password",
      Field::ConfirmPassword => "confirm_password",
      Field::Role => "role",
      Field::Permissions => "permissions",
    }
  }

  fn from_key(key: &str) -> Option<Field> {
    Field::ALL.into_iter().find(|field| field.key() == key)
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.key())
  }
}

/// Why a form was rejected. A password mismatch is reported separately from
/// missing fields; both can be present at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("Invalid form (missing: {missing:?}, passwords mismatch: {passwords_mismatch})")]
pub struct FormErrors {
  pub missing: BTreeSet<Field>,
  pub passwords_mismatch: bool,
}

impl FormErrors {
  pub fn missing(field: Field) -> Self {
    Self {
      missing: BTreeSet::from([field]),
      passwords_mismatch: false,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.missing.is_empty() && !self.passwords_mismatch
  }

  pub fn is_missing(&self, field: Field) -> bool {
    self.missing.contains(&field)
  }
}

impl From<ValidationErrors> for FormErrors {
  fn from(errors: ValidationErrors) -> Self {
    let mut form_errors = FormErrors::default();
    for (key, field_errors) in errors.field_errors() {
      if field_errors
        .iter()
        .any(|error| error.code == PASSWORDS_MISMATCH)
      {
        form_errors.passwords_mismatch = true;
      } else if let Some(field) = Field::from_key(&key.to_string()) {
        form_errors.missing.insert(field);
      }
    }
    form_errors
  }
}

/// Working state of the user being created or edited.
///
/// Empty strings stand for "no value". The permission list always holds one
/// entry per module of `PERMISSION_MODULES`, in that order.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_passwords_match", skip_on_field_errors = false))]
pub struct UserForm {
  #[validate(length(min = 1, code = "required"))]
  pub first_name: String,
  #[validate(length(min = 1, code = "required"))]
  pub last_name: String,
  #[validate(length(min = 1, code = "required"))]
  pub email: String,
  #[validate(length(min = 1, code = "required"))]
  pub phone: String,
  #[validate(length(min = 1, code = "required"))]
  pub user_name: String,
  pub password: String,
  pub confirm_password: String,
  #[validate(required)]
  pub role: Option<Role>,
  pub permissions: Vec<PermissionDto>,
  password_required: bool,
  touched: BTreeSet<Field>,
}

fn validate_passwords_match(form: &UserForm) -> Result<(), ValidationError> {
  if form.password != form.confirm_password {
    return Err(ValidationError::new(PASSWORDS_MISMATCH));
  }
  Ok(())
}

impl Default for UserForm {
  fn default() -> Self {
    let mut form = Self {
      first_name: String::new(),
      last_name: String::new(),
      email: String::new(),
      phone: String::new(),
      user_name: String::new(),
      password: String::new(),
      confirm_password: String::new(),
      role: None,
      permissions: Vec::new(),
      password_required: true,
      touched: BTreeSet::new(),
    };
    form.init_permissions(&[]);
    form
  }
}

impl UserForm {
  /// Clears every value and touched flag. The password rule is left as is.
  pub fn reset(&mut self) {
    *self = Self {
      password_required: self.password_required,
      ..Self::default()
    };
  }

  /// Rebuilds the permission list from the fixed modules, taking flags from
  /// the matching entry of `permissions` when there is one.
  pub fn init_permissions(&mut self, permissions: &[PermissionDto]) {
    self.permissions = PERMISSION_MODULES
      .iter()
      .map(|module| {
        let matched = permissions
          .iter()
          .find(|permission| permission.permission_name == *module);
        PermissionDto {
          permission_id: None,
          permission_name: module.to_string(),
          is_readable: matched.is_some_and(|p| p.is_readable),
          is_writable: matched.is_some_and(|p| p.is_writable),
          is_deletable: matched.is_some_and(|p| p.is_deletable),
        }
      })
      .collect();
  }

  /// Copies an existing user into the form. Credentials are never copied.
  pub fn patch_from(&mut self, user: &UserRto) {
    self.first_name = user.first_name.clone();
    self.last_name = user.last_name.clone();
    self.email = user.email.clone();
    self.phone = user.phone.clone();
    self.user_name = user.user_name.clone();
    self.password.clear();
    self.confirm_password.clear();
    self.role = user
      .role
      .as_ref()
      .and_then(|role| Role::from_id(&role.role_id));
    self.init_permissions(&user.permissions);
  }

  pub fn permission_mut(&mut self, module: &str) -> Option<&mut PermissionDto> {
    self
      .permissions
      .iter_mut()
      .find(|permission| permission.permission_name == module)
  }

  pub fn set_password_required(&mut self, required: bool) {
    self.password_required = required;
  }

  pub fn password_required(&self) -> bool {
    self.password_required
  }

  pub fn touch(&mut self, field: Field) {
    self.touched.insert(field);
  }

  pub fn mark_all_as_touched(&mut self) {
    self.touched.extend(Field::ALL);
  }

  pub fn is_touched(&self, field: Field) -> bool {
    self.touched.contains(&field)
  }

  pub fn check(&self) -> Result<(), FormErrors> {
    let mut errors = validator::Validate::validate(self)
      .err()
      .map(FormErrors::from)
      .unwrap_or_default();

    if self.password_required {
      if self.password.is_empty() {
        errors.missing.insert(Field::Password);
      }
      if self.confirm_password.is_empty() {
        errors.missing.insert(Field::ConfirmPassword);
      }
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(errors)
    }
  }
}

impl TryFrom<&UserForm> for CreateUserDto {
  type Error = FormErrors;

  fn try_from(form: &UserForm) -> Result<Self, Self::Error> {
    let Some(role) = form.role else {
      return Err(FormErrors::missing(Field::Role));
    };
    Ok(Self {
      first_name: form.first_name.clone(),
      last_name: form.last_name.clone(),
      email: form.email.clone(),
      phone: form.phone.clone(),
      user_name: form.user_name.clone(),
      password: form.password.clone(),
      role: role.into(),
      permissions: form.permissions.clone(),
    })
  }
}
