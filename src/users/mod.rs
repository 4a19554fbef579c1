pub mod dto;
pub mod form;
pub mod rto;
pub mod service;

use dto::create_user_dto::CreateUserDto;
use form::user_form::{FormErrors, UserForm};
use log::{debug, error, warn};
use rto::user_rto::UserRto;
use service::user_service::{UserService, UserServiceError};
use thiserror::Error;

use crate::shared::alert::Alert;
use crate::shared::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
  Create,
  Edit,
}

#[derive(Debug, Error)]
pub enum SubmitError {
  #[error(transparent)]
  Invalid(#[from] FormErrors),

  #[error("Error creating user: {0}")]
  Create(#[source] UserServiceError),

  #[error("Error updating user: {0}")]
  Update(#[source] UserServiceError),
}

/// Drives the user list and the create/edit form.
///
/// The list is a cache of the directory: it is refetched after every create
/// or update and only patched locally on delete. One operation runs at a time
/// since every mutation takes `&mut self`.
pub struct UserManagementController<US: UserService> {
  user_service: US,
  users: Vec<UserRto>,
  selected_user: Option<UserRto>,
  mode: FormMode,
  form: UserForm,
  alert: Alert,
}

impl<US: UserService> UserManagementController<US> {
  pub fn new(user_service: US, config: &Config) -> Self {
    Self {
      user_service,
      users: Vec::new(),
      selected_user: None,
      mode: FormMode::Create,
      form: UserForm::default(),
      alert: Alert::new(config.alert_duration()),
    }
  }

  pub async fn initialize(&mut self) -> Result<(), UserServiceError> {
    self.selected_user = None;
    self.form.init_permissions(&[]);
    self.load_users().await
  }

  /// Replaces the local list with the directory's. On failure the previous
  /// list is kept.
  pub async fn load_users(&mut self) -> Result<(), UserServiceError> {
    match self.user_service.get_all_users().await {
      Ok(users) => {
        debug!("Loaded {} users", users.len());
        self.users = users;
        Ok(())
      }
      Err(err) => {
        error!("Error loading users: {}", err);
        Err(err)
      }
    }
  }

  pub async fn find_user(&self, user_id: &str) -> Result<UserRto, UserServiceError> {
    self.user_service.get_user_by_id(user_id).await
  }

  pub fn open_create(&mut self) {
    self.mode = FormMode::Create;
    self.selected_user = None;
    self.form.reset();
    self.form.set_password_required(true);
  }

  /// Leaving the password blank still sends an empty password on submit.
  pub fn open_edit(&mut self, user: UserRto) {
    self.mode = FormMode::Edit;
    self.form.set_password_required(false);
    self.form.patch_from(&user);
    self.selected_user = Some(user);
  }

  pub fn validate(&self) -> Result<(), FormErrors> {
    self.form.check()
  }

  pub async fn submit(&mut self) -> Result<UserRto, SubmitError> {
    if let Err(errors) = self.validate() {
      self.form.mark_all_as_touched();
      self.alert.show();
      warn!("{}", errors);
      return Err(SubmitError::Invalid(errors));
    }

    let payload = CreateUserDto::try_from(&self.form)?;

    let result = match (self.mode, &self.selected_user) {
      (FormMode::Edit, Some(selected)) => self
        .user_service
        .update_user(&selected.user_id, &payload)
        .await
        .map_err(SubmitError::Update),
      _ => self
        .user_service
        .create_user(&payload)
        .await
        .map_err(SubmitError::Create),
    };

    match result {
      Ok(user) => {
        // The mutation went through; a failed reload is already logged.
        let _ = self.load_users().await;
        Ok(user)
      }
      Err(err) => {
        error!("{}", err);
        Err(err)
      }
    }
  }

  /// Removes the user from the local list once the directory confirms. A
  /// failed delete leaves the list untouched.
  pub async fn delete_user(&mut self, user_id: &str) -> Result<(), UserServiceError> {
    match self.user_service.delete_user(user_id).await {
      Ok(()) => {
        self.users.retain(|user| user.user_id != user_id);
        Ok(())
      }
      Err(err) => {
        error!("Error deleting user {}: {}", user_id, err);
        Err(err)
      }
    }
  }

  pub fn users(&self) -> &[UserRto] {
    &self.users
  }

  pub fn selected_user(&self) -> Option<&UserRto> {
    self.selected_user.as_ref()
  }

  pub fn mode(&self) -> FormMode {
    self.mode
  }

  pub fn form(&self) -> &UserForm {
    &self.form
  }

  pub fn form_mut(&mut self) -> &mut UserForm {
    &mut self.form
  }

  pub fn is_alert_visible(&self) -> bool {
    self.alert.is_visible()
  }

  pub fn close_alert(&mut self) {
    self.alert.close();
  }
}
