use log::debug;
use reqwest::Client;
use thiserror::Error;

use crate::shared::config::Config;
use crate::users::dto::create_user_dto::CreateUserDto;
use crate::users::rto::user_rto::UserRto;

#[derive(Debug, Error)]
pub enum UserServiceError {
  #[error("Request error: {0}")]
  RequestError(#[from] reqwest::Error),

  #[error("Other error: {0}")]
  Other(String),
}

/// CRUD operations against the remote user collection. Each call is a single
/// request: no retries, no caching.
pub trait UserService {
  async fn create_user(
    &self,
    user: &CreateUserDto,
  ) -> Result<UserRto, UserServiceError>;
  async fn get_all_users(&self) -> Result<Vec<UserRto>, UserServiceError>;
  async fn get_user_by_id(
    &self,
    user_id: &str,
  ) -> Result<UserRto, UserServiceError>;
  async fn update_user(
    &self,
    user_id: &str,
    user: &CreateUserDto,
  ) -> Result<UserRto, UserServiceError>;
  async fn delete_user(&self, user_id: &str) -> Result<(), UserServiceError>;
}

impl<US: UserService> UserService for &US {
  async fn create_user(
    &self,
    user: &CreateUserDto,
  ) -> Result<UserRto, UserServiceError> {
    (**self).create_user(user).await
  }

  async fn get_all_users(&self) -> Result<Vec<UserRto>, UserServiceError> {
    (**self).get_all_users().await
  }

  async fn get_user_by_id(
    &self,
    user_id: &str,
  ) -> Result<UserRto, UserServiceError> {
    (**self).get_user_by_id(user_id).await
  }

  async fn update_user(
    &self,
    user_id: &str,
    user: &CreateUserDto,
  ) -> Result<UserRto, UserServiceError> {
    (**self).update_user(user_id, user).await
  }

  async fn delete_user(&self, user_id: &str) -> Result<(), UserServiceError> {
    (**self).delete_user(user_id).await
  }
}

pub struct UserServiceImpl {
  client: Client,
  base_url: String,
}

impl UserServiceImpl {
  pub fn new(config: &Config) -> Result<Self, UserServiceError> {
    let client = Client::builder().build()?;
    Ok(Self::with_client(client, &config.api_base_url))
  }

  pub fn with_client(client: Client, base_url: &str) -> Self {
    Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
    }
  }

  fn user_url(&self, user_id: &str) -> String {
    format!("{}/{}", self.base_url, user_id)
  }
}

impl UserService for UserServiceImpl {
  async fn create_user(
    &self,
    user: &CreateUserDto,
  ) -> Result<UserRto, UserServiceError> {
    debug!("POST {}", self.base_url);
    let response = self
      .client
      .post(&self.base_url)
      .json(user)
      .send()
      .await?
      .error_for_status()?;
    Ok(response.json::<UserRto>().await?)
  }

  async fn get_all_users(&self) -> Result<Vec<UserRto>, UserServiceError> {
    debug!("GET {}", self.base_url);
    let response = self
      .client
      .get(&self.base_url)
      .send()
      .await?
      .error_for_status()?;
    Ok(response.json::<Vec<UserRto>>().await?)
  }

  async fn get_user_by_id(
    &self,
    user_id: &str,
  ) -> Result<UserRto, UserServiceError> {
    let url = self.user_url(user_id);
    debug!("GET {}", url);
    let response = self.client.get(url).send().await?.error_for_status()?;
    Ok(response.json::<UserRto>().await?)
  }

  async fn update_user(
    &self,
    user_id: &str,
    user: &CreateUserDto,
  ) -> Result<UserRto, UserServiceError> {
    let url = self.user_url(user_id);
    debug!("PUT {}", url);
    let response = self
      .client
      .put(url)
      .json(user)
      .send()
      .await?
      .error_for_status()?;
    Ok(response.json::<UserRto>().await?)
  }

  async fn delete_user(&self, user_id: &str) -> Result<(), UserServiceError> {
    let url = self.user_url(user_id);
    debug!("DELETE {}", url);
    // The response body carries nothing we use.
    self.client.delete(url).send().await?.error_for_status()?;
    Ok(())
  }
}

#[cfg(test)]
pub mod tests {
  use std::sync::atomic::{AtomicBool, Ordering};
  use std::sync::RwLock;

  use nanoid::nanoid;
  use reqwest::StatusCode;

  use super::*;
  use crate::helpers::tests::{
    fake_create_user_dto, fake_user_rto, record_from, start_directory_server,
  };
  use crate::shared::role::Role;

  /// In-memory directory that records every call made against it.
  pub struct UserServiceMock {
    pub users: RwLock<Vec<UserRto>>,
    pub calls: RwLock<Vec<&'static str>>,
    failing: AtomicBool,
  }

  impl UserServiceMock {
    pub fn new() -> Self {
      Self::with_users(Vec::new())
    }

    pub fn with_users(users: Vec<UserRto>) -> Self {
      Self {
        users: RwLock::new(users),
        calls: RwLock::new(Vec::new()),
        failing: AtomicBool::new(false),
      }
    }

    pub fn set_failing(&self, failing: bool) {
      self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<&'static str> {
      self.calls.read().unwrap().clone()
    }

    fn record(&self, call: &'static str) -> Result<(), UserServiceError> {
      self.calls.write().unwrap().push(call);
      if self.failing.load(Ordering::SeqCst) {
        return Err(UserServiceError::Other(format!("{} failed", call)));
      }
      Ok(())
    }
  }

  impl UserService for UserServiceMock {
    async fn create_user(
      &self,
      user: &CreateUserDto,
    ) -> Result<UserRto, UserServiceError> {
      self.record("create_user")?;
      let user = record_from(nanoid!(), user.clone());
      self.users.write().unwrap().push(user.clone());
      Ok(user)
    }

    async fn get_all_users(&self) -> Result<Vec<UserRto>, UserServiceError> {
      self.record("get_all_users")?;
      Ok(self.users.read().unwrap().clone())
    }

    async fn get_user_by_id(
      &self,
      user_id: &str,
    ) -> Result<UserRto, UserServiceError> {
      self.record("get_user_by_id")?;
      let users = self.users.read().unwrap();
      users
        .iter()
        .find(|user| user.user_id == user_id)
        .cloned()
        .ok_or_else(|| UserServiceError::Other("User not found".to_string()))
    }

    async fn update_user(
      &self,
      user_id: &str,
      user: &CreateUserDto,
    ) -> Result<UserRto, UserServiceError> {
      self.record("update_user")?;
      let mut users = self.users.write().unwrap();
      let existing = users
        .iter_mut()
        .find(|existing| existing.user_id == user_id)
        .ok_or_else(|| UserServiceError::Other("User not found".to_string()))?;
      *existing = record_from(user_id.to_string(), user.clone());
      Ok(existing.clone())
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), UserServiceError> {
      self.record("delete_user")?;
      self.users.write().unwrap().retain(|user| user.user_id != user_id);
      Ok(())
    }
  }

  fn status_of(error: UserServiceError) -> Option<StatusCode> {
    match error {
      UserServiceError::RequestError(error) => error.status(),
      UserServiceError::Other(_) => None,
    }
  }

  fn service_for(base_url: &str) -> UserServiceImpl {
    let client = Client::builder().no_proxy().build().unwrap();
    UserServiceImpl::with_client(client, base_url)
  }

  #[test]
  fn test_new_trims_trailing_slash() {
    let config = Config {
      api_base_url: "http://127.0.0.1:3001/v1/users/".to_string(),
      alert_duration_ms: 3000,
    };

    let service = UserServiceImpl::new(&config).unwrap();

    assert_eq!(service.base_url, "http://127.0.0.1:3001/v1/users");
    assert_eq!(service.user_url("abc"), "http://127.0.0.1:3001/v1/users/abc");
  }

  #[actix_rt::test]
  async fn test_create_and_get_user() {
    let server = start_directory_server(Vec::new()).await;
    let service = service_for(&server.base_url);
    let dto = fake_create_user_dto(Role::Admin);

    let created = service.create_user(&dto).await.unwrap();
    assert!(!created.user_id.is_empty());
    assert_eq!(created.user_name, dto.user_name);
    assert_eq!(created.role, Some(dto.role.clone()));

    let fetched = service.get_user_by_id(&created.user_id).await.unwrap();
    assert_eq!(fetched, created);

    server.stop().await;
  }

  #[actix_rt::test]
  async fn test_get_all_users() {
    let users = vec![fake_user_rto(Role::Admin), fake_user_rto(Role::Employee)];
    let server = start_directory_server(users.clone()).await;
    let service = service_for(&server.base_url);

    let fetched = service.get_all_users().await.unwrap();

    assert_eq!(fetched, users);
    server.stop().await;
  }

  #[actix_rt::test]
  async fn test_update_user() {
    let user = fake_user_rto(Role::Employee);
    let server = start_directory_server(vec![user.clone()]).await;
    let service = service_for(&server.base_url);
    let mut dto = fake_create_user_dto(Role::SuperAdmin);
    dto.first_name = "Renamed".to_string();

    let updated = service.update_user(&user.user_id, &dto).await.unwrap();

    assert_eq!(updated.user_id, user.user_id);
    assert_eq!(updated.first_name, "Renamed");
    assert_eq!(server.users.read().unwrap()[0], updated);
    server.stop().await;
  }

  #[actix_rt::test]
  async fn test_delete_user() {
    let user = fake_user_rto(Role::Admin);
    let server = start_directory_server(vec![user.clone()]).await;
    let service = service_for(&server.base_url);

    service.delete_user(&user.user_id).await.unwrap();

    assert!(server.users.read().unwrap().is_empty());
    server.stop().await;
  }

  #[actix_rt::test]
  async fn test_missing_user_surfaces_http_status() {
    let server = start_directory_server(Vec::new()).await;
    let service = service_for(&server.base_url);

    let error = service.get_user_by_id("missing").await.unwrap_err();
    assert_eq!(status_of(error), Some(StatusCode::NOT_FOUND));

    let error = service.delete_user("missing").await.unwrap_err();
    assert_eq!(status_of(error), Some(StatusCode::NOT_FOUND));

    let error = service
      .update_user("missing", &fake_create_user_dto(Role::Admin))
      .await
      .unwrap_err();
    assert_eq!(status_of(error), Some(StatusCode::NOT_FOUND));

    server.stop().await;
  }

  #[actix_rt::test]
  async fn test_unreachable_directory() {
    let server = start_directory_server(Vec::new()).await;
    let base_url = server.base_url.clone();
    server.stop().await;

    let error = service_for(&base_url).get_all_users().await.unwrap_err();

    assert!(matches!(error, UserServiceError::RequestError(_)));
  }
}
