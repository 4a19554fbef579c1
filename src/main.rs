use std::error::Error;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::warn;
use user_admin::shared::config::Config;
use user_admin::shared::role::Role;
use user_admin::users::dto::permission_dto::PermissionDto;
use user_admin::users::form::user_form::UserForm;
use user_admin::users::rto::user_rto::UserRto;
use user_admin::users::service::user_service::{UserService, UserServiceImpl};
use user_admin::users::UserManagementController;

#[derive(Debug, Parser)]
#[command(name = "user-admin", version, about = "Manage user accounts in a REST user directory")]
struct Cli {
  /// Root of the user collection. Overrides API_BASE_URL.
  #[arg(long, global = true)]
  base_url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// List every user. Fails when the directory cannot be reached.
  List,
  /// Print one user as JSON
  Get { user_id: String },
  /// Create a user
  Create(UserArgs),
  /// Edit a user. Omitted fields keep their current value, except the
  /// password which is always sent, blank included.
  Update {
    user_id: String,
    #[command(flatten)]
    user: UserArgs,
  },
  /// Delete a user
  Delete { user_id: String },
}

#[derive(Debug, Args)]
struct UserArgs {
  #[arg(long)]
  first_name: Option<String>,
  #[arg(long)]
  last_name: Option<String>,
  #[arg(long)]
  email: Option<String>,
  #[arg(long)]
  phone: Option<String>,
  #[arg(long)]
  user_name: Option<String>,
  #[arg(long)]
  password: Option<String>,
  #[arg(long)]
  confirm_password: Option<String>,
  /// super-admin, admin, employee, or a role id
  #[arg(long)]
  role: Option<Role>,
  /// Module flags as MODULE=rwd, e.g. --permission "Admin=rw"
  #[arg(long = "permission", value_parser = parse_permission)]
  permissions: Vec<PermissionDto>,
}

impl UserArgs {
  fn apply(self, form: &mut UserForm) {
    let fields = [
      (self.first_name, &mut form.first_name),
      (self.last_name, &mut form.last_name),
      (self.email, &mut form.email),
      (self.phone, &mut form.phone),
      (self.user_name, &mut form.user_name),
      (self.password, &mut form.password),
      (self.confirm_password, &mut form.confirm_password),
    ];
    for (value, field) in fields {
      if let Some(value) = value {
        *field = value;
      }
    }
    if let Some(role) = self.role {
      form.role = Some(role);
    }
    for permission in self.permissions {
      match form.permission_mut(&permission.permission_name) {
        Some(entry) => {
          entry.is_readable = permission.is_readable;
          entry.is_writable = permission.is_writable;
          entry.is_deletable = permission.is_deletable;
        }
        None => warn!("Unknown permission module: {}", permission.permission_name),
      }
    }
  }
}

fn parse_permission(value: &str) -> Result<PermissionDto, String> {
  let (module, flags) = value
    .split_once('=')
    .ok_or_else(|| format!("Expected MODULE=rwd, got {}", value))?;
  let mut permission = PermissionDto::unset(module.trim());
  for flag in flags.trim().chars() {
    match flag.to_ascii_lowercase() {
      'r' => permission.is_readable = true,
      'w' => permission.is_writable = true,
      'd' => permission.is_deletable = true,
      other => return Err(format!("Unknown permission flag: {}", other)),
    }
  }
  Ok(permission)
}

fn user_line(user: &UserRto) -> String {
  let role = user
    .role
    .as_ref()
    .map(|role| role.role_name.as_str())
    .unwrap_or("-");
  format!(
    "{}\t{}\t{} {}\t{}\t{}\t{}",
    user.user_id, user.user_name, user.first_name, user.last_name, user.email, user.phone, role
  )
}

async fn run<US: UserService>(
  command: Command,
  controller: &mut UserManagementController<US>,
) -> Result<(), Box<dyn Error>> {
  match command {
    Command::List => {
      controller.initialize().await?;
      for user in controller.users() {
        println!("{}", user_line(user));
      }
    }
    Command::Get { user_id } => {
      let user = controller.find_user(&user_id).await?;
      println!("{}", serde_json::to_string_pretty(&user)?);
    }
    Command::Create(user) => {
      controller.open_create();
      user.apply(controller.form_mut());
      let created = controller.submit().await?;
      println!("Created user {}", created.user_id);
    }
    Command::Update { user_id, user } => {
      let existing = controller.find_user(&user_id).await?;
      controller.open_edit(existing);
      user.apply(controller.form_mut());
      let updated = controller.submit().await?;
      println!("Updated user {}", updated.user_id);
    }
    Command::Delete { user_id } => {
      controller.delete_user(&user_id).await?;
      println!("Deleted user {}", user_id);
    }
  }
  Ok(())
}

#[actix_rt::main]
async fn main() -> ExitCode {
  env_logger::init();

  let cli = Cli::parse();
  let mut config = Config::default();
  if let Some(base_url) = cli.base_url {
    config.api_base_url = base_url.trim_end_matches('/').to_string();
  }

  let user_service = match UserServiceImpl::new(&config) {
    Ok(user_service) => user_service,
    Err(err) => {
      eprintln!("{}", err);
      return ExitCode::FAILURE;
    }
  };

  let mut controller = UserManagementController::new(user_service, &config);

  match run(cli.command, &mut controller).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("{}", err);
      ExitCode::FAILURE
    }
  }
}
