//! Admin user management command.

use rand::Rng;
use rand::distr::Alphanumeric;

use cedar_market_core::Role;
use cedar_market_server::db::users::UserRepository;
use cedar_market_server::services::auth::{AuthError, AuthService};

use super::{CommandError, connect};

/// Create an admin user. When no password is given, a random one is
/// generated and printed once.
pub async fn create_user(
    email: &str,
    name: &str,
    password: Option<&str>,
) -> Result<(), CommandError> {
    let pool = connect().await?;

    let generated;
    let password = match password {
        Some(p) => p,
        None => {
            generated = random_password();
            &generated
        }
    };

    let auth = AuthService::new(&pool);
    let user = auth
        .register(name, email, password, None, None)
        .await
        .map_err(|e| match e {
            AuthError::UserAlreadyExists => {
                CommandError::Invalid(format!("user {email} already exists"))
            }
            other => CommandError::Invalid(other.to_string()),
        })?;

    UserRepository::new(&pool)
        .set_role(user.id, Role::Admin)
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;

    tracing::info!(user_id = user.id.as_i32(), email, "admin user created");

    #[allow(clippy::print_stdout)]
    {
        println!("Admin user created: {email}");
        println!("Password: {password}");
    }

    Ok(())
}

fn random_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(20)
        .map(char::from)
        .collect()
}
