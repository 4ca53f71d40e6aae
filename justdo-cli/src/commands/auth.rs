//! Account commands: register, login, logout, whoami.

use dialoguer::{Input, Password};

use justdo::{ApiClient, ApiError, SessionManager, SessionState};

fn prompt_error(e: dialoguer::Error) -> ApiError {
    ApiError::Io(std::io::Error::other(e))
}

/// Run the interactive registration flow.
pub async fn register() -> Result<(), ApiError> {
    let session = SessionManager::new(ApiClient::new());

    let username: String = Input::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(prompt_error)?;
    let email: String = Input::new()
        .with_prompt("Email")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(prompt_error)?;

    let user = session.register(&username, &email, &password).await?;
    println!("Welcome, {}! You are now logged in.", user.username);
    Ok(())
}

/// Run the interactive login flow.
pub async fn login() -> Result<(), ApiError> {
    let session = SessionManager::new(ApiClient::new());

    // A still-valid stored token means there is nothing to do. A
    // bootstrap failure here is not fatal; we just log in again.
    if let Ok(SessionState::Authenticated(user)) = session.bootstrap().await {
        println!("Already logged in as {}.", user.username);
        println!("Run 'justdo logout' first to switch accounts.");
        return Ok(());
    }

    let username: String = Input::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(prompt_error)?;
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(prompt_error)?;

    let user = session.login(&username, &password).await?;
    println!("Logged in as {}.", user.username);
    Ok(())
}

/// Forget the stored token.
pub fn logout() -> Result<(), ApiError> {
    let session = SessionManager::new(ApiClient::new());
    let had_token = session.api().credentials().load().is_some();
    session.logout()?;

    if had_token {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    if session.api().credentials().has_env_token() {
        println!("Note: JUSTDO_ACCESS_TOKEN is set and still takes effect.");
    }
    Ok(())
}

/// Show who the stored session belongs to.
pub async fn whoami() -> Result<(), ApiError> {
    let session = SessionManager::new(ApiClient::new());
    match session.bootstrap().await? {
        SessionState::Authenticated(user) => {
            match &user.email {
                Some(email) => println!("{} ({})", user.username, email),
                None => println!("{}", user.username),
            }
            Ok(())
        }
        SessionState::Unauthenticated => Err(ApiError::AuthRequired),
    }
}
