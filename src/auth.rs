use grammers_client::types::TermsOfService;
use grammers_client::{Client, SignInError};

use crate::error::{Error, Result};
use crate::prompt::Prompter;

/// Answers the questions the server asks while logging in.
pub trait Authenticator {
    fn phone(&self) -> Result<String>;
    fn password(&self, hint: Option<&str>) -> Result<String>;
    fn code(&self) -> Result<String>;
    /// Called when the phone number has no account yet.
    fn sign_up_required(&self, terms_of_service: Option<&str>) -> Error;
}

/// Fixed phone number, secrets typed on the terminal, and no sign-up.
pub struct TerminalAuth {
    phone: String,
    prompter: Prompter,
}

impl TerminalAuth {
    pub fn new(phone: String, prompter: Prompter) -> Self {
        Self { phone, prompter }
    }
}

impl Authenticator for TerminalAuth {
    fn phone(&self) -> Result<String> {
        Ok(self.phone.clone())
    }

    fn password(&self, hint: Option<&str>) -> Result<String> {
        self.prompter.password(hint)
    }

    fn code(&self) -> Result<String> {
        self.prompter.code()
    }

    fn sign_up_required(&self, terms_of_service: Option<&str>) -> Error {
        match terms_of_service {
            Some(text) if !text.trim().is_empty() => Error::Auth(format!(
                "sign-up required for {}; terms of service not accepted: {}",
                self.phone,
                text.trim()
            )),
            _ => Error::Auth(format!("sign-up required for {}", self.phone)),
        }
    }
}

/// Runs the login handshake unless the session is already authorized.
pub async fn authorize_if_necessary<A: Authenticator + ?Sized>(client: &Client, auth: &A) -> Result<()> {
    let authorized = client
        .is_authorized()
        .await
        .map_err(|err| Error::remote("updates.getState", err))?;
    if authorized {
        tracing::debug!("session already authorized");
        return Ok(());
    }

    let phone = auth.phone()?;
    let token = client
        .request_login_code(&phone)
        .await
        .map_err(|err| Error::Auth(format!("could not send login code: {err}")))?;
    tracing::info!("login code sent");

    let code = auth.code()?;
    match client.sign_in(&token, &code).await {
        Ok(_) => {}
        Err(SignInError::PasswordRequired(password_token)) => {
            let hint = password_token.hint().map(|hint| hint.to_string());
            let password = auth.password(hint.as_deref())?;
            client
                .check_password(password_token, password.as_bytes())
                .await
                .map_err(|err| Error::Auth(format!("password rejected: {err}")))?;
        }
        Err(SignInError::SignUpRequired { terms_of_service }) => {
            let text = terms_text(terms_of_service.as_ref());
            return Err(auth.sign_up_required(text));
        }
        Err(err) => return Err(Error::Auth(format!("sign in failed: {err}"))),
    }

    tracing::info!("Success auth");
    Ok(())
}

fn terms_text(terms_of_service: Option<&TermsOfService>) -> Option<&str> {
    terms_of_service.map(TermsOfService::text)
}
