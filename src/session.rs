use std::fs;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use grammers_client::{Client, Config as ClientConfig, InitParams};
use grammers_session::Session;

use crate::auth::{Authenticator, authorize_if_necessary};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::telegram::TelegramService;

/// Connects, logs in when the stored session is not authorized, and hands a
/// ready service to `body`. The connection is released and the session file
/// written back however `body` ends.
pub async fn run<A, F, Fut, T>(config: &Config, auth: &A, body: F) -> Result<T>
where
    A: Authenticator + ?Sized,
    F: FnOnce(TelegramService) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let guard = SessionGuard::connect(config).await?;
    authorize_if_necessary(guard.client(), auth).await?;
    guard.persist()?;

    body(TelegramService::new(guard.client().clone())).await
}

/// Owns the live client for the duration of a run.
pub struct SessionGuard {
    client: Client,
    path: PathBuf,
}

impl SessionGuard {
    pub async fn connect(config: &Config) -> Result<Self> {
        if let Some(parent) = config.session_path.parent() {
            ensure_dir(parent)?;
        }
        let session = Session::load_file_or_create(&config.session_path)?;

        tracing::debug!(path = %config.session_path.display(), "connecting");
        let client = Client::connect(ClientConfig {
            session,
            api_id: config.api_id,
            api_hash: config.api_hash.clone(),
            params: InitParams::default(),
        })
        .await
        .map_err(|err| Error::remote("connect", err))?;
        tracing::info!("connected");

        Ok(Self {
            client,
            path: config.session_path.clone(),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn persist(&self) -> Result<()> {
        self.client.session().save_to_file(&self.path)?;
        set_file_permissions(&self.path, 0o600)?;
        Ok(())
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Err(error) = self.persist() {
            tracing::warn!(%error, path = %self.path.display(), "failed to save session");
        }
        tracing::debug!("connection released");
    }
}

fn ensure_dir(path: &Path) -> io::Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path)?;
    set_dir_permissions(path, 0o700)?;
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let perm = fs::Permissions::from_mode(mode);
    fs::set_permissions(path, perm)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let perm = fs::Permissions::from_mode(mode);
    fs::set_permissions(path, perm)
}

#[cfg(not(unix))]
fn set_file_permissions(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}
