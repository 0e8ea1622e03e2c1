use std::io;

use thiserror::Error;

use crate::output::OutputError;

/// Failure kinds of a run.
///
/// `Representation` is the only kind the chat scan recovers from; every other
/// variant aborts the run and is reported by `main`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),
    #[error("auth error: {0}")]
    Auth(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("remote call failed: {call}: {message}")]
    RemoteCall { call: &'static str, message: String },
    #[error("chat {id} has no full representation ({kind})")]
    Representation { id: i64, kind: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unexpected response shape: {0}")]
    DataShape(String),
    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn remote(call: &'static str, error: impl std::fmt::Display) -> Self {
        Error::RemoteCall {
            call,
            message: error.to_string(),
        }
    }
}

impl From<dialoguer::Error> for Error {
    fn from(error: dialoguer::Error) -> Self {
        match error {
            dialoguer::Error::IO(err) => Error::Io(err),
        }
    }
}
