//! This crate houses the boilerplate every bot here needs: logging,
//! the async runtime, reading the bot token and sending replies
//! without tripping over flood limits.

use std::{ffi::OsString, future::Future};

pub mod useful_methods;

/// Name of the environment variable holding the bot token.
pub const TOKEN_ENV_VAR: &str = "BOT_TOKEN";

/// Initialize logging and start the `closure` in an async runtime.
/// Logging is enabled by default on level `info` unless overridden
/// by environment variable `RUST_LOG`. This uses the crate
/// [pretty_env_logger][] internally, see its documentation for more details.
///
/// [pretty_env_logger]: https://docs.rs/pretty_env_logger
///
/// # Panics
///
/// Panics if the tokio runtime can't be built.
pub fn start_everything<T>(closure: impl Future<Output = T>) -> T {
    let log_level = std::env::var_os("RUST_LOG")
        .unwrap_or_else(|| OsString::from("info"))
        .into_string()
        .unwrap_or_else(|_| String::from("info"));

    // journald timestamps lines by itself.
    let running_as_systemd_service = std::env::var_os("JOURNAL_STREAM").is_some();

    let mut builder = match running_as_systemd_service {
        true => pretty_env_logger::formatted_builder(),
        false => pretty_env_logger::formatted_timed_builder(),
    };

    builder.parse_filters(&log_level);

    if builder.try_init().is_err() {
        log::error!("Tried to init logger twice!");
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Could not build the tokio runtime!")
        .block_on(closure)
}

/// Why a bot token could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    Missing(&'static str),
    Empty(&'static str),
    NotUnicode(&'static str),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Missing(var) => write!(f, "environment variable {var} is not set"),
            TokenError::Empty(var) => write!(f, "environment variable {var} is empty"),
            TokenError::NotUnicode(var) => {
                write!(f, "environment variable {var} is not valid unicode")
            }
        }
    }
}

impl std::error::Error for TokenError {}

/// Validate a raw token value that came from the environment variable `var`.
/// Surrounding whitespace is stripped, since it sneaks in from `.env` files
/// and systemd unit files all the time.
pub fn parse_token(var: &'static str, raw: Option<OsString>) -> Result<String, TokenError> {
    let raw = raw.ok_or(TokenError::Missing(var))?;
    let token = raw.into_string().map_err(|_| TokenError::NotUnicode(var))?;
    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::Empty(var));
    }
    Ok(token.to_string())
}

/// Read the bot token from the environment variable `var`.
pub fn token_from_env(var: &'static str) -> Result<String, TokenError> {
    parse_token(var, std::env::var_os(var))
}
