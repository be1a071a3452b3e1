//! Server configuration parsed from environment variables.
//!
//! Every key is optional. Values that are present but unparsable are
//! reported as [`ConfigError`] rather than replaced by the default.

use std::net::IpAddr;
use std::path::PathBuf;

use crate::services::board::BoardDimensions;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_CANVAS_WIDTH: f64 = 2000.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 1200.0;
pub const DEFAULT_WORD_PADDING: f64 = 20.0;
pub const DEFAULT_CLIENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("board padding {padding} leaves no room on a {width}x{height} canvas")]
    PaddingTooLarge { width: f64, height: f64, padding: f64 },
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub board: BoardDimensions,
    /// Outbound queue depth per session; a full queue drops broadcasts for that session.
    pub client_channel_capacity: usize,
    /// Newline-separated word list replacing the built-in catalog.
    pub words_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Build config from the process environment.
    ///
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `PORT`: default 3000
    /// - `CANVAS_WIDTH` / `CANVAS_HEIGHT`: default 2000 x 1200
    /// - `WORD_PADDING`: default 20
    /// - `CLIENT_CHANNEL_CAPACITY`: default 256
    /// - `WORDS_FILE`: unset uses the built-in catalog
    ///
    /// # Errors
    ///
    /// Returns an error if any present value fails to parse or the board
    /// dimensions are inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let width = parse_or(&lookup, "CANVAS_WIDTH", DEFAULT_CANVAS_WIDTH)?;
        let height = parse_or(&lookup, "CANVAS_HEIGHT", DEFAULT_CANVAS_HEIGHT)?;
        let padding = parse_or(&lookup, "WORD_PADDING", DEFAULT_WORD_PADDING)?;
        let client_channel_capacity = parse_or(&lookup, "CLIENT_CHANNEL_CAPACITY", DEFAULT_CLIENT_CHANNEL_CAPACITY)?;
        let words_file = lookup("WORDS_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        if client_channel_capacity == 0 {
            return Err(ConfigError::Zero { key: "CLIENT_CHANNEL_CAPACITY" });
        }
        let board = validate_board(width, height, padding)?;

        Ok(Self { bind_addr, port, board, client_channel_capacity, words_file })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            port: DEFAULT_PORT,
            board: BoardDimensions {
                width: DEFAULT_CANVAS_WIDTH,
                height: DEFAULT_CANVAS_HEIGHT,
                padding: DEFAULT_WORD_PADDING,
            },
            client_channel_capacity: DEFAULT_CLIENT_CHANNEL_CAPACITY,
            words_file: None,
        }
    }
}

fn validate_board(width: f64, height: f64, padding: f64) -> Result<BoardDimensions, ConfigError> {
    if !(width.is_finite() && width > 0.0) {
        return Err(invalid("CANVAS_WIDTH", &width.to_string()));
    }
    if !(height.is_finite() && height > 0.0) {
        return Err(invalid("CANVAS_HEIGHT", &height.to_string()));
    }
    if !(padding.is_finite() && padding >= 0.0) {
        return Err(invalid("WORD_PADDING", &padding.to_string()));
    }
    if padding * 2.0 > width || padding * 2.0 > height {
        return Err(ConfigError::PaddingTooLarge { width, height, padding });
    }
    Ok(BoardDimensions { width, height, padding })
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| invalid(key, &raw)),
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid { key, value: value.to_owned() }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
