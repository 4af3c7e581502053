use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("Screenshot failed: {0}")]
    Screenshot(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Could not commit value: {0}")]
    Commit(String),

    /// Raised when a failure occurs while the continue-on-error switch is off.
    #[error("Run aborted: {0}")]
    Aborted(String),

    #[error("CDP error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
