use thiserror::Error;

#[derive(Error, Debug)]
pub enum DraftError {
    #[error("Unknown hero: {0}")]
    UnknownHero(String),

    #[error("Roster is full (5 slots)")]
    RosterFull,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Draft script error at line {line}: {message}")]
    ScriptError { line: usize, message: String },

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("IO error: {0}")]
    IoError(String),
}
