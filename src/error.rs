use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Couldn't parse config file's ({}) contents as valid JSON. {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Couldn't read config file \"{}\". {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{field} path must be a string.")]
    InvalidFieldValue { field: &'static str },
    #[error("{0}")]
    ConflictingOptions(String),
    #[error("Couldn't save to file \"{}\". {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read current dir: {0}")]
    WorkingDir(#[source] std::io::Error),
    #[error("cannot find home dir")]
    NoHomeDir,
    #[error("prompt failed: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
