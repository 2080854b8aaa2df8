use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("unknown commitment level {0:?}, expected processed, confirmed or finalized")]
    InvalidCommitment(String),

    #[error("couldn't read keypair from {}: {message}", .path.display())]
    Keypair { path: PathBuf, message: String },

    #[error("invalid cluster {url:?}: {message}")]
    InvalidCluster { url: String, message: String },

    #[error("no Anchor.toml found in {} or any parent directory", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("couldn't parse Anchor.toml: {0}")]
    Manifest(#[from] toml::de::Error),

    #[error("program {0:?} is not registered in the workspace")]
    ProgramNotFound(String),

    #[error("programs {first:?} and {second:?} resolve to the same name")]
    AmbiguousProgram { first: String, second: String },

    #[error("invalid program id {id:?} for {name}")]
    InvalidProgramId { name: String, id: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Client(#[from] anchor_client::ClientError),

    #[error(transparent)]
    Rpc(#[from] solana_client::client_error::ClientError),
}

pub type Result<T> = std::result::Result<T, Error>;
