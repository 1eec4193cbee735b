use thiserror::Error;

use crate::store::SeedError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server stopped: {0}")]
    Serve(#[from] std::io::Error),

    #[error(transparent)]
    Seed(#[from] SeedError),
}

pub type Result<T> = std::result::Result<T, ServerError>;
