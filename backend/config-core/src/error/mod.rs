pub mod launch;
pub mod paths;
pub mod persistence;
pub mod port;
pub mod server;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Persistence(#[from] persistence::PersistenceError),

    #[error(transparent)]
    Port(#[from] port::PortError),

    #[error(transparent)]
    Launch(#[from] launch::LaunchError),

    #[error(transparent)]
    Paths(#[from] paths::PathError),

    #[error(transparent)]
    Server(#[from] server::ServerError),
}
