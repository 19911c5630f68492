use thiserror::Error;
use tokio::task::JoinError;

use exchange_config::ConfigError;
use exchange_simulator::SimulationError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Invalid waiting time: {0}")]
    InvalidWaitingTime(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Simulation task failed: {0}")]
    Join(#[from] JoinError),
}
