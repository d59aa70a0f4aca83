use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unknown strategy '{0}' (expected martingale, kelly or flat)")]
    UnknownStrategy(String),

    #[error("Unknown risk level '{0}' (expected low, medium or high)")]
    UnknownRiskLevel(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Tick batch of {requested} exceeds the limit of {max}")]
    TickBatchTooLarge { requested: u64, max: u64 },
}

pub type SimResult<T> = Result<T, SimError>;
