use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("the shoe ran out of cards in the middle of a game")]
    ShoeExhausted,

    #[error("a simulation worker thread panicked")]
    WorkerPanicked,
}
