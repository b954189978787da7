use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown part type tag: {0}")]
    UnknownPartType(String),
    #[error("unknown package compare type: {0:?}")]
    UnknownCompareType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
