use std::fmt;

#[derive(Debug)]
pub enum AnalysisError {
    InvalidTimeline(String),
    InvalidTickRate(f64),
    InvalidSchemaVersion { expected: u8, found: u8 },
    SerializationError(String),
    DeserializationError(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnalysisError::InvalidTimeline(msg) => {
                write!(f, "Invalid timeline: {}", msg)
            }
            AnalysisError::InvalidTickRate(rate) => {
                write!(f, "Invalid tick rate: {}", rate)
            }
            AnalysisError::InvalidSchemaVersion { expected, found } => {
                write!(f, "Invalid schema version: expected {}, found {}", expected, found)
            }
            AnalysisError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            AnalysisError::DeserializationError(msg) => {
                write!(f, "Deserialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            AnalysisError::DeserializationError(err.to_string())
        } else {
            AnalysisError::SerializationError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
