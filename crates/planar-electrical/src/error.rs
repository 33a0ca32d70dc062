use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaterialError {
    #[error("temperature {temperature} °C is outside the supported range {min} °C to {max} °C")]
    OutOfRange { temperature: f64, min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResistanceError {
    #[error("invalid {name} = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("conductor section {index} has non-positive {field} = {value}")]
    InvalidSection {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error(transparent)]
    Material(#[from] MaterialError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CreepageError {
    #[error("invalid working voltage {voltage} V: must be zero or positive")]
    InvalidVoltage { voltage: f64 },

    #[error("unknown conductor classification \"{0}\" (expected one of B1, B2, B3, B4, A5, A6, A7)")]
    UnknownClassification(String),
}
