use thiserror::Error;

use crate::types::FlipFlopKind;

/// Invalid-argument failures of the command surface. The simulation is left
/// untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown signal name: {0}")]
    UnknownSignal(String),

    #[error("unknown flip-flop kind: {0}")]
    UnknownKind(String),

    #[error("unknown variant: {0}")]
    UnknownVariant(String),

    #[error("no conversion from {0} to itself")]
    SelfConversion(FlipFlopKind),
}
