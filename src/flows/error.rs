use thiserror::Error;

use crate::types::AmountError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("step {step} is missing required fields: {}", .missing.join(", "))]
    StepIncomplete {
        step: usize,
        missing: Vec<&'static str>,
    },

    #[error("this action belongs to step {expected}, but the flow is on step {current}")]
    WrongStep { expected: usize, current: usize },

    #[error("the flow has already been completed")]
    AlreadyComplete,

    #[error("field '{0}' is generated and cannot be edited")]
    ReadOnlyField(&'static str),

    #[error("unknown form field '{0}'")]
    UnknownField(String),

    #[error("field '{field}' expects a {expected} value")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("invalid order amount: {0}")]
    Amount(#[from] AmountError),
}
