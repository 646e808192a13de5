use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{0} must be defined in action config")]
    MissingConfig(&'static str),

    #[error("invalid webhook url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("webhook template `{0}` has no {{action}} placeholder")]
    MissingPlaceholder(String),

    #[error("validation result identifier must be a ValidationResultIdentifier or CloudIdentifier, not {kind}")]
    UnsupportedIdentifier { kind: &'static str },

    #[error("no validation result was passed to the action")]
    MissingValidationResult,

    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
