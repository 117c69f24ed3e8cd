use thiserror::Error;

// Errors raised while building a message template
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    // A `{name}` token that is not one of the known fields
    #[error("unknown template field `{name}` at offset {offset}")]
    UnknownField { name: String, offset: usize },

    // A `{` that is never closed
    #[error("unclosed `{{` at offset {0}")]
    Unclosed(usize),

    // A lone `}` outside of a token; literal braces are written `}}`
    #[error("unmatched `}}` at offset {0}")]
    UnmatchedClose(usize),
}

// Type alias for results that use `TemplateError` as the error type
pub type Result<T> = std::result::Result<T, TemplateError>;
