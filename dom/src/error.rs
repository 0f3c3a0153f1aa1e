use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("xml: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("root element is not <svg>")]
    NotSvg,

    #[error("malformed transform {value:?}: {reason}")]
    MalformedTransform { value: String, reason: String },

    #[error("malformed path data at offset {offset} (command '{command}')")]
    MalformedPathData { command: char, offset: usize },

    #[error("unsupported element <{0}>")]
    UnsupportedElement(String),

    #[error("canvas size is missing: need width/height or a viewBox")]
    MissingCanvasSize,

    #[error("invalid value {value:?} for attribute {name}")]
    InvalidAttributeValue { name: String, value: String },

    #[error("gzip: {0}")]
    Gzip(#[from] std::io::Error),

    #[error("input is not utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl ParseError {
    pub(crate) fn attr(name: &str, value: &str) -> ParseError {
        ParseError::InvalidAttributeValue { name: name.into(), value: value.into() }
    }
}
