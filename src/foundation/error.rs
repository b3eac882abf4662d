/// Convenience result type used across the crate.
pub type TrailsResult<T> = Result<T, TrailsError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum TrailsError {
    /// No outline, SVG text or text string was supplied, or it contained nothing drawable.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// Malformed path data, SVG document, option string or color.
    #[error("parse error: {0}")]
    Parse(String),

    /// Font bytes could not be read or contained no usable face.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// A fit-to-box request had no usable target dimension.
    #[error("invalid resize: {0}")]
    InvalidResize(String),

    /// The engine was torn down with `destroy()`.
    #[error("engine destroyed")]
    Destroyed,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrailsError {
    /// Build a [`TrailsError::MissingInput`] value.
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    /// Build a [`TrailsError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`TrailsError::FontLoad`] value.
    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    /// Build a [`TrailsError::InvalidResize`] value.
    pub fn invalid_resize(msg: impl Into<String>) -> Self {
        Self::InvalidResize(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
