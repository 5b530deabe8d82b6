//! Error types for the site bundle

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors that can occur while wiring the page
#[derive(Error, Debug)]
pub enum SiteError {
    /// No global `window` (not running in a browser)
    #[error("no window")]
    MissingWindow,

    /// Window has no document
    #[error("no document")]
    MissingDocument,

    /// A required element was not found
    #[error("element not found: {0}")]
    MissingElement(String),

    /// The canvas refused to hand out a rendering context
    #[error("{0} context not available")]
    ContextUnavailable(&'static str),

    /// Failed to compile a shader stage
    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),

    /// Failed to link the shader program
    #[error("program link failed: {0}")]
    ProgramLink(String),

    /// Exception thrown by a browser API
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Result type for page wiring
pub type Result<T> = std::result::Result<T, SiteError>;
