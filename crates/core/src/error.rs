//! Error types for the icon-tint core.

use thiserror::Error;

/// Errors produced by recoloring and variant generation.
///
/// Every failure is synchronous and fatal to the current call; nothing is
/// retried and no partial output is returned.
#[derive(Debug, Error)]
pub enum TintError {
    /// A color string was neither the keyword `none` nor a hex literal.
    #[error("invalid color '{0}': expected 'none' or '#' followed by 3, 4, 6, or 8 hex digits")]
    InvalidColor(String),

    /// The input text had no locatable SVG root element to anchor on.
    #[error("invalid SVG document: {0}")]
    InvalidSvgDocument(String),
}
