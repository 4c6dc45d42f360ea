#![deny(unsafe_code)]
//! Core recoloring engine for the icon-tint SVG icon tool.
//!
//! Takes raw SVG text and a target fill/stroke color and produces a
//! color-substituted `active` variant plus an optional desaturated,
//! lightened `inactive` variant with an injected rounded backdrop. Provides
//! the `ColorToken` value model, RGB <-> HSL transforms, the three-surface
//! text recolorer, the backdrop injector, and the `generate` entry point.
//!
//! Everything here is a synchronous pure function over immutable inputs;
//! file I/O, argument parsing, and UI belong to the callers.

pub mod background;
pub mod color;
pub mod error;
pub mod recolor;
pub mod shade;
pub mod variant;

pub use background::{inject_background, ViewBox, BACKGROUND_MARKER};
pub use color::{hsl_to_rgb, rgb_to_hsl, ColorToken, Hsla, Rgba};
pub use error::TintError;
pub use recolor::{apply_requests, recolor, RecolorRequest, SvgProperty};
pub use shade::{derive_inactive_background, derive_inactive_color};
pub use variant::{
    generate, GenerationOptions, IconVariant, DEFAULT_CORNER_RADIUS, DEFAULT_INACTIVE_MIX,
    DEFAULT_INSET_RATIO,
};
