//! Exhibit metadata
//!
//! An exhibit is one externally supplied image plus its credits. The generator only
//! needs the count and aspect ratio; everything else is carried through to the
//! compiled slots for the renderer and the hover plaques.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// One image to hang in the gallery.
///
/// Proportions come either from an explicit `aspect_ratio` (width / height) or from
/// raw pixel dimensions; the explicit ratio wins when both are present.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Exhibit {
    /// Remote-resolvable image reference
    pub image_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Exhibit {
    pub fn new(
        image_url: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            image_url: image_url.into(),
            title: title.into(),
            author: author.into(),
            ..Self::default()
        }
    }

    pub fn with_aspect_ratio(mut self, ratio: f32) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    pub fn with_pixels(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Width / height, or `None` when unknown or degenerate.
    pub fn display_ratio(&self) -> Option<f32> {
        let ratio = match (self.aspect_ratio, self.width, self.height) {
            (Some(r), _, _) => r,
            (None, Some(w), Some(h)) if h > 0 => w as f32 / h as f32,
            _ => return None,
        };
        (ratio.is_finite() && ratio > 0.0).then_some(ratio)
    }

    /// Square untitled stand-in used when only a count is known.
    pub fn placeholder(index: usize) -> Self {
        Self::new(format!("placeholder://{}", index), format!("Untitled #{}", index + 1), "Unknown")
            .with_aspect_ratio(1.0)
    }
}

/// `count` placeholder exhibits.
pub fn placeholder_exhibits(count: usize) -> Vec<Exhibit> {
    (0..count).map(Exhibit::placeholder).collect()
}

/// Errors that can occur while loading an exhibit list
#[derive(Debug)]
pub enum ExhibitError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for ExhibitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExhibitError::Io(e) => write!(f, "Failed to read exhibit list: {}", e),
            ExhibitError::Parse(e) => write!(f, "Invalid exhibit list: {}", e),
        }
    }
}

impl std::error::Error for ExhibitError {}

impl From<std::io::Error> for ExhibitError {
    fn from(e: std::io::Error) -> Self {
        ExhibitError::Io(e)
    }
}

impl From<serde_json::Error> for ExhibitError {
    fn from(e: serde_json::Error) -> Self {
        ExhibitError::Parse(e)
    }
}

/// Parse an ordered exhibit list from a JSON array.
pub fn parse_exhibits(json: &str) -> Result<Vec<Exhibit>, ExhibitError> {
    Ok(serde_json::from_str(json)?)
}

/// Load an ordered exhibit list from a JSON file.
pub fn load_exhibits(path: impl AsRef<Path>) -> Result<Vec<Exhibit>, ExhibitError> {
    let text = std::fs::read_to_string(path)?;
    parse_exhibits(&text)
}
