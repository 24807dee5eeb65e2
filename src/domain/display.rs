// src/domain/display.rs
//
// Transport-agnostic rendering of one page of a view.

use super::navigation::NavigationControls;

/// What a page looks like once rendered.
///
/// `body` is already escaped HTML and ready to embed as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPayload {
    pub body: String,
    /// Poster URL; when present, `body` is sent as the image caption
    pub image: Option<String>,
    pub controls: Option<NavigationControls>,
    /// Film pages embed links whose previews would drown the caption
    pub disable_link_preview: bool,
}

impl DisplayPayload {
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            image: None,
            controls: None,
            disable_link_preview: false,
        }
    }

    pub fn with_controls(mut self, controls: Option<NavigationControls>) -> Self {
        self.controls = controls;
        self
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}
