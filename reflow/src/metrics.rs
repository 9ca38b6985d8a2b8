use crate::error::Result;
use crate::layout::{LineHeight, TextStyle};

/// Something that can lay text out and report how tall it came out.
pub trait TextMetrics {
    /// Open a scratch surface for one pagination pass.
    ///
    /// The surface is released when the returned box is dropped. Fails with
    /// `LayoutError::MeasurementUnavailable` when the host cannot measure yet.
    fn open_surface(&self, style: &TextStyle) -> Result<Box<dyn ScratchSurface + '_>>;

    /// Short name for diagnostics
    fn name(&self) -> &'static str;
}

/// An off-screen surface bound to a single style.
pub trait ScratchSurface {
    /// Render `paragraphs` as separate blocks and return the total height in pixels.
    ///
    /// Surfaces that render through HTML or similar markup must pass each
    /// paragraph through [`escape_markup`] first; plain-text surfaces such as
    /// the built-in providers measure the text as given.
    fn rendered_height(&mut self, paragraphs: &[&str]) -> f32;

    /// Line height of the bound style, as the surface reports it.
    fn line_height(&self) -> LineHeight;
}

/// Escape characters that a markup-based surface would otherwise interpret.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
