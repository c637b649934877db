//! Terminal styles shared by the renderers.
//!
//! Section titles take their own color from the data (see `render.rs`); everything
//! else uses the semantic styles below.

use console::Style;

/// Position numbers (`1.`, `2.`).
pub fn index() -> Style {
    Style::new().yellow()
}

/// Section ids, shown as `#sec-...` anchors.
pub fn anchor() -> Style {
    Style::new().color256(245).italic()
}

pub fn url() -> Style {
    Style::new().dim().underlined()
}

/// Placeholders such as "(no links)".
pub fn faint() -> Style {
    Style::new().dim()
}
