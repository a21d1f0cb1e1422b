use gpui::{Div, Refineable as _, StyleRefinement, Styled, div};

/// Returns a `Div` as horizontal flex layout.
#[inline]
pub fn h_flex() -> Div {
    div().flex().flex_row().items_center()
}

/// Returns a `Div` as vertical flex layout.
#[inline]
pub fn v_flex() -> Div {
    div().flex().flex_col()
}

/// Extends [`Styled`] with helpers for merging caller supplied style overrides.
pub trait StyledExt: Styled + Sized {
    /// Merge the given style refinement on top of the current style.
    ///
    /// Fields set in `style` win, everything else is left untouched.
    fn refine_style(mut self, style: &StyleRefinement) -> Self {
        self.style().refine(style);
        self
    }
}

impl<E: Styled> StyledExt for E {}
