use gpui::{
    App, InteractiveElement as _, IntoElement, ParentElement, SharedString, Styled, Window, div,
    relative,
};

use super::ProgressDisplay;
use crate::{ActiveProgressTheme, StyledExt, h_flex};

/// Fraction of the track covered by the fill, not clamped.
#[inline]
pub fn fill_fraction(value: f32) -> f32 {
    value / 100.
}

fn linear_label(value: f32) -> SharedString {
    format!("{}%", value.round() as i64).into()
}

impl ProgressDisplay {
    pub(super) fn render_linear(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.progress_theme();
        let spacing = theme.spacing;
        let value = self.effective_value();

        let fill = div()
            .h_full()
            .w(relative(fill_fraction(value)))
            .rounded(spacing.xxxs())
            .bg(theme.linear_fill);
        let track = div()
            .flex_1()
            .h(spacing.xs())
            .rounded(spacing.xxs())
            .bg(theme.linear_track);

        #[cfg(test)]
        let (track, fill) = (
            track.debug_selector(|| format!("{}-track", self.id)),
            fill.debug_selector(|| format!("{}-fill", self.id)),
        );

        h_flex()
            .id(self.id)
            .w_full()
            .refine_style(&self.style)
            .child(track.child(fill))
            .child(
                div()
                    .ml(spacing.sm())
                    .text_color(theme.linear_text)
                    .text_size(spacing.md())
                    .child(linear_label(value)),
            )
    }
}
