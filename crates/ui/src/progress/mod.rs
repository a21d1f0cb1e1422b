use gpui::{App, ElementId, Hsla, IntoElement, RenderOnce, StyleRefinement, Styled, Window};
use std::time::Duration;

mod animation;
mod circle;
mod geometry;
mod label;
mod linear;
mod view;

pub use animation::{Derived, TimedValue, Timing};
pub use geometry::{RingGeometry, START_ANGLE, dash_spans, interpolate};
pub use label::{label_text, label_value};
pub use linear::fill_fraction;
pub use view::{ProgressModel, ProgressView};

/// Progress display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressMode {
    /// Horizontal track with a fill segment and a text label (default).
    #[default]
    Linear,
    /// Animated ring with an optional percentage label in the center.
    Circular,
}

/// What to do with progress values outside of `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValuePolicy {
    /// Use the value as is. The linear fill overflows or collapses and the
    /// ring overshoots, only the circular label is capped at 100%.
    #[default]
    PassThrough,
    /// Clamp to `0..=100` before any layout or geometry.
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ProgressError {
    #[error("progress value must be finite, got {0}")]
    NonFinite(f32),
    #[error("{name} must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f32 },
}

/// A finite progress percentage, usually in `0..=100` but not limited to it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressValue(f32);

impl ProgressValue {
    pub fn new(value: f32) -> Result<Self, ProgressError> {
        if !value.is_finite() {
            return Err(ProgressError::NonFinite(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }

    /// Returns the value to render with the given policy.
    pub fn resolve(self, policy: ValuePolicy) -> f32 {
        match policy {
            ValuePolicy::PassThrough => self.0,
            ValuePolicy::Clamp => self.0.clamp(0., 100.),
        }
    }
}

impl TryFrom<f32> for ProgressValue {
    type Error = ProgressError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn positive(name: &'static str, value: f32) -> Result<f32, ProgressError> {
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(ProgressError::NotPositive { name, value })
    }
}

/// Resolved sizes of the circular indicator, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleMetrics {
    pub diameter: f32,
    pub stroke_width: f32,
    pub label_size: f32,
}

impl CircleMetrics {
    pub const DEFAULT_DIAMETER: f32 = 80.;

    /// Fill in the defaults: 80px diameter, stroke 5% and label 20% of it.
    pub fn resolve(
        diameter: Option<f32>,
        stroke_width: Option<f32>,
        label_size: Option<f32>,
    ) -> Self {
        let diameter = diameter.unwrap_or(Self::DEFAULT_DIAMETER);
        Self {
            diameter,
            stroke_width: stroke_width.unwrap_or((5. * diameter) / 100.),
            label_size: label_size.unwrap_or((20. * diameter) / 100.),
        }
    }

    pub fn geometry(&self) -> RingGeometry {
        RingGeometry::new(self.diameter, self.stroke_width)
    }
}

/// A progress indicator, drawn as a horizontal bar or as an animated ring.
///
/// ```ignore
/// ProgressDisplay::new("upload").value(42.);
/// ProgressDisplay::new("download").circle().diameter(120.).value(60.);
/// ```
///
/// The [`Styled`] methods refine the outer container in both modes.
#[derive(IntoElement, Clone)]
pub struct ProgressDisplay {
    id: ElementId,
    style: StyleRefinement,
    mode: ProgressMode,
    value: ProgressValue,
    policy: ValuePolicy,
    diameter: Option<f32>,
    stroke_width: Option<f32>,
    label_size: Option<f32>,
    show_label: bool,
    outer_ring_color: Option<Hsla>,
    progress_ring_color: Option<Hsla>,
    label_color: Option<Hsla>,
    label_style: StyleRefinement,
    timing: Timing,
}

impl ProgressDisplay {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            style: StyleRefinement::default(),
            mode: ProgressMode::default(),
            value: ProgressValue::default(),
            policy: ValuePolicy::default(),
            diameter: None,
            stroke_width: None,
            label_size: None,
            show_label: true,
            outer_ring_color: None,
            progress_ring_color: None,
            label_color: None,
            label_style: StyleRefinement::default(),
            timing: Timing::default(),
        }
    }

    pub fn mode(mut self, mode: ProgressMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use the linear mode, this is the default.
    pub fn linear(self) -> Self {
        self.mode(ProgressMode::Linear)
    }

    /// Use the circular mode.
    pub fn circle(self) -> Self {
        self.mode(ProgressMode::Circular)
    }

    /// Set the percentage value, expected to be in `0..=100`.
    ///
    /// Out of range values are kept (see [`ValuePolicy`]). NaN and infinity
    /// are rejected and replaced by 0.
    pub fn value(mut self, value: f32) -> Self {
        self.value = match ProgressValue::new(value) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}, using 0 instead", err);
                ProgressValue::default()
            }
        };
        self
    }

    pub fn value_policy(mut self, policy: ValuePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the diameter of the ring in pixels, default is 80.
    pub fn diameter(mut self, diameter: f32) -> Self {
        self.diameter = Self::checked("diameter", diameter).or(self.diameter);
        self
    }

    /// Set the ring stroke width in pixels, default is 5% of the diameter.
    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = Self::checked("stroke_width", width).or(self.stroke_width);
        self
    }

    /// Set the label font size in pixels, default is 20% of the diameter.
    pub fn label_size(mut self, size: f32) -> Self {
        self.label_size = Self::checked("label_size", size).or(self.label_size);
        self
    }

    /// Show the percentage label inside the ring, default is true.
    pub fn show_label(mut self, show: bool) -> Self {
        self.show_label = show;
        self
    }

    pub fn outer_ring_color(mut self, color: impl Into<Hsla>) -> Self {
        self.outer_ring_color = Some(color.into());
        self
    }

    pub fn progress_ring_color(mut self, color: impl Into<Hsla>) -> Self {
        self.progress_ring_color = Some(color.into());
        self
    }

    pub fn label_color(mut self, color: impl Into<Hsla>) -> Self {
        self.label_color = Some(color.into());
        self
    }

    /// Refine the style of the ring label, applied after the defaults.
    pub fn label_style(mut self, style: StyleRefinement) -> Self {
        self.label_style = style;
        self
    }

    /// Set the duration of the ring animation, default is 300ms.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.timing.duration = duration;
        self
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// The value used for rendering, after the [`ValuePolicy`].
    pub fn effective_value(&self) -> f32 {
        self.value.resolve(self.policy)
    }

    pub fn metrics(&self) -> CircleMetrics {
        CircleMetrics::resolve(self.diameter, self.stroke_width, self.label_size)
    }

    fn checked(name: &'static str, value: f32) -> Option<f32> {
        match positive(name, value) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("{}, ignored", err);
                None
            }
        }
    }
}

impl Styled for ProgressDisplay {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for ProgressDisplay {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        match self.mode {
            ProgressMode::Linear => self.render_linear(window, cx).into_any_element(),
            ProgressMode::Circular => self.render_circle(window, cx).into_any_element(),
        }
    }
}
