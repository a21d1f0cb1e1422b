use std::f32::consts::{FRAC_PI_2, PI};

/// The arc starts at 12 o'clock (a -90° rotation) and sweeps clockwise.
pub const START_ANGLE: f32 = -FRAC_PI_2;

/// Linearly map `value` from `input` to `output`.
///
/// Values outside of `input` are extrapolated with the same slope, so
/// `interpolate(150., [0., 100.], [100., 0.])` is `-50.`.
pub fn interpolate(value: f32, input: [f32; 2], output: [f32; 2]) -> f32 {
    let span = input[1] - input[0];
    if span == 0. {
        return output[0];
    }

    let t = (value - input[0]) / span;
    output[0] + (output[1] - output[0]) * t
}

/// Patterns that would repeat more often than this along a path are drawn solid.
const MAX_DASH_COUNT: f32 = 1_000_000.;

/// Returns the `(start, end)` distances along a path of `path_length` that are
/// drawn with the dash pattern `dashes` shifted by `offset`.
///
/// Follows the SVG `stroke-dasharray` / `stroke-dashoffset` rules: even entries
/// are dashes, odd entries are gaps, an odd count is repeated to make it even,
/// and the offset may be negative or exceed the pattern length.
pub fn dash_spans(path_length: f32, dashes: &[f32], offset: f32) -> Vec<(f32, f32)> {
    if path_length <= 0. {
        return vec![];
    }

    let dashes: Vec<f32> = if dashes.len() % 2 == 1 {
        dashes.iter().chain(dashes.iter()).copied().collect()
    } else {
        dashes.to_vec()
    };

    let pattern_length: f32 = dashes.iter().sum();
    if dashes.is_empty() || !(pattern_length > 0.) || dashes.iter().any(|d| *d < 0.) {
        return vec![(0., path_length)];
    }
    if path_length / pattern_length > MAX_DASH_COUNT {
        tracing::debug!(
            "dash pattern of length {} is too dense for a path of {}, drawing solid",
            pattern_length,
            path_length
        );
        return vec![(0., path_length)];
    }

    // Find where in the pattern the path starts.
    let mut phase = offset.rem_euclid(pattern_length);
    if phase >= pattern_length {
        phase = 0.;
    }
    let mut ix = 0;
    while phase >= dashes[ix] {
        phase -= dashes[ix];
        ix = (ix + 1) % dashes.len();
    }

    let mut spans = Vec::new();
    let mut pos = 0.;
    let mut consumed = phase;
    let mut stalled = 0;
    while pos < path_length {
        let end = (pos + dashes[ix] - consumed).min(path_length);
        if ix % 2 == 0 && end > pos {
            match spans.last_mut() {
                Some((_, last_end)) if *last_end == pos => *last_end = end,
                _ => spans.push((pos, end)),
            }
        }

        // A whole pattern that no longer moves `pos` is below f32 precision.
        stalled = if end > pos { 0 } else { stalled + 1 };
        if stalled >= dashes.len() {
            break;
        }
        pos = end;
        consumed = 0.;
        ix = (ix + 1) % dashes.len();
    }

    spans
}

/// The geometry of a stroked ring of a given outer `diameter`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub diameter: f32,
    pub stroke_width: f32,
}

impl RingGeometry {
    pub fn new(diameter: f32, stroke_width: f32) -> Self {
        Self {
            diameter,
            stroke_width,
        }
    }

    /// Radius of the stroke center line, so the stroke fits inside `diameter`.
    #[inline]
    pub fn radius(&self) -> f32 {
        (self.diameter - self.stroke_width) / 2.
    }

    #[inline]
    pub fn circumference(&self) -> f32 {
        2. * PI * self.radius()
    }

    /// Center of the ring, relative to the top-left of its square box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.diameter / 2., self.diameter / 2.)
    }

    /// One dash as long as the whole ring followed by an equal gap.
    #[inline]
    pub fn dash_array(&self) -> [f32; 2] {
        let circumference = self.circumference();
        [circumference, circumference]
    }

    /// The dash offset that reveals `progress` percent of the ring.
    ///
    /// `progress` is not clamped: 0 hides the ring, 100 shows all of it, other
    /// values shift the dash past either end.
    pub fn dash_offset(&self, progress: f32) -> f32 {
        let hidden = interpolate(progress, [0., 100.], [100., 0.]);
        self.radius() * PI * 2. * (hidden / 100.)
    }

    /// The drawn parts of the ring for a dash `offset`, as distances from 12 o'clock.
    pub fn visible_spans(&self, offset: f32) -> Vec<(f32, f32)> {
        dash_spans(self.circumference(), &self.dash_array(), offset)
    }

    /// The point at `distance` along the ring, clockwise from 12 o'clock.
    pub fn point_at(&self, distance: f32) -> (f32, f32) {
        let radius = self.radius();
        let (cx, cy) = self.center();
        if radius <= 0. {
            return (cx, cy);
        }

        let angle = START_ANGLE + distance / radius;
        (cx + radius * angle.cos(), cy + radius * angle.sin())
    }

    /// Sample points from `start` to `end` along the ring, about one per 2°.
    pub fn sample(&self, start: f32, end: f32) -> Vec<(f32, f32)> {
        let radius = self.radius();
        if radius <= 0. || end <= start {
            return vec![];
        }

        let sweep = (end - start) / radius;
        let steps = ((sweep / (PI / 90.)).ceil() as usize).max(1);
        (0..=steps)
            .map(|i| self.point_at(start + (end - start) * i as f32 / steps as f32))
            .collect()
    }
}
