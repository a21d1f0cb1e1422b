use gpui::prelude::FluentBuilder as _;
use gpui::{
    App, Bounds, Context, Corners, Entity, Hsla, InteractiveElement as _, IntoElement,
    ParentElement, Path, PathBuilder, Pixels, Point, Styled, Window, canvas, div, fill, point, px,
    size,
};
use instant::Instant;

use super::animation::{Derived, TimedValue, Timing};
use super::geometry::RingGeometry;
use super::label::{LabelSender, LabelSync, label_text, label_value};
use super::ProgressDisplay;
use crate::{ActiveProgressTheme, StyledExt};

/// Spans shorter than this are float noise, not progress.
const MIN_SPAN: f32 = 0.01;

/// Per-instance state of a circular progress, lives as long as it is rendered.
pub(crate) struct CircleState {
    animation: Derived<f32, TimedValue>,
    label: i32,
    label_sync: LabelSync,
}

impl CircleState {
    pub(crate) fn new(value: f32, timing: Timing, cx: &mut Context<Self>) -> Self {
        Self {
            animation: Derived::new(
                value,
                TimedValue::settled(value, Instant::now()).with_timing(timing),
            ),
            label: 0,
            label_sync: LabelSync::new(cx, |this: &mut Self, value, cx| this.set_label(value, cx)),
        }
    }

    /// Animate toward `value` if it differs from the current target.
    pub(crate) fn set_target(&mut self, value: f32, timing: Timing, now: Instant) -> bool {
        self.animation.update(value, |target, animation| {
            tracing::trace!(
                "progress circle animating from {} to {}",
                animation.value_at(now),
                target
            );
            animation.set_timing(timing);
            animation.retarget(*target, now);
        })
    }

    pub(crate) fn animated_value(&self, now: Instant) -> f32 {
        self.animation.get().value_at(now)
    }

    pub(crate) fn is_animating(&self, now: Instant) -> bool {
        !self.animation.get().is_finished(now)
    }

    pub(crate) fn label(&self) -> i32 {
        self.label
    }

    fn set_label(&mut self, value: i32, cx: &mut Context<Self>) {
        if self.label != value {
            self.label = value;
            cx.notify();
        }
    }

    /// Compute the animated value for a frame at `now`, and queue a label
    /// update if the label is shown and out of date.
    pub(crate) fn frame(&self, now: Instant, show_label: bool, sender: &LabelSender) -> f32 {
        let current = self.animated_value(now);
        if show_label {
            let label = label_value(current);
            if label != self.label {
                sender.send(label);
            }
        }
        current
    }
}

struct RingPrepaint {
    offset: f32,
    origin: Point<Pixels>,
}

impl ProgressDisplay {
    /// The ring state kept for this element's id across frames.
    pub(crate) fn circle_state(&self, window: &mut Window, cx: &mut App) -> Entity<CircleState> {
        let value = self.effective_value();
        let timing = self.timing;
        window.use_keyed_state(self.id.clone(), cx, |_, cx| {
            CircleState::new(value, timing, cx)
        })
    }

    pub(super) fn render_circle(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.progress_theme();
        let outer_color = self.outer_ring_color.unwrap_or(theme.outer_ring);
        let progress_color = self.progress_ring_color.unwrap_or(theme.progress_ring);
        let label_color = self.label_color.unwrap_or(theme.label);

        let metrics = self.metrics();
        let geometry = metrics.geometry();
        let diameter = px(metrics.diameter);
        let value = self.effective_value();
        let timing = self.timing;
        let show_label = self.show_label;

        let state = self.circle_state(window, cx);
        let now = Instant::now();
        state.update(cx, |state, _| state.set_target(value, timing, now));

        let (label, sender) = {
            let state = state.read(cx);
            if state.is_animating(now) {
                window.request_animation_frame();
            }
            (state.label(), state.label_sync.sender())
        };

        div()
            .id(self.id)
            .relative()
            .flex()
            .items_center()
            .justify_center()
            .size(diameter)
            .refine_style(&self.style)
            .child(
                canvas(
                    move |bounds: Bounds<Pixels>, _: &mut Window, cx: &mut App| {
                        let current = state.read(cx).frame(Instant::now(), show_label, &sender);
                        RingPrepaint {
                            offset: geometry.dash_offset(current),
                            origin: bounds.origin,
                        }
                    },
                    move |_, prepaint: RingPrepaint, window: &mut Window, _: &mut App| {
                        paint_ring(
                            &geometry,
                            prepaint.origin,
                            prepaint.offset,
                            outer_color,
                            progress_color,
                            window,
                        );
                    },
                )
                .absolute()
                .top_0()
                .left_0()
                .size(diameter),
            )
            .when(show_label, |this| {
                this.child(
                    div()
                        .absolute()
                        .top_0()
                        .left_0()
                        .size(diameter)
                        .flex()
                        .items_center()
                        .justify_center()
                        .text_color(label_color)
                        .text_size(px(metrics.label_size))
                        .refine_style(&self.label_style)
                        .child(label_text(label)),
                )
            })
    }
}

fn build_arc(
    geometry: &RingGeometry,
    origin: Point<Pixels>,
    start: f32,
    end: f32,
    closed: bool,
) -> Option<Path<Pixels>> {
    let mut points = geometry
        .sample(start, end)
        .into_iter()
        .map(|(x, y)| point(origin.x + px(x), origin.y + px(y)));

    let mut builder = PathBuilder::stroke(px(geometry.stroke_width));
    builder.move_to(points.next()?);
    for p in points {
        builder.line_to(p);
    }
    if closed {
        builder.close();
    }
    builder.build().ok()
}

fn paint_cap(
    geometry: &RingGeometry,
    origin: Point<Pixels>,
    distance: f32,
    color: Hsla,
    window: &mut Window,
) {
    let (x, y) = geometry.point_at(distance);
    let radius = geometry.stroke_width / 2.;
    let bounds = Bounds::new(
        point(origin.x + px(x - radius), origin.y + px(y - radius)),
        size(px(geometry.stroke_width), px(geometry.stroke_width)),
    );
    window.paint_quad(fill(bounds, color).corner_radii(Corners::all(px(radius))));
}

/// Paint the static ring and the visible parts of the progress arc.
fn paint_ring(
    geometry: &RingGeometry,
    origin: Point<Pixels>,
    offset: f32,
    outer_color: Hsla,
    progress_color: Hsla,
    window: &mut Window,
) {
    if geometry.radius() <= 0. || geometry.stroke_width <= 0. {
        return;
    }

    let circumference = geometry.circumference();
    if let Some(path) = build_arc(geometry, origin, 0., circumference, true) {
        window.paint_path(path, outer_color);
    }

    for (start, end) in geometry.visible_spans(offset) {
        if end - start < MIN_SPAN {
            continue;
        }

        let closed = start <= 0. && end >= circumference;
        if let Some(path) = build_arc(geometry, origin, start, end, closed) {
            window.paint_path(path, progress_color);
        }
        // Round line caps.
        if !closed {
            paint_cap(geometry, origin, start, progress_color, window);
            paint_cap(geometry, origin, end, progress_color, window);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::CircleMetrics;
    use gpui::prelude::FluentBuilder as _;
    use gpui::{AppContext as _, Render, TestAppContext, VisualTestContext, WeakEntity};
    use std::time::Duration;

    fn linear(t: f32) -> f32 {
        t
    }

    fn timing() -> Timing {
        Timing::new(Duration::from_millis(100)).with_easing(linear)
    }

    #[gpui::test]
    fn test_initial_state(cx: &mut TestAppContext) {
        let state = cx.new(|cx| CircleState::new(40., timing(), cx));
        let now = Instant::now();

        let (value, animating, label) = state.update(cx, |state, _| {
            (state.animated_value(now), state.is_animating(now), state.label())
        });
        assert_eq!(value, 40.);
        assert!(!animating);
        assert_eq!(label, 0);
    }

    #[gpui::test]
    fn test_label_follows_animation(cx: &mut TestAppContext) {
        let state = cx.new(|cx| CircleState::new(20., timing(), cx));
        let sender = state.update(cx, |state, _| state.label_sync.sender());
        let now = Instant::now();

        assert!(state.update(cx, |state, _| state.set_target(80., timing(), now)));
        assert!(!state.update(cx, |state, _| state.set_target(80., timing(), now)));

        let mut labels = vec![];
        for frame in 0..=8u64 {
            let at = now + Duration::from_millis(frame * 16);
            state.update(cx, |state, _| {
                state.frame(at, true, &sender);
            });
            cx.run_until_parked();
            labels.push(state.update(cx, |state, _| state.label()));
        }

        assert_eq!(labels.first(), Some(&20));
        assert_eq!(labels.last(), Some(&80));
        assert!(labels.windows(2).all(|w| w[0] <= w[1]));
        let intermediate = labels.iter().filter(|v| **v > 20 && **v < 80).count();
        assert!(intermediate >= 4, "labels: {:?}", labels);
        assert!(labels.windows(2).all(|w| w[1] - w[0] <= 10));
    }

    #[gpui::test]
    fn test_hidden_label_is_not_synced(cx: &mut TestAppContext) {
        let state = cx.new(|cx| CircleState::new(55., timing(), cx));
        let sender = state.update(cx, |state, _| state.label_sync.sender());

        let value = state.update(cx, |state, _| state.frame(Instant::now(), false, &sender));
        cx.run_until_parked();
        assert_eq!(value, 55.);
        assert_eq!(state.update(cx, |state, _| state.label()), 0);
    }

    #[gpui::test]
    fn test_overshoot_caps_label_only(cx: &mut TestAppContext) {
        let state = cx.new(|cx| CircleState::new(150., timing(), cx));
        let sender = state.update(cx, |state, _| state.label_sync.sender());

        let value = state.update(cx, |state, _| state.frame(Instant::now(), true, &sender));
        cx.run_until_parked();

        assert_eq!(state.update(cx, |state, _| state.label()), 100);
        assert_eq!(label_text(state.update(cx, |state, _| state.label())).to_string(), "100%");

        let geometry = CircleMetrics::resolve(None, None, None).geometry();
        let offset = geometry.dash_offset(value);
        assert!((offset + geometry.circumference() / 2.).abs() < 1e-3);
    }

    #[gpui::test]
    fn test_release_mid_animation(cx: &mut TestAppContext) {
        let state = cx.new(|cx| CircleState::new(0., timing(), cx));
        let sender = state.update(cx, |state, _| state.label_sync.sender());
        let now = Instant::now();
        state.update(cx, |state, _| state.set_target(100., timing(), now));
        state.update(cx, |state, _| {
            state.frame(now + Duration::from_millis(50), true, &sender);
        });

        let weak = state.downgrade();
        drop(state);
        cx.update(|_| {});
        cx.run_until_parked();
        assert!(weak.upgrade().is_none());

        sender.send(75);
        cx.run_until_parked();
        assert!(weak.upgrade().is_none());
    }

    /// A window root that renders one circular progress and keeps a handle
    /// to its keyed state.
    struct RingHost {
        value: f32,
        show: bool,
        state: Option<WeakEntity<CircleState>>,
    }

    impl RingHost {
        fn new(value: f32) -> Self {
            Self {
                value,
                show: true,
                state: None,
            }
        }
    }

    impl Render for RingHost {
        fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
            let progress = ProgressDisplay::new("ring")
                .circle()
                .value(self.value)
                .timing(Timing::new(Duration::from_millis(600)).with_easing(linear));
            if self.show {
                self.state = Some(progress.circle_state(window, cx).downgrade());
            }

            div().size_full().when(self.show, |this| this.child(progress))
        }
    }

    fn redraw(cx: &mut VisualTestContext) {
        cx.update(|window, _| window.refresh());
        cx.run_until_parked();
    }

    fn rendered_state(
        host: &Entity<RingHost>,
        cx: &mut VisualTestContext,
    ) -> Entity<CircleState> {
        host.update(cx, |host, _| host.state.clone())
            .and_then(|state| state.upgrade())
            .expect("ring state is kept while rendered")
    }

    #[gpui::test]
    fn test_rendered_label_follows_animation(cx: &mut TestAppContext) {
        cx.update(crate::init);
        let (host, cx) = cx.add_window_view(|_, _| RingHost::new(20.));
        cx.run_until_parked();

        let state = rendered_state(&host, cx);
        assert_eq!(state.update(cx, |state, _| state.label()), 20);
        assert!(!state.update(cx, |state, _| state.is_animating(Instant::now())));

        host.update(cx, |host, cx| {
            host.value = 80.;
            cx.notify();
        });
        cx.run_until_parked();
        assert_eq!(state.update(cx, |state, _| state.animation.get().target()), 80.);

        let mut labels = vec![20];
        for _ in 0..300 {
            std::thread::sleep(Duration::from_millis(10));
            redraw(cx);
            let (label, animating) =
                state.update(cx, |state, _| (state.label(), state.is_animating(Instant::now())));
            labels.push(label);
            if label == 80 && !animating {
                break;
            }
        }

        assert_eq!(labels.last(), Some(&80), "labels: {:?}", labels);
        assert!(labels.windows(2).all(|w| w[0] <= w[1]), "labels: {:?}", labels);
        let intermediate = labels.iter().filter(|v| **v > 20 && **v < 80).count();
        assert!(intermediate >= 3, "labels: {:?}", labels);

        // Same element id on the next frames, same state.
        assert_eq!(rendered_state(&host, cx), state);
    }

    #[gpui::test]
    fn test_unmount_mid_animation_releases_state(cx: &mut TestAppContext) {
        cx.update(crate::init);
        let (host, cx) = cx.add_window_view(|_, _| RingHost::new(0.));
        cx.run_until_parked();

        host.update(cx, |host, cx| {
            host.value = 100.;
            cx.notify();
        });
        std::thread::sleep(Duration::from_millis(30));
        redraw(cx);

        let (weak, sender) = {
            let state = rendered_state(&host, cx);
            let sender = state.update(cx, |state, _| {
                assert!(state.is_animating(Instant::now()));
                assert!(state.label() > 0 && state.label() < 100);
                state.label_sync.sender()
            });
            (state.downgrade(), sender)
        };

        host.update(cx, |host, cx| {
            host.show = false;
            cx.notify();
        });
        redraw(cx);
        cx.update(|_, _| {});
        cx.run_until_parked();
        assert!(weak.upgrade().is_none());

        // The receiving task went away with the state.
        assert!(!sender.send(75));
        redraw(cx);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_ring_endpoints() {
        let geometry = CircleMetrics::resolve(None, None, None).geometry();

        assert!((geometry.dash_offset(0.) - geometry.circumference()).abs() < 1e-3);
        assert!(geometry.dash_offset(100.).abs() < 1e-3);
        assert!(geometry.visible_spans(geometry.dash_offset(0.)).is_empty());
    }
}
