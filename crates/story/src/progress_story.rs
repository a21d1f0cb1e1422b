use gpui::{
    App, AppContext as _, Context, Entity, FontWeight, IntoElement, ParentElement, Render,
    StatefulInteractiveElement as _, StyleRefinement, Styled, Task, Window, px, rgb,
};
use progress_display::{
    ProgressDisplay, ProgressModel, ProgressView, h_flex, progress::ValuePolicy, v_flex,
};
use std::time::Duration;

use crate::{button, section};

const TASK_STEPS: usize = 20;
const TASK_INTERVAL: Duration = Duration::from_millis(150);

pub struct ProgressStory {
    value: f32,
    model: Entity<ProgressModel>,
    model_view: Entity<ProgressView>,
    _task: Option<Task<()>>,
}

impl ProgressStory {
    pub fn view(_: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(cx))
    }

    pub fn new(cx: &mut Context<Self>) -> Self {
        let model = cx.new(|_| ProgressModel::new(0.));
        let model_view = cx.new(|cx| {
            ProgressView::new(
                model.clone(),
                ProgressDisplay::new("task-progress").circle().diameter(96.),
                cx,
            )
        });

        Self {
            value: 50.,
            model,
            model_view,
            _task: None,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn model(&self) -> &Entity<ProgressModel> {
        &self.model
    }

    pub fn set_value(&mut self, value: f32, cx: &mut Context<Self>) {
        self.value = value;
        cx.notify();
    }

    pub fn step(&mut self, delta: f32, cx: &mut Context<Self>) {
        self.set_value((self.value + delta).clamp(0., 100.), cx);
    }

    /// Simulate a task that reports its progress through the model.
    pub fn start_task(&mut self, cx: &mut Context<Self>) {
        let model = self.model.clone();
        model.update(cx, |model, cx| model.set_progress(0., cx));

        self._task = Some(cx.spawn(async move |_, cx| {
            for step in 1..=TASK_STEPS {
                cx.background_executor().timer(TASK_INTERVAL).await;
                let progress = step as f32 * 100. / TASK_STEPS as f32;
                if cx
                    .update(|cx| model.update(cx, |model, cx| model.set_progress(progress, cx)))
                    .is_err()
                {
                    break;
                }
            }
            tracing::info!("simulated task finished");
        }));
    }

    fn render_value_buttons(
        &self,
        prefix: &'static str,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        h_flex()
            .gap_2()
            .children([0f32, 25., 75., 100.].into_iter().map(|value| {
                button((prefix, value as usize), format!("{}%", value as i32))
                    .on_click(cx.listener(move |this, _, _, cx| this.set_value(value, cx)))
            }))
            .child(
                button((prefix, 1000usize), "-1")
                    .on_click(cx.listener(|this, _, _, cx| this.step(-1., cx))),
            )
            .child(
                button((prefix, 1001usize), "+1")
                    .on_click(cx.listener(|this, _, _, cx| this.step(1., cx))),
            )
    }
}

impl Render for ProgressStory {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        v_flex()
            .size_full()
            .p_6()
            .gap_4()
            .bg(rgb(0x0b1220))
            .text_color(rgb(0xe5e7eb))
            .child(
                section("Progress Bar")
                    .child(self.render_value_buttons("linear", cx))
                    .child(ProgressDisplay::new("linear-1").value(self.value)),
            )
            .child(
                section("Custom Style")
                    .child(ProgressDisplay::new("linear-2").value(32.).max_w(px(320.)))
                    .child(
                        ProgressDisplay::new("linear-3")
                            .value(150.)
                            .value_policy(ValuePolicy::Clamp)
                            .max_w(px(320.)),
                    ),
            )
            .child(
                section("Circle Progress")
                    .child(self.render_value_buttons("circle", cx))
                    .child(
                        ProgressDisplay::new("circle-1")
                            .circle()
                            .diameter(120.)
                            .value(self.value),
                    )
                    .child(
                        h_flex()
                            .gap_6()
                            .child(
                                ProgressDisplay::new("circle-small")
                                    .circle()
                                    .diameter(48.)
                                    .value(25.),
                            )
                            .child(
                                ProgressDisplay::new("circle-medium")
                                    .circle()
                                    .diameter(64.)
                                    .value(50.),
                            )
                            .child(
                                ProgressDisplay::new("circle-large")
                                    .circle()
                                    .diameter(96.)
                                    .value(75.),
                            )
                            .child(
                                ProgressDisplay::new("circle-no-label")
                                    .circle()
                                    .value(self.value)
                                    .show_label(false),
                            ),
                    )
                    .child(
                        h_flex()
                            .gap_6()
                            .child(
                                ProgressDisplay::new("circle-green")
                                    .circle()
                                    .value(60.)
                                    .progress_ring_color(rgb(0x22c55e))
                                    .outer_ring_color(rgb(0x1f2937)),
                            )
                            .child(
                                ProgressDisplay::new("circle-styled-label")
                                    .circle()
                                    .value(60.)
                                    .progress_ring_color(rgb(0xf59e0b))
                                    .label_color(rgb(0xf59e0b))
                                    .label_style(
                                        StyleRefinement::default().font_weight(FontWeight::BOLD),
                                    ),
                            )
                            .child(
                                ProgressDisplay::new("circle-overshoot")
                                    .circle()
                                    .value(150.)
                                    .duration(Duration::from_millis(800)),
                            ),
                    ),
            )
            .child(
                section("Observed Task")
                    .child(self.model_view.clone())
                    .child(
                        button("start-task", "Start")
                            .on_click(cx.listener(|this, _, _, cx| this.start_task(cx))),
                    ),
            )
    }
}
