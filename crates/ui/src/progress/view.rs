use gpui::{Context, Entity, IntoElement, Render, Subscription, Window};

use super::{ProgressDisplay, ProgressValue};

/// An observable progress value, e.g. owned by a task that reports progress.
pub struct ProgressModel {
    progress: ProgressValue,
}

impl ProgressModel {
    /// Create a model, a non-finite `progress` starts at 0.
    pub fn new(progress: f32) -> Self {
        Self {
            progress: ProgressValue::new(progress).unwrap_or_default(),
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress.get()
    }

    /// Set the progress and notify observers if it changed.
    ///
    /// NaN and infinity are ignored and the current progress is kept.
    pub fn set_progress(&mut self, progress: f32, cx: &mut Context<Self>) {
        let progress = match ProgressValue::new(progress) {
            Ok(progress) => progress,
            Err(err) => {
                tracing::warn!("{}, keeping {}", err, self.progress.get());
                return;
            }
        };

        if self.progress != progress {
            self.progress = progress;
            cx.notify();
        }
    }
}

/// A view that renders a [`ProgressDisplay`] for a [`ProgressModel`] and
/// re-renders whenever the model changes.
pub struct ProgressView {
    model: Entity<ProgressModel>,
    template: ProgressDisplay,
    progress: f32,
    _subscriptions: Vec<Subscription>,
}

impl ProgressView {
    pub fn new(
        model: Entity<ProgressModel>,
        template: ProgressDisplay,
        cx: &mut Context<Self>,
    ) -> Self {
        let progress = model.read(cx).progress();
        let _subscriptions = vec![cx.observe(&model, |this, model, cx| {
            this.progress = model.read(cx).progress();
            cx.notify();
        })];

        Self {
            model,
            template,
            progress,
            _subscriptions,
        }
    }

    pub fn model(&self) -> &Entity<ProgressModel> {
        &self.model
    }

    /// The progress value as of the last model notification.
    pub fn progress(&self) -> f32 {
        self.progress
    }
}

impl Render for ProgressView {
    fn render(&mut self, _: &mut Window, _: &mut Context<Self>) -> impl IntoElement {
        self.template.clone().value(self.progress)
    }
}
