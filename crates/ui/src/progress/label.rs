use gpui::{Context, SharedString, Task};

use crate::async_util::{Sender, unbounded};

/// The integer shown in the label for an animated progress value.
///
/// Only the upper bound is capped, so the label never reads more than 100%.
pub fn label_value(animated: f32) -> i32 {
    animated.min(100.).round() as i32
}

pub fn label_text(value: i32) -> SharedString {
    format!("{}%", value).into()
}

/// Sends label values from the paint phase back to the entity that owns them.
///
/// Values are delivered by a task owned by this struct, so dropping it (when
/// the owning entity is released) stops delivery. Queued values are coalesced
/// and only the latest one is applied.
pub(crate) struct LabelSync {
    tx: Sender<i32>,
    _receive_task: Task<()>,
}

impl LabelSync {
    pub(crate) fn new<T: 'static>(
        cx: &mut Context<T>,
        apply: impl Fn(&mut T, i32, &mut Context<T>) + 'static,
    ) -> Self {
        let (tx, rx) = unbounded::<i32>();
        let _receive_task = cx.spawn({
            async move |weak_self, cx| {
                while let Ok(mut value) = rx.recv().await {
                    while let Ok(next) = rx.try_recv() {
                        value = next;
                    }

                    if weak_self
                        .update(cx, |this, cx| apply(this, value, cx))
                        .is_err()
                    {
                        tracing::debug!("label owner released, stop syncing");
                        break;
                    }
                }
            }
        });

        Self { tx, _receive_task }
    }

    pub(crate) fn sender(&self) -> LabelSender {
        LabelSender {
            tx: self.tx.clone(),
        }
    }
}

/// A cloneable, fire-and-forget handle of [`LabelSync`].
#[derive(Clone)]
pub(crate) struct LabelSender {
    tx: Sender<i32>,
}

impl LabelSender {
    /// Queue a label value, returns false if the receiver is gone.
    pub(crate) fn send(&self, value: i32) -> bool {
        self.tx.try_send(value).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpui::{AppContext as _, TestAppContext};
    use std::{cell::Cell, rc::Rc};

    #[test]
    fn test_label_value() {
        assert_eq!(label_value(0.), 0);
        assert_eq!(label_value(42.4), 42);
        assert_eq!(label_value(42.5), 43);
        assert_eq!(label_value(100.), 100);
        assert_eq!(label_value(150.), 100);
        assert_eq!(label_value(-12.), -12);
    }

    #[test]
    fn test_label_text() {
        assert_eq!(label_text(0).to_string(), "0%");
        assert_eq!(label_text(label_value(150.)).to_string(), "100%");
        assert_eq!(label_text(-5).to_string(), "-5%");
    }

    struct Label {
        value: i32,
        sync: LabelSync,
    }

    fn new_label(cx: &mut TestAppContext, applied: Rc<Cell<usize>>) -> gpui::Entity<Label> {
        cx.new(|cx| Label {
            value: 0,
            sync: LabelSync::new(cx, move |this: &mut Label, value, cx| {
                applied.set(applied.get() + 1);
                this.value = value;
                cx.notify();
            }),
        })
    }

    #[gpui::test]
    fn test_label_sync_applies_latest(cx: &mut TestAppContext) {
        let applied = Rc::new(Cell::new(0));
        let label = new_label(cx, applied.clone());

        let sender = label.update(cx, |this, _| this.sync.sender());
        assert!(sender.send(10));
        assert!(sender.send(20));
        assert!(sender.send(30));
        cx.run_until_parked();

        assert_eq!(label.update(cx, |this, _| this.value), 30);
        assert_eq!(applied.get(), 1);

        assert!(sender.send(31));
        cx.run_until_parked();
        assert_eq!(label.update(cx, |this, _| this.value), 31);
        assert_eq!(applied.get(), 2);
    }

    #[gpui::test]
    fn test_label_sync_after_release(cx: &mut TestAppContext) {
        let applied = Rc::new(Cell::new(0));
        let label = new_label(cx, applied.clone());
        let sender = label.update(cx, |this, _| this.sync.sender());
        let weak = label.downgrade();

        drop(label);
        cx.update(|_| {});
        cx.run_until_parked();
        assert!(weak.upgrade().is_none());

        sender.send(50);
        cx.run_until_parked();
        assert_eq!(applied.get(), 0);
    }
}
