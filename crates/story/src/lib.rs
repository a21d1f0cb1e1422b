use gpui::{
    App, Bounds, Div, ElementId, Entity, InteractiveElement as _, ParentElement, Render,
    SharedString, Stateful, Styled, Window, WindowBounds, WindowOptions, div, px, rgb, size,
    white,
};
use progress_display::v_flex;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

mod progress_story;

pub use progress_story::ProgressStory;

pub fn init(cx: &mut App) {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "progress_display=trace".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    progress_display::init(cx);
}

/// Open a new window with the view returned by `crate_view_fn`.
pub fn create_new_window<F, V>(title: &str, crate_view_fn: F, cx: &mut App)
where
    V: Render,
    F: FnOnce(&mut Window, &mut App) -> Entity<V> + Send + 'static,
{
    let window_size = size(px(720.0), px(960.0));
    let window_bounds = Bounds::centered(None, window_size, cx);
    let title = SharedString::from(title.to_string());

    cx.spawn(async move |cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(window_bounds)),
            ..Default::default()
        };

        let window = cx.open_window(options, |window, cx| crate_view_fn(window, cx))?;
        window.update(cx, |_, window, _| {
            window.activate_window();
            window.set_window_title(&title);
        })?;

        Ok::<_, anyhow::Error>(())
    })
    .detach();
}

pub(crate) fn section(title: impl Into<SharedString>) -> Div {
    v_flex()
        .w_full()
        .gap_3()
        .p_4()
        .border_1()
        .border_color(rgb(0x1f2937))
        .rounded(px(8.))
        .child(
            div()
                .text_sm()
                .text_color(rgb(0x9ca3af))
                .child(title.into()),
        )
}

pub(crate) fn button(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Stateful<Div> {
    div()
        .id(id)
        .px_3()
        .py_1()
        .rounded(px(4.))
        .bg(rgb(0x1d3255))
        .text_sm()
        .text_color(white())
        .cursor_pointer()
        .hover(|this| this.bg(rgb(0x27447a)))
        .child(label.into())
}
