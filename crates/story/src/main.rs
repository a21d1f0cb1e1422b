use progress_display::ProgressTheme;
use progress_display_story::{ProgressStory, create_new_window, init};

fn main() {
    let app = gpui_platform::application();

    // Parse `cargo run -- <theme.json>`
    let theme_path = std::env::args().nth(1);

    app.run(move |cx| {
        init(cx);
        cx.activate(true);

        if let Some(path) = theme_path {
            _ = ProgressTheme::apply_file(path, cx);
        }

        create_new_window("Progress", ProgressStory::view, cx);
    });
}
