use gpui::App;

mod async_util;
mod styled;
mod theme;

pub mod progress;

pub use styled::*;
pub use theme::*;

pub use progress::{ProgressDisplay, ProgressMode, ProgressModel, ProgressView};

/// Initialize the progress components.
///
/// You must initialize before using any of the components.
pub fn init(cx: &mut App) {
    theme::init(cx);
}
