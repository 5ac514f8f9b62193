mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use iced::{Size, Theme, window};
use std::path::PathBuf;
use unroll_core::Coordinator;

/// Launch the window around an already validated coordinator.
pub fn run_app(coordinator: Coordinator, asset_root: PathBuf) -> iced::Result {
    let config = coordinator.config();
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application("Unrolling Scroll", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|_: &App| Theme::Light)
        .run_with(move || App::bootstrap(coordinator, asset_root))
}
