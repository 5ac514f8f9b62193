mod constants;

pub(crate) use constants::*;

use super::messages::Message;
use crate::asset_io::resolve;
use crate::audio::AudioDeck;
use iced::Task;
use iced::widget::image::Handle;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use unroll_core::Coordinator;
use unroll_core::image_scroller::Viewport;

/// Core application state.
pub struct App {
    pub(super) coordinator: Coordinator,
    pub(super) started: Instant,
    pub(super) deck: AudioDeck,
    pub(super) asset_root: PathBuf,
    pub(super) scroll_image: Handle,
}

impl App {
    pub(super) fn bootstrap(coordinator: Coordinator, asset_root: PathBuf) -> (App, Task<Message>) {
        let config = coordinator.config();
        let scroll_image = Handle::from_path(resolve(&asset_root, &config.scroll_image));
        let deck = AudioDeck::new(
            track_path(&asset_root, config.open_sound.as_deref()),
            track_path(&asset_root, config.music.as_deref()),
        );
        let mut app = App {
            coordinator,
            started: Instant::now(),
            deck,
            asset_root,
            scroll_image,
        };

        let (width, height) = {
            let config = app.coordinator.config();
            (config.window_width, config.window_height)
        };
        info!(width, height, "Launching window");
        let now_ms = app.now_ms();
        let effects = app.coordinator.start(now_ms);
        let init_task = Task::batch(effects.into_iter().map(|effect| app.run_effect(effect)));
        (app, init_task)
    }

    /// Milliseconds since launch; the only clock the coordinator sees.
    pub(super) fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}

fn track_path(root: &Path, source: Option<&str>) -> Option<PathBuf> {
    source
        .map(str::trim)
        .filter(|source| !source.is_empty())
        .map(|source| resolve(root, source))
}

/// The image viewport takes the full window width and a fixed share of its height.
pub(super) fn viewport_for_window(width: f32, height: f32, content_height_ratio: f32) -> Viewport {
    Viewport::new(width, height * content_height_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_uses_the_content_share_of_the_window() {
        let viewport = viewport_for_window(1280.0, 800.0, 0.7);
        assert_eq!(viewport.width, 1280.0);
        assert!((viewport.height - 560.0).abs() < 1e-3);
    }

    #[test]
    fn blank_track_paths_mean_no_track() {
        let root = Path::new("/srv/scroll");
        assert_eq!(track_path(root, None), None);
        assert_eq!(track_path(root, Some("  ")), None);
        assert_eq!(
            track_path(root, Some("assets/open.wav")),
            Some(PathBuf::from("/srv/scroll/assets/open.wav"))
        );
    }
}
