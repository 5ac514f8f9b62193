mod runtime;

use super::messages::Message;
use super::state::{App, viewport_for_window};
use iced::event;
use iced::time;
use iced::window;
use iced::{Subscription, Task};
use std::time::Duration;
use tracing::debug;
use unroll_core::{Effect, Input};

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions = vec![event::listen_with(runtime::runtime_event_to_message)];
        if app.coordinator.wants_frames() {
            subscriptions.push(window::frames().map(Message::Frame));
        }
        if app.coordinator.pending_timers() > 0 || app.deck.awaiting_open_sound_end() {
            let poll = Duration::from_millis(app.coordinator.config().timer_poll_ms.max(1));
            subscriptions.push(time::every(poll).map(Message::Tick));
        }
        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }

    /// Translate a UI message into coordinator inputs and collect their effects.
    fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let now_ms = self.now_ms();
        match message {
            Message::AssetLoaded { index, loaded } => {
                let mut effects = Vec::new();
                let is_scroll_image = self
                    .coordinator
                    .asset(index)
                    .is_some_and(|asset| asset.source == self.coordinator.config().scroll_image);
                if let (true, Some(metrics)) = (is_scroll_image, loaded.metrics) {
                    effects.extend(self.coordinator.handle(now_ms, Input::ImageMeasured(metrics)));
                }
                effects.extend(self.coordinator.handle(
                    now_ms,
                    Input::AssetSettled {
                        index,
                        outcome: loaded.outcome,
                    },
                ));
                effects
            }
            Message::ScrollClicked => self.coordinator.handle(now_ms, Input::Click),
            Message::Frame(_) => self.coordinator.handle(now_ms, Input::Frame),
            Message::Tick(_) => {
                let mut effects = self.coordinator.handle(now_ms, Input::Tick);
                if self.deck.take_open_sound_end() {
                    debug!("Opening sound finished");
                    effects.extend(self.coordinator.handle(now_ms, Input::OpenSoundEnded));
                }
                effects
            }
            Message::WindowResized { width, height } => {
                let ratio = self.coordinator.config().content_height_ratio;
                let viewport = viewport_for_window(width, height, ratio);
                self.coordinator.handle(now_ms, Input::Resize(viewport))
            }
            Message::PlaybackFailed { track, reason } => self
                .coordinator
                .handle(now_ms, Input::PlaybackRejected { track, reason }),
        }
    }
}
