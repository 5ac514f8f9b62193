use super::super::messages::Message;
use super::super::state::{App, IMAGE_SCROLL_ID};
use crate::asset_io::load_asset;
use iced::Event;
use iced::Task;
use iced::event;
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::window;
use tracing::{debug, info};
use unroll_core::Effect;
use unroll_core::audio::AudioCommand;

impl App {
    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::LoadAsset { index, descriptor } => {
                debug!(index, source = %descriptor.source, "Loading asset");
                Task::perform(load_asset(self.asset_root.clone(), descriptor), move |loaded| {
                    Message::AssetLoaded { index, loaded }
                })
            }
            Effect::Progress(progress) => {
                debug!(
                    completed = progress.completed,
                    total = progress.total,
                    "Loading progress"
                );
                Task::none()
            }
            Effect::Ready(reason) => {
                info!(?reason, "Hiding loading overlay");
                Task::none()
            }
            Effect::ScrollImageTo(x) => {
                scrollable::scroll_to(IMAGE_SCROLL_ID.clone(), AbsoluteOffset { x, y: 0.0 })
            }
            Effect::Audio(command) => {
                let track = match command {
                    AudioCommand::Play { track, .. } | AudioCommand::Stop { track } => track,
                };
                match self.deck.execute(command) {
                    Ok(()) => Task::none(),
                    Err(err) => Task::done(Message::PlaybackFailed {
                        track,
                        reason: format!("{err:#}"),
                    }),
                }
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        _ => None,
    }
}
