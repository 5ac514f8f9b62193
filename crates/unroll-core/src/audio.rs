//! Opening sound followed by background music.
//!
//! Music has two independent triggers: the end of the opening sound and a
//! fixed-delay fallback. Whichever arrives first starts it; the gate makes the
//! second one a no-op.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    OpenSound,
    Music,
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Track::OpenSound => "open-sound",
            Track::Music => "music",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    /// Start the track from its beginning at the given volume.
    Play { track: Track, volume: f32 },
    /// Pause and rewind.
    Stop { track: Track },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrigger {
    OpenSoundEnded,
    Fallback,
    Immediate,
}

#[derive(Debug)]
pub struct AudioCoordinator {
    has_open_sound: bool,
    has_music: bool,
    open_sound_volume: f32,
    music_volume: f32,
    active: bool,
    music_started: bool,
}

impl AudioCoordinator {
    pub fn new(
        has_open_sound: bool,
        has_music: bool,
        open_sound_volume: f32,
        music_volume: f32,
    ) -> Self {
        Self {
            has_open_sound,
            has_music,
            open_sound_volume,
            music_volume,
            active: false,
            music_started: false,
        }
    }

    /// Returns true when the caller should arm the fallback timer.
    pub fn on_open(&mut self, commands: &mut Vec<AudioCommand>) -> bool {
        self.active = true;
        self.music_started = false;
        if self.has_open_sound {
            commands.push(AudioCommand::Play {
                track: Track::OpenSound,
                volume: self.open_sound_volume,
            });
            return self.has_music;
        }
        if let Some(command) = self.start_music(MusicTrigger::Immediate) {
            commands.push(command);
        }
        false
    }

    pub fn start_music(&mut self, trigger: MusicTrigger) -> Option<AudioCommand> {
        if !self.active || !self.has_music || self.music_started {
            debug!(
                ?trigger,
                active = self.active,
                already_started = self.music_started,
                "Music start skipped"
            );
            return None;
        }
        self.music_started = true;
        debug!(?trigger, "Starting background music");
        Some(AudioCommand::Play {
            track: Track::Music,
            volume: self.music_volume,
        })
    }

    /// A rejected music start reopens the gate so a later trigger can retry.
    pub fn on_rejected(&mut self, track: Track) {
        if track == Track::Music {
            self.music_started = false;
        }
    }

    pub fn on_close(&mut self) -> [AudioCommand; 2] {
        self.active = false;
        self.music_started = false;
        [
            AudioCommand::Stop {
                track: Track::OpenSound,
            },
            AudioCommand::Stop {
                track: Track::Music,
            },
        ]
    }

    pub fn music_started(&self) -> bool {
        self.music_started
    }
}
