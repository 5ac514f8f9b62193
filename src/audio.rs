//! Audio output using `rodio`, one sink per track.

use anyhow::{Context, Result, anyhow};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::{debug, info};
use unroll_core::audio::{AudioCommand, Track};

#[derive(Default)]
struct Channel {
    path: Option<PathBuf>,
    sink: Option<Sink>,
    /// Set while the end of this track should be reported.
    watch_end: bool,
}

impl Channel {
    fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.watch_end = false;
    }
}

pub struct AudioDeck {
    output: Option<(OutputStream, OutputStreamHandle)>,
    open_sound: Channel,
    music: Channel,
}

impl AudioDeck {
    pub fn new(open_sound: Option<PathBuf>, music: Option<PathBuf>) -> Self {
        Self {
            output: None,
            open_sound: Channel::new(open_sound),
            music: Channel::new(music),
        }
    }

    pub fn execute(&mut self, command: AudioCommand) -> Result<()> {
        match command {
            AudioCommand::Play { track, volume } => self.play(track, volume),
            AudioCommand::Stop { track } => {
                debug!(%track, "Stopping track");
                self.channel_mut(track).stop();
                Ok(())
            }
        }
    }

    /// True while the host should keep polling for the opening sound's end.
    pub fn awaiting_open_sound_end(&self) -> bool {
        self.open_sound.watch_end
    }

    /// Report the opening sound's end once, the first time it is seen drained.
    pub fn take_open_sound_end(&mut self) -> bool {
        let channel = &mut self.open_sound;
        let drained = channel.sink.as_ref().is_none_or(Sink::empty);
        if channel.watch_end && drained {
            channel.watch_end = false;
            return true;
        }
        false
    }

    fn play(&mut self, track: Track, volume: f32) -> Result<()> {
        self.channel_mut(track).stop();
        let path = self
            .channel_mut(track)
            .path
            .clone()
            .ok_or_else(|| anyhow!("No file configured for {track}"))?;

        let handle = self.output_handle()?;
        let file = File::open(&path).with_context(|| format!("Opening {}", path.display()))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("Decoding {}", path.display()))?;
        let sink = Sink::try_new(&handle).context("Creating sink")?;
        sink.set_volume(volume);
        sink.append(source);
        sink.play();
        info!(%track, volume, path = %path.display(), "Playing track");

        let channel = self.channel_mut(track);
        channel.sink = Some(sink);
        channel.watch_end = track == Track::OpenSound;
        Ok(())
    }

    fn output_handle(&mut self) -> Result<OutputStreamHandle> {
        if let Some((_, handle)) = &self.output {
            return Ok(handle.clone());
        }
        let (stream, handle) = OutputStream::try_default().context("Opening audio output")?;
        self.output = Some((stream, handle.clone()));
        Ok(handle)
    }

    fn channel_mut(&mut self, track: Track) -> &mut Channel {
        match track {
            Track::OpenSound => &mut self.open_sound,
            Track::Music => &mut self.music,
        }
    }
}
