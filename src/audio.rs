use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;

const ARROW_SOUND_PATH: &str = "assets/sounds/arrow.wav";
const ARROW_VOLUME: f32 = 0.05;

/// Audio manager for playing sound effects
pub struct AudioManager {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    /// Pre-loaded arrow release sound (None if the file is missing)
    arrow_sound: Option<Buffered<Decoder<BufReader<File>>>>,
}

impl AudioManager {
    /// Opens the default output device and pre-loads the sound effects.
    /// Fails only if there is no output device at all.
    pub fn new() -> Result<Self, rodio::StreamError> {
        let (stream, stream_handle) = OutputStream::try_default()?;

        let arrow_sound = match Self::load(ARROW_SOUND_PATH) {
            Ok(sound) => Some(sound),
            Err(err) => {
                log::warn!("Could not load {ARROW_SOUND_PATH}: {err}. Arrows will be silent");
                None
            }
        };

        Ok(Self {
            _stream: stream,
            stream_handle,
            arrow_sound,
        })
    }

    fn load(
        path: &str,
    ) -> Result<Buffered<Decoder<BufReader<File>>>, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        let source = Decoder::new(BufReader::new(file))?;
        Ok(source.buffered())
    }

    /// Play the arrow release sound
    pub fn play_arrow_sound(&self) {
        if let Some(arrow_sound) = &self.arrow_sound {
            // Playback errors are not worth interrupting the game for
            if let Ok(sink) = Sink::try_new(&self.stream_handle) {
                sink.set_volume(ARROW_VOLUME);
                sink.append(arrow_sound.clone());
                sink.detach();
            }
        }
    }
}
