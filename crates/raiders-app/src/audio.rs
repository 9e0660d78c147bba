//! Sound sink for the headless runner: cues go to the log.

use raiders_core::collaborators::SoundSink;
use raiders_core::enums::SoundCue;

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggedSounds;

impl SoundSink for LoggedSounds {
    fn play(&mut self, cue: SoundCue) {
        log::trace!("sound: {}", cue.tag());
    }
}
