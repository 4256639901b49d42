use bevy_ecs::message::{Message, MessageWriter};

use crate::capabilities::AudioSink;

/// Commands sent *to* the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    LoadFx { id: String, path: String },
    PlayFx { id: String },
    Shutdown,
}

/// Messages sent *back* from the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    FxLoaded { id: String },
    FxUnloadedAll,
    FxLoadFailed { id: String, error: String },
    FxFinished { id: String }, // one-shot reached its end
}

/// Footsteps become `PlayFx` commands; the clip id is its path.
impl AudioSink for MessageWriter<'_, AudioCmd> {
    fn play_one_shot(&mut self, clip: &str) {
        self.write(AudioCmd::PlayFx {
            id: clip.to_string(),
        });
    }
}
