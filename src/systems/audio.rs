//! Audio system implementation backed by a dedicated thread and Raylib.
//!
//! This module hosts the background audio thread and the systems that bridge
//! it with the ECS world:
//! - [`audio_thread`] runs on its own OS thread, owns the Raylib audio device,
//!   and processes [`AudioCmd`] messages, emitting [`AudioMessage`] responses.
//! - [`forward_audio_cmds`] sends the frame's commands (footsteps included)
//!   over the channel.
//! - [`poll_audio_messages`] drains the thread's replies into the ECS mailbox
//!   and [`log_audio_messages`] reports failures.
//!
//! Raylib audio calls stay on the audio thread; the game thread only talks to
//! it through `crossbeam-channel`.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};

/// Drain pending messages from the audio thread into `Messages<AudioMessage>`.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS AudioCmd messages to the audio thread via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // ignore send error on shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for AudioCmd so same-frame readers can observe writes.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Log what the audio thread reports back.
pub fn log_audio_messages(mut reader: MessageReader<AudioMessage>) {
    for msg in reader.read() {
        match msg {
            AudioMessage::FxLoadFailed { id, error } => {
                warn!("footstep clip '{}' failed to load: {}", id, error)
            }
            AudioMessage::FxLoaded { id } => debug!("footstep clip '{}' ready", id),
            other => debug!("audio: {:?}", other),
        }
    }
}

/// Without a device nothing can play: answer every load with a failure and
/// drop the rest until [`AudioCmd::Shutdown`], so senders never block.
fn reject_commands(rx_cmd: &Receiver<AudioCmd>, tx_evt: &Sender<AudioMessage>) {
    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::Shutdown => break,
            AudioCmd::LoadFx { id, .. } => {
                let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                    id,
                    error: "no audio device".to_string(),
                });
            }
            AudioCmd::PlayFx { .. } => {}
        }
    }
}

/// Entry point of the dedicated audio thread.
///
/// Owns the Raylib audio device and every loaded [`Sound`]. Commands are
/// drained without blocking, finished one-shots are reported once, and the
/// loop sleeps briefly between iterations. Returns after
/// [`AudioCmd::Shutdown`].
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("[audio] failed to initialize audio device: {}", e);
            reject_commands(&rx_cmd, &tx_evt);
            return;
        }
    };

    info!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();
    let mut fx_playing: FxHashSet<String> = FxHashSet::default();

    'run: loop {
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        debug!("[audio] fx loaded id='{}' path='{}'", id, path);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_evt.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayFx { id } => {
                    if let Some(sound) = sounds.get(&id) {
                        debug!("[audio] fx play id='{}'", id);
                        sound.play();
                        fx_playing.insert(id);
                    } else {
                        debug!("[audio] fx play skipped id='{}' reason='not loaded'", id);
                    }
                }
                AudioCmd::Shutdown => {
                    info!("[audio] shutdown requested");
                    sounds.clear();
                    fx_playing.clear();
                    let _ = tx_evt.send(AudioMessage::FxUnloadedAll);
                    break 'run;
                }
            }
        }

        // Report each one-shot once when Raylib stops playing it.
        let fx_ended: Vec<String> = fx_playing
            .iter()
            .filter(|id| !sounds.get(*id).map(|s| s.is_playing()).unwrap_or(false))
            .cloned()
            .collect();
        for id in fx_ended {
            fx_playing.remove(&id);
            let _ = tx_evt.send(AudioMessage::FxFinished { id });
        }

        std::thread::sleep(std::time::Duration::from_millis(10));
    } // 'run

    info!(
        "[audio] thread exiting (id={:?})",
        std::thread::current().id()
    );

    // sounds drop before `audio`
    drop(sounds);
}
