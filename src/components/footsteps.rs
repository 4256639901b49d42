//! Self-avoiding footstep clip picker.
//!
//! [`FootstepPool`] keeps an ordered list of clip ids where slot 0 always
//! holds the most recently played clip. Each draw picks a uniform index in
//! `[1, len)`, returns that clip and swaps it into slot 0, so the same clip
//! can never play twice in a row.
//!
//! Only the index draw is pluggable (see
//! [`IndexSource`](crate::capabilities::IndexSource)); tests inject a
//! scripted source, the game uses a seeded `fastrand::Rng`.

use crate::capabilities::IndexSource;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FootstepPool {
    clips: Vec<String>,
}

impl FootstepPool {
    pub fn new<I, S>(clips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            clips: clips.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Pools with fewer than two clips have nothing to pick from once slot 0
    /// is excluded, so they never play.
    pub fn can_play(&self) -> bool {
        self.clips.len() >= 2
    }

    /// Current ordering, slot 0 first.
    pub fn clips(&self) -> &[String] {
        &self.clips
    }

    /// Draw the next clip and move it to the front.
    ///
    /// Returns `None` when the pool cannot play (see [`can_play`](Self::can_play)).
    pub fn next_clip<R: IndexSource + ?Sized>(&mut self, rng: &mut R) -> Option<&str> {
        if !self.can_play() {
            return None;
        }
        let n = rng.index_in(1..self.clips.len());
        self.clips.swap(0, n);
        Some(self.clips[0].as_str())
    }
}
