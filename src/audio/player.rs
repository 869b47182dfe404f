// AlMumin - Quran Reader Core
// Copyright (C) 2025 AlMumin contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Verse-by-verse recitation with auto-advance
//!
//! # States
//! - `Idle`
//! - `Playing { index, verse }` - `index` into the chapter playlist, `verse`
//!   the verse's position within the chapter
//!
//! # Transitions
//! - `start(i)`: tear down any live clip, resolve the clip URL for verse `i`,
//!   play it; on natural completion continue with `i + 1`, or go `Idle` after
//!   the last verse
//! - `stop()`: `Idle` from any state, no further auto-advance
//! - resolver or sink failure: logged, then `Idle`
//!
//! Only one clip is ever live. Each `start` runs in its own task that owns the
//! clip; `stop` signals it over a oneshot channel and awaits the task, so the
//! previous clip is released before a new one is requested. Dropping the
//! player aborts the task.

use crate::api::client::QuranClient;
use crate::audio::sink::AudioSink;
use crate::error::{ReaderError, Result};
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Resolves the clip URL for a verse
pub trait AudioSource: Send + Sync + 'static {
    /// `Ok(None)` if the reciter has no clip for this verse
    fn clip_url(
        &self,
        surah: u32,
        ayah: u32,
        reciter: &str,
    ) -> impl Future<Output = Result<Option<String>>> + Send;
}

impl AudioSource for QuranClient {
    async fn clip_url(&self, surah: u32, ayah: u32, reciter: &str) -> Result<Option<String>> {
        let clip = self.get_ayah_audio(surah, ayah, reciter).await?;
        Ok(clip.clip_url().map(str::to_string))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing {
        index: usize,
        verse: u32,
    },
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }

    /// Verse position currently playing, if any
    pub fn verse(&self) -> Option<u32> {
        match self {
            Self::Playing { verse, .. } => Some(*verse),
            Self::Idle => None,
        }
    }
}

struct Shared<S, K> {
    source: S,
    sink: K,
    surah: u32,
    verses: Vec<u32>,
    state: watch::Sender<PlaybackState>,
    /// Generation of the task allowed to publish state
    current: Mutex<u64>,
}

impl<S, K> Shared<S, K> {
    /// Publish only if `generation` has not been superseded
    fn publish(&self, generation: u64, state: PlaybackState) {
        let current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if *current == generation {
            self.state.send_replace(state);
        }
    }

    /// Supersede every running task and go idle; returns the new generation
    fn invalidate(&self) -> u64 {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += 1;
        self.state.send_replace(PlaybackState::Idle);
        *current
    }
}

struct ActivePlayback {
    handle: JoinHandle<()>,
    cancel_tx: oneshot::Sender<()>,
}

/// Sequential player bound to one chapter's playlist
pub struct SequentialPlayer<S, K> {
    shared: Arc<Shared<S, K>>,
    reciter: String,
    active: Option<ActivePlayback>,
}

impl<S, K> std::fmt::Debug for SequentialPlayer<S, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequentialPlayer")
            .field("surah", &self.shared.surah)
            .field("verses", &self.shared.verses.len())
            .field("reciter", &self.reciter)
            .field("state", &*self.shared.state.borrow())
            .finish()
    }
}

impl<S, K> SequentialPlayer<S, K>
where
    S: AudioSource,
    K: AudioSink,
{
    /// `verses` are positions within chapter `surah`, in playback order
    pub fn new(source: S, sink: K, surah: u32, verses: Vec<u32>, reciter: impl Into<String>) -> Self {
        let (state, _) = watch::channel(PlaybackState::Idle);
        Self {
            shared: Arc::new(Shared {
                source,
                sink,
                surah,
                verses,
                state,
                current: Mutex::new(0),
            }),
            reciter: reciter.into(),
            active: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        *self.shared.state.borrow()
    }

    /// State changes; the receiver starts at the current state
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.shared.state.subscribe()
    }

    pub fn len(&self) -> usize {
        self.shared.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.verses.is_empty()
    }

    pub fn reciter(&self) -> &str {
        &self.reciter
    }

    /// Takes effect on the next `start`
    pub fn set_reciter(&mut self, reciter: impl Into<String>) {
        self.reciter = reciter.into();
    }

    /// Play from playlist index `index`, replacing any current playback
    ///
    /// # Errors
    /// `InvalidInput` if `index` is out of range; the current playback is left
    /// untouched in that case.
    pub async fn start(&mut self, index: usize) -> Result<()> {
        if index >= self.shared.verses.len() {
            return Err(ReaderError::invalid_input(format!(
                "Verse index {} out of range (chapter {} has {} verses)",
                index,
                self.shared.surah,
                self.shared.verses.len()
            )));
        }

        self.stop().await;

        let generation = self.shared.invalidate();
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let shared = Arc::clone(&self.shared);
        let reciter = self.reciter.clone();

        debug!(surah = shared.surah, index, generation, "starting playback");
        let handle = tokio::spawn(run(shared, generation, index, reciter, cancel_rx));
        self.active = Some(ActivePlayback { handle, cancel_tx });
        Ok(())
    }

    /// Go idle and release the live clip before returning
    pub async fn stop(&mut self) {
        self.shared.invalidate();
        if let Some(active) = self.active.take() {
            let _ = active.cancel_tx.send(());
            if let Err(e) = active.handle.await {
                if !e.is_cancelled() {
                    warn!(error = %e, "playback task panicked");
                }
            }
        }
    }

    /// Synchronous stop for contexts that cannot await (e.g. `Drop`)
    ///
    /// The task is aborted; its clip is released when the runtime drops it.
    pub fn halt(&mut self) {
        self.shared.invalidate();
        if let Some(active) = self.active.take() {
            let _ = active.cancel_tx.send(());
            active.handle.abort();
        }
    }

    /// Wait for the current run to reach the end of the chapter (or fail)
    ///
    /// Returns immediately when nothing is playing.
    pub async fn wait_until_idle(&mut self) {
        if let Some(active) = self.active.as_mut() {
            if let Err(e) = (&mut active.handle).await {
                if !e.is_cancelled() {
                    warn!(error = %e, "playback task panicked");
                }
            }
            self.active = None;
        }
    }
}

impl<S, K> Drop for SequentialPlayer<S, K> {
    fn drop(&mut self) {
        self.shared.invalidate();
        if let Some(active) = self.active.take() {
            let _ = active.cancel_tx.send(());
            active.handle.abort();
        }
    }
}

async fn run<S, K>(
    shared: Arc<Shared<S, K>>,
    generation: u64,
    mut index: usize,
    reciter: String,
    mut cancel_rx: oneshot::Receiver<()>,
) where
    S: AudioSource,
    K: AudioSink,
{
    loop {
        let verse = shared.verses[index];
        let outcome = tokio::select! {
            result = play_one(&shared, generation, index, verse, &reciter) => result,
            _ = &mut cancel_rx => {
                debug!(surah = shared.surah, verse, "playback cancelled");
                return;
            }
        };

        match outcome {
            Ok(()) => {
                index += 1;
                if index >= shared.verses.len() {
                    debug!(surah = shared.surah, "reached end of chapter");
                    shared.publish(generation, PlaybackState::Idle);
                    return;
                }
            }
            Err(e) => {
                error!(surah = shared.surah, verse, error = %e, "playback failed");
                shared.publish(generation, PlaybackState::Idle);
                return;
            }
        }
    }
}

async fn play_one<S, K>(
    shared: &Shared<S, K>,
    generation: u64,
    index: usize,
    verse: u32,
    reciter: &str,
) -> Result<()>
where
    S: AudioSource,
    K: AudioSink,
{
    let url = shared
        .source
        .clip_url(shared.surah, verse, reciter)
        .await?
        .ok_or(ReaderError::AudioUnavailable {
            surah: shared.surah,
            ayah: verse,
        })?;

    shared.publish(generation, PlaybackState::Playing { index, verse });
    shared.sink.play(&url).await
}
