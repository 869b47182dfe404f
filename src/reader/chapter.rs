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


//! Chapter detail view
//!
//! Opening a page spawns one task that fetches the source text and the
//! configured translation concurrently. The task belongs to the page:
//! dropping the page (or calling [`ChapterPage::reload`]) aborts it, and a
//! result from a superseded load is discarded, so a late response never
//! updates a page the user has left.
//!
//! On a successful load the reading position is saved as verse 1 of the
//! chapter. Playback goes through a [`SequentialPlayer`] created on first
//! use; it is halted when the page is dropped.

use crate::api::client::QuranClient;
use crate::api::models::{Chapter, ChapterText, Edition};
use crate::audio::player::{AudioSource, PlaybackState, SequentialPlayer};
use crate::audio::sink::AudioSink;
use crate::error::{ReaderError, Result};
use crate::reader::router::Route;
use crate::storage::models::{Bookmark, LastRead};
use crate::storage::store::Store;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Fetches a chapter in its source script and in a translation
pub trait ChapterSource: Send + Sync + 'static {
    fn load_chapter(
        &self,
        number: u32,
        translation: &str,
    ) -> impl Future<Output = Result<(ChapterText, ChapterText)>> + Send;
}

impl ChapterSource for QuranClient {
    async fn load_chapter(&self, number: u32, translation: &str) -> Result<(ChapterText, ChapterText)> {
        tokio::try_join!(
            self.get_surah(number),
            self.get_surah_with_translation(number, translation)
        )
    }
}

/// Both editions of a loaded chapter
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedChapter {
    pub source: ChapterText,
    pub translation: ChapterText,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(Arc<LoadedChapter>),
    Failed { message: String, back: Route },
}

/// A verse as shown on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseCard {
    /// Playlist index within the chapter
    pub index: usize,
    /// Position in the whole text
    pub number: u32,
    pub number_in_surah: u32,
    pub text: String,
    /// Empty when the translation edition has no verse at this index
    pub translation: String,
    pub juz: u32,
    pub page: u32,
    pub sajda: bool,
    pub bookmarked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChapterDetail {
    pub chapter: Chapter,
    pub edition: Option<Edition>,
    pub verses: Vec<VerseCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChapterView {
    Loading,
    Ready(ChapterDetail),
    Failed { message: String, back: Route },
}

impl ChapterView {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl LoadedChapter {
    /// Pair source and translation verses by index
    pub fn detail(&self, store: &Store) -> ChapterDetail {
        let bookmarks = store.bookmarks();
        let verses = self
            .source
            .ayahs
            .iter()
            .enumerate()
            .map(|(index, verse)| VerseCard {
                index,
                number: verse.number,
                number_in_surah: verse.number_in_surah,
                text: verse.text.clone(),
                translation: self
                    .translation
                    .ayahs
                    .get(index)
                    .map(|t| t.text.clone())
                    .unwrap_or_default(),
                juz: verse.juz,
                page: verse.page,
                sajda: verse.sajda,
                bookmarked: bookmarks.contains(self.source.number, verse.number_in_surah),
            })
            .collect();

        ChapterDetail {
            chapter: self.source.summary(),
            edition: self.translation.edition.clone(),
            verses,
        }
    }
}

struct PageShared {
    state: watch::Sender<LoadState>,
    /// Generation of the load allowed to publish
    current: Mutex<u64>,
}

/// Detail page for one chapter
pub struct ChapterPage<C, K> {
    number: u32,
    source: C,
    sink: K,
    store: Store,
    shared: Arc<PageShared>,
    load: Option<JoinHandle<()>>,
    player: Option<SequentialPlayer<C, K>>,
}

impl<C, K> std::fmt::Debug for ChapterPage<C, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChapterPage")
            .field("number", &self.number)
            .field("state", &*self.shared.state.borrow())
            .finish()
    }
}

impl<C, K> ChapterPage<C, K>
where
    C: ChapterSource + AudioSource + Clone,
    K: AudioSink + Clone,
{
    /// Open chapter `number` and start loading it
    ///
    /// Must be called within a Tokio runtime. An out-of-range chapter fails
    /// immediately without a request.
    pub fn open(source: C, sink: K, store: Store, number: u32) -> Self {
        let (state, _) = watch::channel(LoadState::Loading);
        let mut page = Self {
            number,
            source,
            sink,
            store,
            shared: Arc::new(PageShared {
                state,
                current: Mutex::new(0),
            }),
            load: None,
            player: None,
        };

        if let Route::NotFound(_) = Route::chapter(number) {
            page.shared.state.send_replace(LoadState::Failed {
                message: format!("Chapter {} does not exist", number),
                back: Route::ChapterList,
            });
        } else {
            page.spawn_load();
        }
        page
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn route(&self) -> Route {
        Route::chapter(self.number)
    }

    pub fn load_state(&self) -> LoadState {
        self.shared.state.borrow().clone()
    }

    /// Load state changes
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.shared.state.subscribe()
    }

    /// Current view, with bookmark flags read from the store
    pub fn view(&self) -> ChapterView {
        match self.load_state() {
            LoadState::Loading => ChapterView::Loading,
            LoadState::Ready(loaded) => ChapterView::Ready(loaded.detail(&self.store)),
            LoadState::Failed { message, back } => ChapterView::Failed { message, back },
        }
    }

    /// Wait for the in-flight load and return the resulting view
    pub async fn wait_loaded(&mut self) -> ChapterView {
        if let Some(handle) = self.load.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!(chapter = self.number, error = %e, "chapter load task panicked");
                    self.publish_failure(ReaderError::internal("Chapter load failed"));
                }
            }
        }
        self.view()
    }

    /// Reload, e.g. after the translation setting changed
    ///
    /// Any load still in flight is aborted and its result discarded.
    pub fn reload(&mut self) {
        if let Route::NotFound(_) = Route::chapter(self.number) {
            return;
        }
        self.spawn_load();
    }

    /// Add or remove a bookmark on the verse at `number_in_surah`
    ///
    /// Returns whether the verse is bookmarked afterwards.
    pub fn toggle_bookmark(&self, number_in_surah: u32) -> Result<bool> {
        let loaded = self.loaded()?;
        let index = loaded
            .source
            .ayahs
            .iter()
            .position(|v| v.number_in_surah == number_in_surah)
            .ok_or_else(|| {
                ReaderError::not_found(format!("Verse {}:{}", self.number, number_in_surah))
            })?;

        let verse = &loaded.source.ayahs[index];
        let bookmark = Bookmark {
            surah_number: self.number,
            surah_name: loaded.source.english_name.clone(),
            ayah_number: verse.number_in_surah,
            text: verse.text.clone(),
            translation: loaded
                .translation
                .ayahs
                .get(index)
                .map(|t| t.text.clone())
                .unwrap_or_default(),
        };
        self.store.toggle_bookmark(bookmark)
    }

    /// Play from playlist index `index` with the reciter from the settings
    pub async fn play_from(&mut self, index: usize) -> Result<()> {
        let reciter = self.store.settings().reciter;
        if self.player.is_none() {
            let loaded = self.loaded()?;
            let verses = loaded.source.ayahs.iter().map(|v| v.number_in_surah).collect();
            self.player = Some(SequentialPlayer::new(
                self.source.clone(),
                self.sink.clone(),
                self.number,
                verses,
                reciter.clone(),
            ));
        }

        let Some(player) = self.player.as_mut() else {
            return Err(ReaderError::internal("player not initialized"));
        };
        player.set_reciter(reciter);
        player.start(index).await
    }

    pub async fn stop_audio(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.stop().await;
        }
    }

    pub fn playback(&self) -> PlaybackState {
        self.player.as_ref().map(|p| p.state()).unwrap_or_default()
    }

    /// Playback state changes; `None` until playback has been started once
    pub fn subscribe_playback(&self) -> Option<watch::Receiver<PlaybackState>> {
        self.player.as_ref().map(|p| p.subscribe())
    }

    /// Wait until playback runs to the end of the chapter or fails
    pub async fn wait_playback_idle(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.wait_until_idle().await;
        }
    }

    fn loaded(&self) -> Result<Arc<LoadedChapter>> {
        match &*self.shared.state.borrow() {
            LoadState::Ready(loaded) => Ok(Arc::clone(loaded)),
            _ => Err(ReaderError::invalid_input(format!(
                "Chapter {} is not loaded",
                self.number
            ))),
        }
    }

    fn publish_failure(&self, error: ReaderError) {
        self.shared.state.send_replace(LoadState::Failed {
            message: error.user_message(),
            back: Route::ChapterList,
        });
    }

    fn spawn_load(&mut self) {
        if let Some(previous) = self.load.take() {
            previous.abort();
        }

        let generation = {
            let mut current = self.shared.current.lock().unwrap_or_else(|e| e.into_inner());
            *current += 1;
            *current
        };
        self.shared.state.send_replace(LoadState::Loading);

        let translation = self.store.settings().translation;
        debug!(chapter = self.number, %translation, generation, "loading chapter");
        self.load = Some(tokio::spawn(load(
            self.source.clone(),
            self.store.clone(),
            Arc::clone(&self.shared),
            self.number,
            translation,
            generation,
        )));
    }
}

impl<C, K> Drop for ChapterPage<C, K> {
    fn drop(&mut self) {
        if let Some(handle) = self.load.take() {
            handle.abort();
        }
    }
}

async fn load<C: ChapterSource>(
    source: C,
    store: Store,
    shared: Arc<PageShared>,
    number: u32,
    translation: String,
    generation: u64,
) {
    let result = source.load_chapter(number, &translation).await;

    let current = shared.current.lock().unwrap_or_else(|e| e.into_inner());
    if *current != generation {
        debug!(chapter = number, generation, "discarding stale chapter load");
        return;
    }

    let state = match result {
        Ok((source, translation)) => {
            info!(chapter = number, verses = source.ayahs.len(), "chapter loaded");
            let last_read = LastRead::now(number, 1, source.english_name.clone());
            if let Err(e) = store.set_last_read(last_read) {
                warn!(chapter = number, error = %e, "failed to save reading position");
            }
            LoadState::Ready(Arc::new(LoadedChapter { source, translation }))
        }
        Err(e) => {
            error!(chapter = number, error = %e, "failed to load chapter");
            LoadState::Failed {
                message: e.user_message(),
                back: Route::ChapterList,
            }
        }
    };
    shared.state.send_replace(state);
}
