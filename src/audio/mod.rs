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


//! Recitation playback
//!
//! # Module Organization
//!
//! ## sink
//! Clip output:
//! - `AudioSink` - plays one clip URL to completion, stops when dropped
//! - `ProcessSink` - external player process (ffplay by default)
//! - `SilentSink` - timed no-op output
//!
//! ## player
//! Sequential verse playback for one chapter:
//! - `AudioSource` - resolves a verse's clip URL for a reciter
//! - `SequentialPlayer` - start/stop with auto-advance to the next verse
//! - `PlaybackState` - `Idle` or `Playing { index, verse }`
//!
//! # External Player
//!
//! `ProcessSink` needs the configured player binary in PATH. Without it,
//! `play` fails with `PlayerError` and the player returns to `Idle`.

pub mod player;
pub mod sink;

// Re-export commonly used types
pub use player::{AudioSource, PlaybackState, SequentialPlayer};
pub use sink::{default_player_command, AudioSink, ProcessSink, SilentSink};
