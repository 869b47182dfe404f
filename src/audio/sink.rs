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


//! Audio output
//!
//! An [`AudioSink`] plays one clip to its natural end. Dropping the returned
//! future must stop playback and release the device or process; the
//! sequential player relies on this to tear down a clip before starting the
//! next one.
//!
//! # Sinks
//! - [`ProcessSink`] - hands the clip URL to an external player
//!   (`ffplay -nodisp -autoexit -loglevel quiet <url>` by default)
//! - [`SilentSink`] - no output; finishes after a fixed delay

use crate::error::{ReaderError, Result};
use std::future::Future;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Plays a clip and resolves when it ends on its own
pub trait AudioSink: Send + Sync + 'static {
    fn play(&self, url: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Default external player invocation; the clip URL is appended
pub fn default_player_command() -> Vec<String> {
    ["ffplay", "-nodisp", "-autoexit", "-loglevel", "quiet"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Runs an external command per clip
///
/// The child is spawned with `kill_on_drop`, so cancelling playback kills it.
#[derive(Debug, Clone)]
pub struct ProcessSink {
    program: String,
    args: Vec<String>,
}

impl ProcessSink {
    /// Build from an argv list (program first)
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| ReaderError::invalid_input("Player command must not be empty"))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for ProcessSink {
    fn default() -> Self {
        let mut command = default_player_command();
        let program = command.remove(0);
        Self { program, args: command }
    }
}

impl AudioSink for ProcessSink {
    async fn play(&self, url: &str) -> Result<()> {
        debug!(program = %self.program, %url, "starting clip");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ReaderError::PlayerError(format!("'{}' not found in PATH", self.program))
                } else {
                    ReaderError::PlayerError(format!("Failed to start '{}': {}", self.program, e))
                }
            })?;

        let status = child
            .wait()
            .await
            .map_err(|e| ReaderError::PlayerError(format!("Player process failed: {}", e)))?;

        if !status.success() {
            return Err(ReaderError::PlayerError(format!(
                "'{}' exited with status: {}",
                self.program, status
            )));
        }

        Ok(())
    }
}

/// Produces no sound; each clip "plays" for `clip_length`
#[derive(Debug, Clone, Default)]
pub struct SilentSink {
    clip_length: Duration,
}

impl SilentSink {
    pub fn new(clip_length: Duration) -> Self {
        Self { clip_length }
    }
}

impl AudioSink for SilentSink {
    async fn play(&self, url: &str) -> Result<()> {
        debug!(%url, "silent clip");
        tokio::time::sleep(self.clip_length).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_sink_from_command() {
        let sink = ProcessSink::new(&["mpv".to_string(), "--no-video".to_string()]).unwrap();
        assert_eq!(sink.program(), "mpv");
        assert_eq!(sink.args, vec!["--no-video".to_string()]);

        assert!(ProcessSink::new(&[]).is_err());
        assert_eq!(ProcessSink::default().program(), "ffplay");
    }

    #[tokio::test]
    async fn test_missing_player_is_player_error() {
        let sink = ProcessSink::new(&["almumin-no-such-player-binary".to_string()]).unwrap();
        let err = sink.play("https://example.invalid/1.mp3").await.unwrap_err();
        assert!(matches!(err, ReaderError::PlayerError(ref m) if m.contains("not found")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_exit_status() {
        // `true`/`false` ignore their arguments
        let ok = ProcessSink::new(&["true".to_string()]).unwrap();
        ok.play("clip").await.unwrap();

        let failing = ProcessSink::new(&["false".to_string()]).unwrap();
        assert!(matches!(failing.play("clip").await, Err(ReaderError::PlayerError(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_sink_waits_clip_length() {
        let sink = SilentSink::new(Duration::from_secs(3));
        let start = tokio::time::Instant::now();
        sink.play("clip").await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(3));
    }
}
