// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vellum_player_ref --heading-base-level=0

//! Vellum Reference Player.
//!
//! This crate provides a small, stateful implementation of
//! [`CommandPlayer`] for **command tracing**.
//!
//! It is intentionally *not* a reference renderer:
//! - It does **not** rasterize to pixels.
//! - It does **not** define golden rendering behavior for other players.
//! - It is intended for tests and debugging that want to assert on the
//!   commands a picture contains and on the canvas state at the time each
//!   command is applied.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use peniko::Brush;
use vellum_picture::{CanvasCommand, CommandPlayer, Matrix, Paint, Picture, Rect};

/// Snapshot of the playback state inside the player.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSnapshot {
    /// Current total matrix.
    pub matrix: Matrix,
    /// Number of entries on the save stack, layers included.
    pub save_depth: usize,
    /// Number of compositing layers on the save stack.
    pub layer_depth: usize,
    /// Number of clips applied since the last save that is still open.
    pub clip_count: usize,
    /// Paint of the innermost open layer, if it has one.
    pub layer_top: Option<Paint>,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            matrix: Matrix::IDENTITY,
            save_depth: 0,
            layer_depth: 0,
            clip_count: 0,
            layer_top: None,
        }
    }
}

/// Event recorded by the reference player.
#[derive(Clone, Debug)]
pub enum Event {
    /// State command and the resulting state snapshot.
    State {
        /// Command that was applied.
        command: CanvasCommand,
        /// Snapshot after applying the command.
        state: StateSnapshot,
    },
    /// Draw command and the state snapshot used for drawing.
    Draw {
        /// Command that was applied.
        command: CanvasCommand,
        /// Snapshot at the time of drawing.
        state: StateSnapshot,
        /// Brush resolved from the draw's paint, if it has one.
        brush: Option<Brush>,
        /// Conservative bounds of the draw under the current matrix.
        ///
        /// `None` for text, whose extent depends on shaping.
        device_bounds: Option<Rect>,
    },
}

#[derive(Clone, Debug)]
struct SaveEntry {
    matrix: Matrix,
    clip_count: usize,
    layer: Option<Option<Paint>>,
}

/// Simple reference implementation of a command player.
///
/// This player:
/// - Tracks the total matrix, save stack, layer stack, and clip count,
/// - Records an [`Event`] for every command it is handed,
/// - Can capture a suffix of the commands it has seen as a new [`Picture`]
///   via `begin_capture`/`end_capture`.
#[derive(Default, Debug)]
pub struct RefPlayer {
    /// Log of events in the order they were applied.
    events: Vec<Event>,
    /// Commands in the order they were applied.
    commands: Vec<CanvasCommand>,
    /// Start index of the current capture, if any.
    capture_start: Option<usize>,
    /// Current playback state.
    state: StateSnapshot,
    stack: Vec<SaveEntry>,
}

impl RefPlayer {
    /// Create a player with an empty log and identity state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns a slice of applied commands.
    pub fn commands(&self) -> &[CanvasCommand] {
        &self.commands
    }

    /// Current playback state.
    pub fn state(&self) -> &StateSnapshot {
        &self.state
    }

    /// Clears all recorded events and commands but keeps the playback state.
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.commands.clear();
        self.capture_start = None;
    }

    /// Play every command of `picture`.
    pub fn play(&mut self, picture: &Picture) {
        picture.play(self);
    }

    /// Start capturing commands. A later call moves the start forward.
    pub fn begin_capture(&mut self) {
        self.capture_start = Some(self.commands.len());
    }

    /// Package the commands applied since [`RefPlayer::begin_capture`] as a
    /// picture.
    ///
    /// Without a matching `begin_capture` the picture is empty.
    pub fn end_capture(&mut self, cull_rect: Rect) -> Picture {
        let start = self.capture_start.take().unwrap_or(self.commands.len());
        Picture::new(cull_rect, self.commands[start..].to_vec())
    }

    fn push(&mut self, layer: Option<Option<Paint>>) {
        self.stack.push(SaveEntry {
            matrix: self.state.matrix,
            clip_count: self.state.clip_count,
            layer: layer.clone(),
        });
        self.state.save_depth = self.stack.len();
        if let Some(paint) = layer {
            self.state.layer_depth += 1;
            self.state.layer_top = paint;
        }
    }

    fn pop(&mut self) {
        let Some(entry) = self.stack.pop() else {
            log::debug!("RefPlayer: restore with an empty save stack");
            return;
        };
        self.state.matrix = entry.matrix;
        self.state.clip_count = entry.clip_count;
        self.state.save_depth = self.stack.len();
        if entry.layer.is_some() {
            self.state.layer_depth = self.state.layer_depth.saturating_sub(1);
            self.state.layer_top = self
                .stack
                .iter()
                .rev()
                .find_map(|e| e.layer.as_ref())
                .cloned()
                .flatten();
        }
    }

    fn device_bounds(&self, command: &CanvasCommand) -> Option<Rect> {
        let local = match command {
            CanvasCommand::DrawPath { path, .. } | CanvasCommand::DrawTextOnPath { path, .. } => {
                path.bounds()
            }
            CanvasCommand::DrawImage { dest, .. } => Some(*dest),
            CanvasCommand::DrawText { .. }
            | CanvasCommand::Save { .. }
            | CanvasCommand::Restore { .. }
            | CanvasCommand::SaveLayer { .. }
            | CanvasCommand::SetMatrix { .. }
            | CanvasCommand::ClipPath { .. }
            | CanvasCommand::ClipRect { .. } => None,
        }?;
        Some(self.state.matrix.map_rect(&local))
    }
}

impl CommandPlayer for RefPlayer {
    fn apply(&mut self, command: &CanvasCommand) {
        self.commands.push(command.clone());
        let paint = match command {
            CanvasCommand::Save { .. } => {
                self.push(None);
                None
            }
            CanvasCommand::SaveLayer { paint, .. } => {
                self.push(Some(paint.clone()));
                None
            }
            CanvasCommand::Restore { .. } => {
                self.pop();
                None
            }
            CanvasCommand::SetMatrix { matrix } => {
                self.state.matrix = *matrix;
                None
            }
            CanvasCommand::ClipPath { .. } | CanvasCommand::ClipRect { .. } => {
                self.state.clip_count += 1;
                None
            }
            CanvasCommand::DrawPath { paint, .. }
            | CanvasCommand::DrawText { paint, .. }
            | CanvasCommand::DrawTextOnPath { paint, .. } => Some(paint),
            CanvasCommand::DrawImage { paint, .. } => paint.as_ref(),
        };

        let event = if command.is_draw() {
            Event::Draw {
                command: command.clone(),
                state: self.state.clone(),
                brush: paint.map(Paint::to_brush),
                device_bounds: self.device_bounds(command),
            }
        } else {
            Event::State {
                command: command.clone(),
                state: self.state.clone(),
            }
        };
        self.events.push(event);
    }
}
