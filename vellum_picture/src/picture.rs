// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable recorded pictures.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::canvas::CanvasCommand;
use crate::geometry::Rect;

/// An immutable snapshot of recorded canvas commands.
///
/// Pictures are cheap to clone and safe to share across threads: the command
/// list is reference counted and every command owns its arguments by value,
/// so editing a scene after recording never changes an existing picture.
#[derive(Clone, Debug, PartialEq)]
pub struct Picture {
    cull_rect: Rect,
    commands: Arc<[CanvasCommand]>,
}

impl Picture {
    /// Create a picture from an explicit command list.
    pub fn new(cull_rect: Rect, commands: Vec<CanvasCommand>) -> Self {
        Self {
            cull_rect,
            commands: commands.into(),
        }
    }

    /// Cull rectangle the picture was recorded with.
    pub fn cull_rect(&self) -> Rect {
        self.cull_rect
    }

    /// Recorded commands, in order.
    pub fn commands(&self) -> &[CanvasCommand] {
        &self.commands
    }

    /// Returns `true` if the picture has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns `true` if both pictures share the same command storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.commands, &other.commands)
    }

    /// Hand every command to `player`, in order.
    pub fn play<P: CommandPlayer + ?Sized>(&self, player: &mut P) {
        for command in self.commands.iter() {
            player.apply(command);
        }
    }
}

/// A consumer of recorded commands, such as a rasterizer or a tracer.
pub trait CommandPlayer {
    /// Apply a single command.
    fn apply(&mut self, command: &CanvasCommand);
}
