// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Predicate-based bulk paint editing.
//!
//! An edit walks the scene from a set of roots, looks at one paint slot on
//! every reachable drawable, and applies an update to each *distinct* paint
//! handle that satisfies a predicate. A paint shared by many drawables is
//! tested and updated once.
//!
//! Two modes are supported:
//!
//! - [`EditMode::InPlace`] mutates the shared paint, so every drawable that
//!   references it observes the change.
//! - [`EditMode::CloneOnWrite`] leaves the original paint untouched. The first
//!   time a matching handle is seen, one clone is added to the arena and
//!   updated, and every traversed drawable that referenced the original is
//!   pointed at that single clone. Sharing is preserved, just relocated.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::{HashMap, HashSet};
use vellum_picture::Paint;

use crate::scene::{DrawableId, PaintId, PaintSlot, Scene};
use crate::walk::Walker;

/// How an edit treats shared paints.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditMode {
    /// Mutate matching paints in place.
    #[default]
    InPlace,
    /// Clone matching paints and rewire referencing drawables to the clone.
    CloneOnWrite,
}

/// Error returned when an edit is rejected before traversal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EditError {
    /// The root list was empty.
    NoRoots,
    /// A root id does not refer to a drawable in the scene.
    UnknownRoot(DrawableId),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRoots => write!(f, "paint edit requires at least one root"),
            Self::UnknownRoot(id) => write!(f, "paint edit root {id:?} is not in the scene"),
        }
    }
}

impl core::error::Error for EditError {}

/// Reusable bulk paint editor.
///
/// The editor owns its traversal and dedup buffers; reuse one instance to
/// run many edits without reallocating.
#[derive(Debug, Default)]
pub struct PaintEditor {
    walker: Walker,
    order: Vec<DrawableId>,
    seen: HashSet<PaintId>,
    clones: HashMap<PaintId, PaintId>,
}

impl PaintEditor {
    /// Create an editor with empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `update` to every distinct paint in `slot`, reachable from
    /// `roots`, that satisfies `predicate`.
    ///
    /// Returns the number of distinct paints updated. In
    /// [`EditMode::CloneOnWrite`] this is also the number of clones added to
    /// the paint arena.
    ///
    /// Arguments are validated before anything is touched: an empty root list
    /// or a root outside the scene is rejected with [`EditError`].
    ///
    /// Slots that reference a paint handle outside the arena are skipped.
    pub fn update<P, U>(
        &mut self,
        scene: &mut Scene,
        roots: &[DrawableId],
        slot: PaintSlot,
        mode: EditMode,
        mut predicate: P,
        mut update: U,
    ) -> Result<usize, EditError>
    where
        P: FnMut(&Paint) -> bool,
        U: FnMut(&mut Paint),
    {
        if roots.is_empty() {
            return Err(EditError::NoRoots);
        }
        if let Some(&root) = roots.iter().find(|&&r| !scene.contains(r)) {
            return Err(EditError::UnknownRoot(root));
        }

        self.order.clear();
        self.seen.clear();
        self.clones.clear();
        self.walker.collect_into(scene, roots, &mut self.order);

        let mut updated = 0;
        for &id in &self.order {
            let Some(original) = scene.get(id).and_then(|d| d.paint(slot)) else {
                continue;
            };
            match mode {
                EditMode::InPlace => {
                    if !self.seen.insert(original) {
                        continue;
                    }
                    let Some(paint) = scene.paint_mut(original) else {
                        continue;
                    };
                    if predicate(&*paint) {
                        update(paint);
                        updated += 1;
                    }
                }
                EditMode::CloneOnWrite => {
                    let clone = match self.clones.get(&original) {
                        Some(&clone) => clone,
                        None => {
                            if !self.seen.insert(original) {
                                continue;
                            }
                            let Some(paint) = scene.paint(original) else {
                                continue;
                            };
                            if !predicate(paint) {
                                continue;
                            }
                            let mut copy = paint.clone();
                            update(&mut copy);
                            let clone = scene.add_paint(copy);
                            self.clones.insert(original, clone);
                            updated += 1;
                            clone
                        }
                    };
                    if let Some(node) = scene.get_mut(id) {
                        *node.paint_mut(slot) = Some(clone);
                    }
                }
            }
        }

        log::debug!(
            "paint edit on {slot:?} ({mode:?}): {} drawables visited, {updated} paints updated",
            self.order.len()
        );
        Ok(updated)
    }
}

impl Scene {
    /// Update fill paints reachable from `roots`. See [`PaintEditor::update`].
    ///
    /// ```
    /// use vellum_picture::{Color, Paint, Path};
    /// use vellum_scene::{Drawable, EditMode, Scene};
    ///
    /// let mut scene = Scene::new();
    /// let red = scene.add_paint(Paint::fill(Color::from_rgb8(255, 0, 0)));
    /// let a = scene.insert(Drawable::path(Path::new()).with_fill(red));
    /// let b = scene.insert(Drawable::path(Path::new()).with_fill(red));
    /// let root = scene.insert(Drawable::container([a, b]));
    ///
    /// let n = scene
    ///     .update_fills(&[root], EditMode::CloneOnWrite, |p| p.color == Color::from_rgb8(255, 0, 0), |p| {
    ///         p.color = Color::BLACK;
    ///     })
    ///     .unwrap();
    /// assert_eq!(n, 1);
    /// assert_eq!(scene.get(a).unwrap().fill, scene.get(b).unwrap().fill);
    /// assert_ne!(scene.get(a).unwrap().fill, Some(red));
    /// ```
    pub fn update_fills<P, U>(
        &mut self,
        roots: &[DrawableId],
        mode: EditMode,
        predicate: P,
        update: U,
    ) -> Result<usize, EditError>
    where
        P: FnMut(&Paint) -> bool,
        U: FnMut(&mut Paint),
    {
        PaintEditor::new().update(self, roots, PaintSlot::Fill, mode, predicate, update)
    }

    /// Update stroke paints reachable from `roots`. See [`PaintEditor::update`].
    pub fn update_strokes<P, U>(
        &mut self,
        roots: &[DrawableId],
        mode: EditMode,
        predicate: P,
        update: U,
    ) -> Result<usize, EditError>
    where
        P: FnMut(&Paint) -> bool,
        U: FnMut(&mut Paint),
    {
        PaintEditor::new().update(self, roots, PaintSlot::Stroke, mode, predicate, update)
    }

    /// Update opacity layer paints reachable from `roots`. See
    /// [`PaintEditor::update`].
    pub fn update_opacities<P, U>(
        &mut self,
        roots: &[DrawableId],
        mode: EditMode,
        predicate: P,
        update: U,
    ) -> Result<usize, EditError>
    where
        P: FnMut(&Paint) -> bool,
        U: FnMut(&mut Paint),
    {
        PaintEditor::new().update(self, roots, PaintSlot::Opacity, mode, predicate, update)
    }
}
