// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cycle-safe depth-first traversal over a [`Scene`].
//!
//! Traversal starts from one or more roots and yields every reachable
//! drawable exactly once, in document order:
//!
//! - a node's mask (if any) is yielded before its structural children;
//! - children are visited in the order returned by [`Drawable::children`];
//! - a node reachable through several parents is yielded on first reach only;
//! - `Use` cycles terminate;
//! - edges that point at ids outside the scene are skipped.
//!
//! Two entry points share the same stepping logic: [`Scene::traverse`]
//! returns a borrowing iterator, and [`Walker`] keeps its buffers between
//! calls for tight loops.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::scene::{Drawable, DrawableId, Scene};

/// Index-keyed visited set for drawables.
///
/// A dense bitset: one bit per drawable id, grown on demand.
#[derive(Clone, Debug, Default)]
pub struct VisitedSet {
    words: Vec<u64>,
}

impl VisitedSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set sized for `len` drawables.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            words: Vec::with_capacity(len.div_ceil(64)),
        }
    }

    #[inline]
    fn split(id: DrawableId) -> (usize, u64) {
        let i = id.index();
        (i / 64, 1_u64 << (i % 64))
    }

    /// Insert `id`. Returns `true` if it was not already present.
    pub fn insert(&mut self, id: DrawableId) -> bool {
        let (word, bit) = Self::split(id);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let fresh = self.words[word] & bit == 0;
        self.words[word] |= bit;
        fresh
    }

    /// Remove `id`. Returns `true` if it was present.
    pub fn remove(&mut self, id: DrawableId) -> bool {
        let (word, bit) = Self::split(id);
        match self.words.get_mut(word) {
            Some(w) => {
                let present = *w & bit != 0;
                *w &= !bit;
                present
            }
            None => false,
        }
    }

    /// Returns `true` if `id` is present.
    pub fn contains(&self, id: DrawableId) -> bool {
        let (word, bit) = Self::split(id);
        self.words.get(word).is_some_and(|w| w & bit != 0)
    }

    /// Remove all ids, keeping capacity.
    pub fn clear(&mut self) {
        self.words.clear();
    }
}

/// Push a node's outgoing edges so that the mask pops first, then children
/// in document order.
#[inline]
fn push_edges<S: Extend<DrawableId>>(node: &Drawable, stack: &mut S) {
    stack.extend(node.children().iter().rev().copied());
    stack.extend(node.mask);
}

/// Pop until an unvisited, existing node is found.
fn step<'a, S>(
    scene: &'a Scene,
    stack: &mut S,
    pop: impl Fn(&mut S) -> Option<DrawableId>,
    visited: &mut VisitedSet,
) -> Option<(DrawableId, &'a Drawable)>
where
    S: Extend<DrawableId>,
{
    while let Some(id) = pop(stack) {
        let Some(node) = scene.get(id) else {
            log::trace!("skipping dangling edge to {id:?}");
            continue;
        };
        if !visited.insert(id) {
            continue;
        }
        push_edges(node, stack);
        return Some((id, node));
    }
    None
}

/// Borrowing depth-first iterator returned by [`Scene::traverse`].
#[derive(Debug)]
pub struct Traverse<'a> {
    scene: &'a Scene,
    stack: SmallVec<[DrawableId; 16]>,
    visited: VisitedSet,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = (DrawableId, &'a Drawable);

    fn next(&mut self) -> Option<Self::Item> {
        step(self.scene, &mut self.stack, SmallVec::pop, &mut self.visited)
    }
}

impl Scene {
    /// Depth-first traversal from `roots`, yielding each reachable drawable
    /// once.
    ///
    /// ```
    /// use vellum_scene::{Drawable, Scene};
    ///
    /// let mut scene = Scene::new();
    /// let a = scene.insert(Drawable::use_of(None));
    /// let b = scene.insert(Drawable::use_of(Some(a)));
    /// scene.set_use_target(a, Some(b));
    ///
    /// let ids: Vec<_> = scene.traverse(&[a]).map(|(id, _)| id).collect();
    /// assert_eq!(ids, [a, b]);
    /// ```
    pub fn traverse(&self, roots: &[DrawableId]) -> Traverse<'_> {
        let mut stack = SmallVec::new();
        stack.extend(roots.iter().rev().copied());
        Traverse {
            scene: self,
            stack,
            visited: VisitedSet::with_capacity(self.len()),
        }
    }
}

/// Reusable traversal scratch.
///
/// Holds the work stack and visited set between calls, so repeated walks
/// over the same scene do not allocate once the buffers have grown.
#[derive(Clone, Debug, Default)]
pub struct Walker {
    stack: Vec<DrawableId>,
    visited: VisitedSet,
}

impl Walker {
    /// Create an empty walker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a walker with buffers sized for `len` drawables.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            stack: Vec::with_capacity(len),
            visited: VisitedSet::with_capacity(len),
        }
    }

    fn reset(&mut self, roots: &[DrawableId]) {
        self.stack.clear();
        self.visited.clear();
        self.stack.extend(roots.iter().rev().copied());
    }

    /// Call `f` for each drawable reachable from `roots`, in traversal order.
    pub fn walk<F>(&mut self, scene: &Scene, roots: &[DrawableId], mut f: F)
    where
        F: FnMut(DrawableId, &Drawable),
    {
        self.reset(roots);
        while let Some((id, node)) = step(scene, &mut self.stack, Vec::pop, &mut self.visited) {
            f(id, node);
        }
    }

    /// Append the ids reachable from `roots` to `out`, in traversal order.
    pub fn collect_into(&mut self, scene: &Scene, roots: &[DrawableId], out: &mut Vec<DrawableId>) {
        self.walk(scene, roots, |id, _| out.push(id));
    }
}
