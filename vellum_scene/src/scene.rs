// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene arena: drawables, paints, and the handles that link them.

use alloc::vec::Vec;

use vellum_picture::{ImageFilter, Matrix, Paint, Path, Rect};

/// Identifier for a drawable in a [`Scene`].
///
/// Ids are dense indices into the scene's drawable arena. They are assigned
/// by [`Scene::insert`] and stay valid for the lifetime of the scene (and of
/// its clones): drawables are never removed.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DrawableId(pub u32);

impl DrawableId {
    /// Arena index of this drawable.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identifier for a paint in a [`Scene`]'s paint arena.
///
/// Paint sharing between drawables is expressed by storing the same
/// `PaintId` in several slots. Edits deduplicate by this handle, never by
/// paint value.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaintId(pub u32);

impl PaintId {
    /// Arena index of this paint.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Drawable flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DrawableFlags: u8 {
        /// Drawable is visible (recorded into pictures).
        const VISIBLE  = 0b0000_0001;
        /// Drawable participates in hit testing.
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for DrawableFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// A paint slot on a drawable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaintSlot {
    /// Paint used to fill geometry.
    #[default]
    Fill,
    /// Paint used to stroke geometry.
    Stroke,
    /// Paint used to composite the drawable's content as a layer.
    Opacity,
}

/// Variant-specific payload of a [`Drawable`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawableKind {
    /// Ordered, owned children.
    Container {
        /// Children in document order.
        children: Vec<DrawableId>,
    },
    /// Geometry, plus marker decorations drawn after it.
    Path {
        /// Geometry in local coordinates.
        path: Path,
        /// Marker drawables, in drawing order.
        markers: Vec<DrawableId>,
    },
    /// Reference to another drawable. Not ownership; may form a cycle.
    Use {
        /// Referenced drawable, or `None` if the reference did not resolve.
        target: Option<DrawableId>,
    },
    /// Conditional group that exposes only its first applicable child.
    ///
    /// The front end filters inapplicable children out before building the
    /// scene, so the first entry is the one that is drawn.
    Switch {
        /// Applicable children, in document order.
        children: Vec<DrawableId>,
    },
    /// A marker instance wrapping a marker element.
    Marker {
        /// Referenced marker element, or `None` if it did not resolve.
        element: Option<DrawableId>,
    },
}

/// A node in the scene graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Drawable {
    /// Variant payload and structural edges.
    pub kind: DrawableKind,
    /// Fill paint.
    pub fill: Option<PaintId>,
    /// Stroke paint.
    pub stroke: Option<PaintId>,
    /// Layer paint applied to the drawable's content as a whole.
    pub opacity: Option<PaintId>,
    /// Local transform, applied before the parent's.
    pub transform: Matrix,
    /// Bounds in root coordinates, or `None` if not computed or empty.
    pub transformed_bounds: Option<Rect>,
    /// Clip geometry in local coordinates.
    pub clip: Option<Path>,
    /// Filter applied to the drawable's content as a layer.
    pub filter: Option<ImageFilter>,
    /// Mask drawable composited over the content after it is drawn.
    pub mask: Option<DrawableId>,
    /// Visibility and picking flags.
    pub flags: DrawableFlags,
}

impl Drawable {
    /// Create a drawable of the given kind with no paints, identity
    /// transform, and default flags.
    pub fn new(kind: DrawableKind) -> Self {
        Self {
            kind,
            fill: None,
            stroke: None,
            opacity: None,
            transform: Matrix::IDENTITY,
            transformed_bounds: None,
            clip: None,
            filter: None,
            mask: None,
            flags: DrawableFlags::default(),
        }
    }

    /// A container with the given children.
    pub fn container(children: impl Into<Vec<DrawableId>>) -> Self {
        Self::new(DrawableKind::Container {
            children: children.into(),
        })
    }

    /// A path drawable without markers.
    pub fn path(path: Path) -> Self {
        Self::new(DrawableKind::Path {
            path,
            markers: Vec::new(),
        })
    }

    /// A reference to `target`.
    pub fn use_of(target: Option<DrawableId>) -> Self {
        Self::new(DrawableKind::Use { target })
    }

    /// A switch over the given applicable children.
    pub fn switch(children: impl Into<Vec<DrawableId>>) -> Self {
        Self::new(DrawableKind::Switch {
            children: children.into(),
        })
    }

    /// A marker instance wrapping `element`.
    pub fn marker(element: Option<DrawableId>) -> Self {
        Self::new(DrawableKind::Marker { element })
    }

    /// Set the fill paint, builder style.
    #[must_use]
    pub fn with_fill(mut self, paint: PaintId) -> Self {
        self.fill = Some(paint);
        self
    }

    /// Set the stroke paint, builder style.
    #[must_use]
    pub fn with_stroke(mut self, paint: PaintId) -> Self {
        self.stroke = Some(paint);
        self
    }

    /// Set the opacity layer paint, builder style.
    #[must_use]
    pub fn with_opacity(mut self, paint: PaintId) -> Self {
        self.opacity = Some(paint);
        self
    }

    /// Set the local transform, builder style.
    #[must_use]
    pub fn with_transform(mut self, transform: Matrix) -> Self {
        self.transform = transform;
        self
    }

    /// Set the clip path, builder style.
    #[must_use]
    pub fn with_clip(mut self, clip: Path) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Set the image filter, builder style.
    #[must_use]
    pub fn with_filter(mut self, filter: ImageFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the mask drawable, builder style.
    #[must_use]
    pub fn with_mask(mut self, mask: DrawableId) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Set the flags, builder style.
    #[must_use]
    pub fn with_flags(mut self, flags: DrawableFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns `true` if the drawable is recorded into pictures.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.flags.contains(DrawableFlags::VISIBLE)
    }

    /// Paint handle stored in `slot`.
    #[inline]
    pub fn paint(&self, slot: PaintSlot) -> Option<PaintId> {
        match slot {
            PaintSlot::Fill => self.fill,
            PaintSlot::Stroke => self.stroke,
            PaintSlot::Opacity => self.opacity,
        }
    }

    /// Mutable access to the paint handle stored in `slot`.
    #[inline]
    pub fn paint_mut(&mut self, slot: PaintSlot) -> &mut Option<PaintId> {
        match slot {
            PaintSlot::Fill => &mut self.fill,
            PaintSlot::Stroke => &mut self.stroke,
            PaintSlot::Opacity => &mut self.opacity,
        }
    }

    /// Structural edges, in document order.
    ///
    /// Containers expose their children, path drawables their markers, a
    /// `Use` its target, a `Switch` only its first child, and a `Marker` its
    /// element. The mask is not included.
    pub fn children(&self) -> &[DrawableId] {
        match &self.kind {
            DrawableKind::Container { children } => children,
            DrawableKind::Path { markers, .. } => markers,
            DrawableKind::Use { target } => target.as_slice(),
            DrawableKind::Switch { children } => children.get(..1).unwrap_or(&[]),
            DrawableKind::Marker { element } => element.as_slice(),
        }
    }
}

/// Arena of drawables and paints.
///
/// The scene owns every node and every paint; edges between nodes and
/// references from nodes to paints are plain index handles. Cloning a scene
/// is a deep copy that preserves paint sharing, which makes it the natural
/// starting point for an isolated editing session.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    drawables: Vec<Drawable>,
    paints: Vec<Paint>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of drawables.
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// Returns `true` if the scene has no drawables.
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Number of paints in the paint arena.
    pub fn paint_count(&self) -> usize {
        self.paints.len()
    }

    /// Insert a drawable and return its id.
    pub fn insert(&mut self, drawable: Drawable) -> DrawableId {
        debug_assert!(
            u32::try_from(self.drawables.len()).is_ok(),
            "scene exceeds u32 drawable ids"
        );
        #[expect(
            clippy::cast_possible_truncation,
            reason = "scenes are limited to u32::MAX drawables"
        )]
        let id = DrawableId(self.drawables.len() as u32);
        self.drawables.push(drawable);
        id
    }

    /// Add a paint to the arena and return its handle.
    pub fn add_paint(&mut self, paint: Paint) -> PaintId {
        debug_assert!(
            u32::try_from(self.paints.len()).is_ok(),
            "scene exceeds u32 paint ids"
        );
        #[expect(
            clippy::cast_possible_truncation,
            reason = "scenes are limited to u32::MAX paints"
        )]
        let id = PaintId(self.paints.len() as u32);
        self.paints.push(paint);
        id
    }

    /// Returns `true` if `id` refers to a drawable in this scene.
    #[inline]
    pub fn contains(&self, id: DrawableId) -> bool {
        id.index() < self.drawables.len()
    }

    /// Drawable for `id`, if present.
    #[inline]
    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.drawables.get(id.index())
    }

    /// Mutable drawable for `id`, if present.
    #[inline]
    pub fn get_mut(&mut self, id: DrawableId) -> Option<&mut Drawable> {
        self.drawables.get_mut(id.index())
    }

    /// Paint for `id`, if present.
    #[inline]
    pub fn paint(&self, id: PaintId) -> Option<&Paint> {
        self.paints.get(id.index())
    }

    /// Mutable paint for `id`, if present.
    ///
    /// Mutating a paint is observed by every drawable that references it.
    #[inline]
    pub fn paint_mut(&mut self, id: PaintId) -> Option<&mut Paint> {
        self.paints.get_mut(id.index())
    }

    /// Paint referenced by `slot` on drawable `id`, if both resolve.
    pub fn slot_paint(&self, id: DrawableId, slot: PaintSlot) -> Option<&Paint> {
        self.get(id)
            .and_then(|d| d.paint(slot))
            .and_then(|p| self.paint(p))
    }

    /// Iterate over all drawables with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DrawableId, &Drawable)> + '_ {
        self.drawables.iter().enumerate().map(|(i, d)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "indices fit in u32 by construction"
            )]
            let id = DrawableId(i as u32);
            (id, d)
        })
    }

    /// Append `child` to a container's children.
    ///
    /// Returns `false` if `parent` is not a container in this scene.
    pub fn push_child(&mut self, parent: DrawableId, child: DrawableId) -> bool {
        match self.get_mut(parent).map(|d| &mut d.kind) {
            Some(DrawableKind::Container { children }) => {
                children.push(child);
                true
            }
            _ => false,
        }
    }

    /// Point a `Use` drawable at `target`.
    ///
    /// This is how front ends resolve forward references, including ones
    /// that form cycles. Returns `false` if `id` is not a `Use` drawable.
    pub fn set_use_target(&mut self, id: DrawableId, target: Option<DrawableId>) -> bool {
        match self.get_mut(id).map(|d| &mut d.kind) {
            Some(DrawableKind::Use { target: slot }) => {
                *slot = target;
                true
            }
            _ => false,
        }
    }
}
