// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording a drawable subgraph into a [`Picture`].

use alloc::vec::Vec;

use vellum_picture::{Canvas, ClipOperation, Compose, Paint, Picture, Rect};

use crate::scene::{DrawableId, DrawableKind, Scene};
use crate::walk::VisitedSet;

bitflags::bitflags! {
    /// Drawable attributes a recording can skip.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct IgnoreAttributes: u8 {
        /// Skip clip paths.
        const CLIP    = 0b0000_0001;
        /// Skip mask drawables.
        const MASK    = 0b0000_0010;
        /// Skip opacity layers.
        const OPACITY = 0b0000_0100;
        /// Skip image filter layers.
        const FILTER  = 0b0000_1000;
    }
}

/// Options for [`Scene::record_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RecordOptions {
    /// Attributes to leave out of the recording.
    pub ignore: IgnoreAttributes,
    /// Stop drawing when this drawable is reached.
    ///
    /// The drawable itself and everything after it in document order are
    /// left out; open saves are still restored.
    pub until: Option<DrawableId>,
}

/// Work item for the recorder's explicit stack.
#[derive(Clone, Copy, Debug)]
enum Frame {
    /// Open a drawable's state and schedule its children.
    Enter(DrawableId),
    /// Close the content layers and composite the mask, if any.
    Content {
        id: DrawableId,
        outer: usize,
        base: usize,
        mask: Option<DrawableId>,
    },
    /// Restore to the drawable's entry count.
    Exit { id: DrawableId, outer: usize },
}

struct Recorder<'a> {
    scene: &'a Scene,
    options: &'a RecordOptions,
    active: VisitedSet,
    stack: Vec<Frame>,
    stopped: bool,
}

impl Recorder<'_> {
    fn ignores(&self, attr: IgnoreAttributes) -> bool {
        self.options.ignore.contains(attr)
    }

    fn run(&mut self, canvas: &mut Canvas, root: DrawableId) {
        self.stack.push(Frame::Enter(root));
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Enter(id) => self.enter(canvas, id),
                Frame::Content {
                    id,
                    outer,
                    base,
                    mask,
                } => {
                    canvas.restore_to_count(base);
                    match mask.filter(|_| !self.stopped) {
                        Some(mask) => {
                            let layer = Paint::default().with_blend_mode(Compose::DestIn.into());
                            canvas.save_layer(Some(&layer));
                            self.stack.push(Frame::Exit { id, outer });
                            self.stack.push(Frame::Enter(mask));
                        }
                        None => self.exit(canvas, id, outer),
                    }
                }
                Frame::Exit { id, outer } => self.exit(canvas, id, outer),
            }
        }
    }

    fn enter(&mut self, canvas: &mut Canvas, id: DrawableId) {
        if self.stopped {
            return;
        }
        if self.options.until == Some(id) {
            self.stopped = true;
            return;
        }
        let scene = self.scene;
        let Some(node) = scene.get(id) else {
            log::trace!("skipping dangling edge to {id:?}");
            return;
        };
        if !node.is_visible() {
            return;
        }
        if !self.active.insert(id) {
            log::debug!("skipping re-entrant reference to {id:?}");
            return;
        }

        let outer = canvas.save_count();
        canvas.save();
        canvas.concat(&node.transform);

        if let Some(clip) = node.clip.as_ref().filter(|_| !self.ignores(IgnoreAttributes::CLIP)) {
            canvas.clip_path(clip, ClipOperation::Intersect, true);
        }
        // Masked content gets its own layer so the mask only cuts into it.
        let mask = node.mask.filter(|_| !self.ignores(IgnoreAttributes::MASK));
        if mask.is_some() {
            canvas.save_layer(None);
        }
        let base = canvas.save_count();
        if let Some(filter) = node.filter.as_ref().filter(|_| !self.ignores(IgnoreAttributes::FILTER)) {
            let layer = Paint {
                image_filter: Some(filter.clone()),
                ..Paint::default()
            };
            canvas.save_layer(Some(&layer));
        }
        if !self.ignores(IgnoreAttributes::OPACITY)
            && let Some(paint) = node.opacity.and_then(|p| scene.paint(p))
        {
            canvas.save_layer(Some(paint));
        }

        self.stack.push(Frame::Content {
            id,
            outer,
            base,
            mask,
        });
        match &node.kind {
            DrawableKind::Path { path, markers } => {
                for slot in [node.fill, node.stroke] {
                    if let Some(paint) = slot.and_then(|p| scene.paint(p)) {
                        canvas.draw_path(path, paint);
                    }
                }
                self.stack
                    .extend(markers.iter().rev().map(|&marker| Frame::Enter(marker)));
            }
            DrawableKind::Container { .. }
            | DrawableKind::Use { .. }
            | DrawableKind::Switch { .. }
            | DrawableKind::Marker { .. } => {
                self.stack
                    .extend(node.children().iter().rev().map(|&child| Frame::Enter(child)));
            }
        }
    }

    fn exit(&mut self, canvas: &mut Canvas, id: DrawableId, outer: usize) {
        canvas.restore_to_count(outer);
        self.active.remove(id);
    }
}

impl Scene {
    /// Record the subgraph under `root` into a new [`Picture`].
    ///
    /// ```
    /// use vellum_picture::{CanvasCommand, Color, Paint, Path, Rect};
    /// use vellum_scene::{Drawable, Scene};
    ///
    /// let mut scene = Scene::new();
    /// let paint = scene.add_paint(Paint::fill(Color::WHITE));
    /// let mut square = Path::new();
    /// square.add_rect(Rect::from_xywh(0.0, 0.0, 4.0, 4.0));
    /// let root = scene.insert(Drawable::path(square).with_fill(paint));
    ///
    /// let picture = scene.record(root, Rect::new(0.0, 0.0, 4.0, 4.0));
    /// assert!(matches!(picture.commands()[2], CanvasCommand::DrawPath { .. }));
    /// ```
    pub fn record(&self, root: DrawableId, cull_rect: Rect) -> Picture {
        let mut canvas = Canvas::new(cull_rect);
        self.record_with(&mut canvas, root, &RecordOptions::default());
        canvas.end_recording()
    }

    /// Record the subgraph under `root` into an existing canvas.
    ///
    /// Each drawable is recorded as: save, concatenate its transform onto
    /// the canvas matrix, clip, an isolation layer when masked, filter
    /// layer, opacity layer, content, layer restores, mask composited with
    /// [`Compose::DestIn`] into the isolation layer, final restore.
    /// The canvas' save count is the same before and after the call.
    ///
    /// A `Use` edge that leads back into a drawable currently being recorded
    /// is skipped.
    pub fn record_with(&self, canvas: &mut Canvas, root: DrawableId, options: &RecordOptions) {
        let mut recorder = Recorder {
            scene: self,
            options,
            active: VisitedSet::with_capacity(self.len()),
            stack: Vec::new(),
            stopped: false,
        };
        recorder.run(canvas, root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Drawable, DrawableFlags};
    use vellum_picture::{BlendMode, CanvasCommand, Color, ImageFilter, Matrix, Path};

    fn square() -> Path {
        let mut p = Path::new();
        p.add_rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
        p
    }

    fn tags(picture: &Picture) -> Vec<&'static str> {
        picture
            .commands()
            .iter()
            .map(|c| match c {
                CanvasCommand::Save { .. } => "save",
                CanvasCommand::Restore { .. } => "restore",
                CanvasCommand::SaveLayer { .. } => "layer",
                CanvasCommand::SetMatrix { .. } => "matrix",
                CanvasCommand::ClipPath { .. } => "clip",
                CanvasCommand::ClipRect { .. } => "clip_rect",
                CanvasCommand::DrawPath { .. } => "path",
                CanvasCommand::DrawImage { .. } => "image",
                CanvasCommand::DrawText { .. } => "text",
                CanvasCommand::DrawTextOnPath { .. } => "text_on_path",
            })
            .collect()
    }

    #[test]
    fn path_draws_fill_then_stroke() {
        let mut scene = Scene::new();
        let fill = scene.add_paint(Paint::fill(Color::WHITE));
        let stroke = scene.add_paint(Paint::stroke(Color::BLACK, 2.0));
        let root = scene.insert(Drawable::path(square()).with_fill(fill).with_stroke(stroke));

        let picture = scene.record(root, Rect::EMPTY);
        assert_eq!(tags(&picture), ["save", "matrix", "path", "path", "restore"]);
        let CanvasCommand::DrawPath { paint, .. } = &picture.commands()[3] else {
            panic!("expected stroke draw");
        };
        assert_eq!(paint.stroke_width, 2.0);
    }

    #[test]
    fn full_attribute_sequence() {
        let mut scene = Scene::new();
        let fill = scene.add_paint(Paint::fill(Color::WHITE));
        let opacity = scene.add_paint(Paint::default().with_color(Color::BLACK.with_alpha(0.5)));
        let mask = scene.insert(Drawable::path(square()).with_fill(fill));
        let root = scene.insert(
            Drawable::path(square())
                .with_fill(fill)
                .with_opacity(opacity)
                .with_clip(square())
                .with_filter(ImageFilter::blur(1.0, 1.0, None))
                .with_mask(mask),
        );

        let picture = scene.record(root, Rect::EMPTY);
        assert_eq!(
            tags(&picture),
            [
                "save", "matrix", "clip", "layer", "layer", "layer", "path", "restore",
                "restore", "layer", "save", "matrix", "path", "restore", "restore", "restore",
                "restore",
            ]
        );
        assert!(matches!(
            picture.commands()[3],
            CanvasCommand::SaveLayer {
                count: 2,
                paint: None
            }
        ));
        let CanvasCommand::SaveLayer {
            paint: Some(mask_layer),
            ..
        } = &picture.commands()[9]
        else {
            panic!("expected mask layer");
        };
        assert_eq!(mask_layer.blend_mode, BlendMode::from(Compose::DestIn));
        let CanvasCommand::SaveLayer {
            paint: Some(filter_layer),
            ..
        } = &picture.commands()[4]
        else {
            panic!("expected filter layer");
        };
        assert!(filter_layer.image_filter.is_some());
    }

    #[test]
    fn ignored_attributes_are_left_out() {
        let mut scene = Scene::new();
        let fill = scene.add_paint(Paint::fill(Color::WHITE));
        let mask = scene.insert(Drawable::path(square()).with_fill(fill));
        let root = scene.insert(
            Drawable::path(square())
                .with_fill(fill)
                .with_opacity(fill)
                .with_clip(square())
                .with_filter(ImageFilter::offset(1.0, 1.0, None))
                .with_mask(mask),
        );

        let mut canvas = Canvas::new(Rect::EMPTY);
        let options = RecordOptions {
            ignore: IgnoreAttributes::all(),
            until: None,
        };
        scene.record_with(&mut canvas, root, &options);
        let picture = canvas.end_recording();
        assert_eq!(tags(&picture), ["save", "matrix", "path", "restore"]);
    }

    #[test]
    fn transforms_compose_with_the_canvas_matrix() {
        let mut scene = Scene::new();
        let fill = scene.add_paint(Paint::default());
        let leaf = scene.insert(
            Drawable::path(square())
                .with_fill(fill)
                .with_transform(Matrix::translation(5.0, 0.0)),
        );
        let root = scene.insert(
            Drawable::container([leaf]).with_transform(Matrix::scale(2.0, 2.0)),
        );

        let mut canvas = Canvas::new(Rect::EMPTY);
        canvas.set_matrix(Matrix::translation(100.0, 0.0));
        scene.record_with(&mut canvas, root, &RecordOptions::default());
        assert_eq!(canvas.save_count(), 0);

        let picture = canvas.end_recording();
        let leaf_matrix = picture
            .commands()
            .iter()
            .rev()
            .find_map(|c| match c {
                CanvasCommand::SetMatrix { matrix } => Some(*matrix),
                _ => None,
            });
        let expected = Matrix::translation(100.0, 0.0)
            .pre_concat(&Matrix::scale(2.0, 2.0))
            .pre_concat(&Matrix::translation(5.0, 0.0));
        assert_eq!(leaf_matrix, Some(expected));
    }

    #[test]
    fn hidden_drawables_are_skipped() {
        let mut scene = Scene::new();
        let fill = scene.add_paint(Paint::default());
        let hidden = scene.insert(
            Drawable::path(square())
                .with_fill(fill)
                .with_flags(DrawableFlags::empty()),
        );
        let root = scene.insert(Drawable::container([hidden]));
        let picture = scene.record(root, Rect::EMPTY);
        assert_eq!(tags(&picture), ["save", "matrix", "restore"]);
    }

    #[test]
    fn use_cycles_are_cut() {
        let mut scene = Scene::new();
        let fill = scene.add_paint(Paint::default());
        let shape = scene.insert(Drawable::path(square()).with_fill(fill));
        let link = scene.insert(Drawable::use_of(None));
        let group = scene.insert(Drawable::container([shape, link]));
        scene.set_use_target(link, Some(group));

        let picture = scene.record(group, Rect::EMPTY);
        let draws = picture.commands().iter().filter(|c| c.is_draw()).count();
        assert_eq!(draws, 1);
        assert_eq!(
            picture.commands().last(),
            Some(&CanvasCommand::Restore { count: 0 })
        );
    }

    #[test]
    fn shared_targets_are_drawn_per_reference() {
        let mut scene = Scene::new();
        let fill = scene.add_paint(Paint::default());
        let shape = scene.insert(Drawable::path(square()).with_fill(fill));
        let u1 = scene.insert(Drawable::use_of(Some(shape)));
        let u2 = scene.insert(
            Drawable::use_of(Some(shape)).with_transform(Matrix::translation(20.0, 0.0)),
        );
        let root = scene.insert(Drawable::container([u1, u2]));
        let picture = scene.record(root, Rect::EMPTY);
        assert_eq!(picture.commands().iter().filter(|c| c.is_draw()).count(), 2);
    }

    #[test]
    fn until_stops_drawing_but_balances_saves() {
        let mut scene = Scene::new();
        let fill = scene.add_paint(Paint::default());
        let first = scene.insert(Drawable::path(square()).with_fill(fill));
        let second = scene.insert(Drawable::path(square()).with_fill(fill));
        let third = scene.insert(Drawable::path(square()).with_fill(fill));
        let root = scene.insert(Drawable::container([first, second, third]));

        let mut canvas = Canvas::new(Rect::EMPTY);
        let options = RecordOptions {
            until: Some(second),
            ..RecordOptions::default()
        };
        scene.record_with(&mut canvas, root, &options);
        assert_eq!(canvas.save_count(), 0);
        let picture = canvas.end_recording();
        assert_eq!(picture.commands().iter().filter(|c| c.is_draw()).count(), 1);
    }

    #[test]
    fn switch_and_marker_draw_their_exposed_child() {
        let mut scene = Scene::new();
        let fill = scene.add_paint(Paint::default());
        let a = scene.insert(Drawable::path(square()).with_fill(fill));
        let b = scene.insert(Drawable::path(square()).with_fill(fill));
        let sw = scene.insert(Drawable::switch([a, b]));
        let element = scene.insert(Drawable::path(square()).with_fill(fill));
        let marker = scene.insert(Drawable::marker(Some(element)));
        let mut host = Drawable::path(square());
        if let DrawableKind::Path { markers, .. } = &mut host.kind {
            markers.push(marker);
        }
        let host = scene.insert(host);
        let root = scene.insert(Drawable::container([sw, host]));

        let picture = scene.record(root, Rect::EMPTY);
        // `a` from the switch, `element` from the marker; `host` has no paints.
        assert_eq!(picture.commands().iter().filter(|c| c.is_draw()).count(), 2);
    }

    #[test]
    fn mask_only_cuts_into_its_own_content() {
        let mut scene = Scene::new();
        let fill = scene.add_paint(Paint::fill(Color::WHITE));
        let sibling = scene.insert(Drawable::path(square()).with_fill(fill));
        let mask = scene.insert(Drawable::path(square()).with_fill(fill));
        let masked = scene.insert(Drawable::path(square()).with_fill(fill).with_mask(mask));
        let root = scene.insert(Drawable::container([sibling, masked]));

        let picture = scene.record(root, Rect::EMPTY);
        assert_eq!(
            tags(&picture),
            [
                "save", "matrix", "save", "matrix", "path", "restore", "save", "matrix", "layer",
                "path", "layer", "save", "matrix", "path", "restore", "restore", "restore",
                "restore", "restore",
            ]
        );
        let commands = picture.commands();
        assert!(matches!(
            commands[8],
            CanvasCommand::SaveLayer {
                count: 3,
                paint: None
            }
        ));
        let CanvasCommand::SaveLayer {
            count,
            paint: Some(mask_layer),
        } = &commands[10]
        else {
            panic!("expected mask layer");
        };
        assert_eq!(*count, 4);
        assert_eq!(mask_layer.blend_mode, BlendMode::from(Compose::DestIn));
        // The mask's own save, then the DestIn layer, then the isolation layer.
        assert_eq!(
            commands[14..17],
            [
                CanvasCommand::Restore { count: 4 },
                CanvasCommand::Restore { count: 3 },
                CanvasCommand::Restore { count: 2 },
            ]
        );
    }

    #[test]
    fn deep_chains_record_without_recursion() {
        const DEPTH: usize = 100_000;
        let mut scene = Scene::new();
        let fill = scene.add_paint(Paint::default());
        let mut top = scene.insert(Drawable::path(square()).with_fill(fill));
        for _ in 1..DEPTH {
            top = scene.insert(Drawable::container([top]));
        }

        let mut canvas = Canvas::new(Rect::EMPTY);
        scene.record_with(&mut canvas, top, &RecordOptions::default());
        assert_eq!(canvas.save_count(), 0);
        let picture = canvas.end_recording();
        assert_eq!(picture.commands().len(), 3 * DEPTH + 1);
        assert_eq!(picture.commands().iter().filter(|c| c.is_draw()).count(), 1);
    }
}
