// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bottom-up computation of drawable bounds.

use alloc::vec;
use alloc::vec::Vec;

use vellum_picture::{Matrix, Rect};

use crate::scene::{DrawableId, DrawableKind, Scene};
use crate::walk::VisitedSet;

impl Scene {
    /// Recompute `transformed_bounds` for `root` and every drawable below it.
    ///
    /// Bounds are expressed in the coordinate space of `root`'s parent: each
    /// path drawable maps its path bounds through the accumulated transform,
    /// and every other drawable takes the union of its children. Masks do not
    /// contribute. A drawable with no geometry gets `None`.
    ///
    /// A drawable reached through several `Use` edges keeps the bounds from
    /// the last reference visited. Edges that lead back into a drawable on
    /// the current path are ignored.
    ///
    /// Returns the bounds computed for `root`.
    pub fn update_bounds(&mut self, root: DrawableId) -> Option<Rect> {
        let mut active = VisitedSet::with_capacity(self.len());
        let mut stack = vec![Frame::Enter(root, Matrix::IDENTITY)];
        // One entry per drawable on the current path: its id and running union.
        let mut open: Vec<(DrawableId, Option<Rect>)> = Vec::new();
        let mut result = None;

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(id, parent) => {
                    let Some(node) = self.get(id) else {
                        continue;
                    };
                    if !active.insert(id) {
                        continue;
                    }
                    let matrix = parent.pre_concat(&node.transform);
                    let bounds = match &node.kind {
                        DrawableKind::Path { path, .. } => {
                            path.bounds().map(|b| matrix.map_rect(&b))
                        }
                        DrawableKind::Container { .. }
                        | DrawableKind::Use { .. }
                        | DrawableKind::Switch { .. }
                        | DrawableKind::Marker { .. } => None,
                    };
                    open.push((id, bounds));
                    stack.push(Frame::Exit);
                    stack.extend(
                        node.children()
                            .iter()
                            .rev()
                            .map(|&child| Frame::Enter(child, matrix)),
                    );
                }
                Frame::Exit => {
                    let Some((id, bounds)) = open.pop() else {
                        continue;
                    };
                    if let Some(node) = self.get_mut(id) {
                        node.transformed_bounds = bounds;
                    }
                    active.remove(id);
                    match open.last_mut() {
                        Some((_, parent)) => *parent = Rect::union_opt(*parent, bounds),
                        None => result = bounds,
                    }
                }
            }
        }
        result
    }
}

#[derive(Clone, Copy, Debug)]
enum Frame {
    Enter(DrawableId, Matrix),
    Exit,
}

#[cfg(test)]
mod tests {
    use crate::scene::{Drawable, DrawableId, Scene};
    use vellum_picture::{Matrix, Path, Rect};

    fn rect_path(x: f32, y: f32, w: f32, h: f32) -> Path {
        let mut p = Path::new();
        p.add_rect(Rect::from_xywh(x, y, w, h));
        p
    }

    fn bounds(scene: &Scene, id: DrawableId) -> Option<Rect> {
        scene.get(id).and_then(|d| d.transformed_bounds)
    }

    #[test]
    fn container_unions_transformed_children() {
        let mut scene = Scene::new();
        let a = scene.insert(Drawable::path(rect_path(0.0, 0.0, 10.0, 10.0)));
        let b = scene.insert(
            Drawable::path(rect_path(0.0, 0.0, 10.0, 10.0))
                .with_transform(Matrix::translation(20.0, 5.0)),
        );
        let root = scene.insert(
            Drawable::container([a, b]).with_transform(Matrix::scale(2.0, 2.0)),
        );

        let total = scene.update_bounds(root);
        assert_eq!(total, Some(Rect::new(0.0, 0.0, 60.0, 30.0)));
        assert_eq!(bounds(&scene, a), Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
        assert_eq!(bounds(&scene, b), Some(Rect::new(40.0, 10.0, 60.0, 30.0)));
        assert_eq!(bounds(&scene, root), total);
    }

    #[test]
    fn empty_geometry_has_no_bounds() {
        let mut scene = Scene::new();
        let empty = scene.insert(Drawable::path(Path::new()));
        let group = scene.insert(Drawable::container([empty]));
        assert_eq!(scene.update_bounds(group), None);
        assert_eq!(bounds(&scene, empty), None);
    }

    #[test]
    fn rotated_bounds_cover_corners() {
        let mut scene = Scene::new();
        let d = scene.insert(
            Drawable::path(rect_path(-1.0, -1.0, 2.0, 2.0))
                .with_transform(Matrix::rotation_degrees(45.0)),
        );
        let b = scene.update_bounds(d).unwrap_or(Rect::EMPTY);
        let half_diag = core::f32::consts::SQRT_2;
        assert!((b.right - half_diag).abs() < 1e-4);
        assert!((b.top + half_diag).abs() < 1e-4);
    }

    #[test]
    fn cycles_terminate() {
        let mut scene = Scene::new();
        let shape = scene.insert(Drawable::path(rect_path(0.0, 0.0, 1.0, 1.0)));
        let link = scene.insert(Drawable::use_of(None));
        let group = scene.insert(Drawable::container([shape, link]));
        scene.set_use_target(link, Some(group));
        assert_eq!(scene.update_bounds(group), Some(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(bounds(&scene, link), None);
    }

    #[test]
    fn deep_chains_do_not_recurse() {
        const DEPTH: usize = 100_000;
        let mut scene = Scene::new();
        let leaf = scene.insert(Drawable::path(rect_path(0.0, 0.0, 1.0, 1.0)));
        let mut top = leaf;
        for _ in 1..DEPTH {
            top = scene.insert(
                Drawable::container([top]).with_transform(Matrix::translation(1.0, 0.0)),
            );
        }

        let expected = Rect::new(99_999.0, 0.0, 100_000.0, 1.0);
        assert_eq!(scene.update_bounds(top), Some(expected));
        assert_eq!(bounds(&scene, top), Some(expected));
        assert_eq!(bounds(&scene, leaf), Some(expected));
    }
}
