// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds-based hit testing.

use alloc::vec::Vec;

use vellum_picture::Point;

use crate::scene::{DrawableFlags, DrawableId, Scene};

impl Scene {
    /// Drawables under `point`, topmost first.
    ///
    /// A drawable is hit when it is visible and pickable and its
    /// `transformed_bounds` contain `point`. Bounds are taken as stored, so
    /// call [`Scene::update_bounds`] after changing geometry or transforms.
    /// Topmost means last in traversal order from `roots`.
    pub fn hit_test(&self, roots: &[DrawableId], point: Point) -> Vec<DrawableId> {
        let wanted = DrawableFlags::VISIBLE | DrawableFlags::PICKABLE;
        let mut hits: Vec<DrawableId> = self
            .traverse(roots)
            .filter(|(_, node)| node.flags.contains(wanted))
            .filter(|(_, node)| node.transformed_bounds.is_some_and(|b| b.contains(point)))
            .map(|(id, _)| id)
            .collect();
        hits.reverse();
        log::trace!("hit test at {point:?}: {} hits", hits.len());
        hits
    }
}

#[cfg(test)]
mod tests {
    use crate::scene::{Drawable, DrawableFlags, Scene};
    use alloc::vec;
    use vellum_picture::{Matrix, Path, Point, Rect};

    fn rect_path(w: f32, h: f32) -> Path {
        let mut p = Path::new();
        p.add_rect(Rect::from_xywh(0.0, 0.0, w, h));
        p
    }

    #[test]
    fn topmost_first() {
        let mut scene = Scene::new();
        let back = scene.insert(Drawable::path(rect_path(100.0, 100.0)));
        let front = scene.insert(
            Drawable::path(rect_path(10.0, 10.0)).with_transform(Matrix::translation(5.0, 5.0)),
        );
        let root = scene.insert(Drawable::container([back, front]));
        scene.update_bounds(root);

        assert_eq!(scene.hit_test(&[root], Point::new(8.0, 8.0)), vec![front, back, root]);
        assert_eq!(scene.hit_test(&[root], Point::new(50.0, 50.0)), vec![back, root]);
        assert!(scene.hit_test(&[root], Point::new(500.0, 0.0)).is_empty());
    }

    #[test]
    fn hidden_and_unpickable_are_ignored() {
        let mut scene = Scene::new();
        let hidden = scene.insert(
            Drawable::path(rect_path(10.0, 10.0)).with_flags(DrawableFlags::PICKABLE),
        );
        let inert = scene.insert(
            Drawable::path(rect_path(10.0, 10.0)).with_flags(DrawableFlags::VISIBLE),
        );
        let root = scene.insert(
            Drawable::container([hidden, inert]).with_flags(DrawableFlags::VISIBLE),
        );
        scene.update_bounds(root);
        assert!(scene.hit_test(&[root], Point::new(1.0, 1.0)).is_empty());
    }

    #[test]
    fn stale_bounds_are_not_hit() {
        let mut scene = Scene::new();
        let d = scene.insert(Drawable::path(rect_path(10.0, 10.0)));
        assert!(scene.hit_test(&[d], Point::new(1.0, 1.0)).is_empty());
        scene.update_bounds(d);
        assert_eq!(scene.hit_test(&[d], Point::new(1.0, 1.0)), vec![d]);
    }
}
