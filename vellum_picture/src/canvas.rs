// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording canvas.

use alloc::string::String;
use alloc::vec::Vec;

use crate::geometry::Rect;
use crate::image::Image;
use crate::matrix::Matrix;
use crate::paint::Paint;
use crate::path::Path;
use crate::picture::Picture;
use crate::text::TextBlob;

/// How a clip combines with the current clip region.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClipOperation {
    /// Remove the shape from the clip region.
    Difference,
    /// Restrict the clip region to the shape.
    #[default]
    Intersect,
}

/// A single recorded canvas command.
///
/// Commands are immutable records of the arguments passed at record time.
/// The `count` carried by save and restore commands is the save count
/// immediately after the command took effect.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasCommand {
    /// Push the current matrix and clip.
    Save {
        /// Save count after the push.
        count: usize,
    },
    /// Pop the most recent save or layer.
    Restore {
        /// Save count after the pop.
        count: usize,
    },
    /// Push the current state and begin a compositing layer.
    ///
    /// The layer's paint (opacity, blend mode, image filter) is applied when
    /// the matching restore composites the layer into its parent.
    SaveLayer {
        /// Save count after the push.
        count: usize,
        /// Compositing paint, or `None` for a plain isolation layer.
        paint: Option<Paint>,
    },
    /// Replace the current total matrix.
    SetMatrix {
        /// New total matrix.
        matrix: Matrix,
    },
    /// Combine the clip region with a path.
    ClipPath {
        /// Clip geometry.
        path: Path,
        /// How to combine with the current clip.
        operation: ClipOperation,
        /// Antialias the clip edge.
        antialias: bool,
    },
    /// Combine the clip region with a rectangle.
    ClipRect {
        /// Clip rectangle.
        rect: Rect,
        /// How to combine with the current clip.
        operation: ClipOperation,
        /// Antialias the clip edge.
        antialias: bool,
    },
    /// Draw a path.
    DrawPath {
        /// Geometry.
        path: Path,
        /// Paint.
        paint: Paint,
    },
    /// Draw the `source` region of an image into `dest`.
    DrawImage {
        /// Image to draw.
        image: Image,
        /// Source rectangle in image pixels.
        source: Rect,
        /// Destination rectangle in local coordinates.
        dest: Rect,
        /// Optional paint (opacity, filters, sampling quality).
        paint: Option<Paint>,
    },
    /// Draw positioned text.
    DrawText {
        /// Text and glyph positions.
        blob: TextBlob,
        /// Horizontal origin.
        x: f32,
        /// Vertical origin (baseline).
        y: f32,
        /// Paint.
        paint: Paint,
    },
    /// Draw text along a path.
    DrawTextOnPath {
        /// Text to draw.
        text: String,
        /// Path the baseline follows.
        path: Path,
        /// Distance along the path where the text starts.
        h_offset: f32,
        /// Distance above (negative) or below (positive) the path.
        v_offset: f32,
        /// Paint.
        paint: Paint,
    },
}

impl CanvasCommand {
    /// Returns `true` for commands that produce pixels.
    pub fn is_draw(&self) -> bool {
        match self {
            Self::DrawPath { .. }
            | Self::DrawImage { .. }
            | Self::DrawText { .. }
            | Self::DrawTextOnPath { .. } => true,
            Self::Save { .. }
            | Self::Restore { .. }
            | Self::SaveLayer { .. }
            | Self::SetMatrix { .. }
            | Self::ClipPath { .. }
            | Self::ClipRect { .. } => false,
        }
    }
}

/// A recording canvas.
///
/// The canvas appends a [`CanvasCommand`] for every call and tracks the total
/// matrix and a save stack, but never interprets draw commands. Call
/// [`Canvas::end_recording`] to publish the commands as an immutable
/// [`Picture`].
///
/// ```
/// use vellum_picture::{Canvas, Color, Matrix, Paint, Path, Rect};
///
/// let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 100.0, 100.0));
/// canvas.save();
/// canvas.set_matrix(Matrix::translation(10.0, 10.0));
/// let mut path = Path::new();
/// path.add_rect(Rect::new(0.0, 0.0, 20.0, 20.0));
/// canvas.draw_path(&path, &Paint::fill(Color::BLACK));
/// canvas.restore();
///
/// let picture = canvas.end_recording();
/// assert_eq!(picture.commands().len(), 4);
/// assert_eq!(canvas.save_count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Canvas {
    cull_rect: Rect,
    commands: Vec<CanvasCommand>,
    total_matrix: Matrix,
    matrix_stack: Vec<Matrix>,
}

impl Canvas {
    /// Begin a recording session with the given cull rectangle.
    pub fn new(cull_rect: Rect) -> Self {
        Self {
            cull_rect,
            commands: Vec::new(),
            total_matrix: Matrix::IDENTITY,
            matrix_stack: Vec::new(),
        }
    }

    /// The cull rectangle of the current recording.
    pub fn cull_rect(&self) -> Rect {
        self.cull_rect
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[CanvasCommand] {
        &self.commands
    }

    /// Current total matrix.
    pub fn total_matrix(&self) -> Matrix {
        self.total_matrix
    }

    /// Current save count (depth of the save stack).
    pub fn save_count(&self) -> usize {
        self.matrix_stack.len()
    }

    /// Push the current matrix. Returns the save count after the push.
    pub fn save(&mut self) -> usize {
        self.matrix_stack.push(self.total_matrix);
        let count = self.save_count();
        self.commands.push(CanvasCommand::Save { count });
        count
    }

    /// Push the current matrix and begin a compositing layer.
    ///
    /// Returns the save count after the push.
    pub fn save_layer(&mut self, paint: Option<&Paint>) -> usize {
        self.matrix_stack.push(self.total_matrix);
        let count = self.save_count();
        self.commands.push(CanvasCommand::SaveLayer {
            count,
            paint: paint.cloned(),
        });
        count
    }

    /// Pop the most recent save or layer and restore its matrix.
    ///
    /// Restoring with nothing saved is tolerated: a warning is logged, the
    /// matrix is left as is, and a `Restore { count: 0 }` command is still
    /// recorded. The emitted stream therefore looks balanced to consumers
    /// even when the caller's calls were not.
    pub fn restore(&mut self) {
        match self.matrix_stack.pop() {
            Some(matrix) => self.total_matrix = matrix,
            None => log::warn!("Canvas::restore called without a matching save"),
        }
        let count = self.save_count();
        self.commands.push(CanvasCommand::Restore { count });
    }

    /// Restore until the save count equals `count`.
    ///
    /// Does nothing if the save count is already at or below `count`.
    pub fn restore_to_count(&mut self, count: usize) {
        while self.save_count() > count {
            self.restore();
        }
    }

    /// Replace the total matrix.
    pub fn set_matrix(&mut self, matrix: Matrix) {
        self.total_matrix = matrix;
        self.commands.push(CanvasCommand::SetMatrix { matrix });
    }

    /// Pre-concatenate `matrix` onto the total matrix and record the result.
    pub fn concat(&mut self, matrix: &Matrix) {
        let total = self.total_matrix.pre_concat(matrix);
        self.set_matrix(total);
    }

    /// Record a path clip.
    pub fn clip_path(&mut self, path: &Path, operation: ClipOperation, antialias: bool) {
        self.commands.push(CanvasCommand::ClipPath {
            path: path.clone(),
            operation,
            antialias,
        });
    }

    /// Record a rectangle clip.
    pub fn clip_rect(&mut self, rect: Rect, operation: ClipOperation, antialias: bool) {
        self.commands.push(CanvasCommand::ClipRect {
            rect,
            operation,
            antialias,
        });
    }

    /// Record a path draw.
    pub fn draw_path(&mut self, path: &Path, paint: &Paint) {
        self.commands.push(CanvasCommand::DrawPath {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    /// Record an image draw.
    pub fn draw_image(&mut self, image: &Image, source: Rect, dest: Rect, paint: Option<&Paint>) {
        self.commands.push(CanvasCommand::DrawImage {
            image: image.clone(),
            source,
            dest,
            paint: paint.cloned(),
        });
    }

    /// Record a positioned text draw.
    pub fn draw_text(&mut self, blob: &TextBlob, x: f32, y: f32, paint: &Paint) {
        self.commands.push(CanvasCommand::DrawText {
            blob: blob.clone(),
            x,
            y,
            paint: paint.clone(),
        });
    }

    /// Record a text-on-path draw.
    pub fn draw_text_on_path(
        &mut self,
        text: &str,
        path: &Path,
        h_offset: f32,
        v_offset: f32,
        paint: &Paint,
    ) {
        self.commands.push(CanvasCommand::DrawTextOnPath {
            text: String::from(text),
            path: path.clone(),
            h_offset,
            v_offset,
            paint: paint.clone(),
        });
    }

    /// Publish the recorded commands as a [`Picture`] and reset the canvas.
    ///
    /// After this call the canvas is empty, its matrix is the identity, and
    /// its save count is zero; it keeps its cull rectangle and can record a
    /// new session.
    pub fn end_recording(&mut self) -> Picture {
        let commands = core::mem::take(&mut self.commands);
        self.matrix_stack.clear();
        self.total_matrix = Matrix::IDENTITY;
        Picture::new(self.cull_rect, commands)
    }
}

/// Record the commands issued by `f` into a new [`Picture`].
pub fn record_picture<F>(cull_rect: Rect, f: F) -> Picture
where
    F: FnOnce(&mut Canvas),
{
    let mut canvas = Canvas::new(cull_rect);
    f(&mut canvas);
    canvas.end_recording()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use crate::geometry::Point;
    use alloc::vec;

    fn counts(commands: &[CanvasCommand]) -> Vec<usize> {
        commands
            .iter()
            .filter_map(|c| match c {
                CanvasCommand::Save { count }
                | CanvasCommand::Restore { count }
                | CanvasCommand::SaveLayer { count, .. } => Some(*count),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn save_and_restore_tag_counts() {
        let mut canvas = Canvas::new(Rect::EMPTY);
        assert_eq!(canvas.save(), 1);
        assert_eq!(canvas.save_layer(None), 2);
        assert_eq!(canvas.save(), 3);
        canvas.restore();
        canvas.restore();
        assert_eq!(canvas.save_count(), 1);
        assert_eq!(counts(canvas.commands()), vec![1, 2, 3, 2, 1]);
    }

    #[test]
    fn save_restore_balance_over_sequences() {
        for saves in 0..6_usize {
            for restores in 0..=saves {
                let mut canvas = Canvas::new(Rect::EMPTY);
                let mut expected = Vec::new();
                for i in 0..saves {
                    let c = if i % 2 == 0 {
                        canvas.save()
                    } else {
                        canvas.save_layer(Some(&Paint::default()))
                    };
                    assert_eq!(c, canvas.save_count());
                    expected.push(i + 1);
                }
                for j in 0..restores {
                    canvas.restore();
                    expected.push(saves - j - 1);
                }
                assert_eq!(canvas.save_count(), saves - restores);
                assert_eq!(counts(canvas.commands()), expected);
            }
        }
    }

    #[test]
    fn unbalanced_restore_is_clamped_and_still_recorded() {
        let mut canvas = Canvas::new(Rect::EMPTY);
        canvas.set_matrix(Matrix::translation(3.0, 4.0));
        canvas.restore();
        assert_eq!(canvas.save_count(), 0);
        assert_eq!(canvas.total_matrix(), Matrix::translation(3.0, 4.0));
        assert_eq!(
            canvas.commands().last(),
            Some(&CanvasCommand::Restore { count: 0 })
        );
    }

    #[test]
    fn restore_pops_matrix() {
        let mut canvas = Canvas::new(Rect::EMPTY);
        canvas.save();
        canvas.set_matrix(Matrix::scale(2.0, 2.0));
        canvas.save();
        canvas.concat(&Matrix::translation(1.0, 0.0));
        assert_eq!(
            canvas.total_matrix().map_point(Point::new(0.0, 0.0)),
            Point::new(2.0, 0.0)
        );
        canvas.restore();
        assert_eq!(canvas.total_matrix(), Matrix::scale(2.0, 2.0));
        canvas.restore();
        assert_eq!(canvas.total_matrix(), Matrix::IDENTITY);
    }

    #[test]
    fn set_matrix_replaces() {
        let mut canvas = Canvas::new(Rect::EMPTY);
        canvas.set_matrix(Matrix::translation(5.0, 5.0));
        canvas.set_matrix(Matrix::scale(2.0, 2.0));
        assert_eq!(canvas.total_matrix(), Matrix::scale(2.0, 2.0));
    }

    #[test]
    fn restore_to_count_unwinds() {
        let mut canvas = Canvas::new(Rect::EMPTY);
        canvas.save();
        canvas.save();
        canvas.save();
        canvas.restore_to_count(1);
        assert_eq!(canvas.save_count(), 1);
        canvas.restore_to_count(4);
        assert_eq!(canvas.save_count(), 1);
    }

    #[test]
    fn clips_do_not_touch_the_matrix() {
        let mut canvas = Canvas::new(Rect::EMPTY);
        canvas.set_matrix(Matrix::translation(1.0, 1.0));
        let mut path = Path::new();
        path.add_circle(0.0, 0.0, 5.0);
        canvas.clip_path(&path, ClipOperation::Intersect, true);
        canvas.clip_rect(Rect::new(0.0, 0.0, 1.0, 1.0), ClipOperation::Difference, false);
        assert_eq!(canvas.total_matrix(), Matrix::translation(1.0, 1.0));
        assert!(matches!(
            canvas.commands()[2],
            CanvasCommand::ClipRect {
                operation: ClipOperation::Difference,
                antialias: false,
                ..
            }
        ));
    }

    #[test]
    fn draws_capture_arguments_by_value() {
        let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut path = Path::new();
        path.move_to(0.0, 0.0).line_to(5.0, 5.0);
        let mut paint = Paint::stroke(Color::BLACK, 1.0);
        canvas.draw_path(&path, &paint);

        // Later mutation does not reach the recorded command.
        paint.stroke_width = 9.0;
        path.line_to(9.0, 9.0);

        let picture = canvas.end_recording();
        let CanvasCommand::DrawPath {
            path: recorded_path,
            paint: recorded_paint,
        } = &picture.commands()[0]
        else {
            panic!("expected DrawPath");
        };
        assert_eq!(recorded_paint.stroke_width, 1.0);
        assert_eq!(recorded_path.commands().len(), 2);
        assert!(picture.commands()[0].is_draw());
    }

    #[test]
    fn end_recording_resets_for_reuse() {
        let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        canvas.save();
        canvas.set_matrix(Matrix::scale(3.0, 3.0));
        let first = canvas.end_recording();
        assert_eq!(first.commands().len(), 2);
        assert_eq!(first.cull_rect(), Rect::new(0.0, 0.0, 10.0, 10.0));

        assert!(canvas.commands().is_empty());
        assert_eq!(canvas.save_count(), 0);
        assert_eq!(canvas.total_matrix(), Matrix::IDENTITY);

        canvas.draw_text(
            &TextBlob::positioned("hi", vec![Point::ZERO, Point::new(6.0, 0.0)]),
            0.0,
            12.0,
            &Paint::default(),
        );
        let second = canvas.end_recording();
        assert_eq!(second.commands().len(), 1);
        // The first picture is unaffected by the second session.
        assert_eq!(first.commands().len(), 2);
    }

    #[test]
    fn record_picture_helper() {
        let image = Image::rgba8(1, 1, vec![255_u8; 4]);
        let picture = record_picture(Rect::new(0.0, 0.0, 1.0, 1.0), |canvas| {
            canvas.draw_image(&image, image.bounds(), image.bounds(), None);
            let mut path = Path::new();
            path.move_to(0.0, 0.0).line_to(1.0, 0.0);
            canvas.draw_text_on_path("abc", &path, 0.0, -1.0, &Paint::default());
        });
        assert_eq!(picture.commands().len(), 2);
        assert!(picture.commands().iter().all(CanvasCommand::is_draw));
    }
}
