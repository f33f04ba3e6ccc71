// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path geometry as an ordered list of commands.

use alloc::vec::Vec;

use kurbo::{BezPath, Shape};

use crate::FillRule;
use crate::geometry::{BoundsBuilder, Point, Rect};

/// A single path command.
#[derive(Clone, Debug, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath at the given point.
    MoveTo(Point),
    /// Straight line from the current point.
    LineTo(Point),
    /// Elliptical arc from the current point, as in SVG.
    ArcTo {
        /// Horizontal radius.
        rx: f32,
        /// Vertical radius.
        ry: f32,
        /// Rotation of the ellipse's x axis, in degrees.
        x_axis_rotate: f32,
        /// Take the larger of the two candidate arcs.
        large_arc: bool,
        /// Sweep in the positive-angle direction.
        sweep: bool,
        /// End point of the arc.
        end: Point,
    },
    /// Quadratic Bézier with one control point.
    QuadTo {
        /// Control point.
        control: Point,
        /// End point.
        end: Point,
    },
    /// Cubic Bézier with two control points.
    CubicTo {
        /// First control point.
        control1: Point,
        /// Second control point.
        control2: Point,
        /// End point.
        end: Point,
    },
    /// Close the current subpath.
    Close,
    /// A closed rectangle subpath.
    AddRect(Rect),
    /// A closed rounded-rectangle subpath with uniform corner radii.
    AddRoundRect {
        /// Outer rectangle.
        rect: Rect,
        /// Horizontal corner radius.
        rx: f32,
        /// Vertical corner radius.
        ry: f32,
    },
    /// A closed ellipse inscribed in the rectangle.
    AddOval(Rect),
    /// A closed circle.
    AddCircle {
        /// Center point.
        center: Point,
        /// Radius.
        radius: f32,
    },
    /// A polyline through the given points.
    AddPoly {
        /// Vertices in order.
        points: Vec<Point>,
        /// Close the polyline into a polygon.
        close: bool,
    },
}

impl PathCommand {
    /// Returns `true` for commands that extend the current subpath from the
    /// current point.
    pub fn is_segment(&self) -> bool {
        match self {
            Self::LineTo(_) | Self::ArcTo { .. } | Self::QuadTo { .. } | Self::CubicTo { .. } => {
                true
            }
            Self::MoveTo(_)
            | Self::Close
            | Self::AddRect(_)
            | Self::AddRoundRect { .. }
            | Self::AddOval(_)
            | Self::AddCircle { .. }
            | Self::AddPoly { .. } => false,
        }
    }
}

/// Vector path: a fill rule plus an ordered list of [`PathCommand`]s.
///
/// Paths are plain values. Bounds are recomputed from the commands on every
/// call to [`Path::bounds`].
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// Rule deciding which regions are inside the path.
    pub fill_rule: FillRule,
    commands: Vec<PathCommand>,
}

impl Default for Path {
    fn default() -> Self {
        Self {
            fill_rule: FillRule::NonZero,
            commands: Vec::new(),
        }
    }
}

impl Path {
    /// Create an empty path with the `NonZero` fill rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from existing commands.
    pub fn from_commands(fill_rule: FillRule, commands: Vec<PathCommand>) -> Self {
        Self {
            fill_rule,
            commands,
        }
    }

    /// Set the fill rule, builder style.
    #[must_use]
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    /// The commands in order.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Returns `true` if the path has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Append a raw command.
    pub fn push(&mut self, command: PathCommand) -> &mut Self {
        self.commands.push(command);
        self
    }

    /// Start a new subpath.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.push(PathCommand::MoveTo(Point::new(x, y)))
    }

    /// Add a line segment.
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.push(PathCommand::LineTo(Point::new(x, y)))
    }

    /// Add an SVG-style elliptical arc.
    pub fn arc_to(
        &mut self,
        rx: f32,
        ry: f32,
        x_axis_rotate: f32,
        large_arc: bool,
        sweep: bool,
        x: f32,
        y: f32,
    ) -> &mut Self {
        self.push(PathCommand::ArcTo {
            rx,
            ry,
            x_axis_rotate,
            large_arc,
            sweep,
            end: Point::new(x, y),
        })
    }

    /// Add a quadratic Bézier segment.
    pub fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) -> &mut Self {
        self.push(PathCommand::QuadTo {
            control: Point::new(x1, y1),
            end: Point::new(x, y),
        })
    }

    /// Add a cubic Bézier segment.
    pub fn cubic_to(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x: f32,
        y: f32,
    ) -> &mut Self {
        self.push(PathCommand::CubicTo {
            control1: Point::new(x1, y1),
            control2: Point::new(x2, y2),
            end: Point::new(x, y),
        })
    }

    /// Close the current subpath.
    pub fn close(&mut self) -> &mut Self {
        self.push(PathCommand::Close)
    }

    /// Add a rectangle subpath.
    pub fn add_rect(&mut self, rect: Rect) -> &mut Self {
        self.push(PathCommand::AddRect(rect))
    }

    /// Add a rounded-rectangle subpath.
    pub fn add_round_rect(&mut self, rect: Rect, rx: f32, ry: f32) -> &mut Self {
        self.push(PathCommand::AddRoundRect { rect, rx, ry })
    }

    /// Add an ellipse inscribed in `rect`.
    pub fn add_oval(&mut self, rect: Rect) -> &mut Self {
        self.push(PathCommand::AddOval(rect))
    }

    /// Add a circle.
    pub fn add_circle(&mut self, x: f32, y: f32, radius: f32) -> &mut Self {
        self.push(PathCommand::AddCircle {
            center: Point::new(x, y),
            radius,
        })
    }

    /// Add a polyline or polygon.
    pub fn add_poly(&mut self, points: impl Into<Vec<Point>>, close: bool) -> &mut Self {
        self.push(PathCommand::AddPoly {
            points: points.into(),
            close,
        })
    }

    /// Conservative bounds of the path, or `None` if no command contributes a point.
    ///
    /// Curves contribute their control points rather than their true extrema,
    /// and arcs contribute only their end point, so the result may be larger
    /// than the exact geometric bounds or, for bulging arcs, miss the arc's
    /// outermost points.
    pub fn bounds(&self) -> Option<Rect> {
        let mut bounds = BoundsBuilder::default();
        for command in &self.commands {
            match command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => bounds.add_point(*p),
                PathCommand::ArcTo { end, .. } => bounds.add_point(*end),
                PathCommand::QuadTo { control, end } => {
                    bounds.add_point(*control);
                    bounds.add_point(*end);
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    bounds.add_point(*control1);
                    bounds.add_point(*control2);
                    bounds.add_point(*end);
                }
                PathCommand::Close => {}
                PathCommand::AddRect(rect)
                | PathCommand::AddRoundRect { rect, .. }
                | PathCommand::AddOval(rect) => bounds.add_rect(rect),
                PathCommand::AddCircle { center, radius } => {
                    bounds.add(center.x - radius, center.y - radius);
                    bounds.add(center.x + radius, center.y + radius);
                }
                PathCommand::AddPoly { points, .. } => {
                    for p in points {
                        bounds.add_point(*p);
                    }
                }
            }
        }
        bounds.finish()
    }

    /// Convert to a kurbo path, flattening shape commands at `tolerance`.
    ///
    /// Arcs with a zero radius or coincident endpoints degrade to a line.
    /// A segment with no open subpath starts one at the current point, which
    /// is the origin for a path that does not begin with `MoveTo`.
    pub fn to_bez_path(&self, tolerance: f64) -> BezPath {
        let mut out = BezPath::new();
        let mut current = kurbo::Point::ZERO;
        let mut start = kurbo::Point::ZERO;
        let mut open = false;
        for command in &self.commands {
            if command.is_segment() && !open {
                out.move_to(current);
                start = current;
                open = true;
            }
            match command {
                PathCommand::MoveTo(p) => {
                    current = p.to_kurbo();
                    start = current;
                    out.move_to(current);
                    open = true;
                }
                PathCommand::LineTo(p) => {
                    current = p.to_kurbo();
                    out.line_to(current);
                }
                PathCommand::ArcTo {
                    rx,
                    ry,
                    x_axis_rotate,
                    large_arc,
                    sweep,
                    end,
                } => {
                    let to = end.to_kurbo();
                    let svg_arc = kurbo::SvgArc {
                        from: current,
                        to,
                        radii: kurbo::Vec2::new(f64::from(*rx), f64::from(*ry)),
                        x_rotation: f64::from(*x_axis_rotate) * (core::f64::consts::PI / 180.0),
                        large_arc: *large_arc,
                        sweep: *sweep,
                    };
                    match kurbo::Arc::from_svg_arc(&svg_arc) {
                        Some(arc) => arc.to_cubic_beziers(tolerance, |p1, p2, p| {
                            out.curve_to(p1, p2, p);
                        }),
                        None => out.line_to(to),
                    }
                    current = to;
                }
                PathCommand::QuadTo { control, end } => {
                    current = end.to_kurbo();
                    out.quad_to(control.to_kurbo(), current);
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    current = end.to_kurbo();
                    out.curve_to(control1.to_kurbo(), control2.to_kurbo(), current);
                }
                PathCommand::Close => {
                    if open {
                        out.close_path();
                        current = start;
                        open = false;
                    }
                }
                PathCommand::AddRect(rect) => {
                    out.extend(rect.to_kurbo().path_elements(tolerance));
                    open = false;
                }
                PathCommand::AddRoundRect { rect, rx, ry } => {
                    // kurbo rounds with circular corners; use the mean radius.
                    let radius = (f64::from(*rx) + f64::from(*ry)) * 0.5;
                    let rr = kurbo::RoundedRect::from_rect(rect.to_kurbo(), radius);
                    out.extend(rr.path_elements(tolerance));
                    open = false;
                }
                PathCommand::AddOval(rect) => {
                    let ellipse = kurbo::Ellipse::from_rect(rect.to_kurbo());
                    out.extend(ellipse.path_elements(tolerance));
                    open = false;
                }
                PathCommand::AddCircle { center, radius } => {
                    let circle = kurbo::Circle::new(center.to_kurbo(), f64::from(*radius));
                    out.extend(circle.path_elements(tolerance));
                    open = false;
                }
                PathCommand::AddPoly { points, close } => {
                    let mut iter = points.iter();
                    if let Some(first) = iter.next() {
                        out.move_to(first.to_kurbo());
                        start = first.to_kurbo();
                        current = start;
                        open = true;
                        for p in iter {
                            current = p.to_kurbo();
                            out.line_to(current);
                        }
                        if *close {
                            out.close_path();
                            current = start;
                            open = false;
                        }
                    }
                }
            }
        }
        out
    }

    /// Returns `true` if `point` is inside the filled path, honoring the fill rule.
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        let winding = self.to_bez_path(tolerance).winding(point.to_kurbo());
        match self.fill_rule {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}
