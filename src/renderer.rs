use std::f32::consts::TAU;

use sfml::graphics::Color;
use sfml::system::Vector2f;

use crate::angle::to_radians;
use crate::theme::{ThemeColor, ThemeProvider};

pub const CIRCLE_MARGIN: f32 = 60.0;
pub const POINT_RADIUS: f32 = 8.0;
pub const ARC_SCALE: f32 = 0.2;

pub const AXIS_WIDTH: f32 = 2.0;
pub const CIRCLE_WIDTH: f32 = 3.0;
pub const VECTOR_WIDTH: f32 = 4.0;
pub const ARC_WIDTH: f32 = 3.0;

/// A square drawing surface.
pub trait Canvas {
    fn side(&self) -> f32;

    /// Resets every pixel to transparent.
    fn clear(&mut self);

    fn stroke_line(&mut self, from: Vector2f, to: Vector2f, color: Color, width: f32);

    fn stroke_circle(&mut self, center: Vector2f, radius: f32, color: Color, width: f32);

    fn fill_circle(&mut self, center: Vector2f, radius: f32, color: Color);

    /// Arc between two screen angles in radians. `anticlockwise` picks the
    /// direction of travel from `start` to `end`, as in the HTML canvas API.
    #[allow(clippy::too_many_arguments)]
    fn stroke_arc(
        &mut self,
        center: Vector2f,
        radius: f32,
        start: f32,
        end: f32,
        anticlockwise: bool,
        color: Color,
        width: f32,
    );
}

/// Start angle plus a signed sweep, both in screen radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSweep {
    pub start: f32,
    pub sweep: f32,
}

impl ArcSweep {
    pub fn resolve(start: f32, end: f32, anticlockwise: bool) -> ArcSweep {
        let sweep = if anticlockwise {
            let span = start - end;
            if span >= TAU {
                -TAU
            } else {
                -span.rem_euclid(TAU)
            }
        } else {
            let span = end - start;
            if span >= TAU {
                TAU
            } else {
                span.rem_euclid(TAU)
            }
        };

        ArcSweep { start, sweep }
    }

    pub fn is_empty(&self) -> bool {
        self.sweep == 0.0
    }

    pub fn angle_at(&self, t: f32) -> f32 {
        self.start + self.sweep * t
    }
}

/// Positions of everything on the surface for a given angle. Screen Y grows
/// downward, so the tip sits at `center.y - radius * sin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleGeometry {
    pub side: f32,
    pub center: Vector2f,
    pub radius: f32,
    pub theta: f32,
    pub tip: Vector2f,
}

impl CircleGeometry {
    pub fn new(side: f32, angle_degrees: i32) -> CircleGeometry {
        let center = Vector2f::new(side / 2.0, side / 2.0);
        let radius = (side / 2.0 - CIRCLE_MARGIN).max(0.0);
        let theta = to_radians(angle_degrees as f64) as f32;
        let (sin, cos) = theta.sin_cos();

        CircleGeometry {
            side,
            center,
            radius,
            theta,
            tip: Vector2f::new(center.x + radius * cos, center.y - radius * sin),
        }
    }
}

pub struct CircleRenderer<T: ThemeProvider> {
    theme: T,
}

impl<T: ThemeProvider> CircleRenderer<T> {
    pub fn new(theme: T) -> CircleRenderer<T> {
        CircleRenderer { theme }
    }

    pub fn theme(&self) -> &T {
        &self.theme
    }

    #[cfg(test)]
    pub fn theme_mut(&mut self) -> &mut T {
        &mut self.theme
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, angle_degrees: i32) {
        let geometry = CircleGeometry::new(canvas.side(), angle_degrees);
        let CircleGeometry {
            side,
            center,
            radius,
            theta,
            tip,
        } = geometry;

        canvas.clear();

        let foreground = self.theme.color_or_fallback(ThemeColor::Foreground);
        canvas.stroke_line(
            Vector2f::new(0.0, center.y),
            Vector2f::new(side, center.y),
            foreground,
            AXIS_WIDTH,
        );
        canvas.stroke_line(
            Vector2f::new(center.x, 0.0),
            Vector2f::new(center.x, side),
            foreground,
            AXIS_WIDTH,
        );

        let primary = self.theme.color_or_fallback(ThemeColor::Primary);
        canvas.stroke_circle(center, radius, primary, CIRCLE_WIDTH);

        let secondary = self.theme.color_or_fallback(ThemeColor::Secondary);
        canvas.stroke_line(center, tip, secondary, VECTOR_WIDTH);
        canvas.fill_circle(tip, POINT_RADIUS, secondary);

        let accent = self.theme.color_or_fallback(ThemeColor::Accent);
        canvas.stroke_arc(
            center,
            radius * ARC_SCALE,
            0.0,
            -theta,
            true,
            accent,
            ARC_WIDTH,
        );
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCommand {
        Clear,
        Line {
            from: Vector2f,
            to: Vector2f,
            color: Color,
            width: f32,
        },
        Circle {
            center: Vector2f,
            radius: f32,
            color: Color,
            width: f32,
        },
        Disc {
            center: Vector2f,
            radius: f32,
            color: Color,
        },
        Arc {
            center: Vector2f,
            radius: f32,
            start: f32,
            end: f32,
            anticlockwise: bool,
            color: Color,
            width: f32,
        },
    }

    /// Canvas that keeps a log of what was drawn since the last clear.
    pub struct RecordingCanvas {
        pub side: f32,
        pub commands: Vec<DrawCommand>,
        pub frames: usize,
    }

    impl RecordingCanvas {
        pub fn new(side: f32) -> RecordingCanvas {
            RecordingCanvas {
                side,
                commands: Vec::new(),
                frames: 0,
            }
        }
    }

    impl Canvas for RecordingCanvas {
        fn side(&self) -> f32 {
            self.side
        }

        fn clear(&mut self) {
            self.commands.clear();
            self.commands.push(DrawCommand::Clear);
            self.frames += 1;
        }

        fn stroke_line(&mut self, from: Vector2f, to: Vector2f, color: Color, width: f32) {
            self.commands.push(DrawCommand::Line {
                from,
                to,
                color,
                width,
            });
        }

        fn stroke_circle(&mut self, center: Vector2f, radius: f32, color: Color, width: f32) {
            self.commands.push(DrawCommand::Circle {
                center,
                radius,
                color,
                width,
            });
        }

        fn fill_circle(&mut self, center: Vector2f, radius: f32, color: Color) {
            self.commands.push(DrawCommand::Disc {
                center,
                radius,
                color,
            });
        }

        fn stroke_arc(
            &mut self,
            center: Vector2f,
            radius: f32,
            start: f32,
            end: f32,
            anticlockwise: bool,
            color: Color,
            width: f32,
        ) {
            self.commands.push(DrawCommand::Arc {
                center,
                radius,
                start,
                end,
                anticlockwise,
                color,
                width,
            });
        }
    }
}
