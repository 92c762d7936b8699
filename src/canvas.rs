use std::f32::consts::TAU;

use sfml::graphics::{Color, PrimitiveType, RenderStates, RenderTarget, Vertex};
use sfml::system::Vector2f;

use crate::renderer::{ArcSweep, Canvas};

const MIN_SEGMENTS: usize = 8;
const MAX_SEGMENTS: usize = 256;
/// Approximate pixel length of one arc segment.
const SEGMENT_LENGTH: f32 = 4.0;

/// `Canvas` over any SFML render target, typically a square `RenderTexture`.
pub struct SfmlCanvas<'a, R: RenderTarget> {
    target: &'a mut R,
    side: f32,
}

impl<'a, R: RenderTarget> SfmlCanvas<'a, R> {
    pub fn new(target: &'a mut R) -> SfmlCanvas<'a, R> {
        let size = target.size();
        SfmlCanvas {
            target,
            side: size.x.min(size.y) as f32,
        }
    }

    fn draw_vertices(&mut self, vertices: &[Vertex], primitive: PrimitiveType) {
        self.target
            .draw_primitives(vertices, primitive, &RenderStates::DEFAULT);
    }

    fn draw_ring(&mut self, center: Vector2f, radius: f32, arc: ArcSweep, color: Color, width: f32) {
        if arc.is_empty() {
            return;
        }

        let inner = (radius - width / 2.0).max(0.0);
        let outer = radius + width / 2.0;
        let segments = segment_count(arc.sweep, outer);

        let mut vertices = Vec::with_capacity((segments + 1) * 2);
        for step in 0..=segments {
            let (sin, cos) = arc.angle_at(step as f32 / segments as f32).sin_cos();
            vertices.push(vertex(center.x + inner * cos, center.y + inner * sin, color));
            vertices.push(vertex(center.x + outer * cos, center.y + outer * sin, color));
        }

        self.draw_vertices(&vertices, PrimitiveType::TRIANGLE_STRIP);
    }
}

impl<'a, R: RenderTarget> Canvas for SfmlCanvas<'a, R> {
    fn side(&self) -> f32 {
        self.side
    }

    fn clear(&mut self) {
        self.target.clear(Color::TRANSPARENT);
    }

    fn stroke_line(&mut self, from: Vector2f, to: Vector2f, color: Color, width: f32) {
        let delta = to - from;
        let length = (delta.x * delta.x + delta.y * delta.y).sqrt();
        if length == 0.0 {
            return;
        }

        let half = width / 2.0;
        let normal = Vector2f::new(-delta.y / length * half, delta.x / length * half);
        let quad = [
            vertex(from.x + normal.x, from.y + normal.y, color),
            vertex(from.x - normal.x, from.y - normal.y, color),
            vertex(to.x + normal.x, to.y + normal.y, color),
            vertex(to.x - normal.x, to.y - normal.y, color),
        ];

        self.draw_vertices(&quad, PrimitiveType::TRIANGLE_STRIP);
    }

    fn stroke_circle(&mut self, center: Vector2f, radius: f32, color: Color, width: f32) {
        self.draw_ring(center, radius, ArcSweep::resolve(0.0, TAU, false), color, width);
    }

    fn fill_circle(&mut self, center: Vector2f, radius: f32, color: Color) {
        let segments = segment_count(TAU, radius);

        let mut vertices = Vec::with_capacity(segments + 2);
        vertices.push(vertex(center.x, center.y, color));
        for step in 0..=segments {
            let (sin, cos) = (TAU * step as f32 / segments as f32).sin_cos();
            vertices.push(vertex(center.x + radius * cos, center.y + radius * sin, color));
        }

        self.draw_vertices(&vertices, PrimitiveType::TRIANGLE_FAN);
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
        let arc = ArcSweep::resolve(start, end, anticlockwise);
        self.draw_ring(center, radius, arc, color, width);
    }
}

fn vertex(x: f32, y: f32, color: Color) -> Vertex {
    Vertex::new((x, y).into(), color, (0.0, 0.0).into())
}

fn segment_count(sweep: f32, radius: f32) -> usize {
    let length = sweep.abs() * radius.max(1.0);
    ((length / SEGMENT_LENGTH).ceil() as usize).clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}
