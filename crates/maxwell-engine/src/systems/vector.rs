//! Lyon-based vector shapes: tables, zones and ropes.
//!
//! Shapes are tessellated on the CPU into a flat triangle list
//! (`x, y, r, g, b, a` per vertex) that the host page draws as-is.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::{point, Box2D};
use lyon::path::builder::BorderRadii;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

/// Per-vertex data. 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from a `0xRRGGBB` literal, as written in CSS.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
        )
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

struct FillVertexCtor {
    color: VectorColor,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        let c = self.color;
        VectorVertex { x: p.x, y: p.y, r: c.r, g: c.g, b: c.b, a: c.a }
    }
}

struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        let c = self.color;
        VectorVertex { x: p.x, y: p.y, r: c.r, g: c.g, b: c.b, a: c.a }
    }
}

/// Tessellators plus the per-frame output buffer.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
}

impl VectorState {
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    /// A state that never holds more than `max_vertices` vertices. A shape that
    /// would overflow is dropped whole.
    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            max_vertices,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Copy indexed geometry into the flat buffer as a triangle list.
    fn flush_geometry(&mut self) {
        let fits = self.vertex_count() + self.geometry.indices.len() <= self.max_vertices;
        if fits {
            for idx in &self.geometry.indices {
                let v = &self.geometry.vertices[*idx as usize];
                self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
            }
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    pub fn fill_rect(&mut self, pos: Vec2, width: f32, height: f32, color: VectorColor) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(pos.x, pos.y));
        builder.line_to(point(pos.x + width, pos.y));
        builder.line_to(point(pos.x + width, pos.y + height));
        builder.line_to(point(pos.x, pos.y + height));
        builder.close();
        self.fill_path(&builder.build(), color);
    }

    pub fn fill_rounded_rect(&mut self, pos: Vec2, width: f32, height: f32, radius: f32, color: VectorColor) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let rect = Box2D::new(point(pos.x, pos.y), point(pos.x + width, pos.y + height));
        let mut builder = Path::builder();
        builder.add_rounded_rectangle(&rect, &BorderRadii::new(radius.max(0.0)), Winding::Positive);
        self.fill_path(&builder.build(), color);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: VectorColor) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        self.fill_path(&builder.build(), color);
    }

    pub fn fill_path(&mut self, path: &Path, color: VectorColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }

    /// Stroke an open quadratic curve from `from` through control point `ctrl` to `to`.
    pub fn stroke_quadratic(&mut self, from: Vec2, ctrl: Vec2, to: Vec2, width: f32, color: VectorColor) {
        let mut builder = Path::builder();
        builder.begin(point(from.x, from.y));
        builder.quadratic_bezier_to(point(ctrl.x, ctrl.y), point(to.x, to.y));
        builder.end(false);
        self.stroke_path(&builder.build(), width, color);
    }

    /// Stroke the outline of a rounded rectangle (dashed zones are drawn by the host).
    pub fn stroke_rounded_rect(&mut self, pos: Vec2, width: f32, height: f32, radius: f32, line_width: f32, color: VectorColor) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let rect = Box2D::new(point(pos.x, pos.y), point(pos.x + width, pos.y + height));
        let mut builder = Path::builder();
        builder.add_rounded_rectangle(&rect, &BorderRadii::new(radius.max(0.0)), Winding::Positive);
        self.stroke_path(&builder.build(), line_width, color);
    }

    pub fn stroke_path(&mut self, path: &Path, width: f32, color: VectorColor) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}
