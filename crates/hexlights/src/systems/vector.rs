//! Lyon-based polygon tessellation.
//!
//! Filled and stroked polygons are tessellated on the CPU into a flat triangle-list
//! buffer (`x, y, r, g, b, a` per vertex) that the host copies out of wasm memory and
//! draws as-is.
//!
//! ```ignore
//! // In Game::render():
//! ctx.vectors.fill_polygon(&corners, VectorColor::rgb8(144, 238, 144));
//! ctx.vectors.stroke_polygon(&corners, 2.0, VectorColor::BLACK);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24

    fn new(position: lyon::math::Point, color: VectorColor) -> Self {
        Self {
            x: position.x,
            y: position.y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

/// RGBA color for vector drawing operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGB u8 values (0-255) with full opacity.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 3]> for VectorColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb8(r, g, b)
    }
}

struct FillVertexCtor {
    color: VectorColor,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex::new(vertex.position(), self.color)
    }
}

struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex::new(vertex.position(), self.color)
    }
}

/// Tessellators plus the per-frame output buffer.
/// Cleared each frame and populated by drawing commands.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
}

impl VectorState {
    pub fn new(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            max_vertices,
        }
    }

    /// Clear the vertex buffer. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// Tessellated vertices in draw order.
    pub fn vertices(&self) -> &[VectorVertex] {
        bytemuck::cast_slice(&self.buffer)
    }

    /// Raw pointer to the flat float buffer (for the host-side copy).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Append indexed geometry to the flat buffer as a triangle list.
    /// Whole shapes that would overflow the buffer are dropped.
    fn flush_geometry(&mut self) {
        let incoming = self.geometry.indices.len();
        if self.vertex_count() + incoming > self.max_vertices {
            log::warn!(
                "vector buffer full ({} vertices), dropping shape of {}",
                self.max_vertices,
                incoming
            );
        } else {
            for idx in &self.geometry.indices {
                let v = &self.geometry.vertices[*idx as usize];
                self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
            }
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn closed_path(points: &[Vec2]) -> Path {
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
        builder.build()
    }

    /// Tessellate and fill a polygon. The polygon is closed automatically.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: VectorColor) {
        if points.len() < 3 {
            return;
        }
        let path = Self::closed_path(points);
        self.fill_path(&path, color);
    }

    /// Tessellate the outline of a closed polygon.
    pub fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 3 || width <= 0.0 {
            return;
        }
        let path = Self::closed_path(points);
        self.stroke_path(&path, width, color);
    }

    pub fn fill_path(&mut self, path: &Path, color: VectorColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );

        match result {
            Ok(()) => self.flush_geometry(),
            Err(err) => {
                log::warn!("fill tessellation failed: {:?}", err);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    pub fn stroke_path(&mut self, path: &Path, width: f32, color: VectorColor) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );

        match result {
            Ok(()) => self.flush_geometry(),
            Err(err) => {
                log::warn!("stroke tessellation failed: {:?}", err);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new(16384)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hexagon() -> [Vec2; 6] {
        [
            Vec2::new(25.0, 0.0),
            Vec2::new(75.0, 0.0),
            Vec2::new(100.0, 43.3),
            Vec2::new(75.0, 86.6),
            Vec2::new(25.0, 86.6),
            Vec2::new(0.0, 43.3),
        ]
    }

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(std::mem::size_of::<VectorVertex>(), VectorVertex::STRIDE_BYTES);
    }

    #[test]
    fn rgb8_scales_channels() {
        let c = VectorColor::from([255, 128, 0]);
        assert!((c.r - 1.0).abs() < 0.01);
        assert!((c.g - 0.5).abs() < 0.01);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn fill_hexagon_is_a_triangle_list() {
        let mut state = VectorState::default();
        state.fill_polygon(&hexagon(), VectorColor::BLACK);
        assert!(state.vertex_count() >= 12);
        assert_eq!(state.vertex_count() % 3, 0);
        assert!(state.vertices().iter().all(|v| v.r == 0.0 && v.a == 1.0));
    }

    #[test]
    fn stroke_hexagon_produces_vertices() {
        let mut state = VectorState::default();
        state.stroke_polygon(&hexagon(), 2.0, VectorColor::WHITE);
        assert!(state.vertex_count() > 0);
        assert_eq!(state.vertex_count() % 3, 0);
    }

    #[test]
    fn degenerate_input_produces_nothing() {
        let mut state = VectorState::default();
        state.fill_polygon(&[Vec2::ZERO, Vec2::ONE], VectorColor::WHITE);
        state.stroke_polygon(&hexagon(), 0.0, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn full_buffer_drops_whole_shapes() {
        let mut probe = VectorState::default();
        probe.fill_polygon(&hexagon(), VectorColor::WHITE);
        let one = probe.vertex_count();

        let mut state = VectorState::new(one + one / 2);
        state.fill_polygon(&hexagon(), VectorColor::WHITE);
        state.fill_polygon(&hexagon(), VectorColor::WHITE);
        assert_eq!(state.vertex_count(), one);

        state.clear();
        assert_eq!(state.vertex_count(), 0);
    }
}
