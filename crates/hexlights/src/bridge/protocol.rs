/// Shared buffer layout.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 8 floats]
/// [Vector vertices: max_vector_vertices × 6 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::systems::vector::VectorVertex;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_WORLD_WIDTH: usize = 2;
pub const HEADER_WORLD_HEIGHT: usize = 3;
pub const HEADER_MAX_VECTOR_VERTICES: usize = 4;
pub const HEADER_VECTOR_VERTEX_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;

/// Protocol version reported to the host.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Section sizes and offsets derived from the configured capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_vector_vertices: usize,
    pub max_events: usize,

    pub vector_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where vector vertex data begins.
    pub vector_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_vector_vertices: usize, max_events: usize) -> Self {
        let vector_data_floats = max_vector_vertices * VectorVertex::FLOATS;
        let event_data_floats = max_events * GameEvent::FLOATS;

        let vector_data_offset = HEADER_FLOATS;
        let event_data_offset = vector_data_offset + vector_data_floats;
        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_vector_vertices,
            max_events,
            vector_data_floats,
            event_data_floats,
            vector_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_vector_vertices, config.max_events)
    }

    /// Header values for one frame.
    pub fn header(
        &self,
        config: &GameConfig,
        frame: u32,
        vector_vertex_count: usize,
        event_count: usize,
    ) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_FRAME_COUNTER] = frame as f32;
        header[HEADER_WORLD_WIDTH] = config.world_width;
        header[HEADER_WORLD_HEIGHT] = config.world_height;
        header[HEADER_MAX_VECTOR_VERTICES] = self.max_vector_vertices as f32;
        header[HEADER_VECTOR_VERTEX_COUNT] = vector_vertex_count.min(self.max_vector_vertices) as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = event_count.min(self.max_events) as f32;
        header
    }
}

impl Default for ProtocolLayout {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
