use bytemuck::{Pod, Zeroable};

/// A game event communicated from Rust to the host page via the shared buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: u32, a: f32, b: f32, c: f32) -> Self {
        Self { kind: kind as f32, a, b, c }
    }

    /// The event kind as the integer the game emitted.
    pub fn kind_id(&self) -> u32 {
        self.kind as u32
    }
}
