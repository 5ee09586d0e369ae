pub mod api;
pub mod bridge;
pub mod error;
pub mod hex;
pub mod input;
pub mod systems;

pub use glam;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig, LoadConfigError, RenderContext};
pub use api::types::GameEvent;
pub use bridge::protocol::{ProtocolLayout, PROTOCOL_VERSION};
pub use error::GridError;
pub use hex::{HexGrid, HexIndex, HEX_CORNERS};
pub use input::queue::{InputEvent, InputQueue};
pub use systems::vector::{VectorColor, VectorState, VectorVertex};
