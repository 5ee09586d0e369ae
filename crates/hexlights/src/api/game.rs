use std::error::Error;

use crate::api::types::GameEvent;
use crate::input::queue::InputQueue;
use crate::systems::vector::VectorState;

/// Error type a game hands back when it rejects a host-supplied configuration.
pub type LoadConfigError = Box<dyn Error + Send + Sync>;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// World width in pixels.
    pub world_width: f32,
    /// World height in pixels.
    pub world_height: f32,
    /// Maximum number of tessellated vector vertices per frame (default: 16384).
    pub max_vector_vertices: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            max_vector_vertices: 16384,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called before init and after every accepted
    /// `load_config`.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Handle the queued input of one frame and check win conditions.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Read-only paint pass. The vector buffer is cleared before each call.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Replace the game's configuration with a JSON document sent by the host.
    /// Games without runtime configuration accept anything.
    fn load_config(&mut self, _json: &str) -> Result<(), LoadConfigError> {
        Ok(())
    }
}

/// Mutable engine state passed to `Game::init` and `Game::update`.
pub struct EngineContext {
    pub events: Vec<GameEvent>,
    max_events: usize,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_max_events(GameConfig::default().max_events)
    }

    pub fn with_max_events(max_events: usize) -> Self {
        Self {
            events: Vec::with_capacity(max_events),
            max_events,
        }
    }

    /// Emit a game event to be forwarded to the host.
    /// Events past the per-frame capacity are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("event buffer full ({}), dropping {:?}", self.max_events, event);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context handed to `Game::render`.
pub struct RenderContext<'a> {
    pub vectors: &'a mut VectorState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_event_respects_capacity() {
        let mut ctx = EngineContext::with_max_events(2);
        for kind in 0..3 {
            ctx.emit_event(GameEvent::new(kind, 0.0, 0.0, 0.0));
        }
        assert_eq!(ctx.events.len(), 2);
        assert_eq!(ctx.events[1].kind_id(), 1);

        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }
}
