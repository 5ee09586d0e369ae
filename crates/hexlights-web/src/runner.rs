use hexlights::bridge::protocol::HEADER_FLOATS;
use hexlights::{
    EngineContext, Game, GameConfig, InputEvent, InputQueue, LoadConfigError, ProtocolLayout,
    RenderContext, VectorState,
};

/// Generic game runner that wires up the frame loop.
///
/// Each concrete game keeps one `GameRunner` in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]` (see `export_game!`), because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    vectors: VectorState,
    config: GameConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame: u32,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::with_max_events(config.max_events),
            input: InputQueue::new(),
            vectors: VectorState::new(config.max_vector_vertices),
            header: [0.0; HEADER_FLOATS],
            frame: 0,
            initialized: false,
            game,
            config,
            layout,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.apply_config();
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.paint();
    }

    /// Hand a JSON configuration to the game. On success the engine buffers are
    /// resized to the game's new config and the game is re-initialized.
    pub fn load_config(&mut self, json: &str) -> Result<(), LoadConfigError> {
        if let Err(err) = self.game.load_config(json) {
            log::error!("rejected configuration: {}", err);
            return Err(err);
        }
        if self.initialized {
            self.init();
        }
        Ok(())
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: handle every queued input, then repaint.
    pub fn tick(&mut self) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();

        self.frame = self.frame.wrapping_add(1);
        self.paint();
    }

    fn apply_config(&mut self) {
        let config = self.game.config();
        if config != self.config {
            self.layout = ProtocolLayout::from_config(&config);
            self.ctx = EngineContext::with_max_events(config.max_events);
            self.vectors = VectorState::new(config.max_vector_vertices);
            self.config = config;
        }
    }

    fn paint(&mut self) {
        self.vectors.clear();
        {
            let mut render_ctx = RenderContext {
                vectors: &mut self.vectors,
            };
            self.game.render(&mut render_ctx);
        }
        self.header = self.layout.header(
            &self.config,
            self.frame,
            self.vectors.vertex_count(),
            self.ctx.events.len(),
        );
    }

    // ---- Pointer accessors for host-side buffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    // ---- Capacity accessors ----

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexlights::glam::Vec2;
    use hexlights::{GameEvent, VectorColor};

    /// Paints one triangle and reports every pointer-up as an event.
    struct Probe {
        width: f32,
        inits: u32,
    }

    impl Game for Probe {
        fn config(&self) -> GameConfig {
            GameConfig {
                world_width: self.width,
                max_events: 4,
                ..GameConfig::default()
            }
        }

        fn init(&mut self, _ctx: &mut EngineContext) {
            self.inits += 1;
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            for event in input.iter() {
                if let InputEvent::PointerUp { x, .. } = event {
                    ctx.emit_event(GameEvent::new(1, *x, 0.0, 0.0));
                }
            }
        }

        fn render(&self, ctx: &mut RenderContext) {
            let tri = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
            ctx.vectors.fill_polygon(&tri, VectorColor::WHITE);
        }

        fn load_config(&mut self, json: &str) -> Result<(), LoadConfigError> {
            self.width = json.trim().parse::<f32>()?;
            Ok(())
        }
    }

    fn runner() -> GameRunner<Probe> {
        GameRunner::new(Probe { width: 320.0, inits: 0 })
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut r = runner();
        r.push_input(InputEvent::PointerUp { x: 1.0, y: 1.0 });
        r.tick();
        assert_eq!(r.game_events_len(), 0);
        assert_eq!(r.vector_vertex_count(), 0);
    }

    #[test]
    fn tick_consumes_input_and_repaints() {
        let mut r = runner();
        r.init();
        assert_eq!(r.vector_vertex_count(), 3);

        r.push_input(InputEvent::PointerUp { x: 5.0, y: 1.0 });
        r.push_input(InputEvent::PointerDown { x: 6.0, y: 1.0 });
        r.tick();
        assert_eq!(r.game_events_len(), 1);
        assert_eq!(r.vector_vertex_count(), 3);

        // Events are per frame and the queue was drained.
        r.tick();
        assert_eq!(r.game_events_len(), 0);
    }

    #[test]
    fn load_config_reinitializes() {
        let mut r = runner();
        r.init();
        assert_eq!(r.world_width(), 320.0);
        assert_eq!(r.max_events(), 4);

        r.load_config("640").unwrap();
        assert_eq!(r.world_width(), 640.0);
        assert_eq!(r.game.inits, 2);

        assert!(r.load_config("wide").is_err());
        assert_eq!(r.world_width(), 640.0);
    }
}
