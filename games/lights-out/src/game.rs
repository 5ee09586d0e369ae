use glam::Vec2;
use hexlights::{
    EngineContext, Game, GameConfig, GameEvent, HexGrid, HexIndex, InputEvent, InputQueue,
    LoadConfigError, RenderContext,
};

use crate::board::{Cell, PuzzleBoard};
use crate::config::{ConfigError, LightsConfig};

// Game event kinds (Rust → host)
pub const EVENT_MOVE: u32 = 1;
pub const EVENT_WON: u32 = 2;
pub const EVENT_NEW_GAME: u32 = 3;

// Custom event kinds (host → Rust)
pub const CUSTOM_NEW_GAME: u32 = 1;

/// Vertex budget per painted cell (fill plus stroked outline with joins).
const VERTICES_PER_CELL: usize = 256;

pub struct LightsOut {
    grid: HexGrid,
    board: PuzzleBoard,
    config: LightsConfig,
    moves: u32,
}

impl LightsOut {
    pub fn new() -> Self {
        Self::from_config(LightsConfig::default()).expect("built-in configuration is valid")
    }

    pub fn from_config(config: LightsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = HexGrid::new(config.radius)?;
        let board = PuzzleBoard::from_codes(&config.layout)?;
        Ok(Self {
            grid,
            board,
            config,
            moves: 0,
        })
    }

    pub fn board(&self) -> &PuzzleBoard {
        &self.board
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    /// Moves applied since the last reset.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Cell under a world-space point.
    pub fn cell_at(&self, world: Vec2) -> HexIndex {
        self.grid.pick(world - self.config.origin())
    }

    /// Handle one click: pick, move, then check for the win. Clicks on holes or off the
    /// board change nothing but still run the win check.
    fn click(&mut self, ctx: &mut EngineContext, world: Vec2) {
        let index = self.cell_at(world);
        if self.board.apply_move(&self.grid, index) {
            self.moves += 1;
            let lit = self.board.lit_count();
            log::debug!("move {} at {:?}: {} lit", self.moves, index, lit);
            ctx.emit_event(GameEvent::new(EVENT_MOVE, self.moves as f32, lit as f32, 0.0));
        } else {
            log::debug!("ignored click at {:?} -> {:?}", world, index);
        }

        if self.board.is_win() {
            log::info!("Well done! Solved in {} moves", self.moves);
            ctx.emit_event(GameEvent::new(EVENT_WON, self.moves as f32, 0.0, 0.0));
            self.board.reset();
            self.moves = 0;
        }
    }

    fn new_game(&mut self, ctx: &mut EngineContext) {
        self.board.reset();
        self.moves = 0;
        ctx.emit_event(GameEvent::new(
            EVENT_NEW_GAME,
            self.board.lit_count() as f32,
            0.0,
            0.0,
        ));
    }
}

impl Default for LightsOut {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for LightsOut {
    fn config(&self) -> GameConfig {
        let size = self.grid.board_size(self.board.width(), self.board.height());
        let extent = self.config.origin() + size + Vec2::splat(self.config.line_width);
        GameConfig {
            world_width: extent.x,
            world_height: extent.y,
            max_vector_vertices: (self.board.active_count() * VERTICES_PER_CELL).max(16384),
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        log::info!(
            "lights-out: {}x{} board, {} of {} cells lit, radius {}",
            self.board.width(),
            self.board.height(),
            self.board.lit_count(),
            self.board.active_count(),
            self.grid.radius()
        );
        self.new_game(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerUp { x, y } => self.click(ctx, Vec2::new(x, y)),
                InputEvent::Custom { kind, .. } if kind == CUSTOM_NEW_GAME => self.new_game(ctx),
                _ => {}
            }
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        let origin = self.config.origin();
        for (index, cell) in self.board.cells() {
            let corners = self.grid.corners(index).map(|c| c + origin);
            let fill = if cell == Cell::On {
                self.config.on_color()
            } else {
                self.config.off_color()
            };
            ctx.vectors.fill_polygon(&corners, fill);
            ctx.vectors
                .stroke_polygon(&corners, self.config.line_width, self.config.line_color());
        }
    }

    fn load_config(&mut self, json: &str) -> Result<(), LoadConfigError> {
        let config = LightsConfig::from_json(json)?;
        *self = Self::from_config(config)?;
        Ok(())
    }
}
