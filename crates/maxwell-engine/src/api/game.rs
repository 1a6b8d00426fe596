use std::error::Error;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::api::types::GameEvent;
use crate::input::queue::InputQueue;
use crate::renderer::instance::RenderBuffer;
use crate::systems::effects::EffectsState;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Seedable random source shared by a game session.
/// Everything cosmetic that needs randomness draws from it, so a fixed seed
/// reproduces a session exactly.
pub type SimRng = ChaCha8Rng;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units (pixels of the interaction area).
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of vector vertices (default: 16384).
    pub max_vector_vertices: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the session RNG. The effects RNG is derived from it.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 1200.0,
            world_height: 700.0,
            max_instances: 512,
            max_vector_vertices: 16384,
            max_events: 32,
            seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and lay out the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. Handle input, advance the simulation, check win conditions.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Read-only render pass: write instances and vector shapes for this frame.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Apply a JSON configuration document sent by the host page.
    fn configure(&mut self, _ctx: &mut EngineContext, _json: &str) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    /// Serialize the state the host page needs beyond the render buffers
    /// (flags, dialog text, navigation requests).
    fn snapshot_json(&self) -> String {
        String::from("null")
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub effects: EffectsState,
    pub events: Vec<GameEvent>,
    pub rng: SimRng,
    /// Seconds per fixed step.
    pub dt: f32,
    frame: u64,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_seed(GameConfig::default().seed)
    }

    /// Create an EngineContext whose RNGs start from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            effects: EffectsState::new(seed),
            events: Vec::new(),
            rng: SimRng::seed_from_u64(seed),
            dt: 1.0 / 60.0,
            frame: 0,
        }
    }

    /// Create an EngineContext matching a game's configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        let mut ctx = Self::with_seed(config.seed);
        ctx.dt = config.fixed_dt;
        ctx.events.reserve(config.max_events);
        ctx
    }

    /// Number of fixed steps completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Mark the end of a fixed step. Called by the runner after `Game::update`.
    pub fn end_step(&mut self) {
        self.effects.tick(self.dt);
        self.frame += 1;
    }

    /// Emit a game event to be forwarded to the host page.
    pub fn emit_event(&mut self, event: GameEvent) {
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
    pub render_buffer: &'a mut RenderBuffer,
    #[cfg(feature = "vectors")]
    pub vectors: &'a mut VectorState,
}
