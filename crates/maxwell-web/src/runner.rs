use maxwell_engine::{
    EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue, RenderBuffer,
    RenderContext,
};
#[cfg(feature = "vectors")]
use maxwell_engine::VectorState;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();

        Self {
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            #[cfg(feature = "vectors")]
            vectors: VectorState::with_capacity(config.max_vector_vertices),
            timestep: FixedTimestep::new(config.fixed_dt),
            game,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.render();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: fixed-step updates, then the render pass.
    ///
    /// Queued input is handed to the first fixed step only. When the frame is too
    /// short for any step, the input waits for the next tick.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        if steps > 0 {
            let mut input = self.input.take();
            for _ in 0..steps {
                self.game.update(&mut self.ctx, &input);
                self.ctx.end_step();
                input = InputQueue::new();
            }
        }

        self.render();
    }

    fn render(&mut self) {
        self.render_buffer.clear();
        #[cfg(feature = "vectors")]
        self.vectors.clear();
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
                #[cfg(feature = "vectors")]
                vectors: &mut self.vectors,
            };
            self.game.render(&mut render_ctx);
        }
        self.ctx.effects.write_instances(&mut self.render_buffer);
    }

    /// Apply a configuration document from the host page. A rejected document
    /// leaves the game as it was.
    pub fn configure(&mut self, json: &str) -> bool {
        match self.game.configure(&mut self.ctx, json) {
            Ok(()) => {
                self.render();
                true
            }
            Err(err) => {
                log::warn!("configure rejected: {err}");
                false
            }
        }
    }

    pub fn snapshot_json(&self) -> String {
        self.game.snapshot_json()
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    // ---- Pointer accessors for shared memory reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.config.max_events) as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn max_vector_vertices(&self) -> u32 {
        self.config.max_vector_vertices as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maxwell_engine::GameEvent;

    /// Counts the pointer-downs and steps it sees.
    #[derive(Default)]
    struct Probe {
        steps: u32,
        downs: u32,
        configured: Option<String>,
    }

    impl Game for Probe {
        fn init(&mut self, _ctx: &mut EngineContext) {}

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.steps += 1;
            for event in input.iter() {
                if let InputEvent::PointerDown { .. } = event {
                    self.downs += 1;
                    ctx.emit_event(GameEvent::new(1.0, self.downs as f32));
                }
            }
        }

        fn configure(&mut self, _ctx: &mut EngineContext, json: &str) -> Result<(), Box<dyn std::error::Error>> {
            if !json.trim_start().starts_with('{') {
                return Err("expected an object".into());
            }
            self.configured = Some(json.to_string());
            Ok(())
        }
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(Probe::default());
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().steps, 0);
    }

    #[test]
    fn input_is_delivered_once_per_frame() {
        let mut runner = GameRunner::new(Probe::default());
        runner.init();
        runner.push_input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        runner.tick(3.0 / 60.0 + 0.001);
        assert_eq!(runner.game().steps, 3);
        assert_eq!(runner.game().downs, 1);
        assert_eq!(runner.game_events_len(), 1);
    }

    #[test]
    fn short_frame_keeps_input_for_later() {
        let mut runner = GameRunner::new(Probe::default());
        runner.init();
        runner.push_input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        runner.tick(0.001);
        assert_eq!(runner.game().downs, 0);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().downs, 1);
    }

    #[test]
    fn events_are_per_frame() {
        let mut runner = GameRunner::new(Probe::default());
        runner.init();
        runner.push_input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        runner.tick(1.0 / 60.0 + 0.001);
        assert_eq!(runner.game_events_len(), 1);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game_events_len(), 0);
    }

    #[test]
    fn configure_reports_rejection() {
        let mut runner = GameRunner::new(Probe::default());
        runner.init();
        assert!(!runner.configure("nope"));
        assert!(runner.game().configured.is_none());
        assert!(runner.configure("{}"));
        assert_eq!(runner.game().configured.as_deref(), Some("{}"));
    }
}
