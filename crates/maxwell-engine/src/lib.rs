pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext, SimRng};
pub use api::types::GameEvent;
pub use core::rect::Rect;
pub use core::time::FixedTimestep;
pub use core::timer::{TimerId, Timers};
pub use renderer::instance::{InstanceKind, RenderInstance, RenderBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use systems::effects::{EffectSink, EffectsState, Spark, VisualEffect};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex, VectorColor};
