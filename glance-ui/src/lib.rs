// glance-ui: no_std retained scene + refresh pump for small RGB565 LCDs.
// pump:   cooperative drive loop (tick advance + task handler, 1ms yield)
// engine: scene + job queue + blink timers + pointer input, one pass per tick
// scene:  fixed-capacity widget list, dirty tracking, hit testing
// widget: region geometry and alignment
// queue:  fixed-capacity job ring

#![cfg_attr(not(test), no_std)]

pub mod engine;
pub mod pump;
pub mod queue;
pub mod scene;
pub mod widget;

#[cfg(test)]
mod canvas;

pub use engine::{EngineError, MAX_TIMERS, NoPointer, PointerEvent, PointerPhase, PointerSource, Ui};
pub use pump::{Clock, Engine, Pump, PumpConfig};
pub use queue::{Job, JobQueue};
pub use scene::{BoxStyle, MAX_WIDGETS, Scene, WidgetId, rgb};
pub use widget::{Alignment, Region};
