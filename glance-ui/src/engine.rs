// Scene engine: the concrete pump target.
//
// Owns the draw target, the pointer source, the retained scene, a job
// ring and the blink timers. tick_inc only advances the millisecond
// counter; task_handler does one pass of input, timers and rendering.
// Both collaborators are captured at construction and live as long as
// the engine.

use core::fmt;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::debug;

use crate::pump::Engine;
use crate::queue::{Job, JobQueue};
use crate::scene::{Scene, WidgetId};

pub const MAX_TIMERS: usize = 4;
const JOB_DEPTH: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: u16,
    pub y: u16,
    pub phase: PointerPhase,
}

/// Source of pointer events, polled once per task-handler pass.
pub trait PointerSource {
    type Error;

    fn poll(&mut self) -> Result<Option<PointerEvent>, Self::Error>;
}

/// Pointer source for displays without touch input.
pub struct NoPointer;

impl PointerSource for NoPointer {
    type Error = core::convert::Infallible;

    fn poll(&mut self) -> Result<Option<PointerEvent>, Self::Error> {
        Ok(None)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum EngineError<D, I> {
    Display(D),
    Input(I),
}

impl<D: fmt::Debug, I: fmt::Debug> fmt::Display for EngineError<D, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Display(e) => write!(f, "display error: {e:?}"),
            EngineError::Input(e) => write!(f, "input error: {e:?}"),
        }
    }
}

struct Timer {
    target: WidgetId,
    deadline_ms: u32,
    period_ms: u32,
}

pub struct Ui<D, P> {
    display: D,
    pointer: P,
    scene: Scene,
    queue: JobQueue<JOB_DEPTH>,
    timers: [Option<Timer>; MAX_TIMERS],
    now_ms: u32,
    last_touch: Option<PointerEvent>,
}

impl<D, P> Ui<D, P>
where
    D: DrawTarget<Color = Rgb565>,
    P: PointerSource,
{
    pub fn new(display: D, pointer: P, scene: Scene) -> Self {
        Self {
            display,
            pointer,
            scene,
            queue: JobQueue::new(),
            timers: [const { None }; MAX_TIMERS],
            now_ms: 0,
            last_touch: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn last_touch(&self) -> Option<PointerEvent> {
        self.last_touch
    }

    /// Request a full clear-and-repaint on the next pass.
    pub fn invalidate(&mut self) {
        let _ = self.queue.push_unique(Job::FullRedraw);
    }

    /// Blink a widget: toggle its visibility every `period_ms` of tick
    /// time. Returns false when the timer table is full.
    pub fn every(&mut self, period_ms: u32, target: WidgetId) -> bool {
        for slot in self.timers.iter_mut() {
            if slot.is_none() {
                *slot = Some(Timer {
                    target,
                    deadline_ms: self.now_ms.wrapping_add(period_ms),
                    period_ms,
                });
                return true;
            }
        }
        false
    }

    fn handle_pointer(&mut self, ev: PointerEvent) {
        debug!("touch {:?} at ({}, {})", ev.phase, ev.x, ev.y);
        self.last_touch = Some(ev);
        match ev.phase {
            // the highlight stays on the widget hit at contact
            PointerPhase::Down => {
                let hit = self.scene.hit(ev.x, ev.y);
                self.scene.set_pressed(hit);
            }
            PointerPhase::Move => {}
            PointerPhase::Up => self.scene.set_pressed(None),
        }
    }

    fn run_timers(&mut self) {
        let now = self.now_ms;
        for slot in self.timers.iter_mut() {
            let Some(t) = slot else { continue };
            let behind = now.wrapping_sub(t.deadline_ms);
            if (behind as i32) < 0 {
                continue;
            }
            // catch up without accumulating drift; an even number of
            // missed periods cancels out visually
            let fired = behind / t.period_ms + 1;
            if fired % 2 == 1 {
                self.scene.toggle_visible(t.target);
            }
            t.deadline_ms = t.deadline_ms.wrapping_add(t.period_ms.wrapping_mul(fired));
        }
    }
}

impl<D, P> Engine for Ui<D, P>
where
    D: DrawTarget<Color = Rgb565>,
    P: PointerSource,
{
    type Error = EngineError<D::Error, P::Error>;

    fn tick_inc(&mut self, elapsed_ms: u32) {
        self.now_ms = self.now_ms.wrapping_add(elapsed_ms);
    }

    fn task_handler(&mut self) -> Result<(), Self::Error> {
        if let Some(ev) = self.pointer.poll().map_err(EngineError::Input)? {
            self.handle_pointer(ev);
        }

        self.run_timers();

        if self.scene.has_dirty() {
            let _ = self.queue.push_unique(Job::Redraw);
        }

        while let Some(job) = self.queue.pop() {
            match job {
                Job::FullRedraw => self
                    .scene
                    .draw_all(&mut self.display)
                    .map_err(EngineError::Display)?,
                Job::Redraw => self
                    .scene
                    .draw_dirty(&mut self.display)
                    .map_err(EngineError::Display)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::scene::BoxStyle;
    use crate::widget::Alignment;
    use std::collections::VecDeque;

    struct ScriptedPointer {
        events: VecDeque<Result<Option<PointerEvent>, &'static str>>,
    }

    impl ScriptedPointer {
        fn new(events: Vec<Result<Option<PointerEvent>, &'static str>>) -> Self {
            Self {
                events: events.into(),
            }
        }
    }

    impl PointerSource for ScriptedPointer {
        type Error = &'static str;

        fn poll(&mut self) -> Result<Option<PointerEvent>, Self::Error> {
            self.events.pop_front().unwrap_or(Ok(None))
        }
    }

    fn down(x: u16, y: u16) -> Result<Option<PointerEvent>, &'static str> {
        Ok(Some(PointerEvent {
            x,
            y,
            phase: PointerPhase::Down,
        }))
    }

    fn up(x: u16, y: u16) -> Result<Option<PointerEvent>, &'static str> {
        Ok(Some(PointerEvent {
            x,
            y,
            phase: PointerPhase::Up,
        }))
    }

    fn test_scene() -> (Scene, WidgetId) {
        let mut scene = Scene::new(Size::new(32, 32), Rgb565::BLACK);
        let id = scene
            .add_box(
                BoxStyle {
                    bg: Rgb565::BLUE,
                    border: Rgb565::WHITE,
                    border_width: 1,
                    radius: 0,
                },
                8,
                8,
                Alignment::TopLeft,
                0,
                0,
            )
            .unwrap();
        (scene, id)
    }

    #[test]
    fn full_redraw_paints_the_scene() {
        let (scene, _) = test_scene();
        let mut ui = Ui::new(Canvas::new(32, 32), NoPointer, scene);
        ui.invalidate();
        ui.task_handler().unwrap();
        assert_eq!(ui.display.get(4, 4), Rgb565::BLUE);
        assert_eq!(ui.display.get(20, 20), Rgb565::BLACK);
    }

    #[test]
    fn fresh_scene_renders_without_invalidate() {
        // new widgets start dirty, so the first pass paints them
        let (scene, _) = test_scene();
        let mut ui = Ui::new(Canvas::new(32, 32), NoPointer, scene);
        ui.task_handler().unwrap();
        assert_eq!(ui.display.get(4, 4), Rgb565::BLUE);
    }

    #[test]
    fn touch_down_highlights_and_up_releases() {
        let (scene, id) = test_scene();
        let pointer = ScriptedPointer::new(vec![down(4, 4), up(4, 4)]);
        let mut ui = Ui::new(Canvas::new(32, 32), pointer, scene);
        ui.invalidate();

        ui.task_handler().unwrap();
        assert_eq!(ui.scene().pressed(), Some(id));
        // inverted highlight: fill took the border color
        assert_eq!(ui.display.get(4, 4), Rgb565::WHITE);

        ui.task_handler().unwrap();
        assert_eq!(ui.scene().pressed(), None);
        assert_eq!(ui.display.get(4, 4), Rgb565::BLUE);
    }

    #[test]
    fn touch_outside_any_widget_clears_highlight() {
        let (scene, _) = test_scene();
        let pointer = ScriptedPointer::new(vec![down(20, 20)]);
        let mut ui = Ui::new(Canvas::new(32, 32), pointer, scene);
        ui.task_handler().unwrap();
        assert_eq!(ui.scene().pressed(), None);
        assert_eq!(ui.last_touch().map(|e| (e.x, e.y)), Some((20, 20)));
    }

    #[test]
    fn blink_timer_toggles_on_tick_time() {
        let (scene, id) = test_scene();
        let mut ui = Ui::new(Canvas::new(32, 32), NoPointer, scene);
        ui.task_handler().unwrap();
        assert!(ui.every(100, id));

        // not due yet
        ui.tick_inc(60);
        ui.task_handler().unwrap();
        assert_eq!(ui.display.get(4, 4), Rgb565::BLUE);

        // crosses the deadline: widget hides
        ui.tick_inc(60);
        ui.task_handler().unwrap();
        assert_eq!(ui.display.get(4, 4), Rgb565::BLACK);

        // next period: widget returns
        ui.tick_inc(100);
        ui.task_handler().unwrap();
        assert_eq!(ui.display.get(4, 4), Rgb565::BLUE);
    }

    #[test]
    fn missed_periods_collapse_by_parity() {
        let (scene, id) = test_scene();
        let mut ui = Ui::new(Canvas::new(32, 32), NoPointer, scene);
        ui.task_handler().unwrap();
        assert!(ui.every(100, id));

        // two whole periods in one advance: net no visual change
        ui.tick_inc(250);
        ui.task_handler().unwrap();
        assert_eq!(ui.display.get(4, 4), Rgb565::BLUE);
    }

    #[test]
    fn pointer_error_is_fatal() {
        let (scene, _) = test_scene();
        let pointer = ScriptedPointer::new(vec![Err("bus fault")]);
        let mut ui = Ui::new(Canvas::new(32, 32), pointer, scene);
        assert_eq!(ui.task_handler(), Err(EngineError::Input("bus fault")));
    }
}
