use crate::angle::{format_degrees, format_radians, normalize_degrees};
use crate::renderer::{Canvas, CircleRenderer};
use crate::scheduler::{FrameHandle, Scheduler};
use crate::theme::ThemeProvider;

pub const ANGLE_STEP: i32 = 5;
pub const TICK_STEP: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AngleState {
    pub degrees: i32,
    pub is_playing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AngleDisplay {
    pub degrees: String,
    pub radians: String,
}

impl AngleDisplay {
    fn of(degrees: i32) -> AngleDisplay {
        AngleDisplay {
            degrees: format_degrees(degrees),
            radians: format_radians(degrees),
        }
    }
}

/// Owns the displayed angle and the play state of the unit circle.
pub struct CircleController<S: Scheduler, T: ThemeProvider> {
    state: AngleState,
    display: AngleDisplay,
    pending_frame: Option<FrameHandle>,
    scheduler: S,
    renderer: CircleRenderer<T>,
}

impl<S: Scheduler, T: ThemeProvider> CircleController<S, T> {
    pub fn new(scheduler: S, renderer: CircleRenderer<T>) -> Self {
        let state = AngleState::default();
        CircleController {
            display: AngleDisplay::of(state.degrees),
            state,
            pending_frame: None,
            scheduler,
            renderer,
        }
    }

    #[cfg(test)]
    pub fn angle(&self) -> i32 {
        self.state.degrees
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn angle_display(&self) -> &AngleDisplay {
        &self.display
    }

    pub fn renderer(&self) -> &CircleRenderer<T> {
        &self.renderer
    }

    pub fn decrement(&mut self, canvas: Option<&mut dyn Canvas>) {
        self.step(-ANGLE_STEP, canvas);
    }

    pub fn increment(&mut self, canvas: Option<&mut dyn Canvas>) {
        self.step(ANGLE_STEP, canvas);
    }

    pub fn toggle_play(&mut self) {
        self.state.is_playing = !self.state.is_playing;
        log::debug!(
            "Animation {} at {}°",
            if self.state.is_playing { "started" } else { "paused" },
            self.state.degrees
        );

        if self.state.is_playing {
            self.pending_frame = Some(self.scheduler.schedule_next_frame());
        } else if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Runs one animation tick if the frame this controller asked for has
    /// arrived. Returns whether a tick happened. The angle advances even
    /// when there is no canvas to draw on.
    pub fn on_frame(&mut self, canvas: Option<&mut dyn Canvas>) -> bool {
        let due = match self.scheduler.next_due() {
            Some(handle) => handle,
            None => return false,
        };
        if self.pending_frame != Some(due) {
            return false;
        }
        self.pending_frame = None;

        self.step(TICK_STEP, canvas);

        if self.state.is_playing {
            self.pending_frame = Some(self.scheduler.schedule_next_frame());
        }
        true
    }

    /// Call after the surface behind `canvas` changed size.
    pub fn resize(&mut self, canvas: &mut dyn Canvas) {
        log::debug!("Circle surface resized to {}", canvas.side());
        self.redraw(canvas);
    }

    pub fn redraw(&self, canvas: &mut dyn Canvas) {
        self.renderer.draw(canvas, self.state.degrees);
    }

    fn step(&mut self, delta: i32, canvas: Option<&mut dyn Canvas>) {
        self.state.degrees = normalize_degrees(self.state.degrees + delta);
        self.update_angle_display();
        if let Some(canvas) = canvas {
            self.redraw(canvas);
        }
    }

    fn update_angle_display(&mut self) {
        self.display = AngleDisplay::of(self.state.degrees);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::RecordingCanvas;
    use crate::scheduler::FrameQueue;
    use crate::theme::Palette;

    fn controller() -> CircleController<FrameQueue, Palette> {
        CircleController::new(FrameQueue::new(), CircleRenderer::new(Palette::light()))
    }

    fn set_angle(
        controller: &mut CircleController<FrameQueue, Palette>,
        canvas: &mut RecordingCanvas,
        degrees: i32,
    ) {
        while controller.angle() != degrees {
            controller.increment(Some(&mut *canvas));
        }
    }

    #[test]
    fn starts_at_zero_and_paused() {
        let controller = controller();
        assert_eq!(controller.angle(), 0);
        assert!(!controller.is_playing());
        assert_eq!(controller.angle_display().degrees, "0°");
        assert_eq!(controller.angle_display().radians, "0.00 рад");
    }

    #[test]
    fn decrement_wraps_below_zero() {
        let mut controller = controller();
        let mut canvas = RecordingCanvas::new(200.0);

        controller.decrement(Some(&mut canvas));

        assert_eq!(controller.angle(), 355);
        assert_eq!(controller.angle_display().degrees, "355°");
        assert_eq!(controller.angle_display().radians, "6.20 рад");
        assert_eq!(canvas.frames, 1);
    }

    #[test]
    fn increment_then_decrement_is_identity() {
        let mut canvas = RecordingCanvas::new(200.0);
        for start in (0..360).step_by(5) {
            let mut controller = controller();
            set_angle(&mut controller, &mut canvas, start);

            controller.increment(Some(&mut canvas));
            controller.decrement(Some(&mut canvas));
            assert_eq!(controller.angle(), start);
        }
    }

    #[test]
    fn wraps_across_full_turn() {
        let mut controller = controller();
        let mut canvas = RecordingCanvas::new(200.0);
        set_angle(&mut controller, &mut canvas, 355);
        controller.toggle_play();
        for _ in 0..3 {
            assert!(controller.on_frame(Some(&mut canvas)));
        }
        controller.toggle_play();
        assert_eq!(controller.angle(), 358);

        controller.increment(Some(&mut canvas));
        assert_eq!(controller.angle(), 3);
        controller.decrement(Some(&mut canvas));
        assert_eq!(controller.angle(), 358);
    }

    #[test]
    fn fifteen_ticks_then_pause() {
        let mut controller = controller();
        let mut canvas = RecordingCanvas::new(200.0);
        set_angle(&mut controller, &mut canvas, 10);

        controller.toggle_play();
        for _ in 0..15 {
            assert!(controller.on_frame(Some(&mut canvas)));
        }
        controller.toggle_play();
        assert_eq!(controller.angle(), 25);

        let frames = canvas.frames;
        for _ in 0..10 {
            assert!(!controller.on_frame(Some(&mut canvas)));
        }
        assert_eq!(controller.angle(), 25);
        assert_eq!(canvas.frames, frames);
        assert_eq!(controller.angle_display().degrees, "25°");
    }

    #[test]
    fn paused_controller_ignores_frames() {
        let mut controller = controller();
        let mut canvas = RecordingCanvas::new(200.0);

        assert!(!controller.on_frame(Some(&mut canvas)));
        assert_eq!(controller.angle(), 0);
        assert_eq!(canvas.frames, 0);
    }

    #[test]
    fn resume_after_pause_continues() {
        let mut controller = controller();
        let mut canvas = RecordingCanvas::new(200.0);

        controller.toggle_play();
        controller.on_frame(Some(&mut canvas));
        controller.toggle_play();
        controller.on_frame(Some(&mut canvas));
        controller.toggle_play();
        controller.on_frame(Some(&mut canvas));

        assert_eq!(controller.angle(), 2);
        assert!(controller.is_playing());
    }

    #[test]
    fn resize_redraws_without_changing_state() {
        let mut controller = controller();
        let mut canvas = RecordingCanvas::new(200.0);
        controller.increment(Some(&mut canvas));
        let before = canvas.commands.clone();

        controller.resize(&mut canvas);
        assert_eq!(canvas.commands, before);

        let mut bigger = RecordingCanvas::new(600.0);
        controller.resize(&mut bigger);
        assert_eq!(bigger.frames, 1);
        assert_eq!(controller.angle(), 5);
    }

    #[test]
    fn steps_without_canvas_still_update_state() {
        let mut controller = controller();

        controller.increment(None);
        controller.increment(None);
        controller.decrement(None);
        assert_eq!(controller.angle(), 5);
        assert_eq!(controller.angle_display().degrees, "5°");
        assert_eq!(controller.angle_display().radians, "0.09 рад");

        controller.toggle_play();
        for _ in 0..3 {
            assert!(controller.on_frame(None));
        }
        assert_eq!(controller.angle(), 8);
        assert_eq!(controller.angle_display().degrees, "8°");
        assert!(controller.is_playing());
    }

    #[test]
    fn canvas_returning_mid_animation_gets_current_angle() {
        let mut controller = controller();
        controller.toggle_play();
        controller.on_frame(None);
        controller.on_frame(None);

        let mut canvas = RecordingCanvas::new(200.0);
        assert!(controller.on_frame(Some(&mut canvas)));
        assert_eq!(canvas.frames, 1);

        let mut expected = RecordingCanvas::new(200.0);
        controller.redraw(&mut expected);
        assert_eq!(canvas.commands, expected.commands);
    }
}
