//! Game session
//!
//! Owns everything one player session needs: the simulation, the live
//! input, the best-time store and (optionally) somewhere to draw. The host
//! feeds it events and frame timestamps; it never schedules anything itself.

use crate::best_time::BestTime;
use crate::persistence::RecordStore;
use crate::renderer::{Surface, draw_frame};
use crate::settings::Settings;
use crate::sim::autopilot;
use crate::sim::{FrameSnapshot, GameState, InputState, RunPhase, tick};
use crate::tuning::Tuning;

const FPS_WINDOW: usize = 60;

pub struct Game {
    pub state: GameState,
    pub input: InputState,
    pub settings: Settings,
    /// Autopilot drives instead of the player
    pub demo_mode: bool,
    store: Box<dyn RecordStore>,
    surface: Option<Box<dyn Surface>>,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Game {
    /// New idle session. The stored best time is read once, here.
    pub fn new(
        seed: u64,
        mut tuning: Tuning,
        settings: Settings,
        store: Box<dyn RecordStore>,
    ) -> Self {
        settings.apply_to(&mut tuning);
        let best = BestTime::load(store.as_ref());
        log::info!("Game created with seed {}", seed);

        Self {
            state: GameState::new(seed, tuning, best.secs()),
            input: InputState::new(),
            settings,
            demo_mode: false,
            store,
            surface: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    pub fn set_surface(&mut self, surface: Box<dyn Surface>) {
        self.surface = Some(surface);
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn survival_time(&self) -> u32 {
        self.state.survival_time
    }

    pub fn best_time(&self) -> u32 {
        self.state.best.secs()
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        self.state.snapshot()
    }

    pub fn toggle_demo(&mut self) {
        self.demo_mode = !self.demo_mode;
        log::info!("Demo mode: {}", self.demo_mode);
    }

    /// Flip the FPS counter and remember the choice
    pub fn toggle_fps(&mut self) {
        self.settings.show_fps = !self.settings.show_fps;
        self.settings.save();
        log::info!("Show FPS: {}", self.settings.show_fps);
    }

    /// Flip cloud drawing and remember the choice
    pub fn toggle_clouds(&mut self) {
        self.settings.show_clouds = !self.settings.show_clouds;
        self.settings.save();
        log::info!("Show clouds: {}", self.settings.show_clouds);
    }

    /// Begin a run. From Over this is a restart, so the record is kept.
    pub fn start(&mut self, now_ms: f64) -> bool {
        match self.state.phase {
            RunPhase::Running => {
                log::warn!("Start requested while a run is in progress, ignoring");
                false
            }
            RunPhase::Over => self.restart(now_ms),
            RunPhase::Idle => self.state.start_run(now_ms),
        }
    }

    /// Commit the finished run (persisting a new record) and start another
    pub fn restart(&mut self, now_ms: f64) -> bool {
        if self.state.phase == RunPhase::Running {
            log::warn!("Restart requested while a run is in progress, ignoring");
            return false;
        }

        if self.state.restart_run(now_ms).is_some() {
            self.state.best.save(self.store.as_mut());
        }
        true
    }

    /// Commit a finished run without starting another (session teardown).
    /// Returns the new record, if the run set one.
    pub fn finish(&mut self) -> Option<u32> {
        if self.state.phase != RunPhase::Over {
            return None;
        }
        let survival = self.state.survival_time;
        if !self.state.best.submit(survival) {
            return None;
        }
        log::info!("New best time: {}s", survival);
        self.state.best.save(self.store.as_mut());
        Some(survival)
    }

    /// One frame: read input, tick the simulation, draw
    pub fn frame(&mut self, now_ms: f64) -> RunPhase {
        let manual = self.input.take_tick_input();
        let input = if self.demo_mode {
            autopilot::steer(&self.state)
        } else {
            manual
        };

        tick(&mut self.state, &input, now_ms);
        self.render();
        self.track_fps(now_ms);

        self.state.phase
    }

    /// Draw the current state; without a usable surface this does nothing
    pub fn render(&mut self) {
        let Some(surface) = self.surface.as_deref_mut() else {
            log::debug!("No drawing surface, frame not rendered");
            return;
        };
        if let Err(e) = draw_frame(surface, &self.state.snapshot(), self.settings.show_clouds) {
            log::debug!("Frame not rendered: {}", e);
        }
    }

    fn track_fps(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest entry is the one about to be overwritten; the window spans
        // FPS_WINDOW - 1 frame intervals
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}
