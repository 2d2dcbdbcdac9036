/// Game loop timing and simulation speed control
///
/// Implements a fixed timestep loop: the simulation advances in whole
/// ticks while the window redraws as often as it likes. The time scale
/// handed to the physics update lives in `SpeedControl`.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Length of one fixed tick (~1/60 second)
const TICK: Duration = Duration::from_micros(16_667);

/// Maximum number of ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Selectable time scales, slowest first; level 0 is paused
pub const SPEED_LEVELS: [f64; 4] = [0.0, 0.1, 0.5, 1.0];

/// Time scale state
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedControl {
    /// Index into `SPEED_LEVELS`
    level: usize,

    /// Level to return to when unpausing
    resume_level: usize,
}

impl SpeedControl {
    /// Start at full speed
    pub fn new() -> Self {
        let full = SPEED_LEVELS.len() - 1;
        Self {
            level: full,
            resume_level: full,
        }
    }

    /// Current speed multiplier
    pub fn multiplier(&self) -> f64 {
        SPEED_LEVELS[self.level]
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_paused(&self) -> bool {
        self.level == 0
    }

    /// Jump to a level, clamped to the available ones
    pub fn set_level(&mut self, level: usize) {
        let level = level.min(SPEED_LEVELS.len() - 1);
        if level != self.level {
            self.level = level;
            if level > 0 {
                self.resume_level = level;
            }
            log::info!("Simulation speed set to {}", self.multiplier());
        }
    }

    /// One level slower, down to paused
    pub fn slow_down(&mut self) {
        self.set_level(self.level.saturating_sub(1));
    }

    /// One level faster
    pub fn speed_up(&mut self) {
        self.set_level(self.level + 1);
    }

    /// Pause, or restore the last running level
    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.set_level(self.resume_level);
            log::info!("Simulation resumed");
        } else {
            self.set_level(0);
            log::info!("Simulation paused");
        }
    }
}

impl Default for SpeedControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Game loop timing state
pub struct GameLoop {
    /// Time not yet consumed by whole ticks
    accumulator: Duration,

    last_frame_time: Instant,

    /// Most recent frame durations, oldest first
    frame_times: VecDeque<Duration>,

    frame_count: u64,

    /// Average over `frame_times`, refreshed every 10 frames
    current_fps: f32,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE + 1),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns the number of fixed ticks to run
    ///
    /// Pausing is handled by the speed multiplier, so ticks keep running
    /// and pointer gestures still respond while the bodies are frozen.
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.pop_front();
        }
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.accumulator += frame_time;
        let mut ticks = 0;
        while self.accumulator >= TICK && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= TICK;
            ticks += 1;
        }

        // Drop the backlog a slow frame could not catch up on
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn update_fps(&mut self) {
        let total: Duration = self.frame_times.iter().sum();
        let secs = total.as_secs_f32();
        self.current_fps = if secs > 0.0 {
            self.frame_times.len() as f32 / secs
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_first_frame_runs_no_ticks() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.begin_frame(), 0);
        assert_eq!(game_loop.fps(), 0.0);
    }

    #[test]
    fn test_frame_counting() {
        let mut game_loop = GameLoop::new();
        game_loop.begin_frame();
        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_ticks_follow_elapsed_time() {
        let mut game_loop = GameLoop::new();
        thread::sleep(TICK * 2);
        let ticks = game_loop.begin_frame();
        assert!((2..=MAX_TICKS_PER_FRAME).contains(&ticks));
    }

    #[test]
    fn test_max_ticks_limit_drops_backlog() {
        let mut game_loop = GameLoop::new();

        // 300ms would allow 18 ticks
        thread::sleep(Duration::from_millis(300));

        assert_eq!(game_loop.begin_frame(), MAX_TICKS_PER_FRAME);
        assert_eq!(game_loop.accumulator, Duration::ZERO);
    }

    #[test]
    fn test_fps_window() {
        let mut game_loop = GameLoop::new();
        for _ in 0..FPS_WINDOW_SIZE + 10 {
            game_loop.begin_frame();
        }
        assert_eq!(game_loop.frame_times.len(), FPS_WINDOW_SIZE);
    }

    #[test]
    fn test_speed_starts_at_full() {
        let speed = SpeedControl::new();
        assert_eq!(speed.multiplier(), 1.0);
        assert!(!speed.is_paused());
    }

    #[test]
    fn test_speed_steps() {
        let mut speed = SpeedControl::new();
        speed.speed_up();
        assert_eq!(speed.multiplier(), 1.0);

        speed.slow_down();
        assert_eq!(speed.multiplier(), 0.5);
        speed.slow_down();
        speed.slow_down();
        assert!(speed.is_paused());
        speed.slow_down();
        assert_eq!(speed.level(), 0);
    }

    #[test]
    fn test_toggle_pause_restores_level() {
        let mut speed = SpeedControl::new();
        speed.set_level(1);
        speed.toggle_pause();
        assert_eq!(speed.multiplier(), 0.0);

        speed.toggle_pause();
        assert_eq!(speed.multiplier(), 0.1);
    }

    #[test]
    fn test_set_level_clamps() {
        let mut speed = SpeedControl::new();
        speed.set_level(0);
        speed.set_level(99);
        assert_eq!(speed.level(), SPEED_LEVELS.len() - 1);
    }
}
