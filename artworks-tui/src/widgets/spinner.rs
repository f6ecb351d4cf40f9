//! Spinner widget for loading states.
//!
//! Based on the snake spinner pattern - a bar that travels across a track
//! and back, pausing at either end.

use std::time::Duration;

const TRACK: char = '⬝';
const SNAKE: char = '■';

/// Pre-rendered spinner frames.
#[derive(Clone, Debug)]
pub struct Spinner {
    frames: Vec<String>,
    frame_duration: Duration,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(8, 4, 1, 6, Duration::from_millis(60))
    }
}

impl Spinner {
    /// Create a spinner with the given geometry and timing.
    pub fn new(
        track_width: u16,
        snake_len: u16,
        right_pause: usize,
        left_pause: usize,
        frame_duration: Duration,
    ) -> Self {
        Self {
            frames: generate_frames(track_width, snake_len.max(1), right_pause, left_pause),
            frame_duration,
        }
    }

    /// How long each frame stays on screen.
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Frame for the given tick, wrapping around.
    pub fn frame(&self, tick: usize) -> &str {
        &self.frames[tick % self.frames.len()]
    }

    /// Number of distinct frames in one cycle.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

fn generate_frames(track_width: u16, snake_len: u16, right_pause: usize, left_pause: usize) -> Vec<String> {
    let track_width = track_width as i32;
    let snake_len = snake_len as i32;
    let mut frames = Vec::new();

    // Right pass: snake enters from left, travels across, exits right
    for head_pos in 0..=(track_width + snake_len - 2) {
        frames.push(snake_frame(track_width, snake_len, head_pos));
    }

    for _ in 0..right_pause {
        frames.push(empty_frame(track_width));
    }

    // Left pass: snake enters from right, travels across, exits left
    for head_pos in (0..=(track_width + snake_len - 2)).rev() {
        frames.push(snake_frame(track_width, snake_len, head_pos));
    }

    for _ in 0..left_pause {
        frames.push(empty_frame(track_width));
    }

    frames
}

fn empty_frame(track_width: i32) -> String {
    (0..track_width).map(|_| TRACK).collect()
}

fn snake_frame(track_width: i32, snake_len: i32, head_pos: i32) -> String {
    let snake_start = head_pos - snake_len + 1;
    (0..track_width)
        .map(|i| if i >= snake_start && i <= head_pos { SNAKE } else { TRACK })
        .collect()
}
