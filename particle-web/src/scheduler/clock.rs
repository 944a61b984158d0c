//! Frame clock - display timestamps to animation steps, plus FPS for the overlay

/// Longest step a single frame may take (in 60 Hz frames), so a stalled
/// tab does not teleport particles when it resumes
pub const MAX_DT_SCALE: f32 = 3.0;

const FRAME_MS: f64 = 1000.0 / 60.0;
const FPS_SMOOTHING: f32 = 0.9;

#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    fps: f32,
    frame_time_ms: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a `requestAnimationFrame` timestamp (ms); returns `dt_scale`
    /// where 1.0 is one 60 Hz frame
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 1.0;
        };

        let elapsed = now_ms - last;
        if elapsed.is_nan() || elapsed <= 0.0 {
            return 0.0;
        }

        let first = self.fps == 0.0;
        self.fps = smooth(self.fps, (1000.0 / elapsed) as f32, first);
        self.frame_time_ms = smooth(self.frame_time_ms, elapsed as f32, first);

        ((elapsed / FRAME_MS) as f32).min(MAX_DT_SCALE)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Overlay read-outs: first sample as-is, then a 0.9 / 0.1 moving average
fn smooth(average: f32, sample: f32, first: bool) -> f32 {
    if first {
        sample
    } else {
        average * FPS_SMOOTHING + sample * (1.0 - FPS_SMOOTHING)
    }
}
