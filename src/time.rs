/// High precision clock measuring total elapsed time and per frame delta
/// time. `start` picks the best monotonic source the platform exposes and
/// falls back to a millisecond counter otherwise.
pub struct Clock {
    start_tick: i64,
    last_tick: i64,
    this_tick: i64,
    // ticks are multiplied by this to convert into seconds
    frequency: f64,
    delta_seconds: f64,
    total_seconds: f64,
    running: bool,
    paused: bool,
    high_precision: bool,
}

impl Clock {
    pub fn new() -> Self {
        Clock {
            start_tick: 0,
            last_tick: 0,
            this_tick: 0,
            frequency: 0.0,
            delta_seconds: 0.0,
            total_seconds: 0.0,
            running: false,
            paused: false,
            high_precision: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_high_precision(&self) -> bool {
        self.high_precision
    }

    /// Samples the time source and resets all accumulators to zero.
    pub fn start(&mut self) {
        if let Some(frequency) = query_frequency() {
            self.high_precision = true;
            self.frequency = 1.0 / frequency as f64;
        } else {
            // millisecond counter fallback
            self.high_precision = false;
            self.frequency = 1.0 / 1000.0;
        }

        let now = query_ticks(self.high_precision);
        self.start_tick = now;
        self.last_tick = now;
        self.this_tick = now;
        self.delta_seconds = 0.0;
        self.total_seconds = 0.0;
        self.running = true;
        self.paused = false;
    }

    /// Marks the clock inactive, the accumulators keep their values.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn pause(&mut self) {
        assert!(self.running && !self.paused);
        self.paused = true;
    }

    /// Resumes a paused clock. The last tick resynchronises to now so the
    /// next `tick` does not report the paused interval as one large delta.
    pub fn resume(&mut self) {
        assert!(self.running && self.paused);
        self.paused = false;

        let now = query_ticks(self.high_precision);
        self.last_tick = now;
        self.this_tick = now;
    }

    /// Advances the clock, only call this once per loop iteration. Paused
    /// clocks do not advance.
    pub fn tick(&mut self) {
        assert!(self.running);
        if self.paused {
            return;
        }

        self.last_tick = self.this_tick;
        self.this_tick = query_ticks(self.high_precision);
        self.delta_seconds = (self.this_tick - self.last_tick) as f64 * self.frequency;
        self.total_seconds += self.delta_seconds;
    }

    // Variations of get delta time, usable for hourly intervals etc.
    pub fn get_delta_millis(&self) -> f64 {
        self.delta_seconds * 1000.0
    }

    pub fn get_delta_seconds(&self) -> f64 {
        self.delta_seconds
    }

    pub fn get_delta_minutes(&self) -> f64 {
        self.delta_seconds / 60.0
    }

    pub fn get_delta_hours(&self) -> f64 {
        self.delta_seconds / 3600.0
    }

    // Time elapsed since start was called.
    pub fn get_total_millis(&self) -> f64 {
        self.total_seconds * 1000.0
    }

    pub fn get_total_seconds(&self) -> f64 {
        self.total_seconds
    }

    pub fn get_total_minutes(&self) -> f64 {
        self.total_seconds / 60.0
    }

    pub fn get_total_hours(&self) -> f64 {
        self.total_seconds / 3600.0
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::new()
    }
}

/// Smoothed frames per second. Frames are counted in rolling one second
/// buckets, the completed bucket blends with the bucket in progress
/// weighted by the remaining fraction of the second.
pub struct FpsCounter {
    frames: i32,
    last_frames: i32,
    frame_time: f64,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        FpsCounter {
            frames: 0,
            last_frames: 0,
            frame_time: 0.0,
            fps: 0.0,
        }
    }

    /// Zeroes the counters ready for a new run.
    pub fn reset(&mut self) {
        self.frames = 0;
        self.last_frames = 0;
        self.frame_time = 0.0;
        self.fps = 0.0;
    }

    /// Records one frame which took `delta_seconds`.
    pub fn tick(&mut self, delta_seconds: f64) {
        self.frames += 1;
        self.frame_time += delta_seconds;

        if self.frame_time >= 1.0 {
            self.last_frames = self.frames;
            self.frames = 0;
            self.frame_time = 0.0;
        }

        self.fps =
            (self.frames as f64 + self.last_frames as f64 * (1.0 - self.frame_time)) as f32;
    }

    pub fn get_fps(&self) -> f32 {
        self.fps
    }

    /// Time per frame of the current smoothed rate, in seconds.
    pub fn get_tpf(&self) -> f32 {
        1.0 / self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        FpsCounter::new()
    }
}

#[cfg(target_os = "windows")]
fn query_frequency() -> Option<i64> {
    use windows::Win32::System::Performance::QueryPerformanceFrequency;
    let mut frequency = 0;
    unsafe { QueryPerformanceFrequency(&mut frequency) }
        .ok()
        .map(|_| frequency)
        .filter(|f| *f > 0)
}

#[cfg(target_os = "windows")]
fn query_ticks(high_precision: bool) -> i64 {
    use windows::Win32::System::Performance::QueryPerformanceCounter;
    use windows::Win32::System::SystemInformation::GetTickCount64;
    if high_precision {
        let mut ticks = 0;
        let _ = unsafe { QueryPerformanceCounter(&mut ticks) };
        ticks
    } else {
        unsafe { GetTickCount64() as i64 }
    }
}

#[cfg(not(target_os = "windows"))]
fn query_frequency() -> Option<i64> {
    None
}

// Monotonic millisecond counter anchored at first use.
#[cfg(not(target_os = "windows"))]
fn query_ticks(_high_precision: bool) -> i64 {
    use std::sync::OnceLock;
    use std::time::Instant;
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_millis() as i64
}
