//! One-shot animation playback.
//!
//! A [`Mixer`] plays every clip of a loaded model exactly once at a speed
//! fixed when playback starts (the pool derives it from the clock step so
//! explosion playback tracks simulation speed). Completion is a single-fire
//! event emitted when the **last** clip finishes; the caller uses it to
//! trigger cleanup.

/// A named animation clip with a fixed duration in clip-time seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub name: String,
    pub duration: f32,
}

impl Clip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Result of advancing a mixer by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixerEvent {
    /// At least one clip is still playing.
    Running,
    /// The last clip finished during this update. Emitted exactly once.
    Completed,
    /// The mixer had already completed before this update.
    Idle,
}

#[derive(Debug, Clone)]
struct ClipState {
    clip: Clip,
    time: f32,
}

impl ClipState {
    fn finished(&self) -> bool {
        self.time >= self.clip.duration
    }
}

/// Plays a set of clips once each at a fixed per-tick speed.
#[derive(Debug, Clone)]
pub struct Mixer {
    clips: Vec<ClipState>,
    speed: f32,
    completion_emitted: bool,
}

impl Mixer {
    /// Starts every clip from zero at the given clip-seconds-per-tick speed.
    ///
    /// An empty clip list completes on the first update.
    pub fn one_shot(clips: Vec<Clip>, speed: f32) -> Self {
        Self {
            clips: clips
                .into_iter()
                .map(|clip| ClipState { clip, time: 0.0 })
                .collect(),
            speed: speed.max(0.0),
            completion_emitted: false,
        }
    }

    /// Advances every unfinished clip by one tick's worth of clip time.
    pub fn update(&mut self) -> MixerEvent {
        if self.completion_emitted {
            return MixerEvent::Idle;
        }
        for state in &mut self.clips {
            if !state.finished() {
                state.time += self.speed;
            }
        }
        if self.clips.iter().all(ClipState::finished) {
            self.completion_emitted = true;
            MixerEvent::Completed
        } else {
            MixerEvent::Running
        }
    }

    /// `true` once the last clip has finished.
    pub fn is_finished(&self) -> bool {
        self.completion_emitted
    }

    /// Playback speed in clip seconds per tick.
    pub fn speed(&self) -> f32 {
        self.speed
    }
}
