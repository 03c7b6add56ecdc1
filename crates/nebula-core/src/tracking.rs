//! Camera + hand-model session with scoped release.
//!
//! The camera stream and the hand model are external resources. Whichever
//! exit path ends a session (an acquisition error half-way through, a detect
//! error, an explicit mode switch, or simply dropping it), each acquired
//! resource is released exactly once.

use crate::constants::MAX_TRACKED_HANDS;
use crate::error::TrackingError;
use crate::gesture::ClassifierThresholds;
use crate::interaction::{combine, InteractionSignal, WorldMapping};
use crate::landmarks::HandLandmarks;
use crate::slot::SignalWriter;
use smallvec::SmallVec;

pub type Hands = SmallVec<[HandLandmarks; MAX_TRACKED_HANDS]>;

/// A live video stream.
pub trait VideoSource {
    /// Media time of the frame currently presented, in seconds.
    fn current_time(&self) -> f64;
    /// Stop all tracks. Called once.
    fn release(&mut self);
}

/// Hand-landmark model bound to a video source type.
pub trait HandDetector<V: VideoSource> {
    fn detect(&mut self, video: &V, timestamp_ms: f64) -> Result<Hands, TrackingError>;
    /// Free the model. Called once.
    fn close(&mut self);
}

/// Lets the detector run only when the video frame time changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameGate {
    last: Option<f64>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True (and records `t`) if `t` differs from the last accepted frame time.
    pub fn advance(&mut self, t: f64) -> bool {
        if !t.is_finite() || self.last == Some(t) {
            return false;
        }
        self.last = Some(t);
        true
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SessionOptions {
    pub thresholds: ClassifierThresholds,
    pub mapping: WorldMapping,
}

/// Resources acquired so far while a session is being set up.
///
/// Dropping it releases everything it holds, so an early `?` during async
/// setup cannot leak the camera or the model.
pub struct PendingSession<V: VideoSource, D: HandDetector<V>> {
    video: Option<V>,
    detector: Option<D>,
}

impl<V: VideoSource, D: HandDetector<V>> Default for PendingSession<V, D> {
    fn default() -> Self {
        Self {
            video: None,
            detector: None,
        }
    }
}

impl<V: VideoSource, D: HandDetector<V>> PendingSession<V, D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_detector(mut self, detector: D) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn with_video(mut self, video: V) -> Self {
        self.video = Some(video);
        self
    }

    pub fn finish(
        mut self,
        writer: SignalWriter,
        options: SessionOptions,
    ) -> Result<TrackingSession<V, D>, TrackingError> {
        let video = self
            .video
            .take()
            .ok_or_else(|| TrackingError::Camera("no video stream".into()))?;
        let detector = match self.detector.take() {
            Some(d) => d,
            None => {
                let mut video = video;
                video.release();
                return Err(TrackingError::Model("no hand model".into()));
            }
        };
        Ok(TrackingSession {
            video: Some(video),
            detector: Some(detector),
            gate: FrameGate::new(),
            last_hands: Hands::new(),
            writer,
            options,
        })
    }
}

impl<V: VideoSource, D: HandDetector<V>> Drop for PendingSession<V, D> {
    fn drop(&mut self) {
        release_all(&mut self.video, &mut self.detector);
    }
}

pub struct TrackingSession<V: VideoSource, D: HandDetector<V>> {
    video: Option<V>,
    detector: Option<D>,
    gate: FrameGate,
    last_hands: Hands,
    writer: SignalWriter,
    options: SessionOptions,
}

impl<V: VideoSource, D: HandDetector<V>> TrackingSession<V, D> {
    pub fn is_active(&self) -> bool {
        self.video.is_some() && self.detector.is_some()
    }

    pub fn video(&self) -> Option<&V> {
        self.video.as_ref()
    }

    /// Hands seen on the last processed frame.
    pub fn last_hands(&self) -> &Hands {
        &self.last_hands
    }

    /// Run the detector on the current video frame if it is new, and publish
    /// the combined signal. Returns the published signal, if any.
    pub fn process_frame(
        &mut self,
        timestamp_ms: f64,
    ) -> Result<Option<InteractionSignal>, TrackingError> {
        let (Some(video), Some(detector)) = (self.video.as_ref(), self.detector.as_mut()) else {
            return Ok(None);
        };
        if !self.gate.advance(video.current_time()) {
            return Ok(None);
        }
        let hands = detector.detect(video, timestamp_ms)?;
        let signal = combine(&hands, &self.options.thresholds, &self.options.mapping);
        self.writer.publish(signal);
        self.last_hands = hands;
        Ok(Some(signal))
    }

    /// Release camera and model and reset the slot to idle. Idempotent.
    pub fn stop(&mut self) {
        if self.is_active() {
            log::info!("[hands] stopping tracking session");
        }
        release_all(&mut self.video, &mut self.detector);
        self.last_hands.clear();
        self.writer.clear();
    }
}

impl<V: VideoSource, D: HandDetector<V>> Drop for TrackingSession<V, D> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn release_all<V: VideoSource, D: HandDetector<V>>(video: &mut Option<V>, detector: &mut Option<D>) {
    if let Some(mut v) = video.take() {
        v.release();
    }
    if let Some(mut d) = detector.take() {
        d.close();
    }
}
