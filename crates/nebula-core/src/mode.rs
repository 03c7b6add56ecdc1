use crate::error::TrackingError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Pointer,
    Camera,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            InputMode::Pointer => "Mouse",
            InputMode::Camera => "Camera",
        }
    }
}

/// Pointer/camera selection with one-way fallback on tracking failure.
///
/// A failure is recorded once and forces pointer mode; nothing retries the
/// camera until the user selects it again.
#[derive(Debug, Default)]
pub struct ModeController {
    mode: InputMode,
    last_error: Option<TrackingError>,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn last_error(&self) -> Option<&TrackingError> {
        self.last_error.as_ref()
    }

    /// Explicit user selection. Returns true if the mode changed.
    pub fn select(&mut self, mode: InputMode) -> bool {
        if self.mode == mode {
            return false;
        }
        log::info!("[mode] {} -> {}", self.mode.label(), mode.label());
        self.mode = mode;
        if mode == InputMode::Camera {
            self.last_error = None;
        }
        true
    }

    /// Report a camera/model failure. Returns true if this caused the fallback.
    pub fn tracking_failed(&mut self, err: TrackingError) -> bool {
        let fell_back = self.mode == InputMode::Camera;
        if fell_back {
            log::warn!("[mode] camera tracking failed, falling back to mouse: {}", err);
            self.mode = InputMode::Pointer;
        }
        self.last_error = Some(err);
        fell_back
    }
}
