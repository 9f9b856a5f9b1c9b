//! Deferred reveal of the screen image.
//!
//! The screen starts with a status label and a progress indicator. A one-shot timer runs in
//! the background, and when it elapses the UI context switches the presentation to the loaded
//! image. The switch happens at most once and is never reverted.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::ScreenError;
use crate::ui_queue::{ScreenMessage, UiSender};

/// Delay before the image is revealed.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_secs(7);

/// Presentation state of the image area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// The progress indicator is shown.
    Loading,
    /// The image is shown.
    Loaded,
}

/// Name of an image bundled with the application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageResource(String);

impl ImageResource {
    /// Creates a reference to the bundled image with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Name of the image.
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Texts, image and delay of the reveal sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealOptions {
    /// Delay before the image is revealed, in milliseconds.
    pub delay_ms: u64,
    /// Label text while loading.
    pub loading_message: String,
    /// Label text once the image is revealed.
    pub success_message: String,
    /// Image to reveal.
    pub image: ImageResource,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_REVEAL_DELAY.as_millis() as u64,
            loading_message: "Cargando imagen...".into(),
            success_message: "Imagen cargada correctamente".into(),
            image: ImageResource::new("gym"),
        }
    }
}

impl RevealOptions {
    /// Delay before the image is revealed.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// What the status label, the progress indicator and the image currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealView {
    state: RevealState,
    label_text: String,
    progress_visible: bool,
    image_visible: bool,
    image: Option<ImageResource>,
}

impl RevealView {
    /// Initial presentation: loading message, progress indicator shown, image hidden.
    pub fn new(loading_message: impl Into<String>) -> Self {
        Self {
            state: RevealState::Loading,
            label_text: loading_message.into(),
            progress_visible: true,
            image_visible: false,
            image: None,
        }
    }

    /// Switches to the loaded presentation. Returns `false` and changes nothing if the image
    /// was already revealed.
    pub fn reveal(&mut self, success_message: &str, image: ImageResource) -> bool {
        if self.state == RevealState::Loaded {
            log::warn!("Image is already revealed, ignoring repeated reveal");
            return false;
        }

        self.progress_visible = false;
        self.label_text = success_message.to_owned();
        self.image_visible = true;
        self.image = Some(image);
        self.state = RevealState::Loaded;

        true
    }

    /// Current state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Text of the status label.
    pub fn label_text(&self) -> &str {
        &self.label_text
    }

    /// Whether the progress indicator is shown.
    pub fn progress_visible(&self) -> bool {
        self.progress_visible
    }

    /// Whether the image is shown.
    pub fn image_visible(&self) -> bool {
        self.image_visible
    }

    /// Image set on the image element.
    pub fn image(&self) -> Option<&ImageResource> {
        self.image.as_ref()
    }
}

/// How the background timer finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The delay elapsed and the reveal message was posted.
    Elapsed,
    /// The timer was cancelled and nothing was posted.
    Interrupted,
}

/// One-shot background timer that tells the UI context to reveal the image.
#[derive(Debug)]
pub struct RevealController {
    delay: Duration,
    started: bool,
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<RevealOutcome>>,
}

impl RevealController {
    /// Creates a controller that is not started yet.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            started: false,
            cancel: None,
            task: None,
        }
    }

    /// Delay of the timer.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Starts the timer on the tokio runtime of the caller. When the delay elapses,
    /// [`ScreenMessage::RevealElapsed`] is posted through `sender`.
    ///
    /// Can be called only once.
    pub fn start(&mut self, sender: UiSender) -> Result<(), ScreenError> {
        if self.started {
            return Err(ScreenError::RevealAlreadyStarted);
        }

        let handle = Handle::try_current().map_err(|_| ScreenError::NoRuntime)?;
        self.started = true;

        let (cancel_sender, cancel_receiver) = oneshot::channel::<()>();
        let delay = self.delay;
        log::debug!("Starting reveal timer for {delay:?}");

        let task = handle.spawn(async move {
            tokio::select! {
                biased;

                // also resolves when the controller is dropped without cancelling
                _ = cancel_receiver => {
                    log::warn!("Reveal timer interrupted before {delay:?} elapsed, skipping UI update");
                    RevealOutcome::Interrupted
                }
                _ = tokio::time::sleep(delay) => {
                    log::debug!("Reveal delay elapsed");
                    sender.post(ScreenMessage::RevealElapsed);
                    RevealOutcome::Elapsed
                }
            }
        });

        self.cancel = Some(cancel_sender);
        self.task = Some(task);

        Ok(())
    }

    /// Cancels the timer if it is still running. Returns `true` if a pending timer was
    /// cancelled.
    pub fn cancel(&mut self) -> bool {
        let pending = self.is_pending();
        if let Some(cancel) = self.cancel.take() {
            // the task may have finished already, then there is nobody to notify
            let _ = cancel.send(());
        }

        pending
    }

    /// Whether [`RevealController::start`] was called.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the timer was started and has not finished yet.
    pub fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Waits until the timer finishes. Returns `None` if it was never started or has already
    /// been waited for.
    pub async fn wait(&mut self) -> Option<RevealOutcome> {
        let task = self.task.take()?;
        match task.await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                log::warn!("Reveal timer task failed: {err}");
                None
            }
        }
    }
}

impl Drop for RevealController {
    fn drop(&mut self) {
        self.cancel();
    }
}
