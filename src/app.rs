use crate::config::Config;
use crate::content::Content;
use crate::error::{AppError, AppResult};
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::pointer::{Event as PointerEvent, Handler as PointerEventHandler};
use crate::events::scroll::{Event as ScrollEvent, Handler as ScrollEventHandler};
use crate::logger::{CapturingLogger, LogBuffer};
use crate::scene::{GeometryBounds, Viewport};
use crate::stage::{AnimationName, ElementId, StageCommand, StageRefs};
use crate::state::{FrameSnapshot, State, WheelOutcome};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type ContentEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type ContentEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;

/// Oversees event processing, state management, and the per-frame tick.
/// The embedding shell calls the synchronous surface below from its event
/// and render loops; content fetches run on their own thread.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
    pointer_handler: PointerEventHandler,
    scroll_handler: ScrollEventHandler,
}

impl App {
    /// Start a new application according to the given configuration.
    ///
    pub fn start(config: Config) -> App {
        info!("Starting emblem stage...");
        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let app = App {
            state: Arc::new(Mutex::new(State::new(tx))),
            config,
            pointer_handler: PointerEventHandler::new(),
            scroll_handler: ScrollEventHandler::new(),
        };
        app.start_content(rx);
        app
    }

    /// Install the capturing logger and return the read handle for the
    /// debug console.
    ///
    pub fn install_logger(config: &Config) -> AppResult<LogBuffer> {
        let level = if config.debug_console {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        let logger = CapturingLogger::new(level);
        let buffer = logger.buffer();
        logger
            .install()
            .map_err(|e| AppError::Logger(e.to_string()))?;
        Ok(buffer)
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_content(&self, receiver: ContentEventReceiver) {
        debug!("Creating new thread for asynchronous content fetching...");
        let cloned_state = Arc::clone(&self.state);
        let base_url = self.config.base_url.to_owned();
        std::thread::spawn(move || {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap()
                .block_on(async {
                    let content = Content::new(&base_url);
                    let mut handler = NetworkEventHandler::new(&cloned_state, &content);
                    while let Ok(event) = receiver.recv() {
                        match handler.handle(event).await {
                            Ok(_) => (),
                            Err(e) => error!("Failed to handle content event: {}", e),
                        }
                    }
                })
        });
    }

    /// Shared handle on the orchestrator state.
    ///
    pub fn state(&self) -> Arc<Mutex<State>> {
        Arc::clone(&self.state)
    }

    /// Relative path of the emblem asset the shell should load.
    ///
    pub fn emblem_asset(&self) -> &str {
        &self.config.emblem_asset
    }

    // ---- synchronous embedder surface -------------------------------------

    /// Process one pointer event from the shell's input loop.
    ///
    pub fn pointer_event(&self, event: PointerEvent) -> Result<()> {
        let mut state = self.state.blocking_lock();
        self.pointer_handler.handle(&mut state, event)
    }

    /// Process one scroll event; the outcome reports whether default
    /// scrolling must be suppressed and which stage commands fired.
    ///
    pub fn scroll_event(&self, event: ScrollEvent) -> Result<WheelOutcome> {
        let mut state = self.state.blocking_lock();
        self.scroll_handler.handle(&mut state, event)
    }

    /// One-shot animation-finished signal from the presentation layer.
    ///
    pub fn transition_end(&self, element: ElementId, animation: AnimationName) {
        let mut state = self.state.blocking_lock();
        state.handle_transition_end(element, animation);
    }

    /// Advance all interpolated values one frame and return the snapshot
    /// the render layer draws from.
    ///
    pub fn frame(&self, now_ms: f64) -> FrameSnapshot {
        let mut state = self.state.blocking_lock();
        state.tick(now_ms)
    }

    /// Take the stage commands accumulated since the last drain.
    ///
    pub fn drain_commands(&self) -> Vec<StageCommand> {
        let mut state = self.state.blocking_lock();
        state.drain_commands()
    }

    pub fn resize(&self, width: f64, height: f64) {
        let mut state = self.state.blocking_lock();
        state.on_resize(Viewport::new(width, height));
    }

    /// Install the resolved element-reference table built by the shell.
    ///
    pub fn set_stage_refs(&self, refs: StageRefs) {
        let mut state = self.state.blocking_lock();
        state.set_stage_refs(refs);
    }

    // ---- asset loader callbacks -------------------------------------------

    pub fn loader_progress(&self, fraction: f64) {
        let mut state = self.state.blocking_lock();
        state.on_load_progress(fraction);
    }

    pub fn loader_success(&self, bounds: GeometryBounds) {
        let mut state = self.state.blocking_lock();
        state.on_geometry_loaded(bounds);
    }

    pub fn loader_failure(&self, error: &str) {
        let mut state = self.state.blocking_lock();
        state.on_load_failed(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Section;

    fn app() -> App {
        App::start(Config::new())
    }

    #[test]
    fn test_frame_snapshot_defaults() {
        let app = app();
        let snapshot = app.frame(0.0);
        assert_eq!(snapshot.angles, [0.0; 3]);
        assert_eq!(snapshot.scale, 1.0);
        assert!(!snapshot.focused);
        assert!(snapshot.camera_controls_enabled);
        assert_eq!(snapshot.nav_label.text, Section::Identity.label());
    }

    #[test]
    fn test_pointer_gesture_through_app_surface() -> Result<()> {
        let app = app();
        app.pointer_event(PointerEvent::Moved {
            x: 0.5,
            y: 0.0,
            hit: true,
            now_ms: 0.0,
        })?;
        app.pointer_event(PointerEvent::Moved {
            x: 0.4,
            y: 0.0,
            hit: true,
            now_ms: 16.0,
        })?;

        let state = app.state();
        let state = state.blocking_lock();
        assert_eq!(state.target_section(), Section::Works);
        Ok(())
    }

    #[test]
    fn test_click_then_commands_drain() -> Result<()> {
        let app = app();
        app.pointer_event(PointerEvent::Clicked { hit: true })?;
        let snapshot = app.frame(16.0);
        assert!(snapshot.focused);
        assert!(!snapshot.camera_controls_enabled);
        assert!(app.drain_commands().is_empty());
        Ok(())
    }

    #[test]
    fn test_loader_failure_reaches_snapshot() {
        let app = app();
        app.loader_failure("asset unreachable");
        assert!(app.frame(0.0).load_error.is_some());
    }

    #[test]
    fn test_emblem_asset_path_from_config() {
        let app = app();
        assert_eq!(app.emblem_asset(), "models/emblem.glb");
    }
}
