//! Per-frame driver tying the session, dispatcher and controller together.

use std::sync::Arc;
use std::time::Duration;

use contest_games::Surface;
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::{
    EventDispatcher, GameController, InputTracker, Language, PointerEvent, ServerClient,
    SessionStatus, ThinkIndicator,
};

/// Owns everything the frame loop touches.
///
/// The session runs on its own task; the scheduler follows its status
/// through a watch channel and publishes the controller's busy flag back.
pub struct Scheduler {
    client: Arc<dyn ServerClient>,
    controller: GameController,
    dispatcher: EventDispatcher,
    indicator: ThinkIndicator,
    input: InputTracker,
    language: Language,
    status: watch::Receiver<SessionStatus>,
    busy: watch::Sender<bool>,
    surface: Surface,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("controller", &self.controller)
            .field("status", &*self.status.borrow())
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    /// Creates a scheduler for a session whose status arrives on `status`.
    pub fn new(
        client: Arc<dyn ServerClient>,
        controller: GameController,
        language: Language,
        status: watch::Receiver<SessionStatus>,
        busy: watch::Sender<bool>,
    ) -> Self {
        Self {
            client,
            controller,
            dispatcher: EventDispatcher::new(),
            indicator: ThinkIndicator::new(),
            input: InputTracker::new(),
            language,
            status,
            busy,
            surface: Surface::new(1.0, 1.0),
        }
    }

    /// Session status as last published.
    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    /// Message to show instead of the board, if any.
    pub fn status_message(&self) -> Option<String> {
        let reason = self.client.close_reason();
        self.status().message(reason.as_deref())
    }

    /// Runs one frame: apply at most one event, then advance animations.
    #[instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, dt: Duration) {
        if self.status().shows_board() {
            self.dispatcher
                .tick(&self.client, &mut self.controller, &mut self.indicator);
            self.controller.update(dt);
            self.indicator.update(dt);
        }
        let busy = self.controller.is_busy();
        if *self.busy.borrow() != busy {
            debug!(busy, "Controller busy flag changed");
        }
        self.busy.send_replace(busy);
    }

    /// Feeds a pointer event to the active board.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if !self.status().shows_board() {
            return;
        }
        if let Some(gesture) = self.input.process(event) {
            self.controller
                .handle_gesture(gesture, self.surface, self.client.as_ref());
        }
    }

    /// Sets the surface the board is laid out on.
    pub fn set_surface(&mut self, surface: Surface) {
        self.surface = surface;
    }

    /// Current board surface.
    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// The active controller.
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// The thinking indicator.
    pub fn indicator(&self) -> &ThinkIndicator {
        &self.indicator
    }

    /// Banner strings.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Events applied so far.
    pub fn events_applied(&self) -> u64 {
        self.dispatcher.applied()
    }
}
