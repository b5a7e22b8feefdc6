//! The single open action request.
//!
//! Legal actions are fetched on a spawned task so the frame loop never
//! waits on the server. The controller polls the slot every update; once
//! the moves arrive the request is armed, and replying consumes it.

use std::sync::Arc;

use contest_games::{ActionSet, CodecError, LegalAction, NO_OP, Player};
use derive_getters::Getters;
use tokio::sync::oneshot;
use tracing::{debug, error, info, instrument, warn};

use crate::{AgentHandle, ContestHandle, RequestId, ServerClient};

/// Decodes one legal action string of a game.
pub type ActionDecoder<M> = fn(&str) -> Result<LegalAction<M>, CodecError>;

/// An armed request waiting for the local player's choice.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct PendingActionRequest<M> {
    /// Id to echo back.
    request_id: RequestId,
    /// Player the choice is made for.
    player: Player,
    /// Legal moves, in server order, never empty.
    moves: Vec<M>,
}

impl<M> PendingActionRequest<M> {
    /// Sends `action` as the answer, consuming the request.
    #[instrument(skip(self, client), fields(request_id = %self.request_id, player = %self.player))]
    pub fn reply(self, client: &dyn ServerClient, action: &str) {
        info!(action, "Replying with selected action");
        client.reply_selected_action(self.request_id, action);
    }
}

#[derive(Debug)]
pub(crate) enum RequestSlot<M> {
    Idle,
    Fetching(oneshot::Receiver<Option<PendingActionRequest<M>>>),
    Armed(PendingActionRequest<M>),
}

impl<M> Default for RequestSlot<M> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<M: Send + 'static> RequestSlot<M> {
    /// Starts fetching legal actions for a new request.
    ///
    /// When the server offers only the no-op, the task replies with it
    /// straight away and nothing is armed. The same reply closes a request
    /// whose legal actions cannot be fetched or decoded. A request that
    /// arrives while another is open is ignored; the open one keeps the slot.
    /// Returns false in that case.
    pub(crate) fn fetch(
        &mut self,
        client: &Arc<dyn ServerClient>,
        contest: ContestHandle,
        agent: AgentHandle,
        request_id: RequestId,
        player: Player,
        decode: ActionDecoder<M>,
    ) -> bool {
        if !matches!(self, Self::Idle) {
            error!(%request_id, "New action request while another is open, ignoring it");
            return false;
        }

        let client = Arc::clone(client);
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let legal = match client.get_legal_actions(contest, agent).await {
                Ok(actions) => {
                    debug!(count = actions.len(), "Received legal actions");
                    actions
                        .iter()
                        .map(|action| decode(action))
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(|err| error!(%request_id, error = %err, "Malformed legal action"))
                }
                Err(err) => {
                    error!(%request_id, error = %err, "Could not fetch legal actions");
                    Err(())
                }
            };
            let armed = match legal.map(ActionSet::from_legal) {
                Ok(ActionSet::Moves(moves)) => Some(PendingActionRequest {
                    request_id,
                    player,
                    moves,
                }),
                Ok(ActionSet::Pass) => {
                    info!(%request_id, "No legal move, passing");
                    client.reply_selected_action(request_id, NO_OP);
                    None
                }
                Err(()) => {
                    warn!(%request_id, "Answering with the no-op so the request is closed");
                    client.reply_selected_action(request_id, NO_OP);
                    None
                }
            };
            // The receiver is gone when the controller was torn down mid-fetch.
            let _ = tx.send(armed);
        });
        *self = Self::Fetching(rx);
        true
    }

    /// Collects a finished fetch; returns the request if it was just armed.
    pub(crate) fn poll(&mut self) -> Option<&PendingActionRequest<M>> {
        let Self::Fetching(rx) = self else {
            return None;
        };
        match rx.try_recv() {
            Ok(Some(request)) => {
                debug!(request_id = %request.request_id, moves = request.moves.len(), "Action request armed");
                *self = Self::Armed(request);
                self.armed()
            }
            Ok(None) | Err(oneshot::error::TryRecvError::Closed) => {
                *self = Self::Idle;
                None
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
        }
    }

    /// The armed request, if any.
    pub(crate) fn armed(&self) -> Option<&PendingActionRequest<M>> {
        match self {
            Self::Armed(request) => Some(request),
            _ => None,
        }
    }

    /// Disarms and hands out the request; at most once per request.
    pub(crate) fn take(&mut self) -> Option<PendingActionRequest<M>> {
        match std::mem::replace(self, Self::Idle) {
            Self::Armed(request) => Some(request),
            other => {
                *self = other;
                None
            }
        }
    }

    /// True while legal actions are on their way.
    pub(crate) fn is_fetching(&self) -> bool {
        matches!(self, Self::Fetching(_))
    }
}
