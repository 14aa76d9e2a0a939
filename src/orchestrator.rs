//! Game orchestration between human input and the oracle.

use crate::games::connect_four::{Board, Outcome, Placement, Seat};
use crate::oracle::{
    AiCoordinator, OracleError, OracleMove, OracleTransport, Roster, TransportError,
};
use crate::turn::{AgentId, OracleTicket, Seats, TurnCoordinator, TurnError};
use anyhow::Result;
use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Input sent from the UI to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A human drops a token into a column.
    Drop(usize),
    /// Abandon the current game and start another.
    NewGame(Seats),
    /// Re-issue the oracle request after a failure.
    Retry,
    /// Stop once any outstanding request has resolved.
    Quit,
}

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A game began with these controllers.
    GameStarted {
        /// Controllers for both seats.
        seats: Seats,
    },
    /// An oracle request went out.
    AgentThinking {
        /// Seat the agent moves for.
        seat: Seat,
        /// Agent asked to move.
        agent: AgentId,
    },
    /// A drop was applied.
    MoveMade {
        /// Where it landed.
        placement: Placement,
    },
    /// Board after a change.
    StateChanged(Board),
    /// A command was refused; nothing changed.
    Rejected(TurnError),
    /// The oracle request failed; the game waits on the same seat.
    OracleFailed(OracleError),
    /// Game ended.
    GameOver {
        /// Final outcome.
        outcome: Outcome,
    },
}

/// The one oracle request allowed to be outstanding.
struct InFlight {
    ticket: OracleTicket,
    reply: BoxFuture<'static, Result<OracleMove, TransportError>>,
}

/// Drives a game: applies human commands and runs oracle requests.
///
/// Commands keep flowing while a request is outstanding; anything that
/// would change the board in that window is rejected.
pub struct Orchestrator<T: ?Sized> {
    turn: TurnCoordinator,
    ai: AiCoordinator<T>,
    roster: Roster,
    events: mpsc::UnboundedSender<GameEvent>,
    stalled: bool,
}

impl<T: OracleTransport + ?Sized + 'static> Orchestrator<T> {
    /// Creates an orchestrator. Agent seats must be on the roster.
    pub fn new(
        ai: AiCoordinator<T>,
        roster: Roster,
        seats: Seats,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Result<Self, TurnError> {
        roster.validate(&seats)?;
        Ok(Self {
            turn: TurnCoordinator::new(seats),
            ai,
            roster,
            events,
            stalled: false,
        })
    }

    /// The turn coordinator, for read-only inspection.
    pub fn turn(&self) -> &TurnCoordinator {
        &self.turn
    }

    /// Runs the game loop until `Quit`, or until the command channel
    /// closes and no agent move is due. Returns the final coordinator.
    #[instrument(skip_all)]
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
    ) -> Result<TurnCoordinator> {
        info!("Starting game orchestration");
        self.announce_game()?;

        let mut in_flight: Option<InFlight> = None;
        let mut commands_open = true;
        let mut quitting = false;

        loop {
            if in_flight.is_none() && !quitting && !self.stalled {
                in_flight = self.dispatch()?;
            }
            if in_flight.is_none() && (quitting || !commands_open) {
                break;
            }

            tokio::select! {
                biased;

                reply = wait(&mut in_flight), if in_flight.is_some() => {
                    if let Some(InFlight { ticket, .. }) = in_flight.take() {
                        self.settle(ticket, reply)?;
                    }
                }
                command = commands.recv(), if commands_open => {
                    match command {
                        Some(Command::Quit) => {
                            info!(pending = in_flight.is_some(), "Quit requested");
                            quitting = true;
                        }
                        Some(command) => self.handle(command)?,
                        None => {
                            debug!("Command channel closed");
                            commands_open = false;
                        }
                    }
                }
            }
        }

        info!(outcome = %self.turn.outcome(), "Game orchestration finished");
        Ok(self.turn)
    }

    /// Issues the oracle request if an agent seat is due to move.
    fn dispatch(&mut self) -> Result<Option<InFlight>> {
        if self.turn.agent_to_move().is_none() {
            return Ok(None);
        }
        let ticket = self.turn.issue_request()?;
        self.events.send(GameEvent::AgentThinking {
            seat: ticket.seat(),
            agent: ticket.agent().clone(),
        })?;
        let reply = self.ai.request_for(&ticket);
        Ok(Some(InFlight { ticket, reply }))
    }

    fn settle(
        &mut self,
        ticket: OracleTicket,
        reply: Result<OracleMove, TransportError>,
    ) -> Result<()> {
        match self.turn.resolve(ticket, reply) {
            Ok(_) => self.announce_move(),
            Err(e) => {
                warn!(kind = e.kind(), "Game paused until retry");
                self.stalled = true;
                self.events.send(GameEvent::OracleFailed(e))?;
                Ok(())
            }
        }
    }

    fn handle(&mut self, command: Command) -> Result<()> {
        debug!(?command, "Handling command");
        match command {
            Command::Drop(column) => match self.turn.attempt_human_move(column) {
                Ok(_) => self.announce_move(),
                Err(e) => self.reject(e),
            },
            Command::NewGame(seats) => {
                let started = self
                    .roster
                    .validate(&seats)
                    .and_then(|()| self.turn.new_game(seats));
                match started {
                    Ok(()) => {
                        self.stalled = false;
                        self.announce_game()
                    }
                    Err(e) => self.reject(e),
                }
            }
            Command::Retry => {
                if self.stalled {
                    info!("Retrying oracle request");
                    self.stalled = false;
                } else {
                    debug!("Nothing to retry");
                }
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    fn reject(&mut self, e: TurnError) -> Result<()> {
        self.events.send(GameEvent::Rejected(e))?;
        Ok(())
    }

    fn announce_game(&mut self) -> Result<()> {
        self.events.send(GameEvent::GameStarted {
            seats: self.turn.seats().clone(),
        })?;
        self.events
            .send(GameEvent::StateChanged(*self.turn.board()))?;
        Ok(())
    }

    fn announce_move(&mut self) -> Result<()> {
        if let Some(placement) = self.turn.last_move() {
            self.events.send(GameEvent::MoveMade { placement })?;
        }
        self.events
            .send(GameEvent::StateChanged(*self.turn.board()))?;

        let outcome = self.turn.outcome();
        if outcome.is_terminal() {
            info!(%outcome, "Game over");
            self.events.send(GameEvent::GameOver { outcome })?;
        }
        Ok(())
    }
}

async fn wait(in_flight: &mut Option<InFlight>) -> Result<OracleMove, TransportError> {
    match in_flight {
        Some(request) => (&mut request.reply).await,
        None => std::future::pending().await,
    }
}
