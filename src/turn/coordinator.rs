//! Turn coordinator: validates proposed moves and owns the pending-request phase.

use super::controller::{AgentId, ControllerKind, Seats};
use super::error::TurnError;
use crate::games::connect_four::{Board, GameState, MoveError, Outcome, Placement, Seat};
use crate::oracle::{OracleError, OracleMove, TransportError};
use tracing::{debug, error, info, instrument, warn};

/// Whether an oracle request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Moves are accepted from the active seat's controller.
    Ready,
    /// A ticket is out; nothing is accepted until it comes back.
    AwaitingOracle { serial: u64 },
}

/// Proof that an oracle request is outstanding.
///
/// Only [`TurnCoordinator::issue_request`] creates tickets, and only one
/// exists per pending request. Tickets are not `Clone`: handing one back
/// to [`TurnCoordinator::resolve`] consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct OracleTicket {
    serial: u64,
    seat: Seat,
    agent: AgentId,
    board: Board,
}

impl OracleTicket {
    /// Seat the agent is moving for.
    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// Agent asked to choose the move.
    pub fn agent(&self) -> &AgentId {
        &self.agent
    }

    /// Board as it stood when the request was issued.
    pub fn board(&self) -> &Board {
        &self.board
    }
}

/// Owns the game state and the controllers bound to each seat.
///
/// Every public operation either applies exactly one drop or leaves the
/// state untouched.
#[derive(Debug)]
pub struct TurnCoordinator {
    seats: Seats,
    state: GameState,
    phase: Phase,
    serial: u64,
}

impl TurnCoordinator {
    /// Starts a game with seat one to move.
    #[instrument(fields(one = %seats.one(), two = %seats.two()))]
    pub fn new(seats: Seats) -> Self {
        info!("Starting new game");
        Self {
            seats,
            state: GameState::new(),
            phase: Phase::Ready,
            serial: 0,
        }
    }

    /// Replaces the current game with a fresh one.
    ///
    /// Rejected while an oracle request is pending, so the outstanding
    /// ticket can never land on the new board.
    #[instrument(skip(self), fields(one = %seats.one(), two = %seats.two()))]
    pub fn new_game(&mut self, seats: Seats) -> Result<(), TurnError> {
        if self.is_pending() {
            warn!("New game rejected while oracle request is pending");
            return Err(TurnError::RequestPending);
        }
        info!("Starting new game");
        self.seats = seats;
        self.state = GameState::new();
        self.serial += 1;
        Ok(())
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    /// Current outcome.
    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    /// Seat to move, if the game is in progress.
    pub fn active_seat(&self) -> Option<Seat> {
        self.state.active_seat()
    }

    /// Controllers bound to the seats.
    pub fn seats(&self) -> &Seats {
        &self.seats
    }

    /// The most recent drop.
    pub fn last_move(&self) -> Option<Placement> {
        self.state.last_move()
    }

    /// True while an oracle request is outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::AwaitingOracle { .. })
    }

    /// Applies a drop proposed by a human controller.
    #[instrument(skip(self), fields(outcome = %self.state.outcome()))]
    pub fn attempt_human_move(&mut self, column: usize) -> Result<Outcome, TurnError> {
        let seat = self.ready_seat()?;
        let expected = self.seats.get(seat).kind();
        if expected != ControllerKind::Human {
            warn!(%seat, column, "Human move rejected: seat is agent-controlled");
            return Err(TurnError::WrongController {
                seat,
                expected,
                proposed: ControllerKind::Human,
            });
        }

        match self.state.apply(column) {
            Ok(next) => Ok(self.commit(next)),
            Err(e) => {
                warn!(%seat, column, error = %e, "Human move rejected");
                Err(e.into())
            }
        }
    }

    /// The agent owed a request, if the active seat is agent-controlled
    /// and nothing is outstanding.
    pub fn agent_to_move(&self) -> Option<&AgentId> {
        if self.is_pending() {
            return None;
        }
        self.active_seat()
            .and_then(|seat| self.seats.get(seat).agent())
    }

    /// Marks an oracle request as outstanding and hands out its ticket.
    #[instrument(skip(self), fields(outcome = %self.state.outcome()))]
    pub fn issue_request(&mut self) -> Result<OracleTicket, TurnError> {
        let seat = self.ready_seat()?;
        let Some(agent) = self.seats.get(seat).agent().cloned() else {
            warn!(%seat, "Oracle request rejected: seat is human-controlled");
            return Err(TurnError::NotAgentTurn(seat));
        };

        self.serial += 1;
        self.phase = Phase::AwaitingOracle {
            serial: self.serial,
        };
        info!(%seat, %agent, serial = self.serial, "Oracle request pending");

        Ok(OracleTicket {
            serial: self.serial,
            seat,
            agent,
            board: *self.state.board(),
        })
    }

    /// Settles an outstanding request with the oracle's reply.
    ///
    /// The pending phase is cleared before the reply is looked at, so a
    /// failed exchange leaves the game on the same seat, ready for
    /// another request.
    #[instrument(skip(self, ticket, reply), fields(seat = %ticket.seat, agent = %ticket.agent))]
    pub fn resolve(
        &mut self,
        ticket: OracleTicket,
        reply: Result<OracleMove, TransportError>,
    ) -> Result<Outcome, OracleError> {
        match self.phase {
            Phase::AwaitingOracle { serial } if serial == ticket.serial => {}
            _ => {
                warn!(serial = ticket.serial, "Stale oracle ticket ignored");
                return Err(OracleError::StaleTicket);
            }
        }
        self.phase = Phase::Ready;

        let answer = match reply {
            Ok(answer) => answer,
            Err(e) => {
                error!(kind = "transport", error = %e, "Oracle request failed");
                return Err(OracleError::Transport(e));
            }
        };

        let column = *answer.column();
        let applied = usize::try_from(column)
            .map_err(|_| MoveError::InvalidColumn(column))
            .and_then(|col| self.state.apply(col));

        match applied {
            Ok(next) => {
                info!(column, "Oracle move applied");
                Ok(self.commit(next))
            }
            Err(reason) => {
                error!(kind = "protocol", column, error = %reason, "Oracle chose an illegal move");
                Err(OracleError::Protocol {
                    agent: ticket.agent,
                    column,
                    reason,
                })
            }
        }
    }

    /// Seat to move when the coordinator can accept a move at all.
    fn ready_seat(&self) -> Result<Seat, TurnError> {
        let Some(seat) = self.state.active_seat() else {
            warn!(outcome = %self.state.outcome(), "Move rejected: game is over");
            return Err(TurnError::GameOver);
        };
        if self.is_pending() {
            warn!(%seat, "Move rejected: oracle request pending");
            return Err(TurnError::RequestPending);
        }
        Ok(seat)
    }

    fn commit(&mut self, next: GameState) -> Outcome {
        self.state = next;
        if let Some(placement) = next.last_move() {
            debug!(%placement, "Move committed");
        }
        self.state.outcome()
    }
}
