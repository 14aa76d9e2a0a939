//! Builds oracle requests from the board and runs them.

use super::request::{MoveRequest, OracleMove, SearchLimits};
use super::transport::{OracleTransport, TransportError};
use crate::games::connect_four::{Board, Seat, codec};
use crate::turn::{AgentId, OracleTicket};
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span, instrument};

/// Issues "choose move" requests on behalf of agent seats.
///
/// Does not track whether a request is outstanding; the
/// [`TurnCoordinator`](crate::turn::TurnCoordinator) owns that.
pub struct AiCoordinator<T: ?Sized> {
    transport: Arc<T>,
    limits: SearchLimits,
}

impl<T: ?Sized> Clone for AiCoordinator<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            limits: self.limits,
        }
    }
}

impl<T: OracleTransport + ?Sized + 'static> AiCoordinator<T> {
    /// Creates a coordinator over a shared transport.
    pub fn new(transport: Arc<T>, limits: SearchLimits) -> Self {
        info!(
            max_time_ms = limits.max_time_ms,
            max_depth = limits.max_depth,
            "Creating AI coordinator"
        );
        Self { transport, limits }
    }

    /// The hints forwarded with every request.
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Encodes the board and bundles it with the agent, seat and hints.
    pub fn build_request(&self, board: &Board, agent: &AgentId, seat: Seat) -> MoveRequest {
        MoveRequest::new(codec::encode(board), agent.clone(), seat.number(), self.limits)
    }

    /// Issues exactly one "choose move" request and returns its future.
    ///
    /// The future owns everything it needs, so it can be held across
    /// other work while the request is in flight. It resolves to the
    /// oracle's raw answer; validating the column is left to the caller.
    #[instrument(skip_all, fields(agent = %agent, seat = %seat))]
    pub fn request_move(
        &self,
        board: &Board,
        agent: &AgentId,
        seat: Seat,
    ) -> BoxFuture<'static, Result<OracleMove, TransportError>> {
        let request = self.build_request(board, agent, seat);
        let transport = Arc::clone(&self.transport);
        info!(board = %request.board(), "Issuing oracle request");

        let span = info_span!("oracle_request", agent = %agent, seat = seat.number());
        Box::pin(
            async move {
                let reply = transport.choose_move(&request).await;
                if let Ok(answer) = &reply {
                    debug!(column = answer.column(), info = ?answer.info(), "Oracle answered");
                }
                reply
            }
            .instrument(span),
        )
    }

    /// Issues the request a ticket stands for.
    pub fn request_for(
        &self,
        ticket: &OracleTicket,
    ) -> BoxFuture<'static, Result<OracleMove, TransportError>> {
        self.request_move(ticket.board(), ticket.agent(), ticket.seat())
    }
}
