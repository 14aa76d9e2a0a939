//! Tests for the orchestrator event loop against a scripted oracle.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use strictly_connect_four::{
    AgentId, AiCoordinator, Command, Controller, GameEvent, MoveError, MoveRequest, OracleError,
    OracleMove, OracleTransport, Orchestrator, Outcome, Roster, SearchLimits, Seat, Seats,
    TransportError, TurnError,
};
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Oracle that answers each request with whatever the test sends next.
struct ScriptedOracle {
    requests: Mutex<Vec<MoveRequest>>,
    answers: tokio::sync::Mutex<mpsc::UnboundedReceiver<Result<OracleMove, TransportError>>>,
}

impl ScriptedOracle {
    fn new() -> (Arc<Self>, mpsc::UnboundedSender<Result<OracleMove, TransportError>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let oracle = Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            answers: tokio::sync::Mutex::new(rx),
        });
        (oracle, tx)
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl OracleTransport for ScriptedOracle {
    async fn list_agents(&self) -> Result<Vec<AgentId>, TransportError> {
        Ok(vec![AgentId::from("X")])
    }

    async fn choose_move(&self, request: &MoveRequest) -> Result<OracleMove, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.answers
            .lock()
            .await
            .recv()
            .await
            .unwrap_or_else(|| Err(TransportError::Unreachable("script ended".to_string())))
    }
}

struct Harness {
    oracle: Arc<ScriptedOracle>,
    answers: mpsc::UnboundedSender<Result<OracleMove, TransportError>>,
    commands: mpsc::UnboundedSender<Command>,
    events: mpsc::UnboundedReceiver<GameEvent>,
    game: tokio::task::JoinHandle<anyhow::Result<strictly_connect_four::TurnCoordinator>>,
}

impl Harness {
    async fn start(seats: Seats) -> Self {
        let (oracle, answers) = ScriptedOracle::new();
        let roster = Roster::load(oracle.as_ref()).await.unwrap();
        let ai = AiCoordinator::new(Arc::clone(&oracle), SearchLimits::default());
        let (event_tx, events) = mpsc::unbounded_channel();
        let (commands, command_rx) = mpsc::unbounded_channel();

        let orchestrator = Orchestrator::new(ai, roster, seats, event_tx).unwrap();
        let game = tokio::spawn(orchestrator.run(command_rx));

        Self {
            oracle,
            answers,
            commands,
            events,
            game,
        }
    }

    async fn next_event(&mut self) -> GameEvent {
        timeout(Duration::from_secs(5), self.events.recv())
            .await
            .expect("Timed out waiting for event")
            .expect("Event channel closed")
    }

    /// Skips events until one matches.
    async fn wait_for(&mut self, pred: impl Fn(&GameEvent) -> bool) -> GameEvent {
        loop {
            let event = self.next_event().await;
            if pred(&event) {
                return event;
            }
        }
    }
}

fn human_vs_x() -> Seats {
    Seats::new(Controller::Human, Controller::Agent(AgentId::from("X")))
}

#[tokio::test]
async fn test_single_request_while_agent_thinks() {
    let mut h = Harness::start(human_vs_x()).await;

    h.commands.send(Command::Drop(3)).unwrap();
    let thinking = h
        .wait_for(|e| matches!(e, GameEvent::AgentThinking { .. }))
        .await;
    assert_eq!(
        thinking,
        GameEvent::AgentThinking {
            seat: Seat::Two,
            agent: AgentId::from("X"),
        }
    );

    // Nothing is accepted while the request is outstanding.
    h.commands.send(Command::Drop(4)).unwrap();
    assert_eq!(
        h.wait_for(|e| matches!(e, GameEvent::Rejected(_))).await,
        GameEvent::Rejected(TurnError::RequestPending)
    );
    h.commands.send(Command::NewGame(human_vs_x())).unwrap();
    assert_eq!(
        h.wait_for(|e| matches!(e, GameEvent::Rejected(_))).await,
        GameEvent::Rejected(TurnError::RequestPending)
    );

    assert_eq!(h.oracle.request_count(), 1);
    {
        let requests = h.oracle.requests.lock().unwrap();
        assert_eq!(*requests[0].seat(), 2);
        assert_eq!(requests[0].agent().as_str(), "X");
        assert_eq!(
            requests[0].board(),
            "0000000;0000000;0000000;0000000;0000000;0001000"
        );
    }

    h.answers.send(Ok(OracleMove::new(3, None))).unwrap();
    let made = h
        .wait_for(|e| matches!(e, GameEvent::MoveMade { .. }))
        .await;
    let GameEvent::MoveMade { placement } = made else {
        unreachable!()
    };
    assert_eq!(placement.seat, Seat::Two);
    assert_eq!((placement.row, placement.column), (4, 3));

    // Seat one is free to move again.
    h.commands.send(Command::Drop(0)).unwrap();
    h.wait_for(|e| matches!(e, GameEvent::AgentThinking { .. }))
        .await;
    assert_eq!(h.oracle.request_count(), 2);

    h.commands.send(Command::Quit).unwrap();
    h.answers.send(Ok(OracleMove::new(0, None))).unwrap();
    let turn = h.game.await.unwrap().unwrap();
    assert_eq!(turn.board().occupied(), 4);
    assert!(!turn.is_pending());
}

#[tokio::test]
async fn test_protocol_error_pauses_until_retry() {
    let mut h = Harness::start(human_vs_x()).await;

    h.commands.send(Command::Drop(1)).unwrap();
    h.wait_for(|e| matches!(e, GameEvent::AgentThinking { .. }))
        .await;
    h.answers.send(Ok(OracleMove::new(-2, None))).unwrap();

    let failed = h
        .wait_for(|e| matches!(e, GameEvent::OracleFailed(_)))
        .await;
    assert_eq!(
        failed,
        GameEvent::OracleFailed(OracleError::Protocol {
            agent: AgentId::from("X"),
            column: -2,
            reason: MoveError::InvalidColumn(-2),
        })
    );
    assert_eq!(h.oracle.request_count(), 1);

    // Paused on seat two: the human still may not move for it.
    h.commands.send(Command::Drop(2)).unwrap();
    assert!(matches!(
        h.wait_for(|e| matches!(e, GameEvent::Rejected(_))).await,
        GameEvent::Rejected(TurnError::WrongController { .. })
    ));

    h.commands.send(Command::Retry).unwrap();
    h.wait_for(|e| matches!(e, GameEvent::AgentThinking { .. }))
        .await;
    assert_eq!(h.oracle.request_count(), 2);
    h.answers.send(Ok(OracleMove::new(1, None))).unwrap();
    h.wait_for(|e| matches!(e, GameEvent::MoveMade { .. }))
        .await;

    h.commands.send(Command::Quit).unwrap();
    let turn = h.game.await.unwrap().unwrap();
    assert_eq!(turn.board().occupied(), 2);
    assert_eq!(turn.active_seat(), Some(Seat::One));
}

#[tokio::test]
async fn test_transport_error_is_reported() {
    let mut h = Harness::start(human_vs_x()).await;

    h.commands.send(Command::Drop(5)).unwrap();
    h.wait_for(|e| matches!(e, GameEvent::AgentThinking { .. }))
        .await;
    h.answers
        .send(Err(TransportError::Status {
            status: 500,
            body: "boom".to_string(),
        }))
        .unwrap();

    let GameEvent::OracleFailed(err) = h
        .wait_for(|e| matches!(e, GameEvent::OracleFailed(_)))
        .await
    else {
        unreachable!()
    };
    assert_eq!(err.kind(), "transport");

    h.commands.send(Command::Quit).unwrap();
    let turn = h.game.await.unwrap().unwrap();
    assert_eq!(turn.board().occupied(), 1);
    assert_eq!(h.oracle.request_count(), 1);
}

#[tokio::test]
async fn test_agents_play_out_after_input_closes() {
    let seats = Seats::new(
        Controller::Agent(AgentId::from("X")),
        Controller::Agent(AgentId::from("X")),
    );
    let mut h = Harness::start(seats).await;

    // Seat one stacks column 0, seat two column 1: seat one wins on its fourth drop.
    for column in [0, 1, 0, 1, 0, 1, 0] {
        h.answers.send(Ok(OracleMove::new(column, None))).unwrap();
    }
    let (closed, _) = mpsc::unbounded_channel();
    drop(std::mem::replace(&mut h.commands, closed));

    let over = h
        .wait_for(|e| matches!(e, GameEvent::GameOver { .. }))
        .await;
    assert_eq!(
        over,
        GameEvent::GameOver {
            outcome: Outcome::Won(Seat::One)
        }
    );

    let turn = h.game.await.unwrap().unwrap();
    assert_eq!(turn.outcome(), Outcome::Won(Seat::One));
    assert_eq!(h.oracle.request_count(), 7);
}

#[tokio::test]
async fn test_unknown_agent_is_rejected() {
    let (oracle, _answers) = ScriptedOracle::new();
    let roster = Roster::load(oracle.as_ref()).await.unwrap();
    let ai = AiCoordinator::new(oracle, SearchLimits::default());
    let (event_tx, _events) = mpsc::unbounded_channel();

    let result = Orchestrator::new(
        ai,
        roster,
        Seats::new(Controller::Human, Controller::Agent(AgentId::from("AI_Dummy"))),
        event_tx,
    );

    assert!(matches!(result, Err(TurnError::UnknownAgent(agent)) if agent.as_str() == "AI_Dummy"));
}
