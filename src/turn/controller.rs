//! Seat controllers: who supplies each seat's moves.

use crate::games::connect_four::Seat;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Identity of an oracle-registered agent (for example `AI_Minimax`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    /// Creates an agent identity.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Who controls a seat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    /// Moves come from a person through the input handler.
    Human,
    /// Moves come from the oracle on behalf of this agent.
    Agent(AgentId),
}

/// Controller kind without the agent identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum ControllerKind {
    /// Human controller.
    #[display("human")]
    Human,
    /// Agent controller.
    #[display("agent")]
    Agent,
}

impl Controller {
    /// Returns the controller kind.
    pub fn kind(&self) -> ControllerKind {
        match self {
            Controller::Human => ControllerKind::Human,
            Controller::Agent(_) => ControllerKind::Agent,
        }
    }

    /// Returns the agent identity for agent controllers.
    pub fn agent(&self) -> Option<&AgentId> {
        match self {
            Controller::Human => None,
            Controller::Agent(agent) => Some(agent),
        }
    }
}

impl std::fmt::Display for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Controller::Human => write!(f, "human"),
            Controller::Agent(agent) => write!(f, "agent {}", agent),
        }
    }
}

impl std::str::FromStr for Controller {
    type Err = String;

    /// Parses `human` (any case) or an agent identity.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Err("controller must be `human` or an agent name".to_string())
        } else if s.eq_ignore_ascii_case("human") {
            Ok(Controller::Human)
        } else {
            Ok(Controller::Agent(AgentId::new(s)))
        }
    }
}

/// Controllers bound to both seats at game start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Seats {
    /// Controller of seat one.
    one: Controller,
    /// Controller of seat two.
    two: Controller,
}

impl Seats {
    /// Returns the controller of `seat`.
    pub fn get(&self, seat: Seat) -> &Controller {
        match seat {
            Seat::One => &self.one,
            Seat::Two => &self.two,
        }
    }

    /// Agent identities in seat order.
    pub fn agents(&self) -> impl Iterator<Item = &AgentId> {
        [&self.one, &self.two].into_iter().filter_map(Controller::agent)
    }
}

impl Default for Seats {
    fn default() -> Self {
        Self::new(Controller::Human, Controller::Human)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_controller() {
        assert_eq!("human".parse::<Controller>(), Ok(Controller::Human));
        assert_eq!("Human".parse::<Controller>(), Ok(Controller::Human));
        assert_eq!(
            "AI_Minimax".parse::<Controller>(),
            Ok(Controller::Agent(AgentId::from("AI_Minimax")))
        );
        assert!("  ".parse::<Controller>().is_err());
    }

    #[test]
    fn test_seats_lookup() {
        let seats = Seats::new(Controller::Human, Controller::Agent("X".into()));
        assert_eq!(seats.get(Seat::One).kind(), ControllerKind::Human);
        assert_eq!(seats.get(Seat::Two).agent(), Some(&AgentId::from("X")));
        assert_eq!(seats.agents().collect::<Vec<_>>(), vec![&AgentId::from("X")]);
    }
}
