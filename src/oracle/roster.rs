//! Agents the oracle can play as, fetched once at startup.

use super::transport::{OracleTransport, TransportError};
use crate::turn::{AgentId, Seats, TurnError};
use tracing::{info, instrument, warn};

/// Agent identities offered by the oracle, in the order it listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    agents: Vec<AgentId>,
}

impl Roster {
    /// Calls "list agents" and keeps each identity once.
    #[instrument(skip(transport))]
    pub async fn load<T: OracleTransport + ?Sized>(transport: &T) -> Result<Self, TransportError> {
        let listed = transport.list_agents().await?;
        let roster = Self::from_agents(listed);
        info!(count = roster.agents.len(), agents = ?roster.agents, "Loaded oracle roster");
        Ok(roster)
    }

    /// Roster used when the oracle could not be reached.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a roster from a list, dropping repeats.
    pub fn from_agents(listed: impl IntoIterator<Item = AgentId>) -> Self {
        let mut agents: Vec<AgentId> = Vec::new();
        for agent in listed {
            if !agents.contains(&agent) {
                agents.push(agent);
            }
        }
        Self { agents }
    }

    /// Listed identities.
    pub fn agents(&self) -> &[AgentId] {
        &self.agents
    }

    /// True if the oracle listed nobody.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// True if `agent` was listed.
    pub fn contains(&self, agent: &AgentId) -> bool {
        self.agents.contains(agent)
    }

    /// Checks every agent seat against the roster.
    pub fn validate(&self, seats: &Seats) -> Result<(), TurnError> {
        match seats.agents().find(|agent| !self.contains(agent)) {
            Some(unknown) => {
                warn!(agent = %unknown, "Seat bound to an agent the oracle did not list");
                Err(TurnError::UnknownAgent(unknown.clone()))
            }
            None => Ok(()),
        }
    }
}
