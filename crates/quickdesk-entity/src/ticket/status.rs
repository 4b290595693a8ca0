//! Ticket status and priority enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use quickdesk_core::AppError;

/// Lifecycle status of a ticket.
///
/// `Closed` is terminal. Every other status may move to any status,
/// including itself (a no-op).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "ticket_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Newly created, waiting for an agent.
    #[default]
    Open,
    /// An agent has responded.
    Answered,
    /// The issue is solved.
    Resolved,
    /// Archived; no further transitions.
    Closed,
}

impl TicketStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [TicketStatus; 4] = [Self::Open, Self::Answered, Self::Resolved, Self::Closed];

    /// Check if the ticket is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Check if the ticket counts as resolved for dashboards.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Whether moving from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: TicketStatus) -> bool {
        !self.is_terminal() || *self == next
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Answered => "answered",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "answered" => Ok(Self::Answered),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            _ => Err(AppError::validation(format!(
                "Invalid ticket status: '{s}'. Expected one of: open, answered, resolved, closed"
            ))),
        }
    }
}

/// Priority of a ticket.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "ticket_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    /// Low priority.
    Low,
    /// Normal priority (default).
    #[default]
    Medium,
    /// High priority.
    High,
}

impl TicketPriority {
    /// Return the numeric priority (higher = more urgent).
    pub fn numeric_priority(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Return the priority as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketPriority {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(AppError::validation(format!(
                "Invalid ticket priority: '{s}'. Expected one of: low, medium, high"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_is_terminal() {
        assert!(TicketStatus::Closed.is_terminal());
        for next in [TicketStatus::Open, TicketStatus::Answered, TicketStatus::Resolved] {
            assert!(!TicketStatus::Closed.can_transition_to(next));
        }
        assert!(TicketStatus::Closed.can_transition_to(TicketStatus::Closed));
    }

    #[test]
    fn test_open_statuses_move_freely() {
        for from in [TicketStatus::Open, TicketStatus::Answered, TicketStatus::Resolved] {
            for to in TicketStatus::ALL {
                assert!(from.can_transition_to(to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TicketStatus::default(), TicketStatus::Open);
        assert_eq!(TicketPriority::default(), TicketPriority::Medium);
        assert!(TicketPriority::High.numeric_priority() > TicketPriority::Low.numeric_priority());
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!("RESOLVED".parse::<TicketStatus>().unwrap(), TicketStatus::Resolved);
        assert!("pending".parse::<TicketStatus>().is_err());
        assert!("urgent".parse::<TicketPriority>().is_err());
    }
}
