//! Generation counters for cancelable operations.

use std::collections::HashMap;
use std::fmt;

/// Classes of cancelable work a coordinator issues.
///
/// Identity is per coordinator and per kind, not per call: issuing a new
/// operation of a kind supersedes the previous one of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Quiet-period timer before a filter runs.
    Debounce,
    /// Local filter over the cached stations.
    Filter,
    /// Delay before the activity indicator is shown.
    ActivityIndicator,
    /// Full station list fetch. Deduplicated rather than superseded.
    StationFetch,
    /// Prediction window fetch.
    PredictionFetch,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpKind::Debounce => "debounce",
            OpKind::Filter => "filter",
            OpKind::ActivityIndicator => "activity indicator",
            OpKind::StationFetch => "station fetch",
            OpKind::PredictionFetch => "prediction fetch",
        };
        f.write_str(name)
    }
}

/// Token identifying one issued operation.
///
/// Completions carry the ticket they were issued under; the registry
/// decides whether it is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    kind: OpKind,
    generation: u64,
}

impl Ticket {
    pub fn kind(&self) -> OpKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A completion arrived for an operation that has since been superseded or
/// canceled. Never surfaced beyond the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} generation {stale} superseded by generation {current}")]
pub struct Superseded {
    pub kind: OpKind,
    pub stale: u64,
    pub current: u64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Slot {
    generation: u64,
    outstanding: bool,
}

/// Per-kind generation counters and outstanding flags.
#[derive(Debug, Default, Clone)]
pub struct Generations {
    slots: HashMap<OpKind, Slot>,
}

impl Generations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new operation of `kind`, superseding any outstanding one.
    pub fn issue(&mut self, kind: OpKind) -> Ticket {
        let slot = self.slots.entry(kind).or_default();
        slot.generation += 1;
        slot.outstanding = true;
        Ticket {
            kind,
            generation: slot.generation,
        }
    }

    /// Cancel whatever is outstanding for `kind`.
    ///
    /// Bumps the generation so completions already in flight are rejected.
    pub fn cancel(&mut self, kind: OpKind) {
        let slot = self.slots.entry(kind).or_default();
        slot.generation += 1;
        slot.outstanding = false;
    }

    /// Accept a completion if its ticket is still the current one.
    ///
    /// On success the operation is no longer outstanding.
    pub fn settle(&mut self, ticket: Ticket) -> Result<(), Superseded> {
        let slot = self.slots.entry(ticket.kind).or_default();
        if !slot.outstanding || slot.generation != ticket.generation {
            return Err(Superseded {
                kind: ticket.kind,
                stale: ticket.generation,
                current: slot.generation,
            });
        }
        slot.outstanding = false;
        Ok(())
    }

    /// Whether an operation of `kind` has been issued and not yet settled or
    /// canceled.
    pub fn is_outstanding(&self, kind: OpKind) -> bool {
        self.slots.get(&kind).is_some_and(|s| s.outstanding)
    }

    /// Whether `ticket` would currently be accepted.
    #[cfg(test)]
    pub(crate) fn is_current(&self, ticket: Ticket) -> bool {
        self.slots
            .get(&ticket.kind)
            .is_some_and(|s| s.outstanding && s.generation == ticket.generation)
    }
}
