//! Cast selection
//!
//! A feature film credits dozens of people, most with a single line. Only
//! the cast worth linking gets an actor stub: the top of the billing, anyone
//! popular enough to be recognisable, and anyone the vault already tracks.

use crate::movie::Actor;
use std::collections::BTreeSet;

/// Actors billed below this position are always kept.
pub const TOP_BILLED_CUTOFF: u32 = 10;

/// Actors at or above this provider popularity are always kept.
pub const POPULARITY_THRESHOLD: f64 = 1.0;

/// Why an actor was kept. Rules are checked in declaration order and the
/// first match is recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionReason {
    TopBilled { order: u32 },
    Popular { popularity: f64 },
    AlreadyKnown,
}

impl std::fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TopBilled { order } => write!(f, "order={order}"),
            Self::Popular { popularity } => write!(f, "popularity={popularity:.6}"),
            Self::AlreadyKnown => write!(f, "already known"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedActor {
    pub name: String,
    pub reason: SelectionReason,
}

/// Result of [`select_cast`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CastSelection {
    /// Kept actors, in credit order
    pub selected: Vec<SelectedActor>,
    /// Number of actors dropped
    pub skipped: usize,
}

impl CastSelection {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(|actor| actor.name.as_str())
    }
}

/// Pick the cast members that warrant an actor stub.
pub fn select_cast(cast: &[Actor], known_actors: &BTreeSet<String>) -> CastSelection {
    let mut selection = CastSelection::default();

    for actor in cast {
        match selection_reason(actor, known_actors) {
            Some(reason) => selection.selected.push(SelectedActor {
                name: actor.name.clone(),
                reason,
            }),
            None => selection.skipped += 1,
        }
    }

    selection
}

fn selection_reason(actor: &Actor, known_actors: &BTreeSet<String>) -> Option<SelectionReason> {
    if actor.order < TOP_BILLED_CUTOFF {
        return Some(SelectionReason::TopBilled { order: actor.order });
    }

    if actor.popularity >= POPULARITY_THRESHOLD {
        return Some(SelectionReason::Popular {
            popularity: actor.popularity,
        });
    }

    if known_actors.contains(&actor.name) {
        return Some(SelectionReason::AlreadyKnown);
    }

    None
}
