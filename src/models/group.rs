//! Group ("foursome") model.
//!
//! A group is an ordered set of one to four participants scheduled together
//! in one time slot. The constructor enforces the structural invariants;
//! a `Group` value that exists is a valid one.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::Participant;
use crate::error::{EngineError, EngineResult};

/// Maximum number of members in a group.
pub const GROUP_SIZE: usize = 4;

/// One of the two time buckets per occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    Early,
    Late,
}

impl TimeSlot {
    /// Lowercase label for messages and logs.
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Early => "early",
            TimeSlot::Late => "late",
        }
    }

    /// The other slot.
    pub fn opposite(&self) -> TimeSlot {
        match self {
            TimeSlot::Early => TimeSlot::Late,
            TimeSlot::Late => TimeSlot::Early,
        }
    }
}

/// A group of one to four participants in one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Engine-minted identity.
    pub id: Uuid,
    /// Slot this group plays in.
    pub slot: TimeSlot,
    /// Ordinal position within the slot sequence (0-based).
    pub position: u32,
    /// Members, in formation order.
    pub members: Vec<Participant>,
    /// Season shared by every member.
    pub season_id: String,
}

impl Group {
    /// Creates a group, enforcing the structural invariants:
    /// 1 to [`GROUP_SIZE`] members, no duplicate participant, and a single
    /// season across all members.
    pub fn new(slot: TimeSlot, position: u32, members: Vec<Participant>) -> EngineResult<Self> {
        if members.is_empty() {
            return Err(EngineError::GroupContract(
                "a group requires at least one member".into(),
            ));
        }
        if members.len() > GROUP_SIZE {
            return Err(EngineError::GroupContract(format!(
                "group of {} exceeds the maximum of {GROUP_SIZE}",
                members.len()
            )));
        }

        let mut seen = HashSet::new();
        for member in &members {
            if !seen.insert(member.id.as_str()) {
                return Err(EngineError::GroupContract(format!(
                    "duplicate member '{}'",
                    member.id
                )));
            }
        }

        let season_id = members[0].season_id.clone();
        if let Some(stray) = members.iter().find(|m| m.season_id != season_id) {
            return Err(EngineError::SeasonMismatch {
                expected: season_id,
                found: stray.season_id.clone(),
                participant_id: stray.id.clone(),
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            slot,
            position,
            members,
            season_id,
        })
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members. Always `false` for a constructed
    /// group; provided for the conventional `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the group is at full size.
    pub fn is_full(&self) -> bool {
        self.members.len() == GROUP_SIZE
    }

    /// Member ids in formation order.
    pub fn member_ids(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.id.as_str()).collect()
    }

    /// Whether the given participant is a member.
    pub fn contains(&self, participant_id: &str) -> bool {
        self.members.iter().any(|m| m.id == participant_id)
    }
}
