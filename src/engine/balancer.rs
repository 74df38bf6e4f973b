//! Time-slot balancing.
//!
//! Partitions resolved participants into the early and late slots. Stated
//! preferences are honored outright; "either" participants are assigned
//! greedily, in original order, to even out slot sizes. The split is
//! deterministic and order-preserving, not a global optimum.

use serde::{Deserialize, Serialize};

use crate::models::{Participant, TimePreference, TimeSlot};

/// Participants partitioned into the two slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotSplit {
    pub early: Vec<Participant>,
    pub late: Vec<Participant>,
}

impl SlotSplit {
    /// Total participants across both slots.
    pub fn total(&self) -> usize {
        self.early.len() + self.late.len()
    }

    /// Participants assigned to the given slot.
    pub fn participants_for(&self, slot: TimeSlot) -> &[Participant] {
        match slot {
            TimeSlot::Early => &self.early,
            TimeSlot::Late => &self.late,
        }
    }
}

/// Splits participants by preference, balancing the undecided.
///
/// With `deficit` the size gap between the two sides after preference
/// routing and `E` the number of "either" participants,
/// `min(ceil((deficit + E) / 2), E)` of them join the smaller side (in
/// original order) and the rest join the other. Equal sides split the
/// either-list in half, first half to early.
///
/// # Example
/// ```
/// use foursomes::engine::balance;
/// use foursomes::models::{Participant, TimePreference};
///
/// let participants = vec![
///     Participant::new("a", "s1").with_preference(TimePreference::Early),
///     Participant::new("b", "s1").with_preference(TimePreference::Late),
///     Participant::new("c", "s1"),
///     Participant::new("d", "s1"),
/// ];
///
/// let split = balance(&participants);
/// assert_eq!(split.early.len(), 2);
/// assert_eq!(split.late.len(), 2);
/// ```
pub fn balance(participants: &[Participant]) -> SlotSplit {
    let mut split = SlotSplit::default();
    let mut either: Vec<&Participant> = Vec::new();

    for participant in participants {
        match participant.preference {
            TimePreference::Early => split.early.push(participant.clone()),
            TimePreference::Late => split.late.push(participant.clone()),
            TimePreference::Either => either.push(participant),
        }
    }

    // Equal sides fall out of the same formula with early as the tied
    // smaller side: deficit 0 gives ceil(E / 2) to early.
    let deficit = split.early.len().abs_diff(split.late.len());
    let take = ((deficit + either.len()).div_ceil(2)).min(either.len());
    let early_is_smaller = split.early.len() <= split.late.len();

    for (i, participant) in either.into_iter().enumerate() {
        let to_early = if early_is_smaller { i < take } else { i >= take };
        if to_early {
            split.early.push(participant.clone());
        } else {
            split.late.push(participant.clone());
        }
    }

    split
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_participant(id: &str, preference: TimePreference) -> Participant {
        Participant::new(id, "s1").with_preference(preference)
    }

    fn ids(side: &[Participant]) -> Vec<&str> {
        side.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_preferences_are_honored() {
        let participants = vec![
            make_participant("e1", TimePreference::Early),
            make_participant("l1", TimePreference::Late),
            make_participant("e2", TimePreference::Early),
        ];

        let split = balance(&participants);

        assert_eq!(ids(&split.early), vec!["e1", "e2"]);
        assert_eq!(ids(&split.late), vec!["l1"]);
    }

    #[test]
    fn test_equal_sides_split_either_in_half() {
        // Scenario: one early, one late, two undecided.
        let participants = vec![
            make_participant("a", TimePreference::Early),
            make_participant("b", TimePreference::Late),
            make_participant("c", TimePreference::Either),
            make_participant("d", TimePreference::Either),
        ];

        let split = balance(&participants);

        assert_eq!(ids(&split.early), vec!["a", "c"]);
        assert_eq!(ids(&split.late), vec!["b", "d"]);
    }

    #[test]
    fn test_either_fills_the_smaller_side_first() {
        // early 0, late 2, three undecided: deficit 2, take ceil(5/2) = 3,
        // capped at 3. All three go early, ending 3 vs 2.
        let participants = vec![
            make_participant("l1", TimePreference::Late),
            make_participant("l2", TimePreference::Late),
            make_participant("x1", TimePreference::Either),
            make_participant("x2", TimePreference::Either),
            make_participant("x3", TimePreference::Either),
        ];

        let split = balance(&participants);

        assert_eq!(ids(&split.early), vec!["x1", "x2", "x3"]);
        assert_eq!(ids(&split.late), vec!["l1", "l2"]);
    }

    #[test]
    fn test_remainder_goes_to_the_larger_side() {
        // early 3, late 0, one undecided: take min(ceil(4/2), 1) = 1 to late.
        let participants = vec![
            make_participant("e1", TimePreference::Early),
            make_participant("e2", TimePreference::Early),
            make_participant("e3", TimePreference::Early),
            make_participant("x1", TimePreference::Either),
        ];

        let split = balance(&participants);

        assert_eq!(split.early.len(), 3);
        assert_eq!(ids(&split.late), vec!["x1"]);
    }

    #[test]
    fn test_all_either_splits_evenly() {
        let participants: Vec<_> = (0..5)
            .map(|i| make_participant(&format!("x{i}"), TimePreference::Either))
            .collect();

        let split = balance(&participants);

        // ceil(5 / 2) = 3 to early, first in original order.
        assert_eq!(ids(&split.early), vec!["x0", "x1", "x2"]);
        assert_eq!(ids(&split.late), vec!["x3", "x4"]);
    }

    #[test]
    fn test_empty_input() {
        let split = balance(&[]);
        assert!(split.early.is_empty());
        assert!(split.late.is_empty());
        assert_eq!(split.total(), 0);
    }

    #[test]
    fn test_sizes_always_sum_to_input() {
        let cases: Vec<Vec<Participant>> = vec![
            vec![make_participant("a", TimePreference::Early)],
            vec![
                make_participant("a", TimePreference::Early),
                make_participant("b", TimePreference::Early),
                make_participant("c", TimePreference::Either),
            ],
            (0..9)
                .map(|i| {
                    let pref = match i % 3 {
                        0 => TimePreference::Early,
                        1 => TimePreference::Late,
                        _ => TimePreference::Either,
                    };
                    make_participant(&format!("p{i}"), pref)
                })
                .collect(),
        ];

        for participants in cases {
            let split = balance(&participants);
            assert_eq!(split.total(), participants.len());
        }
    }

    #[test]
    fn test_deterministic_on_repeat() {
        let participants: Vec<_> = (0..7)
            .map(|i| {
                let pref = if i < 2 { TimePreference::Late } else { TimePreference::Either };
                make_participant(&format!("p{i}"), pref)
            })
            .collect();

        let first = balance(&participants);
        let second = balance(&participants);

        assert_eq!(ids(&first.early), ids(&second.early));
        assert_eq!(ids(&first.late), ids(&second.late));
    }
}
