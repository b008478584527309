use crate::core::CalendarDay;

use super::model::{Lane, LayoutEntry};

/// Greedy first-fit lane packer.
///
/// Each entry goes to the lowest-numbered lane whose visual end is strictly
/// before the entry's start; a new lane opens only when no lane qualifies.
/// With entries arriving in start order this never opens more lanes than the
/// peak visual overlap.
#[derive(Debug)]
pub(crate) struct LanePacker<'a> {
    lanes: Vec<Lane<'a>>,
    ends: LaneEndTree,
}

impl<'a> LanePacker<'a> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            lanes: Vec::new(),
            ends: LaneEndTree::with_capacity(capacity),
        }
    }

    /// Places `entry` and returns its lane index.
    ///
    /// Entries must arrive in ascending start order.
    pub(crate) fn place(&mut self, entry: LayoutEntry<'a>) -> usize {
        let visual_end = entry.visual_end_date;

        let lane_index = match self.ends.first_ending_before(entry.start_date) {
            Some(lane_index) => {
                self.lanes[lane_index].entries.push(entry);
                lane_index
            }
            None => {
                let lane_index = self.lanes.len();
                self.lanes.push(Lane {
                    index: lane_index,
                    entries: vec![entry],
                });
                lane_index
            }
        };
        self.ends.set(lane_index, visual_end);
        lane_index
    }

    pub(crate) fn into_lanes(self) -> Vec<Lane<'a>> {
        self.lanes
    }
}

/// Min-tournament tree over lane visual ends, indexed by lane number.
///
/// Leaves of lanes not yet opened hold `i64::MAX` so they never qualify.
#[derive(Debug)]
struct LaneEndTree {
    leaves: usize,
    nodes: Vec<i64>,
}

impl LaneEndTree {
    fn with_capacity(capacity: usize) -> Self {
        let leaves = capacity.max(1).next_power_of_two();
        Self {
            leaves,
            nodes: vec![i64::MAX; 2 * leaves],
        }
    }

    /// Lowest lane index whose end is strictly before `day`.
    fn first_ending_before(&self, day: CalendarDay) -> Option<usize> {
        let day = i64::from(day.days_since_epoch());
        if self.nodes[1] >= day {
            return None;
        }
        let mut node = 1;
        while node < self.leaves {
            node = if self.nodes[2 * node] < day {
                2 * node
            } else {
                2 * node + 1
            };
        }
        Some(node - self.leaves)
    }

    fn set(&mut self, lane: usize, end: CalendarDay) {
        if lane >= self.leaves {
            self.grow(lane + 1);
        }
        let mut node = self.leaves + lane;
        self.nodes[node] = i64::from(end.days_since_epoch());
        node /= 2;
        while node >= 1 {
            self.nodes[node] = self.nodes[2 * node].min(self.nodes[2 * node + 1]);
            node /= 2;
        }
    }

    fn grow(&mut self, min_leaves: usize) {
        let mut grown = Self::with_capacity(min_leaves.max(self.leaves * 2));
        grown.nodes[grown.leaves..grown.leaves + self.leaves]
            .copy_from_slice(&self.nodes[self.leaves..]);
        for node in (1..grown.leaves).rev() {
            grown.nodes[node] = grown.nodes[2 * node].min(grown.nodes[2 * node + 1]);
        }
        *self = grown;
    }
}
