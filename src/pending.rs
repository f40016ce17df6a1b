use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet, VecDeque};

use crate::types::{Direction, Floor, HallCall};

/// Hall calls that no car has taken yet.
///
/// One logical set with three views: arrival order for fairness, lowest-first
/// for `Up` calls, highest-first for `Down` calls. Every mutation goes through
/// this type so the views never disagree.
#[derive(Debug, Default)]
pub struct PendingHallCalls {
    arrivals: VecDeque<HallCall>,
    up_queue: BinaryHeap<Reverse<Floor>>,
    down_queue: BinaryHeap<Floor>,
    members: HashSet<HallCall>,
}

impl PendingHallCalls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    pub fn contains(&self, call: &HallCall) -> bool {
        self.members.contains(call)
    }

    /// Returns `false` and leaves everything untouched if an equal call is
    /// already pending.
    pub fn push(&mut self, call: HallCall) -> bool {
        if !self.members.insert(call) {
            return false;
        }
        self.arrivals.push_back(call);
        match call.direction() {
            Direction::Up => self.up_queue.push(Reverse(call.floor())),
            Direction::Down => self.down_queue.push(call.floor()),
            Direction::None => {}
        }
        true
    }

    /// Longest-waiting call, removed from every view.
    pub fn pop_oldest(&mut self) -> Option<HallCall> {
        let call = self.arrivals.pop_front()?;
        self.members.remove(&call);
        self.remove_from_priority(&call);
        Some(call)
    }

    /// Lowest floor with someone waiting to go up.
    pub fn lowest_up(&self) -> Option<Floor> {
        self.up_queue.peek().map(|&Reverse(f)| f)
    }

    /// Highest floor with someone waiting to go down.
    pub fn highest_down(&self) -> Option<Floor> {
        self.down_queue.peek().copied()
    }

    /// `Up` calls by ascending floor, then `Down` calls by descending floor.
    pub fn by_floor(&self) -> Vec<HallCall> {
        let up = self
            .up_queue
            .clone()
            .into_sorted_vec()
            .into_iter()
            .rev()
            .map(|Reverse(f)| HallCall::validated(f, Direction::Up));
        let down = self
            .down_queue
            .clone()
            .into_sorted_vec()
            .into_iter()
            .rev()
            .map(|f| HallCall::validated(f, Direction::Down));
        up.chain(down).collect()
    }

    fn remove_from_priority(&mut self, call: &HallCall) {
        let floor = call.floor();
        match call.direction() {
            Direction::Up => self.up_queue.retain(|&Reverse(f)| f != floor),
            Direction::Down => self.down_queue.retain(|&f| f != floor),
            Direction::None => {}
        }
    }
}
