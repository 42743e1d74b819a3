//! Which rooms have been joined by a door

use hashbrown::HashMap;

use super::grower::RoomId;

/// Door-exists flags keyed by unordered room pair
#[derive(Debug, Clone, Default)]
pub struct ConnectivityTable {
    doors: HashMap<(RoomId, RoomId), bool>,
}

impl ConnectivityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical key: lower id first
    pub fn pair_key(a: RoomId, b: RoomId) -> (RoomId, RoomId) {
        if a <= b { (a, b) } else { (b, a) }
    }

    pub fn is_connected(&self, a: RoomId, b: RoomId) -> bool {
        self.doors
            .get(&Self::pair_key(a, b))
            .copied()
            .unwrap_or(false)
    }

    /// Mark a pair as joined; `false` if it already was
    pub fn connect(&mut self, a: RoomId, b: RoomId) -> bool {
        let flag = self.doors.entry(Self::pair_key(a, b)).or_insert(false);
        if *flag {
            return false;
        }
        *flag = true;
        true
    }

    /// Number of joined pairs
    pub fn len(&self) -> usize {
        self.doors.values().filter(|&&v| v).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rooms joined to `room`, ascending
    pub fn neighbors(&self, room: RoomId) -> Vec<RoomId> {
        let mut out: Vec<_> = self
            .doors
            .iter()
            .filter(|&(_, &joined)| joined)
            .filter_map(|(&(a, b), _)| {
                if a == room {
                    Some(b)
                } else if b == room {
                    Some(a)
                } else {
                    None
                }
            })
            .collect();
        out.sort_unstable();
        out
    }

    /// All joined pairs, ascending
    pub fn pairs(&self) -> Vec<(RoomId, RoomId)> {
        let mut out: Vec<_> = self
            .doors
            .iter()
            .filter(|&(_, &joined)| joined)
            .map(|(&pair, _)| pair)
            .collect();
        out.sort_unstable();
        out
    }
}
