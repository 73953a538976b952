use std::collections::{HashMap, VecDeque};

use chrono::NaiveDate;

/// Per-day store for whatever the caller derives from a day's events
/// (fetched events, finished layouts). Owned by the caller; the layout code
/// never reads it. The oldest inserted day is evicted once `capacity` is
/// reached.
#[derive(Debug, Clone)]
pub struct DayCache<V> {
    capacity: usize,
    entries: HashMap<NaiveDate, V>,
    order: VecDeque<NaiveDate>,
}

impl<V> DayCache<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, day: &NaiveDate) -> Option<&V> {
        self.entries.get(day)
    }

    pub fn get_mut(&mut self, day: &NaiveDate) -> Option<&mut V> {
        self.entries.get_mut(day)
    }

    pub fn insert(&mut self, day: NaiveDate, value: V) -> Option<V> {
        if let Some(previous) = self.entries.insert(day, value) {
            return Some(previous);
        }
        self.order.push_back(day);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                log::debug!("evicted cached day {oldest}");
            }
        }
        None
    }

    /// Returns the cached value or fills the slot with `fill`.
    pub fn get_or_insert_with(&mut self, day: NaiveDate, fill: impl FnOnce() -> V) -> &V {
        if !self.entries.contains_key(&day) {
            let value = fill();
            self.insert(day, value);
        }
        &self.entries[&day]
    }

    /// Drops a day after one of its events was edited.
    pub fn invalidate(&mut self, day: &NaiveDate) -> Option<V> {
        let removed = self.entries.remove(day);
        if removed.is_some() {
            self.order.retain(|d| d != day);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
