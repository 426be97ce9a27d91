use pool_structures::Pool;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// At most one open item. Toggling the open item closes it, toggling another one
/// replaces it. Keys are never checked against the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<K> {
    selected: Option<K>,
}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Selection { selected: None }
    }
}

impl<K: PartialEq> Selection<K> {
    pub fn toggle(&mut self, key: K) {
        if self.selected.as_ref() == Some(&key) {
            self.selected = None;
        } else {
            self.selected = Some(key);
        }
    }

    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.as_ref() == Some(key)
    }

    pub fn selected(&self) -> Option<&K> {
        self.selected.as_ref()
    }
}

/// A rider, known by its pool and position. Shown as `{pool_id}-{index}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RiderKey {
    pub pool_id: String,
    pub index: usize,
}

impl RiderKey {
    pub fn new(pool_id: impl Into<String>, index: usize) -> Self {
        RiderKey {
            pool_id: pool_id.into(),
            index,
        }
    }
}

impl Display for RiderKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.pool_id, self.index)
    }
}

/// Open panels of today's list: one route for the whole list, one ticket per pool card
#[derive(Debug, Default, Clone)]
pub struct TodayView {
    pub route: Selection<String>,
    tickets: HashMap<String, Selection<RiderKey>>,
}

impl TodayView {
    pub fn toggle_route(&mut self, pool_id: &str) {
        self.route.toggle(pool_id.to_owned());
    }

    pub fn toggle_ticket(&mut self, key: RiderKey) {
        self.tickets
            .entry(key.pool_id.clone())
            .or_default()
            .toggle(key);
    }

    pub fn is_route_open(&self, pool: &Pool) -> bool {
        self.route.is_selected(&pool.id)
    }

    /// Position of the rider whose ticket is open on this pool card
    pub fn open_ticket(&self, pool: &Pool) -> Option<usize> {
        self.tickets
            .get(&pool.id)
            .and_then(Selection::selected)
            .map(|key| key.index)
    }
}
