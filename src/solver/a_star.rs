use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};

use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

use crate::solver::Push;
use crate::state::State;

/// Counts of what the search did, by depth (number of pushes from the start)
/// where it makes sense.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Stats {
    created_states: Vec<usize>,
    expanded_states: Vec<usize>,
    duplicate_states: Vec<usize>,
    static_deadlocks: usize,
    freeze_deadlocks: usize,
}

impl Stats {
    pub fn new() -> Self {
        Stats::default()
    }

    pub fn total_created(&self) -> usize {
        self.created_states.iter().sum()
    }

    pub fn total_expanded(&self) -> usize {
        self.expanded_states.iter().sum()
    }

    pub fn total_duplicates(&self) -> usize {
        self.duplicate_states.iter().sum()
    }

    pub fn static_deadlocks(&self) -> usize {
        self.static_deadlocks
    }

    pub fn freeze_deadlocks(&self) -> usize {
        self.freeze_deadlocks
    }

    /// The deepest level a state was created at.
    pub fn max_depth(&self) -> usize {
        self.created_states.len().saturating_sub(1)
    }

    /// Returns true if this is the first state at its depth.
    pub(crate) fn add_created(&mut self, node: &SearchNode<'_>) -> bool {
        Self::add(&mut self.created_states, node.dist)
    }

    pub(crate) fn add_expanded(&mut self, node: &SearchNode<'_>) -> bool {
        Self::add(&mut self.expanded_states, node.dist)
    }

    pub(crate) fn add_duplicate(&mut self, node: &SearchNode<'_>) -> bool {
        Self::add(&mut self.duplicate_states, node.dist)
    }

    pub(crate) fn add_static_deadlock(&mut self) {
        self.static_deadlocks += 1;
    }

    pub(crate) fn add_freeze_deadlock(&mut self) {
        self.freeze_deadlocks += 1;
    }

    fn add(counts: &mut Vec<usize>, dist: u32) -> bool {
        let dist = dist as usize;
        let mut ret = false;

        // while because some depths might be skipped when all states there are pruned
        while dist >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[dist] += 1;
        ret
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*FORMAT_CLEAN);
        table.set_titles(Row::new(vec![
            Cell::new("Depth"),
            Cell::new("Created"),
            Cell::new("Expanded"),
            Cell::new("Duplicates"),
            Cell::new("Left"),
        ]));
        // created_states is the longest vec
        for (depth, &created) in self.created_states.iter().enumerate() {
            let expanded = self.expanded_states.get(depth).cloned().unwrap_or(0);
            let duplicates = self.duplicate_states.get(depth).cloned().unwrap_or(0);
            let left = created.saturating_sub(expanded + duplicates);
            table.add_row(Row::new(vec![
                Cell::new(&depth.to_string()),
                Cell::new(&(created as u64).separated_string()),
                Cell::new(&(expanded as u64).separated_string()),
                Cell::new(&(duplicates as u64).separated_string()),
                Cell::new(&(left as u64).separated_string()),
            ]));
        }
        table
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "expanded by depth: {:?}", self.expanded_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(
            f,
            "total created: {}",
            (self.total_created() as u64).separated_string()
        )?;
        writeln!(
            f,
            "total expanded: {}",
            (self.total_expanded() as u64).separated_string()
        )?;
        writeln!(
            f,
            "total reached duplicates: {}",
            (self.total_duplicates() as u64).separated_string()
        )?;
        writeln!(
            f,
            "deadlocks pruned: {} static, {} freeze",
            (self.static_deadlocks as u64).separated_string(),
            (self.freeze_deadlocks as u64).separated_string()
        )
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let expanded = self.total_expanded();
        let duplicates = self.total_duplicates();
        let left = created.saturating_sub(expanded + duplicates);
        writeln!(
            f,
            "States created total: {}",
            (created as u64).separated_string()
        )?;
        writeln!(
            f,
            "States expanded total: {}",
            (expanded as u64).separated_string()
        )?;
        writeln!(
            f,
            "Reached duplicates total: {}",
            (duplicates as u64).separated_string()
        )?;
        writeln!(
            f,
            "Created but not reached total: {}",
            (left as u64).separated_string()
        )?;
        writeln!(
            f,
            "Static deadlocks pruned: {}",
            (self.static_deadlocks as u64).separated_string()
        )?;
        writeln!(
            f,
            "Freeze deadlocks pruned: {}",
            (self.freeze_deadlocks as u64).separated_string()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.table())
    }
}

/// An entry in the frontier.
///
/// The state itself lives in the arena, equal states share one allocation.
pub(crate) struct SearchNode<'a> {
    pub(crate) state: &'a State,
    pub(crate) prev: Option<(&'a State, Push)>,
    /// Pushes from the initial state.
    pub(crate) dist: u32,
    /// Lower bound on the pushes left.
    pub(crate) h: u32,
    /// Insertion order, breaks ties so the search is deterministic.
    pub(crate) seq: u64,
}

impl<'a> SearchNode<'a> {
    pub(crate) fn new(
        state: &'a State,
        prev: Option<(&'a State, Push)>,
        dist: u32,
        h: u32,
        seq: u64,
    ) -> Self {
        Self {
            state,
            prev,
            dist,
            h,
            seq,
        }
    }

    fn cost(&self) -> u32 {
        self.dist + self.h
    }
}

impl Ord for SearchNode<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // wrapped in Reverse in the heap so this is the natural order - lowest first
        self.cost()
            .cmp(&other.cost())
            .then(self.h.cmp(&other.h))
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for SearchNode<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode<'_> {}

impl Debug for SearchNode<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} g: {} h: {} seq: {}",
            self.state, self.dist, self.h, self.seq
        )
    }
}
