//! # Filter/Sort Views
//!
//! Five projections of the canonical list, each with its own membership rule
//! and ordering. Views are plain functions of `(todos, now)` and return clones;
//! nothing here mutates or persists state.
//!
//! | view    | members                                         | order                                              |
//! |---------|-------------------------------------------------|----------------------------------------------------|
//! | all     | not deleted                                     | open first, today first, times-marked desc, newest |
//! | today   | marked today, not deleted                       | open first, times-marked desc, newest              |
//! | backlog | open, not marked today, not deleted             | times-marked desc, newest                          |
//! | done    | done, not deleted                               | newest                                             |
//! | deleted | deleted                                         | newest                                             |
//!
//! "Marked today" means the mark falls on the same calendar day as `now` in
//! `now`'s timezone: a mark left over from yesterday puts the todo back in
//! the backlog. Every ordering puts non-deleted todos before deleted ones
//! first, even where the membership rule already excludes one side.
//!
//! Recomputation is explicit: call the functions, or keep a [`ViewCache`] that
//! recomputes when the store's generation moves.

use crate::model::{FilterType, Todo};
use chrono::{DateTime, NaiveDate, TimeZone};
use std::cmp::{Ordering, Reverse};

pub fn all<Tz: TimeZone>(todos: &[Todo], now: &DateTime<Tz>) -> Vec<Todo> {
    let mut out: Vec<Todo> = todos.iter().filter(|t| !t.is_deleted()).cloned().collect();
    out.sort_by(|a, b| {
        deleted_last(a, b)
            .then_with(|| a.is_done.cmp(&b.is_done))
            .then_with(|| Reverse(a.is_marked_for(now)).cmp(&Reverse(b.is_marked_for(now))))
            .then_with(|| by_times_marked(a, b))
            .then_with(|| newest_first(a, b))
    });
    out
}

pub fn today<Tz: TimeZone>(todos: &[Todo], now: &DateTime<Tz>) -> Vec<Todo> {
    let mut out: Vec<Todo> = todos
        .iter()
        .filter(|t| !t.is_deleted() && t.is_marked_for(now))
        .cloned()
        .collect();
    out.sort_by(|a, b| {
        deleted_last(a, b)
            .then_with(|| a.is_done.cmp(&b.is_done))
            .then_with(|| by_times_marked(a, b))
            .then_with(|| newest_first(a, b))
    });
    out
}

pub fn backlog<Tz: TimeZone>(todos: &[Todo], now: &DateTime<Tz>) -> Vec<Todo> {
    let mut out: Vec<Todo> = todos
        .iter()
        .filter(|t| !t.is_deleted() && !t.is_done && !t.is_marked_for(now))
        .cloned()
        .collect();
    out.sort_by(|a, b| {
        deleted_last(a, b)
            .then_with(|| by_times_marked(a, b))
            .then_with(|| newest_first(a, b))
    });
    out
}

pub fn done(todos: &[Todo]) -> Vec<Todo> {
    let mut out: Vec<Todo> = todos
        .iter()
        .filter(|t| !t.is_deleted() && t.is_done)
        .cloned()
        .collect();
    out.sort_by(|a, b| deleted_last(a, b).then_with(|| newest_first(a, b)));
    out
}

pub fn deleted(todos: &[Todo]) -> Vec<Todo> {
    let mut out: Vec<Todo> = todos.iter().filter(|t| t.is_deleted()).cloned().collect();
    out.sort_by(newest_first);
    out
}

/// The view selected by `filter`.
pub fn view<Tz: TimeZone>(filter: FilterType, todos: &[Todo], now: &DateTime<Tz>) -> Vec<Todo> {
    match filter {
        FilterType::Today => today(todos, now),
        FilterType::Backlog => backlog(todos, now),
        FilterType::All => all(todos, now),
        FilterType::Done => done(todos),
        FilterType::Deleted => deleted(todos),
    }
}

fn deleted_last(a: &Todo, b: &Todo) -> Ordering {
    a.is_deleted().cmp(&b.is_deleted())
}

fn by_times_marked(a: &Todo, b: &Todo) -> Ordering {
    b.number_of_times_marked_as_to_be_done_today
        .cmp(&a.number_of_times_marked_as_to_be_done_today)
}

fn newest_first(a: &Todo, b: &Todo) -> Ordering {
    b.date_created.cmp(&a.date_created)
}

/// All five views computed at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Views {
    pub all: Vec<Todo>,
    pub today: Vec<Todo>,
    pub backlog: Vec<Todo>,
    pub done: Vec<Todo>,
    pub deleted: Vec<Todo>,
}

impl Views {
    pub fn compute<Tz: TimeZone>(todos: &[Todo], now: &DateTime<Tz>) -> Self {
        Self {
            all: all(todos, now),
            today: today(todos, now),
            backlog: backlog(todos, now),
            done: done(todos),
            deleted: deleted(todos),
        }
    }

    pub fn get(&self, filter: FilterType) -> &[Todo] {
        match filter {
            FilterType::Today => &self.today,
            FilterType::Backlog => &self.backlog,
            FilterType::All => &self.all,
            FilterType::Done => &self.done,
            FilterType::Deleted => &self.deleted,
        }
    }
}

/// Caches [`Views`] keyed by the store generation they were computed from.
///
/// The day is part of the key too, so a cache kept across midnight does not
/// keep serving yesterday's "today".
#[derive(Debug, Default)]
pub struct ViewCache {
    key: Option<(u64, NaiveDate)>,
    views: Views,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<Tz: TimeZone>(
        &mut self,
        generation: u64,
        todos: &[Todo],
        now: &DateTime<Tz>,
    ) -> &Views {
        let key = Some((generation, now.date_naive()));
        if self.key != key {
            self.views = Views::compute(todos, now);
            self.key = key;
        }
        &self.views
    }

    pub fn is_dirty(&self, generation: u64) -> bool {
        !matches!(self.key, Some((g, _)) if g == generation)
    }
}

/// The currently selected view. Defaults to [`FilterType::Today`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSelector {
    current: FilterType,
}

impl FilterSelector {
    pub fn new(current: FilterType) -> Self {
        Self { current }
    }

    pub fn get(&self) -> FilterType {
        self.current
    }

    pub fn set(&mut self, filter: FilterType) {
        self.current = filter;
    }
}
