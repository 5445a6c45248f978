//! # Display Indexing
//!
//! Ids are UUIDs, which nobody wants to type. Every listed view numbers its
//! entries from 1 in display order, and clients address todos by that number
//! relative to the currently selected view:
//!
//! ```text
//! $ todoz list backlog
//!   1. Renew passport
//!   2. Fix the bike
//! $ todoz today 2        # moves "Fix the bike"
//! ```
//!
//! Anything that is not a positive integer is taken as an id, or as a unique
//! id prefix of at least [`MIN_PREFIX_LEN`] characters. A number that is also
//! the exact id of a todo (imported data may use `"1"`, `"2"`, ...) selects
//! that todo rather than a position.

use crate::model::Todo;
use std::fmt;
use std::str::FromStr;

pub const MIN_PREFIX_LEN: usize = 4;

/// A todo together with its 1-based position in the view it was listed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTodo {
    pub todo: Todo,
    pub index: usize,
}

pub fn index_todos(todos: Vec<Todo>) -> Vec<DisplayTodo> {
    todos
        .into_iter()
        .enumerate()
        .map(|(i, todo)| DisplayTodo { todo, index: i + 1 })
        .collect()
}

/// User input naming a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoSelector {
    Position(usize),
    Id(String),
}

impl FromStr for TodoSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty selector".to_string());
        }
        match s.parse::<usize>() {
            Ok(0) => Err("Positions start at 1".to_string()),
            Ok(n) => Ok(TodoSelector::Position(n)),
            Err(_) => Ok(TodoSelector::Id(s.to_string())),
        }
    }
}

impl fmt::Display for TodoSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoSelector::Position(n) => write!(f, "{}", n),
            TodoSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Why a selector did not resolve to exactly one todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    NoSuchPosition(usize),
    NoSuchId(String),
    Ambiguous(String),
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::NoSuchPosition(n) => write!(f, "Nothing at position {} in this view", n),
            Unresolved::NoSuchId(id) => write!(f, "No todo with id {}", id),
            Unresolved::Ambiguous(prefix) => {
                write!(f, "Id prefix {} matches more than one todo", prefix)
            }
        }
    }
}

/// Resolves one selector. Positions index into `view`; ids are looked up in
/// the whole canonical list so deleted todos stay addressable. An exact id
/// match wins over a position.
pub fn resolve(
    selector: &TodoSelector,
    view: &[DisplayTodo],
    todos: &[Todo],
) -> Result<String, Unresolved> {
    match selector {
        TodoSelector::Position(n) => {
            let as_id = n.to_string();
            if let Some(todo) = todos.iter().find(|t| t.id == as_id) {
                return Ok(todo.id.clone());
            }
            view.iter()
                .find(|dt| dt.index == *n)
                .map(|dt| dt.todo.id.clone())
                .ok_or(Unresolved::NoSuchPosition(*n))
        }
        TodoSelector::Id(id) => {
            if let Some(todo) = todos.iter().find(|t| &t.id == id) {
                return Ok(todo.id.clone());
            }
            if id.chars().count() < MIN_PREFIX_LEN {
                return Err(Unresolved::NoSuchId(id.clone()));
            }
            let mut matches = todos.iter().filter(|t| t.id.starts_with(id.as_str()));
            match (matches.next(), matches.next()) {
                (Some(todo), None) => Ok(todo.id.clone()),
                (Some(_), Some(_)) => Err(Unresolved::Ambiguous(id.clone())),
                (None, _) => Err(Unresolved::NoSuchId(id.clone())),
            }
        }
    }
}

/// Resolves every selector, keeping the first occurrence of each id.
pub fn resolve_all(
    selectors: &[TodoSelector],
    view: &[DisplayTodo],
    todos: &[Todo],
) -> (Vec<String>, Vec<Unresolved>) {
    let mut ids: Vec<String> = Vec::new();
    let mut failures = Vec::new();
    for selector in selectors {
        match resolve(selector, view, todos) {
            Ok(id) if !ids.contains(&id) => ids.push(id),
            Ok(_) => {}
            Err(e) => failures.push(e),
        }
    }
    (ids, failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str) -> Todo {
        let mut t = Todo::new(format!("Todo {}", id));
        t.id = id.to_string();
        t
    }

    #[test]
    fn parses_positions_and_ids() {
        assert_eq!("3".parse::<TodoSelector>(), Ok(TodoSelector::Position(3)));
        assert_eq!(
            "abcd-12".parse::<TodoSelector>(),
            Ok(TodoSelector::Id("abcd-12".into()))
        );
        assert!("0".parse::<TodoSelector>().is_err());
        assert!(" ".parse::<TodoSelector>().is_err());
    }

    #[test]
    fn positions_follow_view_order() {
        let view = index_todos(vec![todo("b"), todo("a")]);
        let all = vec![todo("a"), todo("b")];
        assert_eq!(resolve(&TodoSelector::Position(1), &view, &all), Ok("b".into()));
        assert_eq!(
            resolve(&TodoSelector::Position(3), &view, &all),
            Err(Unresolved::NoSuchPosition(3))
        );
    }

    #[test]
    fn numeric_ids_win_over_positions() {
        let all = vec![todo("x"), todo("1")];
        let view = index_todos(all.clone());

        assert_eq!(resolve(&TodoSelector::Position(1), &view, &all), Ok("1".into()));
        assert_eq!(resolve(&TodoSelector::Position(2), &view, &all), Ok("1".into()));
    }

    #[test]
    fn ids_resolve_exactly_or_by_unique_prefix() {
        let all = vec![todo("abcd1111"), todo("abcd2222"), todo("ffff0000")];
        let view = index_todos(Vec::new());

        assert_eq!(
            resolve(&TodoSelector::Id("abcd2222".into()), &view, &all),
            Ok("abcd2222".into())
        );
        assert_eq!(
            resolve(&TodoSelector::Id("ffff".into()), &view, &all),
            Ok("ffff0000".into())
        );
        assert_eq!(
            resolve(&TodoSelector::Id("abcd".into()), &view, &all),
            Err(Unresolved::Ambiguous("abcd".into()))
        );
        assert_eq!(
            resolve(&TodoSelector::Id("ff".into()), &view, &all),
            Err(Unresolved::NoSuchId("ff".into()))
        );
    }

    #[test]
    fn resolve_all_deduplicates() {
        let all = vec![todo("aaaa1"), todo("bbbb1")];
        let view = index_todos(all.clone());
        let selectors = vec![
            TodoSelector::Position(1),
            TodoSelector::Id("aaaa1".into()),
            TodoSelector::Position(9),
        ];

        let (ids, failures) = resolve_all(&selectors, &view, &all);
        assert_eq!(ids, vec!["aaaa1".to_string()]);
        assert_eq!(failures, vec![Unresolved::NoSuchPosition(9)]);
    }
}
