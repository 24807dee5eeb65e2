use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::pager::{PageView, Pager};
use crate::domain::film::FilmCandidate;
use crate::domain::history::{SearchRecord, UserStat};
use crate::domain::DomainError;

pub const HISTORY_PAGE_SIZE: usize = 20;
pub const STATS_PAGE_SIZE: usize = 20;
/// Search results show one film per page
pub const SEARCH_PAGE_SIZE: usize = 1;

/// The three independent paged views a user can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
    History,
    Stats,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Prev,
    Next,
}

/// A navigation event, e.g. "next page of history".
/// Its string form (`history_next`) is what travels in button callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavAction {
    pub kind: ContextKind,
    pub direction: Direction,
}

/// Which navigation buttons a page offers. Never built with both sides empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationControls {
    pub previous: Option<NavAction>,
    pub next: Option<NavAction>,
}

/// Per-user paging state, one variant per view so fields of one view can
/// never leak into another.
#[derive(Debug, Clone)]
pub enum NavigationContext {
    History(Pager<SearchRecord>),
    Stats(Pager<UserStat>),
    SearchResults {
        query: String,
        results: Pager<FilmCandidate>,
    },
}

impl ContextKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKind::History => "history",
            ContextKind::Stats => "stats",
            ContextKind::Search => "search",
        }
    }
}

impl NavAction {
    pub fn new(kind: ContextKind, direction: Direction) -> Self {
        Self { kind, direction }
    }
}

impl std::fmt::Display for NavAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direction = match self.direction {
            Direction::Prev => "prev",
            Direction::Next => "next",
        };
        write!(f, "{}_{}", self.kind.as_str(), direction)
    }
}

impl FromStr for NavAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, direction) = s
            .rsplit_once('_')
            .ok_or_else(|| DomainError::InvalidNavigation(s.to_string()))?;

        let kind = match kind {
            "history" => ContextKind::History,
            "stats" => ContextKind::Stats,
            "search" => ContextKind::Search,
            _ => return Err(DomainError::InvalidNavigation(s.to_string())),
        };
        let direction = match direction {
            "prev" => Direction::Prev,
            "next" => Direction::Next,
            _ => return Err(DomainError::InvalidNavigation(s.to_string())),
        };

        Ok(NavAction { kind, direction })
    }
}

impl NavigationControls {
    /// Controls for a page: "previous" iff not on the first page, "next" iff
    /// not on the last. `None` when neither applies.
    pub fn for_view<T>(kind: ContextKind, view: &PageView<'_, T>) -> Option<Self> {
        let previous = view
            .has_previous()
            .then(|| NavAction::new(kind, Direction::Prev));
        let next = view.has_next().then(|| NavAction::new(kind, Direction::Next));

        if previous.is_none() && next.is_none() {
            None
        } else {
            Some(Self { previous, next })
        }
    }

    pub fn actions(&self) -> impl Iterator<Item = NavAction> + '_ {
        self.previous.iter().chain(self.next.iter()).copied()
    }
}

impl NavigationContext {
    pub fn history(records: Vec<SearchRecord>) -> Self {
        NavigationContext::History(Pager::new(records, HISTORY_PAGE_SIZE))
    }

    pub fn stats(stats: Vec<UserStat>) -> Self {
        NavigationContext::Stats(Pager::new(stats, STATS_PAGE_SIZE))
    }

    pub fn search(query: impl Into<String>, candidates: Vec<FilmCandidate>) -> Self {
        NavigationContext::SearchResults {
            query: query.into(),
            results: Pager::new(candidates, SEARCH_PAGE_SIZE),
        }
    }

    pub fn kind(&self) -> ContextKind {
        match self {
            NavigationContext::History(_) => ContextKind::History,
            NavigationContext::Stats(_) => ContextKind::Stats,
            NavigationContext::SearchResults { .. } => ContextKind::Search,
        }
    }

    pub fn page(&self) -> usize {
        match self {
            NavigationContext::History(pager) => pager.page(),
            NavigationContext::Stats(pager) => pager.page(),
            NavigationContext::SearchResults { results, .. } => results.page(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            NavigationContext::History(pager) => pager.is_empty(),
            NavigationContext::Stats(pager) => pager.is_empty(),
            NavigationContext::SearchResults { results, .. } => results.is_empty(),
        }
    }

    /// Apply a page transition. Always clamped, never wraps.
    pub fn step(&mut self, direction: Direction) {
        match self {
            NavigationContext::History(pager) => step_pager(pager, direction),
            NavigationContext::Stats(pager) => step_pager(pager, direction),
            NavigationContext::SearchResults { results, .. } => step_pager(results, direction),
        }
    }
}

fn step_pager<T>(pager: &mut Pager<T>, direction: Direction) {
    match direction {
        Direction::Prev => pager.prev(),
        Direction::Next => pager.next(),
    }
}
