//! Pagination styles, list options and continuation state.

use std::collections::BTreeMap;

use serde::Serialize;

/// Maximum pages to fetch in one walk (safety limit).
pub const MAX_PAGES: u64 = 1000;

/// How a list endpoint pages through its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// One response holds everything.
    Single,
    /// The next page starts after a marker.
    Marker {
        marker_param: &'static str,
        limit_param: &'static str,
        /// Dotted path of the next marker in the response. When absent, the
        /// last record's identifier is the marker.
        next_marker: Option<&'static str>,
    },
    /// The next page starts at an offset.
    Offset {
        offset_param: &'static str,
        limit_param: &'static str,
        unit: OffsetUnit,
    },
}

/// What an offset counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUnit {
    /// Offset of the first record of the page; the first page is `first`.
    Records { first: u64 },
    /// Index of the page; the first page is `first`.
    Pages { first: u64 },
}

impl Pagination {
    pub fn is_paginated(&self) -> bool {
        !matches!(self, Pagination::Single)
    }

    pub fn limit_param(&self) -> Option<&'static str> {
        match *self {
            Pagination::Single => None,
            Pagination::Marker { limit_param, .. } | Pagination::Offset { limit_param, .. } => {
                Some(limit_param)
            }
        }
    }

    pub fn next_marker_key(&self) -> Option<&'static str> {
        match *self {
            Pagination::Marker { next_marker, .. } => next_marker,
            _ => None,
        }
    }

    /// Query parameter names the walker sets itself.
    pub fn reserved_params(&self) -> Vec<&'static str> {
        match *self {
            Pagination::Single => vec![],
            Pagination::Marker {
                marker_param,
                limit_param,
                ..
            } => vec![marker_param, limit_param],
            Pagination::Offset {
                offset_param,
                limit_param,
                ..
            } => vec![offset_param, limit_param],
        }
    }
}

/// Caller options for a list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Logical filter name to value.
    pub filters: BTreeMap<String, String>,
    /// Path placeholder values (`project_id` is filled in from the session).
    pub path_params: BTreeMap<String, String>,
    /// Page size sent to the provider.
    pub limit: Option<u32>,
    /// Marker to resume a marker-paged walk from.
    pub marker: Option<String>,
    /// Provider offset of the first page (offset-paged resources), in the
    /// resource's own unit. Defaults to the resource's first offset.
    pub start: Option<u64>,
    /// When false, stop after the first page.
    pub paginated: bool,
    /// Forward filters outside the resource's filter table unchanged.
    pub allow_unknown_filters: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            filters: BTreeMap::new(),
            path_params: BTreeMap::new(),
            limit: None,
            marker: None,
            start: None,
            paginated: true,
            allow_unknown_filters: false,
        }
    }
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.filters.insert(name.into(), value.to_string());
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn single_page(mut self) -> Self {
        self.paginated = false;
        self
    }

    pub fn allow_unknown_filters(mut self) -> Self {
        self.allow_unknown_filters = true;
        self
    }
}

/// Continuation signals extracted from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSignals {
    pub raw_count: usize,
    pub total: Option<u64>,
    pub next_marker: Option<String>,
    pub last_id: Option<String>,
}

/// Why a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    SinglePage,
    EmptyPage,
    TotalReached,
    ShortPage,
    NoMarker,
    MarkerStalled,
    PageCeiling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue,
    Done(Stop),
}

/// Per-walk continuation state.
#[derive(Debug, Clone)]
pub struct Continuation {
    pagination: Pagination,
    paginated: bool,
    limit: Option<u32>,
    marker: Option<String>,
    start: Option<u64>,
    seen: u64,
    pages: u64,
}

impl Continuation {
    pub fn new(pagination: Pagination, options: &ListOptions) -> Self {
        Self {
            pagination,
            paginated: options.paginated && pagination.is_paginated(),
            limit: options.limit,
            marker: options.marker.clone(),
            start: options.start,
            seen: 0,
            pages: 0,
        }
    }

    /// Raw records consumed so far.
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Pages fetched so far.
    pub fn pages(&self) -> u64 {
        self.pages
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    /// Offset the next request starts at, for offset-paged resources.
    pub fn offset(&self) -> Option<u64> {
        match self.pagination {
            Pagination::Offset { unit, .. } => Some(match unit {
                OffsetUnit::Records { first } => self.start.unwrap_or(first) + self.seen,
                OffsetUnit::Pages { first } => self.start.unwrap_or(first) + self.pages,
            }),
            _ => None,
        }
    }

    /// Records before the first page of a walk resumed from an offset.
    fn skipped(&self) -> u64 {
        match (self.pagination, self.start) {
            (Pagination::Offset { unit, .. }, Some(start)) => match unit {
                OffsetUnit::Records { first } => start.saturating_sub(first),
                OffsetUnit::Pages { first } => {
                    start.saturating_sub(first) * u64::from(self.limit.unwrap_or(0))
                }
            },
            _ => 0,
        }
    }

    /// Paging parameters for the next request.
    pub fn page_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        match self.pagination {
            Pagination::Single => {}
            Pagination::Marker {
                marker_param,
                limit_param,
                ..
            } => {
                if let Some(marker) = &self.marker {
                    params.push((marker_param.to_string(), marker.clone()));
                }
                if let Some(limit) = self.limit {
                    params.push((limit_param.to_string(), limit.to_string()));
                }
            }
            Pagination::Offset {
                offset_param,
                limit_param,
                ..
            } => {
                if let Some(offset) = self.offset() {
                    params.push((offset_param.to_string(), offset.to_string()));
                }
                if let Some(limit) = self.limit {
                    params.push((limit_param.to_string(), limit.to_string()));
                }
            }
        }
        params
    }

    /// Record a fetched page and decide whether to fetch another.
    ///
    /// The total-count check runs before the short-page check, so a reached
    /// total always ends the walk.
    pub fn advance(&mut self, signals: &PageSignals) -> Step {
        self.pages += 1;
        self.seen += signals.raw_count as u64;

        if !self.paginated {
            return Step::Done(Stop::SinglePage);
        }
        if signals.raw_count == 0 {
            return Step::Done(Stop::EmptyPage);
        }
        if signals
            .total
            .is_some_and(|total| self.skipped() + self.seen >= total)
        {
            return Step::Done(Stop::TotalReached);
        }
        if self
            .limit
            .is_some_and(|limit| signals.raw_count < limit as usize)
        {
            return Step::Done(Stop::ShortPage);
        }

        if let Pagination::Marker { next_marker, .. } = self.pagination {
            let next = match next_marker {
                Some(_) => signals.next_marker.clone(),
                None => signals.last_id.clone(),
            };
            match next {
                None => return Step::Done(Stop::NoMarker),
                Some(next) if self.marker.as_deref() == Some(next.as_str()) => {
                    tracing::warn!(marker = %next, "marker did not advance, stopping");
                    return Step::Done(Stop::MarkerStalled);
                }
                Some(next) => self.marker = Some(next),
            }
        }

        if self.pages >= MAX_PAGES {
            tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
            return Step::Done(Stop::PageCeiling);
        }
        Step::Continue
    }
}

/// A single page of results.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages (if reported).
    pub total: Option<u64>,
    /// Marker to pass to fetch the following page (marker-paged resources).
    pub next_marker: Option<String>,
    /// Offset to pass to fetch the following page (offset-paged resources).
    pub next_offset: Option<u64>,
    /// Whether there are more pages.
    pub has_more: bool,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total: Option<u64>, next_marker: Option<String>, has_more: bool) -> Self {
        Self {
            items,
            total,
            next_marker,
            next_offset: None,
            has_more,
        }
    }

    /// Set the offset of the following page.
    #[must_use]
    pub fn with_next_offset(mut self, next_offset: Option<u64>) -> Self {
        self.next_offset = next_offset;
        self
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            next_marker: self.next_marker,
            next_offset: self.next_offset,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
