//! The list walker.
//!
//! A [`Pager`] fetches one page at a time and hands out its records in
//! provider order. Nothing is requested until the first call to
//! [`Pager::next`], and a page's request always completes before any of its
//! records are returned, so dropping a pager never abandons a request.

use std::collections::VecDeque;

use futures::stream::{self, Stream};

use crate::binder::{BinderConfig, ResponseBinder};
use crate::error::Result;
use crate::pagination::{Continuation, ListOptions, PageSignals, Step, Stop};
use crate::record::Record;
use crate::resource::ResourceDef;
use crate::transport::Transport;

/// Where a walk is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    /// Nothing fetched yet.
    Start,
    /// Handing out records of the current page; more pages may follow.
    Yielding,
    /// Finished normally.
    Done(Stop),
    /// A request or a page body failed; nothing more will be returned.
    Failed,
}

/// Lazily walks every page of a list endpoint.
pub struct Pager<'a, T: Transport + ?Sized> {
    transport: &'a T,
    def: &'static ResourceDef,
    path: String,
    query: Vec<(String, String)>,
    binder: ResponseBinder,
    continuation: Continuation,
    buffer: VecDeque<Result<Record>>,
    state: WalkState,
    stop: Option<Stop>,
}

impl<'a, T: Transport + ?Sized> std::fmt::Debug for Pager<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("kind", &self.def.kind)
            .field("path", &self.path)
            .field("state", &self.state)
            .field("buffered", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

impl<'a, T: Transport + ?Sized> Pager<'a, T> {
    /// Prepare a walk. Fails on unknown filters and missing path parameters
    /// without sending anything.
    pub fn new(
        transport: &'a T,
        def: &'static ResourceDef,
        options: ListOptions,
        config: BinderConfig,
    ) -> Result<Self> {
        let path = def.list_request_path(transport, &options.path_params)?;
        let query = def
            .filters
            .transpose(def.kind, &options.filters, options.allow_unknown_filters)?;

        if options.limit.is_some() && !def.pagination.is_paginated() {
            tracing::debug!(kind = def.kind, "resource is not paginated, ignoring limit");
        }

        Ok(Self {
            transport,
            def,
            path,
            query,
            binder: ResponseBinder::new(def, config),
            continuation: Continuation::new(def.pagination, &options),
            buffer: VecDeque::new(),
            state: WalkState::Start,
            stop: None,
        })
    }

    pub fn state(&self) -> WalkState {
        self.state
    }

    /// Pages fetched so far.
    pub fn pages_fetched(&self) -> u64 {
        self.continuation.pages()
    }

    /// The next record, fetching another page when the current one is used up.
    ///
    /// A record that failed coercion comes back as an error and the walk goes
    /// on. A failed request or malformed page is returned once, after which
    /// the walk yields `None`.
    pub async fn next(&mut self) -> Option<Result<Record>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(item);
            }
            match (self.state, self.stop) {
                (WalkState::Done(_) | WalkState::Failed, _) => return None,
                (WalkState::Yielding, Some(stop)) => {
                    self.state = WalkState::Done(stop);
                    return None;
                }
                (WalkState::Start | WalkState::Yielding, _) => {
                    if let Err(err) = self.fetch_page().await {
                        self.state = WalkState::Failed;
                        return Some(Err(err));
                    }
                }
            }
        }
    }

    /// Collect the whole walk, stopping at the first error.
    pub async fn try_collect(mut self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(item) = self.next().await {
            records.push(item?);
        }
        Ok(records)
    }

    /// The walk as a stream of records.
    pub fn into_stream(self) -> impl Stream<Item = Result<Record>> + 'a {
        stream::unfold(self, |mut pager| async move {
            let item = pager.next().await?;
            Some((item, pager))
        })
    }

    async fn fetch_page(&mut self) -> Result<()> {
        let mut query = self.query.clone();
        query.extend(self.continuation.page_params());

        tracing::debug!(
            kind = self.def.kind,
            page = self.continuation.pages() + 1,
            path = %self.path,
            "fetching page"
        );

        let body = self
            .transport
            .get(self.def.service, &self.path, query)
            .await?;
        let page = self.binder.bind_page(&body)?;

        let step = self.continuation.advance(&PageSignals {
            raw_count: page.raw_count,
            total: page.total,
            next_marker: page.next_marker,
            last_id: page.last_id,
        });

        self.buffer.extend(page.records);
        self.state = WalkState::Yielding;
        if let Step::Done(stop) = step {
            tracing::debug!(
                kind = self.def.kind,
                ?stop,
                seen = self.continuation.seen(),
                "walk complete"
            );
            self.stop = Some(stop);
        }
        Ok(())
    }
}
