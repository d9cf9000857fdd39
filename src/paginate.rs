//! Infinite-scroll pagination driver.
//!
//! [`Paginator`] keeps the state an infinite list needs: the items fetched so
//! far, the current page, whether a fetch is in flight, the last error, and
//! whether more pages are believed to exist. It does no I/O itself. Callers
//! drive it in two steps:
//!
//! ```text
//! begin_fetch()  → Some(ticket)   page is due and nothing is in flight
//!   … caller loads page ticket.page …
//! complete(ticket, result)        apply, or discard if stale
//! ```
//!
//! When the sentinel element at the end of the list scrolls into view, call
//! [`Paginator::sentinel_visible`]; it advances the page (and makes the next
//! fetch due) only when no fetch is in flight, no error is pending, and more
//! data is expected.
//!
//! Every ticket carries the generation it was issued under. [`Paginator::reset`]
//! bumps the generation, so a response that was in flight across a reset is
//! dropped instead of being appended to the fresh list.
//!
//! For synchronous sources, [`Paginator::fetch_with`] runs both steps against
//! a [`PageLoader`].

use std::fmt;

/// Decides from the latest page whether more pages may follow.
pub type HasMore<T> = Box<dyn Fn(&[T]) -> bool + Send + Sync>;

/// Has-more predicate treating a full page as "there may be more".
pub fn page_full<T: 'static>(page_size: usize) -> HasMore<T> {
    Box::new(move |page: &[T]| page.len() == page_size)
}

/// Source of pages for [`Paginator::fetch_with`].
pub trait PageLoader<T> {
    type Error: fmt::Display;

    fn load_page(&mut self, page: u32, page_size: usize) -> Result<Vec<T>, Self::Error>;
}

/// Serves pages out of an in-memory list.
#[derive(Debug, Clone)]
pub struct SliceLoader<T> {
    items: Vec<T>,
}

impl<T> SliceLoader<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: Clone> PageLoader<T> for SliceLoader<T> {
    type Error = std::convert::Infallible;

    fn load_page(&mut self, page: u32, page_size: usize) -> Result<Vec<T>, Self::Error> {
        let start = (page as usize).saturating_mul(page_size).min(self.items.len());
        let end = start.saturating_add(page_size).min(self.items.len());
        Ok(self.items[start..end].to_vec())
    }
}

/// Handle for one in-flight fetch. Consumed by [`Paginator::complete`].
#[derive(Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub page: u32,
    generation: u64,
}

/// What [`Paginator::complete`] did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Items replaced the list (initial page).
    Replaced { count: usize },
    /// Items were appended to the list.
    Appended { count: usize },
    /// The fetch failed; the message is stored in [`Paginator::error`].
    Failed,
    /// The ticket predates the last reset, or its fetch was already
    /// completed; the response was ignored.
    Stale,
}

/// Pagination state for one list.
pub struct Paginator<T> {
    items: Vec<T>,
    initial_page: u32,
    page: u32,
    page_size: usize,
    loading: bool,
    error: Option<String>,
    has_more: bool,
    /// The current page has not been requested yet.
    due: bool,
    generation: u64,
    has_more_fn: HasMore<T>,
}

impl<T> fmt::Debug for Paginator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("items", &self.items.len())
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .field("has_more", &self.has_more)
            .field("generation", &self.generation)
            .finish()
    }
}

impl<T: 'static> Paginator<T> {
    /// Paginator starting at page 0 whose has-more rule is "page was full".
    pub fn new(page_size: usize) -> Self {
        Self::with_predicate(0, page_size, page_full(page_size))
    }
}

impl<T> Paginator<T> {
    /// Paginator with a custom initial page and has-more predicate.
    ///
    /// The initial page is due immediately.
    pub fn with_predicate(initial_page: u32, page_size: usize, has_more: HasMore<T>) -> Self {
        Self {
            items: Vec::new(),
            initial_page,
            page: initial_page,
            page_size,
            loading: false,
            error: None,
            has_more: true,
            due: true,
            generation: 0,
            has_more_fn: has_more,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Start fetching the current page if it is due.
    ///
    /// Returns `None` while another fetch is in flight, when the page has
    /// already been requested, or when no more data is expected.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if !self.due || self.loading || !self.has_more {
            return None;
        }
        self.due = false;
        self.loading = true;
        self.error = None;
        Some(FetchTicket {
            page: self.page,
            generation: self.generation,
        })
    }

    /// Apply the result of the fetch identified by `ticket`.
    ///
    /// Each fetch is applied at most once: a response arriving when nothing
    /// is in flight is treated as stale.
    pub fn complete<E: fmt::Display>(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<T>, E>,
    ) -> FetchOutcome {
        if ticket.generation != self.generation || !self.loading || ticket.page != self.page {
            tracing::debug!(
                page = ticket.page,
                generation = ticket.generation,
                current = self.generation,
                "discarding stale page response"
            );
            return FetchOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(page_items) => {
                let count = page_items.len();
                self.has_more = (self.has_more_fn)(&page_items);
                if ticket.page == self.initial_page {
                    self.items = page_items;
                    FetchOutcome::Replaced { count }
                } else {
                    self.items.extend(page_items);
                    FetchOutcome::Appended { count }
                }
            }
            Err(err) => {
                tracing::warn!(page = ticket.page, error = %err, "page fetch failed");
                self.error = Some(err.to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// The sentinel at the end of the list became visible.
    ///
    /// Advances to the next page and returns `true` when a new fetch is now
    /// due.
    pub fn sentinel_visible(&mut self) -> bool {
        if self.loading || self.due || !self.has_more || self.error.is_some() {
            return false;
        }
        self.page += 1;
        self.due = true;
        true
    }

    /// Clear everything and make the initial page due again.
    ///
    /// Any fetch still in flight becomes stale.
    pub fn reset(&mut self) {
        self.items.clear();
        self.page = self.initial_page;
        self.has_more = true;
        self.error = None;
        self.loading = false;
        self.due = true;
        self.generation += 1;
    }

    /// Fetch the due page from `loader`, if any.
    pub fn fetch_with<L: PageLoader<T>>(&mut self, loader: &mut L) -> Option<FetchOutcome> {
        let ticket = self.begin_fetch()?;
        let result = loader.load_page(ticket.page, self.page_size);
        Some(self.complete(ticket, result))
    }
}

/// Whether a sentinel at `sentinel_top` is inside the viewport extended
/// downwards by `threshold` units.
pub fn sentinel_in_view(sentinel_top: f64, viewport_bottom: f64, threshold: f64) -> bool {
    sentinel_top <= viewport_bottom + threshold
}
