//! Listing
//!
//! Client-side filtering and pagination over an already-fetched collection. One `Listing` backs
//! every admin table (users, roles, medicines, invoices, orders, reviews, messages); the entity
//! modules provide the filters.

use std::{cmp::Ordering, num::NonZeroUsize};

/// Decides whether an item is shown.
pub trait Predicate<T> {
    /// Returns `true` if `item` passes the filter.
    fn matches(&self, item: &T) -> bool;
}

impl<T, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    fn matches(&self, item: &T) -> bool {
        self(item)
    }
}

/// A predicate that lets everything through.
#[derive(Debug, Clone, Copy, Default)]
pub struct Everything;

impl<T> Predicate<T> for Everything {
    fn matches(&self, _item: &T) -> bool {
        true
    }
}

/// Conjunction of a set of predicates.
#[derive(Debug)]
pub struct AllOf<P>(Vec<P>);

/// Combine predicates so that an item must pass all of them.
pub fn all_of<P>(predicates: impl IntoIterator<Item = P>) -> AllOf<P> {
    AllOf(predicates.into_iter().collect())
}

impl<T, P: Predicate<T>> Predicate<T> for AllOf<P> {
    fn matches(&self, item: &T) -> bool {
        self.0.iter().all(|predicate| predicate.matches(item))
    }
}

/// Lower-cased containment check used by every search box.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// One page of a filtered listing.
#[derive(Debug, PartialEq)]
pub struct Page<'l, T> {
    /// Items on this page
    pub items: Vec<&'l T>,

    /// 1-based page number, clamped into `1..=total_pages`
    pub page: usize,

    /// Number of pages, at least one
    pub total_pages: usize,

    /// Number of items passing the filter
    pub total_count: usize,
}

impl<T> Page<'_, T> {
    /// Checks if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Checks if there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// A fetched collection with a fixed page size.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    items: Vec<T>,
    page_size: NonZeroUsize,
}

impl<T> Listing<T> {
    /// Create a listing over `items`.
    pub fn new(items: impl Into<Vec<T>>, page_size: NonZeroUsize) -> Self {
        Self {
            items: items.into(),
            page_size,
        }
    }

    /// Return the listing with its items ordered by `compare`.
    #[must_use]
    pub fn sorted_by(mut self, compare: impl FnMut(&T, &T) -> Ordering) -> Self {
        self.items.sort_by(compare);
        self
    }

    /// Replace the items, e.g. after a refresh.
    pub fn replace(&mut self, items: impl Into<Vec<T>>) {
        self.items = items.into();
    }

    /// All items, unfiltered.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items per page.
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Number of items passing `filter`.
    pub fn count(&self, filter: &impl Predicate<T>) -> usize {
        self.items.iter().filter(|item| filter.matches(item)).count()
    }

    /// Filter the items and cut out page `page` (1-based, clamped).
    pub fn page(&self, filter: &impl Predicate<T>, page: usize) -> Page<'_, T> {
        let total_count = self.count(filter);
        let total_pages = total_count.div_ceil(self.page_size.get()).max(1);
        let page = page.clamp(1, total_pages);

        let items = self
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .skip((page - 1) * self.page_size.get())
            .take(self.page_size.get())
            .collect();

        Page {
            items,
            page,
            total_pages,
            total_count,
        }
    }
}
