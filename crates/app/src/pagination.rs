//! Pagination
//!
//! Each endpoint pages in exactly one place. Server-paginated endpoints answer with
//! `{count, results}`; the others return the full collection, which is filtered and paged
//! locally with [`mims::listing::Listing`].

use serde::Deserialize;

/// One page from a server-paginated endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerPage<T> {
    /// Total matches across all pages
    pub count: u64,

    /// Items on this page
    pub results: Vec<T>,
}

impl<T> ServerPage<T> {
    /// Number of pages for `page_size`, at least one.
    pub fn total_pages(&self, page_size: u32) -> u64 {
        self.count.div_ceil(u64::from(page_size.max(1))).max(1)
    }
}

/// Response body of a listing endpoint. A paginated endpoint may also answer with a bare array
/// when paging is disabled on the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Paginated<T> {
    /// `{count, results}` envelope
    Page {
        /// Total matches across all pages
        count: u64,

        /// Items on this page
        results: Vec<T>,
    },

    /// Plain array
    Bare(Vec<T>),
}

impl<T> Paginated<T> {
    /// Normalise into a page; a bare array counts as a single page.
    pub fn into_page(self) -> ServerPage<T> {
        match self {
            Paginated::Page { count, results } => ServerPage { count, results },
            Paginated::Bare(results) => ServerPage {
                count: results.len() as u64,
                results,
            },
        }
    }

    /// Items without the envelope.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Paginated::Page { results, .. } | Paginated::Bare(results) => results,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn accepts_envelope_and_bare_arrays() -> TestResult {
        let envelope: Paginated<u32> =
            serde_json::from_str(r#"{"count": 45, "next": null, "previous": null, "results": [1, 2]}"#)?;
        let bare: Paginated<u32> = serde_json::from_str("[1, 2, 3]")?;

        let page = envelope.into_page();

        assert_eq!(page.count, 45);
        assert_eq!(page.results, vec![1, 2]);
        assert_eq!(page.total_pages(20), 3);

        let page = bare.into_page();

        assert_eq!(page.count, 3);
        assert_eq!(page.total_pages(20), 1);

        Ok(())
    }

    #[test]
    fn empty_results_still_have_one_page() {
        let page: ServerPage<u32> = ServerPage {
            count: 0,
            results: Vec::new(),
        };

        assert_eq!(page.total_pages(12), 1);
        assert_eq!(page.total_pages(0), 1);
    }
}
