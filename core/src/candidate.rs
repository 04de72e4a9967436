//! Resolved candidate list with its page position.
//!
//! `CandidateList` pairs the ordered, distinct candidates for the current
//! buffer with the page the user is looking at. Paging math lives in
//! [`crate::pager`]; this type keeps the page index valid across calls.

use crate::pager::{self, Page, Slot};

/// A paginated list of candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    /// All resolved candidates, in display order
    candidates: Vec<String>,

    /// Current page index (0-based)
    current_page: usize,
}

impl CandidateList {
    /// Wrap a resolved list, starting on the first page.
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            current_page: 0,
        }
    }

    /// Get all candidates.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Get the total number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Get the total number of pages.
    pub fn num_pages(&self) -> usize {
        pager::total_pages(self.candidates.len())
    }

    /// Get the current page index (0-based).
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Get the candidates for the current page.
    pub fn current_page_candidates(&self) -> &[String] {
        pager::page(&self.candidates, self.current_page)
    }

    /// Current page together with its label.
    pub fn paginate(&self) -> Page<'_, String> {
        pager::paginate(&self.candidates, self.current_page)
    }

    /// Move to the next page.
    /// Returns true if the page changed.
    pub fn page_down(&mut self) -> bool {
        let next = pager::advance(self.current_page, self.candidates.len());
        let moved = next != self.current_page;
        self.current_page = next;
        moved
    }

    /// Move to the previous page.
    /// Returns true if the page changed.
    pub fn page_up(&mut self) -> bool {
        let prev = pager::retreat(self.current_page);
        let moved = prev != self.current_page;
        self.current_page = prev;
        moved
    }

    /// Candidate for `slot` on the current page.
    pub fn select(&self, slot: Slot) -> Option<&str> {
        pager::select(&self.candidates, self.current_page, slot).map(String::as_str)
    }

    /// Go back to the first page.
    pub fn reset(&mut self) {
        self.current_page = 0;
    }
}
