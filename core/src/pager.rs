//! Fixed-size pagination over a candidate list.
//!
//! Pages hold [`PAGE_SIZE`] candidates, matching the 1–9 selection keys.
//! All navigation and selection is bounded: stepping past either end or
//! selecting a slot beyond the list is a no-op, never an error.

/// Number of candidates per page.
pub const PAGE_SIZE: usize = 9;

/// Which entry of the current page to pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Explicit digit key, 1-based
    Digit(u8),
    /// Space key
    FirstOfPage,
}

/// Number of pages needed for `count` candidates; zero when there are none.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Next page index, or `page` unchanged when already on the last page.
pub fn advance(page: usize, count: usize) -> usize {
    if (page + 1).saturating_mul(PAGE_SIZE) < count {
        page + 1
    } else {
        page
    }
}

/// Previous page index, or `page` unchanged on the first page.
pub fn retreat(page: usize) -> usize {
    if page > 0 {
        page - 1
    } else {
        page
    }
}

/// The candidates visible on `page`.
pub fn page<T>(candidates: &[T], page: usize) -> &[T] {
    let start = page.saturating_mul(PAGE_SIZE).min(candidates.len());
    let end = start.saturating_add(PAGE_SIZE).min(candidates.len());
    &candidates[start..end]
}

/// Absolute index for `slot` on `page`, if it falls inside the list.
pub fn absolute_index(count: usize, page: usize, slot: Slot) -> Option<usize> {
    let offset = match slot {
        Slot::Digit(n @ 1..=9) => usize::from(n) - 1,
        Slot::Digit(_) => return None,
        Slot::FirstOfPage => 0,
    };
    let index = page.checked_mul(PAGE_SIZE)?.checked_add(offset)?;
    (index < count).then_some(index)
}

/// The candidate picked by `slot` on `page`.
pub fn select<T>(candidates: &[T], page: usize, slot: Slot) -> Option<&T> {
    absolute_index(candidates.len(), page, slot).and_then(|i| candidates.get(i))
}

/// Everything a host needs to draw one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub index: usize,
    pub total_pages: usize,
    /// "2/3" style indicator, empty when there are no candidates
    pub label: String,
}

/// Slice out `page_index` and build its page label.
pub fn paginate<T>(candidates: &[T], page_index: usize) -> Page<'_, T> {
    let total = total_pages(candidates.len());
    let label = if total == 0 {
        String::new()
    } else {
        format!("{}/{}", page_index + 1, total)
    };
    Page {
        items: page(candidates, page_index),
        index: page_index,
        total_pages: total,
        label,
    }
}
