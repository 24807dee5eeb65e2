use std::sync::Arc;

/// Number of pages needed to show `len` items, never less than one.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

/// A paged snapshot of a dataset.
///
/// The dataset is captured once when the pager is created and never
/// re-fetched; navigation only moves the page index. Cloning is cheap since
/// the items are shared.
#[derive(Debug, Clone)]
pub struct Pager<T> {
    items: Arc<[T]>,
    page: usize,
    page_size: usize,
}

/// The slice of a pager that is currently visible
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageView<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    /// Zero-based index of `items[0]` in the whole dataset
    pub first_index: usize,
}

impl<T> Pager<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items: items.into(),
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// An empty pager is terminal: it renders a "no results" message and
    /// never offers navigation.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.items.len(), self.page_size)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Step back one page; no-op on the first page
    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1);
        self.clamp();
    }

    /// Step forward one page; no-op on the last page
    pub fn next(&mut self) {
        self.page = self.page.saturating_add(1);
        self.clamp();
    }

    /// Force the page index back into `[0, total_pages - 1]`
    pub fn clamp(&mut self) -> usize {
        self.page = self.page.min(self.total_pages() - 1);
        self.page
    }

    /// Visible page, after re-clamping the stored index. `None` for an empty
    /// dataset.
    pub fn current(&mut self) -> Option<PageView<'_, T>> {
        if self.items.is_empty() {
            return None;
        }
        let page = self.clamp();
        let start = page * self.page_size;
        let end = (start + self.page_size).min(self.items.len());

        Some(PageView {
            items: &self.items[start..end],
            page,
            total_pages: self.total_pages(),
            first_index: start,
        })
    }

    #[cfg(test)]
    pub(crate) fn force_page(&mut self, page: usize) {
        self.page = page;
    }
}

impl<T> PageView<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(41, 20), 3);
        assert_eq!(total_pages(3, 1), 3);
    }

    #[test]
    fn test_total_pages_matches_ceil_for_non_empty() {
        for len in 1..=100usize {
            for page_size in 1..=25usize {
                let expected = (len as f64 / page_size as f64).ceil() as usize;
                assert_eq!(total_pages(len, page_size), expected);
                assert!(total_pages(len, page_size) >= 1);
            }
        }
    }

    #[test]
    fn test_prev_at_first_page_is_noop() {
        let mut pager = Pager::new((0..45).collect::<Vec<_>>(), 20);
        pager.prev();
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_next_at_last_page_is_noop() {
        let mut pager = Pager::new((0..45).collect::<Vec<_>>(), 20);
        pager.next();
        pager.next();
        assert_eq!(pager.page(), 2);
        pager.next();
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn test_prev_next_round_trip_from_interior_page() {
        let mut pager = Pager::new((0..100).collect::<Vec<_>>(), 20);
        pager.next();
        pager.next();
        assert_eq!(pager.page(), 2);

        pager.prev();
        pager.next();
        assert_eq!(pager.page(), 2);

        pager.next();
        pager.prev();
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn test_current_reclamps_out_of_range_page() {
        let mut pager = Pager::new((0..25).collect::<Vec<_>>(), 20);
        pager.force_page(17);

        let view = pager.current().unwrap();
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.items, &[20, 21, 22, 23, 24]);
        assert_eq!(view.first_index, 20);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_current_on_empty_dataset() {
        let mut pager: Pager<u8> = Pager::new(Vec::new(), 20);
        assert!(pager.is_empty());
        assert!(pager.current().is_none());
        pager.next();
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_view_navigation_flags() {
        let mut pager = Pager::new(vec!["a", "b", "c"], 1);
        {
            let view = pager.current().unwrap();
            assert!(!view.has_previous());
            assert!(view.has_next());
        }
        pager.next();
        {
            let view = pager.current().unwrap();
            assert!(view.has_previous());
            assert!(view.has_next());
        }
        pager.next();
        let view = pager.current().unwrap();
        assert!(view.has_previous());
        assert!(!view.has_next());
    }

    #[test]
    fn test_single_page_has_no_navigation() {
        let mut pager = Pager::new(vec![1, 2, 3], 20);
        let view = pager.current().unwrap();
        assert!(!view.has_previous());
        assert!(!view.has_next());
    }

    #[test]
    fn test_zero_page_size_treated_as_one() {
        let pager = Pager::new(vec![1, 2], 0);
        assert_eq!(pager.page_size(), 1);
        assert_eq!(pager.total_pages(), 2);
    }
}
