//! Page arithmetic.

use std::ops::Range;

use crate::{PaginationError, Result};

/// Fixed-size pages over `total_items` ordered items.
///
/// Derived, never stored: the composer builds one from the catalog length,
/// the controller from the number of item nodes it finds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePartition {
    total_items: usize,
    items_per_page: usize,
}

impl PagePartition {
    /// Create a partition. Fails when `items_per_page` is zero.
    pub fn new(total_items: usize, items_per_page: usize) -> Result<Self> {
        if items_per_page == 0 {
            return Err(PaginationError::ZeroItemsPerPage);
        }

        Ok(Self {
            total_items,
            items_per_page,
        })
    }

    /// Number of items being paginated.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Items shown per page.
    #[must_use]
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Number of pages; at least one even with no items.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.items_per_page).max(1)
    }

    /// Whether `page` is a valid 1-indexed page.
    #[must_use]
    pub fn contains_page(&self, page: usize) -> bool {
        (1..=self.total_pages()).contains(&page)
    }

    /// Half-open index range shown on `page`, clamped to the item count.
    ///
    /// Returns `None` for pages outside `1..=total_pages`.
    #[must_use]
    pub fn range(&self, page: usize) -> Option<Range<usize>> {
        if !self.contains_page(page) {
            return None;
        }

        let start = ((page - 1) * self.items_per_page).min(self.total_items);
        let end = (start + self.items_per_page).min(self.total_items);
        Some(start..end)
    }

    /// Whether the item at `index` is shown on `page`.
    #[must_use]
    pub fn is_visible(&self, page: usize, index: usize) -> bool {
        self.range(page).is_some_and(|range| range.contains(&index))
    }

    /// Page that shows the item at `index`.
    #[must_use]
    pub fn page_of(&self, index: usize) -> Option<usize> {
        (index < self.total_items).then(|| index / self.items_per_page + 1)
    }

    /// Slice `items` down to what `page` shows.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        match self.range(page) {
            Some(range) if range.end <= items.len() => &items[range],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_items_per_page_rejected() {
        assert_eq!(
            PagePartition::new(10, 0),
            Err(PaginationError::ZeroItemsPerPage)
        );
    }

    #[test]
    fn test_total_pages_formula() {
        for total in 0..40 {
            for per_page in 1..8 {
                let partition = PagePartition::new(total, per_page).unwrap();
                let expected = std::cmp::max(1, total.div_ceil(per_page));
                assert_eq!(partition.total_pages(), expected, "{total}/{per_page}");
            }
        }
    }

    #[test]
    fn test_fifteen_logs_three_per_page() {
        let partition = PagePartition::new(15, 3).unwrap();

        assert_eq!(partition.total_pages(), 5);
        assert_eq!(partition.range(1), Some(0..3));
        assert_eq!(partition.range(5), Some(12..15));
        assert_eq!(partition.range(6), None);
    }

    #[test]
    fn test_four_projects_four_per_page() {
        let partition = PagePartition::new(4, 4).unwrap();

        assert_eq!(partition.total_pages(), 1);
        assert_eq!(partition.range(1), Some(0..4));
    }

    #[test]
    fn test_empty_partition() {
        let partition = PagePartition::new(0, 4).unwrap();

        assert_eq!(partition.total_pages(), 1);
        assert_eq!(partition.range(1), Some(0..0));
        assert!(!partition.is_visible(1, 0));
        assert_eq!(partition.page_of(0), None);
    }

    #[test]
    fn test_last_page_is_clamped() {
        let partition = PagePartition::new(10, 3).unwrap();

        assert_eq!(partition.total_pages(), 4);
        assert_eq!(partition.range(4), Some(9..10));
    }

    #[test]
    fn test_page_zero_is_out_of_range() {
        let partition = PagePartition::new(10, 3).unwrap();

        assert!(!partition.contains_page(0));
        assert_eq!(partition.range(0), None);
        assert!(!partition.is_visible(0, 0));
    }

    #[test]
    fn test_page_of() {
        let partition = PagePartition::new(10, 3).unwrap();

        assert_eq!(partition.page_of(0), Some(1));
        assert_eq!(partition.page_of(2), Some(1));
        assert_eq!(partition.page_of(3), Some(2));
        assert_eq!(partition.page_of(9), Some(4));
        assert_eq!(partition.page_of(10), None);
    }

    #[test]
    fn test_every_item_on_exactly_one_page() {
        let partition = PagePartition::new(17, 4).unwrap();

        for index in 0..17 {
            let pages: Vec<_> = (1..=partition.total_pages())
                .filter(|&page| partition.is_visible(page, index))
                .collect();
            assert_eq!(pages, vec![partition.page_of(index).unwrap()]);
        }
    }

    #[test]
    fn test_slice() {
        let items = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let partition = PagePartition::new(items.len(), 3).unwrap();

        assert_eq!(partition.slice(&items, 1), &[1, 2, 3]);
        assert_eq!(partition.slice(&items, 2), &[4, 5, 6]);
        assert_eq!(partition.slice(&items, 4), &[10]);
        assert!(partition.slice(&items, 5).is_empty());
    }
}
