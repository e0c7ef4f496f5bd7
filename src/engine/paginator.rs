pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Result of paging an ordered list.
#[derive(Debug, PartialEq, Eq)]
pub enum Page<'a, T> {
    /// Nothing matched; show the empty-state placeholder.
    Empty,
    Items {
        visible: &'a [T],
        /// How many items a further "load more" could reveal.
        remaining: usize,
    },
}

impl<'a, T> Page<'a, T> {
    pub fn visible(&self) -> &'a [T] {
        match self {
            Page::Empty => &[],
            Page::Items { visible, .. } => *visible,
        }
    }

    pub fn remaining(&self) -> usize {
        match self {
            Page::Empty => 0,
            Page::Items { remaining, .. } => *remaining,
        }
    }

    pub fn has_more(&self) -> bool {
        self.remaining() > 0
    }
}

/// The first `depth * page_size` items of `ordered`. A depth of 0 is treated as 1.
pub fn paginate<T>(ordered: &[T], depth: usize, page_size: usize) -> Page<'_, T> {
    if ordered.is_empty() {
        return Page::Empty;
    }

    let shown = depth.max(1).saturating_mul(page_size.max(1));
    let end = shown.min(ordered.len());

    Page::Items {
        visible: &ordered[..end],
        remaining: ordered.len() - end,
    }
}
