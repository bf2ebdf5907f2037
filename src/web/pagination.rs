//! 1-based slice pagination for rendered tables.

/// One window out of a larger list
#[derive(Debug)]
pub struct Paged<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<'a, T> Paged<'a, T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Clamp `page` into range and cut the matching window. Out-of-range pages
/// land on the nearest valid page; an empty list yields one empty page.
pub fn slice<T>(items: &[T], page: usize, page_size: usize) -> Paged<'_, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = ((total_items + page_size - 1) / page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let window = if start >= total_items {
        &items[0..0]
    } else {
        &items[start..end]
    };

    Paged { items: window, page, total_pages, total_items }
}
