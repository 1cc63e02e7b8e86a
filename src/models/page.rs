/// A bounded slice of a larger result set.
///
/// `number` is 0-based; `total_elements` counts the whole (filtered) set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: u32, size: u32, total_elements: u64) -> Self {
        Self {
            content,
            number,
            size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 1;
        }
        self.total_elements.div_ceil(u64::from(self.size)) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages()
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

/// Row offset of the first element of `page` for the given `size`.
pub fn offset(page: u32, size: u32) -> i64 {
    i64::from(page) * i64::from(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![1, 2], 0, 5, 12);
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn last_page_has_no_next() {
        let page = Page::new(vec![11, 12], 2, 5, 12);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn empty_set_has_zero_pages() {
        let page: Page<i32> = Page::new(vec![], 0, 5, 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn map_keeps_paging_metadata() {
        let page = Page::new(vec![1, 2, 3], 1, 3, 9).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20, 30]);
        assert_eq!((page.number, page.size, page.total_elements), (1, 3, 9));
    }

    #[test]
    fn offset_multiplies_page_by_size() {
        assert_eq!(offset(0, 5), 0);
        assert_eq!(offset(3, 5), 15);
    }
}
