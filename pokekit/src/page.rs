use std::fmt;

/// A page of a listing, counted from zero and displayed from one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Page(usize);

impl Page {
    pub const FIRST: Self = Self(0);

    pub fn number(self) -> usize {
        self.0 + 1
    }

    pub fn offset(self, per_page: usize) -> usize {
        self.0 * per_page
    }

    pub fn increment(self, total_pages: usize) -> Option<Self> {
        if self.number() >= total_pages {
            return None;
        }

        Some(Self(self.0 + 1))
    }

    pub fn decrement(self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }

        Some(Self(self.0 - 1))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.number().fmt(f)
    }
}

/// The amount of pages needed to show `count` items.
pub fn total(count: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }

    count.div_ceil(per_page)
}
