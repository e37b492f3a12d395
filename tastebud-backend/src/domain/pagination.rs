use serde::{Deserialize, Serialize};

pub const MAX_PAGE_SIZE: usize = 100;

/// A 1-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    pub fn parse(page: usize, page_size: usize) -> Result<Self, String> {
        if page == 0 {
            Err("page numbers start at 1.".to_string())
        } else if page_size == 0 {
            Err("page_size must be positive.".to_string())
        } else {
            Ok(Self {
                page,
                page_size: page_size.min(MAX_PAGE_SIZE),
            })
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Cuts the requested page out of the full, already ordered result list.
    pub fn paginate(all: Vec<T>, request: PageRequest) -> Self {
        let total_count = all.len();
        let start = request.offset().min(total_count);
        let end = start.saturating_add(request.page_size).min(total_count);
        let items: Vec<T> = all.into_iter().skip(start).take(end - start).collect();
        Self {
            items,
            total_count,
            page: request.page,
            page_size: request.page_size,
            has_next: end < total_count,
            has_previous: request.page > 1,
        }
    }
}
