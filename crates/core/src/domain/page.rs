use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

impl Pagination {
    pub fn has_more(&self) -> bool {
        self.page < self.pages
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// A single page holding everything, for endpoints that do not paginate.
    pub fn unpaginated(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        let limit = u32::try_from(items.len()).unwrap_or(u32::MAX);
        Self { items, pagination: Pagination { page: 1, limit, total, pages: 1 } }
    }
}
