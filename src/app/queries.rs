use employee_core::common::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GetEmployeeByIdQuery {
    pub id: Uuid,
}

/// Raw paging parameters as received; see [`GetEmployeeListQuery::normalized`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEmployeeListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl GetEmployeeListQuery {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// `(page, page_size)` with non-positive values replaced by defaults and
    /// the page size capped.
    pub fn normalized(&self) -> (u32, u32) {
        let page = match self.page {
            Some(p) if p > 0 => p.min(u32::MAX as i64) as u32,
            _ => DEFAULT_PAGE,
        };
        let page_size = match self.page_size {
            Some(s) if s > 0 => s.min(MAX_PAGE_SIZE as i64) as u32,
            _ => DEFAULT_PAGE_SIZE,
        };
        (page, page_size)
    }
}
