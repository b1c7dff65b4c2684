use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{HistoryError, Result};

/// Allowed page sizes for the history view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    Fifty,
}

impl PageSize {
    pub fn get(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Fifty => 50,
        }
    }

    /// 10 -> 20 -> 50 -> 10
    pub fn next(self) -> Self {
        match self {
            Self::Ten => Self::Twenty,
            Self::Twenty => Self::Fifty,
            Self::Fifty => Self::Ten,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = HistoryError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            10 => Ok(Self::Ten),
            20 => Ok(Self::Twenty),
            50 => Ok(Self::Fifty),
            other => Err(HistoryError::InvalidPageSize(other)),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        match size {
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub page_size: PageSize,
    pub offset: usize,
}

impl Pagination {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            offset: 0,
        }
    }

    pub fn limit(&self) -> usize {
        self.page_size.get()
    }

    /// 1-based page containing the current offset
    pub fn current_page(&self) -> usize {
        self.offset / self.limit() + 1
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.limit())
    }

    /// First offset of a 1-based page, `None` if it does not fit in `usize`
    pub fn offset_for_page(&self, page: usize) -> Option<usize> {
        page.saturating_sub(1).checked_mul(self.limit())
    }
}
