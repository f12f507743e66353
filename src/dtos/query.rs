//! Query DTOs - Data Transfer Objects per i parametri di query

use serde::Deserialize;
use validator::Validate;

/// Parametri di `/all-jobs?page=&size=&filter=`
#[derive(Deserialize, Debug, Default, Validate)]
pub struct PaginationQuery {
    #[validate(range(min = 1, message = "page must be a positive integer"))]
    pub page: Option<u64>,
    #[validate(range(min = 1, message = "size must be a positive integer"))]
    pub size: Option<u64>,
    /// Exact category match, ignored when empty
    #[serde(default)]
    pub filter: Option<String>,
}

impl PaginationQuery {
    /// `(skip, limit)` for the requested page. Without a size there is no limit
    /// and nothing is skipped; size is never clamped.
    pub fn window(&self) -> (u64, Option<u64>) {
        match self.size {
            Some(size) => {
                let page = self.page.unwrap_or(1).max(1);
                ((page - 1).saturating_mul(size), Some(size))
            }
            None => (0, None),
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.filter.as_deref().filter(|f| !f.is_empty())
    }
}
