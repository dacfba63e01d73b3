use serde::Deserialize;
use utoipa::IntoParams;

use crate::{config::AppConfig, errors::ServiceError, PaginatedResponse};

/// Query parameters shared by the admin list endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number
    pub page: Option<u64>,
    /// Page size, capped by configuration
    pub limit: Option<u64>,
    /// Case-sensitive substring filter
    pub search: Option<String>,
}

/// Resolves optional paging parameters into `(page, limit)`.
///
/// The row offset of the page must fit a signed 64-bit SQL `OFFSET`.
pub fn page_window(
    page: Option<u64>,
    limit: Option<u64>,
    config: &AppConfig,
) -> Result<(u64, u64), ServiceError> {
    let page = page.unwrap_or(1).max(1);
    let limit = config.page_limit(limit);
    let offset = (page - 1)
        .checked_mul(limit)
        .filter(|offset| *offset <= i64::MAX as u64);
    if offset.is_none() {
        return Err(ServiceError::BadRequest(format!(
            "page {} is out of range for page size {}",
            page, limit
        )));
    }
    Ok((page, limit))
}

impl ListParams {
    pub fn window(&self, config: &AppConfig) -> Result<(u64, u64), ServiceError> {
        page_window(self.page, self.limit, config)
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

/// Wraps one page of items.
pub fn paginated<T, U: From<T>>(
    items: Vec<T>,
    total: u64,
    page: u64,
    limit: u64,
) -> PaginatedResponse<U> {
    let total_pages = if limit == 0 {
        0
    } else {
        (total + limit - 1) / limit
    };
    PaginatedResponse {
        items: items.into_iter().map(U::from).collect(),
        total,
        page,
        limit,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            0,
            "development".into(),
        )
    }

    #[test]
    fn window_defaults_to_first_page() {
        let params = ListParams::default();
        assert_eq!(params.window(&config()).unwrap(), (1, 20));
    }

    #[test]
    fn window_caps_limit() {
        let params = ListParams {
            page: Some(0),
            limit: Some(1_000),
            search: None,
        };
        assert_eq!(params.window(&config()).unwrap(), (1, 100));
    }

    #[test]
    fn window_rejects_pages_past_the_last_offset() {
        let err = page_window(Some(u64::MAX), Some(20), &config()).unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));

        let last = i64::MAX as u64 / 20 + 1;
        assert_eq!(page_window(Some(last), Some(20), &config()).unwrap(), (last, 20));
        assert!(page_window(Some(last + 1), Some(20), &config()).is_err());
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: PaginatedResponse<i32> = paginated(vec![1, 2], 41, 3, 20);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, vec![1, 2]);

        let empty: PaginatedResponse<i32> = paginated(Vec::<i32>::new(), 0, 1, 20);
        assert_eq!(empty.total_pages, 0);
    }
}
