//! Query-string parameters for the list endpoints.

use serde::Deserialize;

use quickdesk_core::error::AppError;
use quickdesk_core::types::{CategoryId, PageRequest};
use quickdesk_entity::ticket::TicketStatus;
use quickdesk_service::{QuestionQuery, TicketQuery, TicketSort};

use super::path::parse_id;

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

/// Treats absent, empty and `"all"` as "no filter".
fn active(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

fn category_filter(value: Option<String>) -> Result<Option<CategoryId>, AppError> {
    active(value).map(|v| parse_id(&v)).transpose()
}

/// `GET /questions?search=&category=&tag=&page=&limit=`
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl QuestionListParams {
    /// Converts into the service query.
    pub fn into_query(self) -> Result<QuestionQuery, AppError> {
        Ok(QuestionQuery {
            search: active(self.search),
            category: category_filter(self.category)?,
            tag: active(self.tag),
            page: PageRequest::new(self.page, self.limit),
        })
    }
}

/// `GET /dashboard/tickets?page=&limit=&status=&category=&search=&sortBy=`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTicketParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
}

impl DashboardTicketParams {
    /// Converts into the service query.
    pub fn into_query(self) -> Result<TicketQuery, AppError> {
        let status = active(self.status)
            .map(|s| s.parse::<TicketStatus>())
            .transpose()?;
        let sort = match self.sort_by {
            Some(s) => s.parse::<TicketSort>()?,
            None => TicketSort::default(),
        };
        Ok(TicketQuery {
            status,
            category: category_filter(self.category)?,
            search: active(self.search),
            sort,
            page: PageRequest::new(self.page, self.limit),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sentinel_disables_filters() {
        let params = DashboardTicketParams {
            page: 2,
            limit: 500,
            status: Some("all".into()),
            category: Some("All".into()),
            search: Some("  ".into()),
            sort_by: Some("oldest".into()),
        };
        let query = params.into_query().unwrap();
        assert!(query.status.is_none());
        assert!(query.category.is_none());
        assert!(query.search.is_none());
        assert_eq!(query.sort, TicketSort::Oldest);
        assert_eq!(query.page, PageRequest::new(2, 100));
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let params = QuestionListParams {
            search: None,
            category: Some("nope".into()),
            tag: None,
            page: 1,
            limit: 10,
        };
        assert!(params.into_query().is_err());

        let params = DashboardTicketParams {
            page: 1,
            limit: 10,
            status: Some("pending".into()),
            category: None,
            search: None,
            sort_by: None,
        };
        assert!(params.into_query().is_err());
    }
}
