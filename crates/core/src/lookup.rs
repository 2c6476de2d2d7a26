use serde::{Deserialize, Serialize};

use crate::display::ViewMode;
use crate::error::LookupError;

/// Raw lookup parameters as they arrive on the query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LookupQuery {
    pub domain: Option<String>,
    #[serde(rename = "searchType")]
    pub search_type: Option<String>,
}

/// A validated lookup: a non-blank domain and a known view mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub domain: String,
    pub mode: ViewMode,
}

impl LookupQuery {
    pub fn new(domain: impl Into<String>, search_type: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            search_type: Some(search_type.into()),
        }
    }

    /// Validate the parameters, domain first, then search type
    pub fn validate(&self) -> Result<LookupRequest, LookupError> {
        let domain = non_blank(self.domain.as_deref()).ok_or(LookupError::MissingDomain)?;
        let search_type =
            non_blank(self.search_type.as_deref()).ok_or(LookupError::MissingViewMode)?;

        Ok(LookupRequest {
            domain: domain.to_string(),
            mode: search_type.parse()?,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_domain_view() {
        let request = LookupQuery::new("example.com", "domain").validate().unwrap();
        assert_eq!(request.domain, "example.com");
        assert_eq!(request.mode, ViewMode::Domain);
    }

    #[test]
    fn test_validate_trims_domain() {
        let request = LookupQuery::new("  example.com\t", "contact")
            .validate()
            .unwrap();
        assert_eq!(request.domain, "example.com");
        assert_eq!(request.mode, ViewMode::Contact);
    }

    #[test]
    fn test_validate_missing_domain() {
        let query = LookupQuery {
            domain: None,
            search_type: Some("domain".to_string()),
        };
        assert_eq!(query.validate(), Err(LookupError::MissingDomain));
    }

    #[test]
    fn test_validate_blank_domain() {
        assert_eq!(
            LookupQuery::new("   ", "domain").validate(),
            Err(LookupError::MissingDomain)
        );
    }

    #[test]
    fn test_validate_missing_search_type() {
        let query = LookupQuery {
            domain: Some("example.com".to_string()),
            search_type: None,
        };
        assert_eq!(query.validate(), Err(LookupError::MissingViewMode));
    }

    #[test]
    fn test_validate_invalid_search_type() {
        assert_eq!(
            LookupQuery::new("example.com", "bogus").validate(),
            Err(LookupError::InvalidViewMode("bogus".to_string()))
        );
    }

    #[test]
    fn test_validate_domain_checked_before_search_type() {
        assert_eq!(
            LookupQuery::default().validate(),
            Err(LookupError::MissingDomain)
        );
    }

    #[test]
    fn test_query_deserializes_camel_case() {
        let query: LookupQuery =
            serde_json::from_str(r#"{"domain": "example.com", "searchType": "Contact"}"#).unwrap();
        assert_eq!(query, LookupQuery::new("example.com", "Contact"));
    }
}
