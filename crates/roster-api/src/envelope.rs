// Response envelopes shared by every backend endpoint

use std::fmt::{Display, Formatter};

use serde::Deserialize;

/// Backend response code. Older endpoints send it as a number, newer ones
/// as a string, so both shapes must decode.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Code {
    Num(i64),
    Str(String),
}

impl Code {
    pub fn matches(&self, code: &str) -> bool {
        match self {
            Code::Num(n) => n.to_string() == code,
            Code::Str(s) => s == code,
        }
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Code::Num(n) => write!(f, "{}", n),
            Code::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Generic response wrapper. Every field is optional on the wire; callers
/// decide which absences are fatal for their operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub code: Option<Code>,
    pub message: Option<String>,
    pub data: Option<T>,
    pub errors: Option<serde_json::Value>,
}

/// Response wrapper for collection endpoints. Paging fields ride beside the
/// row data rather than inside it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnvelope<T> {
    pub code: Option<Code>,
    pub message: Option<String>,
    pub data: Option<Vec<T>>,
    pub errors: Option<serde_json::Value>,
    pub total: Option<u64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub total_pages: Option<u32>,
    pub paging_counter: Option<u64>,
    pub has_next_page: Option<bool>,
    pub has_prev_page: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_numeric_code() {
        let json = r#"{"code":200,"message":"ok","data":"hello"}"#;
        let env: Envelope<String> = serde_json::from_str(json).unwrap();
        assert_eq!(env.code, Some(Code::Num(200)));
        assert_eq!(env.message.as_deref(), Some("ok"));
        assert_eq!(env.data.as_deref(), Some("hello"));
        assert!(env.errors.is_none());
    }

    #[test]
    fn test_envelope_string_code() {
        let json = r#"{"code":"RESOURCE_CONFLICT","message":"email already registered"}"#;
        let env: Envelope<String> = serde_json::from_str(json).unwrap();
        assert_eq!(env.code, Some(Code::Str("RESOURCE_CONFLICT".to_string())));
        assert!(env.data.is_none());
    }

    #[test]
    fn test_envelope_all_fields_optional() {
        let env: Envelope<String> = serde_json::from_str("{}").unwrap();
        assert!(env.code.is_none());
        assert!(env.message.is_none());
        assert!(env.data.is_none());
    }

    #[test]
    fn test_envelope_rejects_non_object() {
        let result: Result<Envelope<String>, _> = serde_json::from_str(r#""plain text""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_envelope_camel_case_paging() {
        let json = r#"{
            "code": 200,
            "data": ["a", "b"],
            "total": 42,
            "page": 2,
            "limit": 20,
            "totalPages": 3,
            "pagingCounter": 21,
            "hasNextPage": true,
            "hasPrevPage": true
        }"#;
        let env: ListEnvelope<String> = serde_json::from_str(json).unwrap();
        assert_eq!(env.total, Some(42));
        assert_eq!(env.total_pages, Some(3));
        assert_eq!(env.paging_counter, Some(21));
        assert_eq!(env.has_next_page, Some(true));
        assert_eq!(env.data.unwrap().len(), 2);
    }

    #[test]
    fn test_code_matches_both_shapes() {
        assert!(Code::Num(404).matches("404"));
        assert!(Code::Str("404".to_string()).matches("404"));
        assert!(!Code::Num(404).matches("500"));
    }
}
