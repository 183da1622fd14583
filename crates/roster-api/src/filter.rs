//! Filter, sort, and pagination state for the member list
//!
//! `MemberFilter` is the single source of truth a collection view renders
//! from. It serializes into a canonical ordered query (the request wire
//! format) and round-trips through URL parameters so list views are
//! deep-linkable. Malformed inputs are clamped or defaulted per field,
//! never rejected wholesale.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::model::MemberStatus;

/// Canonical query parameter names, in emission order
pub mod param {
    pub const SEARCH: &str = "search";
    pub const SEARCH_FIELDS: &str = "searchFields";
    pub const LOGIN_ID: &str = "loginId";
    pub const NAME: &str = "name";
    pub const PHONE: &str = "phone";
    pub const TRANSACTION_COUNT: &str = "transactionCount";
    pub const REFERRER_ID: &str = "referrerId";
    pub const AGENT_ID: &str = "agentId";
    pub const STATUS: &str = "status";
    pub const IS_ACTIVE: &str = "isActive";
    pub const START_DATE: &str = "startDate";
    pub const END_DATE: &str = "endDate";
    pub const SORT_BY: &str = "sortBy";
    pub const ORDER_BY: &str = "orderBy";
    pub const LIMIT: &str = "limit";
    pub const PAGE: &str = "currentPage";
}

/// Page sizes the backend accepts
pub const PAGE_SIZES: [u32; 4] = [10, 20, 50, 100];
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Wire format for calendar dates in query parameters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Member attributes the free-text search can run against
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Email,
    Phone,
    LoginId,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Email => "email",
            SearchField::Phone => "phone",
            SearchField::LoginId => "loginId",
        }
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SearchField::Name),
            "email" => Ok(SearchField::Email),
            "phone" => Ok(SearchField::Phone),
            "loginId" => Ok(SearchField::LoginId),
            other => Err(format!("unknown search field '{}'", other)),
        }
    }
}

/// Member attributes the list can be sorted on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    MembershipFeeRate,
    ReferralFeeRate,
    TransactionCount,
    LastTransactionAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::MembershipFeeRate => "membershipFeeRate",
            SortField::ReferralFeeRate => "referralFeeRate",
            SortField::TransactionCount => "transactionCount",
            SortField::LastTransactionAt => "lastTransactionAt",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortField::CreatedAt),
            "membershipFeeRate" => Ok(SortField::MembershipFeeRate),
            "referralFeeRate" => Ok(SortField::ReferralFeeRate),
            "transactionCount" => Ok(SortField::TransactionCount),
            "lastTransactionAt" => Ok(SortField::LastTransactionAt),
            other => Err(format!("unknown sort field '{}'", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(format!("unknown sort direction '{}'", s))
        }
    }
}

/// Complete query state of the member list
#[derive(Clone, Debug, PartialEq)]
pub struct MemberFilter {
    /// Free text matched against `search_fields`
    pub search: Option<String>,
    pub search_fields: Vec<SearchField>,
    pub login_id: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    /// Minimum number of recorded transactions
    pub transaction_count: Option<u64>,
    pub referrer_id: Option<String>,
    pub agent_id: Option<String>,
    pub status: Option<MemberStatus>,
    /// `false` switches the view to archived members
    pub is_active: bool,
    /// Creation time lower bound, inclusive
    pub start_date: Option<NaiveDate>,
    /// Creation time upper bound, inclusive
    pub end_date: Option<NaiveDate>,
    pub sort_by: SortField,
    pub order_by: SortDirection,
    /// Rows per page, one of `PAGE_SIZES`
    pub limit: u32,
    /// 1-based page number
    pub current_page: u32,
}

impl Default for MemberFilter {
    fn default() -> Self {
        Self {
            search: None,
            search_fields: Vec::new(),
            login_id: None,
            name: None,
            phone: None,
            transaction_count: None,
            referrer_id: None,
            agent_id: None,
            status: None,
            is_active: true,
            start_date: None,
            end_date: None,
            sort_by: SortField::default(),
            order_by: SortDirection::default(),
            limit: DEFAULT_PAGE_SIZE,
            current_page: 1,
        }
    }
}

impl MemberFilter {
    /// Clamp every field into its valid range.
    ///
    /// Text fields are trimmed, and blank text collapses to absent. An
    /// out-of-catalog limit snaps to the default, the page floors at 1,
    /// and an inverted date range is dropped entirely.
    pub fn normalize(&mut self) {
        normalize_text(&mut self.search);
        normalize_text(&mut self.login_id);
        normalize_text(&mut self.name);
        normalize_text(&mut self.phone);
        normalize_text(&mut self.referrer_id);
        normalize_text(&mut self.agent_id);

        self.search_fields.dedup();

        if !PAGE_SIZES.contains(&self.limit) {
            self.limit = DEFAULT_PAGE_SIZE;
        }
        if self.current_page == 0 {
            self.current_page = 1;
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && start > end
        {
            self.start_date = None;
            self.end_date = None;
        }
    }

    /// True when the two states differ in nothing but `current_page`.
    pub fn same_except_page(&self, other: &MemberFilter) -> bool {
        let mut aligned = other.clone();
        aligned.current_page = self.current_page;
        *self == aligned
    }

    /// Serialize into the canonical ordered key/value pairs.
    ///
    /// Absent and blank fields are omitted; everything else appears in
    /// declaration order, so equal states always produce identical
    /// queries no matter how they were built.
    pub fn to_canonical_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(search) = text(&self.search) {
            pairs.push((param::SEARCH, search.to_string()));
        }
        for field in &self.search_fields {
            pairs.push((param::SEARCH_FIELDS, field.as_str().to_string()));
        }
        if let Some(login_id) = text(&self.login_id) {
            pairs.push((param::LOGIN_ID, login_id.to_string()));
        }
        if let Some(name) = text(&self.name) {
            pairs.push((param::NAME, name.to_string()));
        }
        if let Some(phone) = text(&self.phone) {
            pairs.push((param::PHONE, phone.to_string()));
        }
        if let Some(count) = self.transaction_count {
            pairs.push((param::TRANSACTION_COUNT, count.to_string()));
        }
        if let Some(referrer_id) = text(&self.referrer_id) {
            pairs.push((param::REFERRER_ID, referrer_id.to_string()));
        }
        if let Some(agent_id) = text(&self.agent_id) {
            pairs.push((param::AGENT_ID, agent_id.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push((param::STATUS, status.as_str().to_string()));
        }
        pairs.push((param::IS_ACTIVE, self.is_active.to_string()));
        if let Some(start) = self.start_date {
            pairs.push((param::START_DATE, start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push((param::END_DATE, end.format(DATE_FORMAT).to_string()));
        }
        pairs.push((param::SORT_BY, self.sort_by.as_str().to_string()));
        pairs.push((param::ORDER_BY, self.order_by.as_str().to_string()));
        pairs.push((param::LIMIT, self.limit.to_string()));
        pairs.push((param::PAGE, self.current_page.to_string()));

        pairs
    }

    /// Encode the canonical query as a URL query string.
    pub fn to_url_params(&self) -> String {
        // The pair list only holds plain strings, encoding cannot fail.
        serde_urlencoded::to_string(self.to_canonical_query()).unwrap_or_default()
    }

    /// Rebuild a filter from URL parameters.
    ///
    /// Unknown keys are ignored. A value that does not parse falls back
    /// to the default for that field alone, the rest of the query is
    /// still honored.
    pub fn from_url_params(query: &str) -> Self {
        let mut filter = MemberFilter::default();

        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            let value = value.as_ref();
            match key.as_ref() {
                param::SEARCH => filter.search = Some(value.to_string()),
                param::SEARCH_FIELDS => {
                    if let Ok(field) = value.parse() {
                        filter.search_fields.push(field);
                    }
                }
                param::LOGIN_ID => filter.login_id = Some(value.to_string()),
                param::NAME => filter.name = Some(value.to_string()),
                param::PHONE => filter.phone = Some(value.to_string()),
                param::TRANSACTION_COUNT => filter.transaction_count = value.parse().ok(),
                param::REFERRER_ID => filter.referrer_id = Some(value.to_string()),
                param::AGENT_ID => filter.agent_id = Some(value.to_string()),
                param::STATUS => filter.status = value.parse().ok(),
                param::IS_ACTIVE => {
                    if let Ok(flag) = value.parse() {
                        filter.is_active = flag;
                    }
                }
                param::START_DATE => {
                    filter.start_date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
                }
                param::END_DATE => {
                    filter.end_date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
                }
                param::SORT_BY => filter.sort_by = value.parse().unwrap_or_default(),
                param::ORDER_BY => filter.order_by = value.parse().unwrap_or_default(),
                param::LIMIT => filter.limit = value.parse().unwrap_or(DEFAULT_PAGE_SIZE),
                param::PAGE => filter.current_page = value.parse().unwrap_or(1),
                _ => {}
            }
        }

        filter.normalize();
        filter
    }
}

fn normalize_text(value: &mut Option<String>) {
    if let Some(s) = value.take() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            *value = Some(trimmed.to_string());
        }
    }
}

fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
