// Member model types

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Business standing of a member. Independent of archival: an invalid
/// member still shows up in the active list until archived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Valid,
    Invalid,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Valid => "valid",
            MemberStatus::Invalid => "invalid",
        }
    }
}

impl FromStr for MemberStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "valid" => Ok(MemberStatus::Valid),
            "invalid" => Ok(MemberStatus::Invalid),
            other => Err(format!("unknown member status '{}'", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

/// Shallow reference to another member, embedded where the backend joins
/// the referrer into a row.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRef {
    pub id: String,
    pub name: String,
}

/// Full member record as returned by the backend
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub login_id: String,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_phone: Option<String>,
    pub date_of_birth: NaiveDate,
    pub membership_fee_rate: f64,
    pub referral_fee_rate: f64,
    #[serde(default)]
    pub transaction_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transaction_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<MemberRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    pub status: MemberStatus,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Member {
    /// A member without a referrer joined the roster directly.
    pub fn is_direct(&self) -> bool {
        self.referrer_id.is_none()
    }
}

/// Payload for registering a new member or editing an existing one.
/// Validated locally (see [`crate::validation`]) before any request is
/// issued.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDraft {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_phone: Option<String>,
    pub date_of_birth: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    pub membership_fee_rate: f64,
    pub referral_fee_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> MemberDraft {
        MemberDraft {
            name: "Jane Roe".to_string(),
            email: "jane@example.com".to_string(),
            gender: Gender::Female,
            phone: "0912345678".to_string(),
            alt_phone: None,
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 1).unwrap(),
            referrer_id: None,
            agent_id: None,
            membership_fee_rate: 1.5,
            referral_fee_rate: 0.5,
        }
    }

    #[test]
    fn test_member_deserialization() {
        let json = r#"{
            "id": "64b0c1",
            "loginId": "M0001",
            "name": "Jane Roe",
            "email": "jane@example.com",
            "gender": "female",
            "phone": "0912345678",
            "dateOfBirth": "1990-04-01",
            "membershipFeeRate": 1.5,
            "referralFeeRate": 0.5,
            "transactionCount": 7,
            "referrerId": "64b0c0",
            "referrer": {"id": "64b0c0", "name": "John Doe"},
            "status": "valid",
            "isActive": true,
            "createdAt": "2024-03-01T09:30:00Z"
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.login_id, "M0001");
        assert_eq!(member.gender, Gender::Female);
        assert_eq!(member.transaction_count, 7);
        assert_eq!(member.referrer.as_ref().unwrap().name, "John Doe");
        assert!(!member.is_direct());
        assert!(member.is_active);
    }

    #[test]
    fn test_member_optional_fields_absent() {
        let json = r#"{
            "id": "64b0c2",
            "loginId": "M0002",
            "name": "Solo Member",
            "email": "solo@example.com",
            "gender": "male",
            "phone": "0287654321",
            "dateOfBirth": "1985-12-24",
            "membershipFeeRate": 2.0,
            "referralFeeRate": 0.0,
            "status": "invalid",
            "isActive": false
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert!(member.is_direct());
        assert_eq!(member.transaction_count, 0);
        assert!(member.last_transaction_at.is_none());

        let out = serde_json::to_string(&member).unwrap();
        assert!(!out.contains("referrerId"));
        assert!(!out.contains("altPhone"));
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let json = serde_json::to_string(&draft()).unwrap();
        assert!(json.contains("\"dateOfBirth\":\"1990-04-01\""));
        assert!(json.contains("\"membershipFeeRate\":1.5"));
        assert!(!json.contains("referrerId"));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("valid".parse::<MemberStatus>().unwrap(), MemberStatus::Valid);
        assert!("archived".parse::<MemberStatus>().is_err());
    }
}
