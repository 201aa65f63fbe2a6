//! Employer company profiles.

use serde::{Deserialize, Serialize};

use super::{UserId, wire};

/// Company fields an employer fills in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerProfile {
    /// Company name.
    #[serde(default, deserialize_with = "wire::text")]
    pub company_name: String,
    /// Phone number as typed.
    #[serde(default, deserialize_with = "wire::text")]
    pub contact_number: String,
    /// Contact email.
    #[serde(default, deserialize_with = "wire::text")]
    pub email: String,
    /// Postal address.
    #[serde(default, deserialize_with = "wire::text")]
    pub address: String,
    /// Company website.
    #[serde(default, deserialize_with = "wire::text")]
    pub website: String,
    /// Industry sector.
    #[serde(default, deserialize_with = "wire::text")]
    pub industry_type: String,
    /// Free-text description.
    #[serde(default, deserialize_with = "wire::text")]
    pub company_description: String,
    /// LinkedIn URL.
    #[serde(default, deserialize_with = "wire::text")]
    pub linkedin_url: String,
}

/// Account summary the backend embeds in employer listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerAccount {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    #[serde(default, deserialize_with = "wire::text")]
    pub name: String,
    /// Sign-in email.
    #[serde(default, deserialize_with = "wire::text")]
    pub email: String,
    /// Raw role string.
    #[serde(default, deserialize_with = "wire::text")]
    pub role: String,
    /// Creation time as sent by the backend.
    #[serde(default, deserialize_with = "wire::text")]
    pub created_at: String,
    /// Last update time as sent by the backend.
    #[serde(default, deserialize_with = "wire::text")]
    pub updated_at: String,
}

/// A stored employer profile, keyed by its owning account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employer {
    /// Owning account.
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Embedded account, present on admin listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<EmployerAccount>,
    /// Company fields.
    #[serde(flatten)]
    pub profile: EmployerProfile,
}

/// Body sent when creating an employer profile: the company fields plus the
/// owner taken from the bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEmployer<'a> {
    /// Owning account.
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Company fields.
    #[serde(flatten)]
    pub profile: &'a EmployerProfile,
}


#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn new_employer_carries_the_owner() {
        let profile = fixtures::profile("Acme");
        let body = NewEmployer {
            user_id: UserId::new(8),
            profile: &profile,
        };
        let value = serde_json::to_value(body).expect("serialise");
        assert_eq!(value["userId"], json!(8));
        assert_eq!(value["company_name"], json!("Acme"));
    }

    #[rstest]
    fn listings_decode_the_embedded_account() {
        let employer: Employer = serde_json::from_value(json!({
            "userId": 2,
            "user": {
                "id": 2,
                "name": "Grace",
                "email": "grace@example.com",
                "role": "employer",
                "createdAt": "2025-01-01T00:00:00Z",
                "updatedAt": "2025-01-02T00:00:00Z"
            },
            "company_name": "Acme",
            "contact_number": "1",
            "email": "hr@acme.test",
            "address": "x"
        }))
        .expect("decode");
        assert_eq!(employer.user.map(|account| account.name), Some("Grace".to_owned()));
        assert!(employer.profile.website.is_empty());
    }
}
