//! Account listing records shown on the admin user-management view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{UserId, wire};

/// One row of the admin user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListItem {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    #[serde(default, deserialize_with = "wire::text")]
    pub name: String,
    /// Sign-in email.
    #[serde(default, deserialize_with = "wire::text")]
    pub email: String,
    /// Raw role string as stored by the backend.
    #[serde(default, deserialize_with = "wire::text")]
    pub role: String,
    /// Account creation time exactly as the backend sent it.
    #[serde(default, deserialize_with = "wire::text")]
    pub created_at: String,
}

impl UserListItem {
    /// Creation time, when `created_at` is an RFC 3339 timestamp.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.created_at.trim())
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }

    /// Creation date for display: `YYYY-MM-DD` when parseable, otherwise
    /// the raw value.
    pub fn joined_on(&self) -> String {
        self.created().map_or_else(
            || self.created_at.clone(),
            |at| at.format("%Y-%m-%d").to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn decodes_backend_rows() {
        let row: UserListItem = serde_json::from_value(json!({
            "id": 3,
            "name": "Ada",
            "email": "ada@example.com",
            "role": "candidate",
            "createdAt": "2025-02-01T09:30:00.000Z"
        }))
        .expect("row decodes");
        assert_eq!(row.id, UserId::new(3));
        assert_eq!(
            row.created().map(|at| at.to_rfc3339()),
            Some("2025-02-01T09:30:00+00:00".to_owned())
        );
        assert_eq!(row.joined_on(), "2025-02-01");
    }

    #[rstest]
    fn odd_rows_keep_the_user_list_readable() {
        let rows: Vec<UserListItem> = serde_json::from_value(json!([
            { "id": 1, "name": "Ada", "email": "ada@example.com", "role": "admin",
              "createdAt": "2025-02-01T09:30:00Z" },
            { "id": 2, "name": null, "email": "grace@example.com", "role": "employer",
              "createdAt": "01/02/2025" },
            { "id": 3, "email": "linus@example.com", "role": "candidate" }
        ]))
        .expect("every row decodes");

        let joined: Vec<_> = rows.iter().map(UserListItem::joined_on).collect();
        assert_eq!(joined, vec!["2025-02-01", "01/02/2025", ""]);
        assert!(rows.get(1).is_some_and(|row| row.name.is_empty() && row.created().is_none()));
    }
}
