//! Account entities.

use serde::{Deserialize, Serialize};

/// Account tier as reported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountTier {
    Standard,
    Premium,
    Guest,
    /// Absent or not one of the known tiers
    #[default]
    #[serde(other)]
    Unknown,
}

impl AccountTier {
    pub fn is_premium(&self) -> bool {
        matches!(self, Self::Premium)
    }
}

/// Current usage statistics of an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountStats {
    pub file_count: u64,
    pub folder_count: u64,
    /// Storage used, in bytes
    pub storage: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_web_downloaded: Option<u64>,
}

/// A full account record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub email: String,
    pub tier: AccountTier,
    pub token: String,
    pub root_folder: String,
    pub stats_current: AccountStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// The id and token handed out at registration time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreatedAccount {
    pub id: String,
    pub token: String,
}

/// Every field any account payload may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversalAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<AccountTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_current: Option<AccountStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl UniversalAccount {
    pub fn into_account(self) -> Account {
        Account {
            id: self.id.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            tier: self.tier.unwrap_or_default(),
            token: self.token.unwrap_or_default(),
            root_folder: self.root_folder.unwrap_or_default(),
            stats_current: self.stats_current.unwrap_or_default(),
            icon: self.icon,
        }
    }

    pub fn into_created_account(self) -> CreatedAccount {
        CreatedAccount {
            id: self.id.unwrap_or_default(),
            token: self.token.unwrap_or_default(),
        }
    }

    pub fn into_account_id(self) -> String {
        self.id.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_account_projection() {
        let universal: UniversalAccount = serde_json::from_value(json!({
            "id": "acc-1",
            "email": "me@example.com",
            "tier": "premium",
            "token": "tok",
            "rootFolder": "root-1",
            "statsCurrent": {
                "fileCount": 4,
                "folderCount": 2,
                "storage": 1024,
                "trafficWebDownloaded": 77
            }
        }))
        .unwrap();

        let account = universal.into_account();
        assert_eq!(account.id, "acc-1");
        assert!(account.tier.is_premium());
        assert_eq!(account.root_folder, "root-1");
        assert_eq!(account.stats_current.file_count, 4);
        assert_eq!(account.stats_current.traffic_web_downloaded, Some(77));
        assert!(account.icon.is_none());
    }

    #[test]
    fn test_partial_stats_and_unknown_tier() {
        let universal: UniversalAccount = serde_json::from_value(json!({
            "id": "acc-2",
            "tier": "platinum",
            "statsCurrent": {"storage": 5}
        }))
        .unwrap();

        let account = universal.into_account();
        assert_eq!(account.tier, AccountTier::Unknown);
        assert_eq!(account.stats_current.storage, 5);
        assert_eq!(account.stats_current.file_count, 0);
        assert!(account.stats_current.traffic_web_downloaded.is_none());
    }

    #[test]
    fn test_created_account_projection() {
        let universal: UniversalAccount =
            serde_json::from_value(json!({"id": "g1", "token": "guest-token", "tier": "guest"}))
                .unwrap();
        let created = universal.into_created_account();
        assert_eq!(
            created,
            CreatedAccount {
                id: "g1".into(),
                token: "guest-token".into()
            }
        );
    }
}
