use serde::{Deserialize, Serialize};

/// A Sleeper account as returned by `/user/{username}` and
/// `/league/{league_id}/users`. Every field except `user_id` can be
/// missing in old payloads, so everything else defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct User {
    #[serde(rename = "user_id")]
    pub user_id: String,
    #[serde(rename = "display_name", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    /// Display name with a stable fallback for accounts that never set one.
    pub fn display_name_or_unknown(&self) -> &str {
        self.display_name.as_deref().unwrap_or("Unknown")
    }
}
