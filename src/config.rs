/// Extension configuration and shared defaults
use serde::{Deserialize, Serialize};

/// chrome.storage.local key holding the folder map
pub const FOLDERS_STORAGE_KEY: &str = "chatFolders";

/// chrome.storage.local key holding an optional configuration override
pub const CONFIG_STORAGE_KEY: &str = "chatOrganizerConfig";

/// Hosts serving chat conversation pages
pub const CHAT_HOSTS: &[&str] = &["chatgpt.com", "chat.openai.com"];

/// How long a popup notification stays visible
pub const NOTIFICATION_MS: u32 = 3000;

/// Title used when the user leaves the chat title blank
pub const UNTITLED_CHAT: &str = "Untitled Chat";

/// Title used when nothing meaningful can be read from the page
pub const FALLBACK_CHAT_TITLE: &str = "ChatGPT Conversation";

/// Runtime settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganizerConfig {
    pub folders_key: String,
    pub chat_hosts: Vec<String>,
    pub notification_ms: u32,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        OrganizerConfig {
            folders_key: FOLDERS_STORAGE_KEY.to_string(),
            chat_hosts: CHAT_HOSTS.iter().map(|h| h.to_string()).collect(),
            notification_ms: NOTIFICATION_MS,
        }
    }
}

impl OrganizerConfig {
    /// Parse a stored override, falling back to defaults on anything unreadable
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Ignoring invalid configuration: {}", e);
            OrganizerConfig::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OrganizerConfig::default();
        assert_eq!(config.folders_key, "chatFolders");
        assert_eq!(config.chat_hosts, vec!["chatgpt.com", "chat.openai.com"]);
        assert_eq!(config.notification_ms, 3000);
    }

    #[test]
    fn test_partial_override() {
        let config = OrganizerConfig::from_json(r#"{"notificationMs": 5000}"#);
        assert_eq!(config.notification_ms, 5000);
        assert_eq!(config.folders_key, FOLDERS_STORAGE_KEY);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        assert_eq!(OrganizerConfig::from_json("not json"), OrganizerConfig::default());
    }
}
