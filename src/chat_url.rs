/// Chat page URL recognition and toolbar badge state
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

use crate::config::CHAT_HOSTS;

static CHAT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/c/([^/?]+)").expect("chat id pattern is valid"));

/// Characters of the chat id shown in the popup
const SHORT_ID_CHARS: usize = 8;

/// Check whether `url` is a conversation page on one of the default chat hosts
///
/// Examples:
/// - https://chatgpt.com/c/67a1b2c3 → true
/// - https://chat.openai.com/c/abc?model=x → true
/// - https://chatgpt.com/ → false
pub fn is_chat_url(url: &str) -> bool {
    is_chat_url_with(url, CHAT_HOSTS)
}

/// Same as [`is_chat_url`] with an explicit host list
pub fn is_chat_url_with<H: AsRef<str>>(url: &str, hosts: &[H]) -> bool {
    match Url::parse(url.trim()) {
        Ok(parsed) => {
            let Some(host) = parsed.host_str() else {
                return false;
            };
            let host = host.strip_prefix("www.").unwrap_or(host);
            hosts.iter().any(|h| h.as_ref() == host) && parsed.path().starts_with("/c/")
        }
        // Not a full URL, fall back to plain substring checks
        Err(_) => hosts
            .iter()
            .any(|h| url.contains(&format!("{}/c/", h.as_ref()))),
    }
}

/// Short chat id for display, e.g. "67a1b2c3..."; "Unknown" when absent
pub fn extract_chat_id(url: &str) -> String {
    CHAT_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| format!("{}...", id.as_str().chars().take(SHORT_ID_CHARS).collect::<String>()))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Toolbar badge for a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Active,
    Cleared,
}

/// What the background script hands to chrome.action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeStyle {
    pub text: &'static str,
    pub color: Option<&'static str>,
}

impl Badge {
    pub fn style(self) -> BadgeStyle {
        match self {
            Badge::Active => BadgeStyle {
                text: "●",
                color: Some("#10b981"),
            },
            Badge::Cleared => BadgeStyle { text: "", color: None },
        }
    }
}

pub fn badge_for_url(url: &str) -> Badge {
    if is_chat_url(url) {
        Badge::Active
    } else {
        Badge::Cleared
    }
}
