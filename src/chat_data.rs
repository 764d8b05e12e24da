/// Data structures for Chat Organizer
use serde::{Deserialize, Serialize};

/// A saved conversation reference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub added_at: String,
}

impl Chat {
    pub fn new(title: impl Into<String>, url: impl Into<String>, added_at: impl Into<String>) -> Chat {
        Chat {
            title: title.into(),
            url: url.into(),
            added_at: added_at.into(),
        }
    }
}

/// A user-named folder of chats
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub chats: Vec<Chat>,
    #[serde(default)]
    pub created_at: String,
}

impl Folder {
    pub fn new(name: impl Into<String>, created_at: impl Into<String>) -> Folder {
        Folder {
            name: name.into(),
            chats: Vec::new(),
            created_at: created_at.into(),
        }
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.chats.iter().any(|chat| chat.url == url)
    }
}

/// Title, url and a short text snippet read from an open chat page.
/// Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChatContext {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub context: String,
}

impl ChatContext {
    /// Context snippet, or `None` when empty
    pub fn snippet(&self) -> Option<&str> {
        Some(self.context.as_str()).filter(|c| !c.is_empty())
    }
}
