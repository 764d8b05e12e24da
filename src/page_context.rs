/// Reading a chat title and context snippet from a conversation page
use web_sys::Document;

use crate::chat_data::ChatContext;
use crate::config::FALLBACK_CHAT_TITLE;

/// Selectors tried in order for the conversation title
const TITLE_SELECTORS: &[&str] = &[
    "h1",
    "[data-testid*=\"conversation-title\"]",
    "[class*=\"title\"]",
    "[class*=\"heading\"]",
    "title",
];

/// Selectors tried for a user message when no title is usable
const MESSAGE_TITLE_SELECTORS: &[&str] = &[
    "[data-message-author-role=\"user\"]",
    "[class*=\"user\"]",
    "[class*=\"message\"]",
];

/// Selectors tried in order for the context snippet
const CONTEXT_SELECTORS: &[&str] = &[
    "[data-message-author-role=\"user\"]",
    "[class*=\"message\"]",
    "[class*=\"conversation\"]",
    "[role=\"presentation\"]",
    "main",
];

const MESSAGE_TITLE_MAX_CHARS: usize = 80;
const CONTEXT_MAX_CHARS: usize = 200;
const CONTEXT_MESSAGES: usize = 3;

/// Read access to a rendered page
pub trait PageSource {
    /// Text of the first element matching `selector`
    fn first_text(&self, selector: &str) -> Option<String>;
    /// Text of every element matching `selector`, in document order
    fn all_texts(&self, selector: &str) -> Vec<String>;
    fn href(&self) -> String;
}

/// [`PageSource`] backed by the live DOM
pub struct DomPageSource {
    document: Document,
    href: String,
}

impl DomPageSource {
    pub fn new(document: Document, href: String) -> Self {
        DomPageSource { document, href }
    }

    /// The page this script runs in, if there is one
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let href = window.location().href().ok()?;
        Some(DomPageSource::new(document, href))
    }
}

impl PageSource for DomPageSource {
    fn first_text(&self, selector: &str) -> Option<String> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|element| element.text_content())
    }

    fn all_texts(&self, selector: &str) -> Vec<String> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .map(|node| node.text_content().unwrap_or_default())
            .collect()
    }

    fn href(&self) -> String {
        self.href.clone()
    }
}

/// Best-effort conversation title
pub fn chat_title(source: &dyn PageSource) -> String {
    for selector in TITLE_SELECTORS {
        let Some(text) = source.first_text(selector) else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }
        let title = clean_title(&text);
        if !title.is_empty() && title != "New chat" {
            return title;
        }
    }

    for selector in MESSAGE_TITLE_SELECTORS {
        let Some(text) = source.first_text(selector) else {
            continue;
        };
        let text = text.trim();
        let len = text.chars().count();
        if len > 10 && len < 100 {
            return truncate(text, MESSAGE_TITLE_MAX_CHARS, len > MESSAGE_TITLE_MAX_CHARS);
        }
    }

    FALLBACK_CHAT_TITLE.to_string()
}

/// Short snippet of the first messages, or the title when the page has none
pub fn conversation_context(source: &dyn PageSource) -> String {
    for selector in CONTEXT_SELECTORS {
        let messages = source
            .all_texts(selector)
            .iter()
            .take(CONTEXT_MESSAGES)
            .map(|text| text.trim())
            .filter(|text| text.chars().count() > 10)
            .collect::<Vec<_>>()
            .join(" ");

        if messages.chars().count() > 50 {
            return truncate(&messages, CONTEXT_MAX_CHARS, true);
        }
    }

    chat_title(source)
}

pub fn chat_info(source: &dyn PageSource) -> ChatContext {
    ChatContext {
        title: chat_title(source),
        url: source.href(),
        context: conversation_context(source),
    }
}

/// Strip the site name from a page title
fn clean_title(text: &str) -> String {
    text.trim()
        .replacen(" - ChatGPT", "", 1)
        .replacen("ChatGPT", "", 1)
        .trim()
        .to_string()
}

fn truncate(text: &str, max_chars: usize, ellipsis: bool) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if ellipsis {
        out.push_str("...");
    }
    out
}

/// Page lifecycle notifications sent from a chat page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The page finished loading
    Ready(String),
    /// Client-side navigation moved to another conversation
    Navigated(String),
}

impl PageEvent {
    pub fn url(&self) -> &str {
        match self {
            PageEvent::Ready(url) | PageEvent::Navigated(url) => url,
        }
    }
}

/// Turns a stream of observed URLs into page events
#[derive(Debug, Clone)]
pub struct NavigationTracker {
    last_url: String,
}

impl NavigationTracker {
    pub fn new(url: impl Into<String>) -> Self {
        NavigationTracker { last_url: url.into() }
    }

    pub fn ready(&self) -> PageEvent {
        PageEvent::Ready(self.last_url.clone())
    }

    /// `Some` only when `url` differs from the last one seen
    pub fn observe(&mut self, url: &str) -> Option<PageEvent> {
        if url == self.last_url {
            return None;
        }
        self.last_url = url.to_string();
        Some(PageEvent::Navigated(self.last_url.clone()))
    }
}
