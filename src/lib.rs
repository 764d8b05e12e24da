/// Chat Organizer - Browser Extension for Filing Chat Conversations
/// Built with Rust + WASM + Yew

pub mod catalog;
pub mod chat_data;
pub mod chat_url;
pub mod config;
pub mod error;
pub mod matching;
pub mod operations;
pub mod page_context;
pub mod storage;
pub mod suggest;
pub mod text;
pub mod ui;

pub use catalog::{CATALOG, Category};
pub use chat_data::{Chat, ChatContext, Folder};
pub use error::StoreError;
pub use matching::matches;
pub use storage::FolderStore;
pub use suggest::suggest;
pub use text::normalize;

use wasm_bindgen::prelude::*;

use crate::page_context::{DomPageSource, NavigationTracker, PageEvent};

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Core matching functions for JavaScript callers; missing text counts as empty
#[wasm_bindgen]
pub fn matches_context(chat_title: Option<String>, folder_name: Option<String>, context: Option<String>) -> bool {
    matching::matches(
        chat_title.as_deref().unwrap_or_default(),
        folder_name.as_deref().unwrap_or_default(),
        context.as_deref(),
    )
}

#[wasm_bindgen]
pub fn suggest_folder_name(chat_title: Option<String>, context: Option<String>) -> Option<String> {
    suggest::suggest(chat_title.as_deref().unwrap_or_default(), context.as_deref())
}

#[wasm_bindgen]
pub fn is_chat_url(url: &str) -> bool {
    chat_url::is_chat_url(url)
}

/// Badge `{text, color}` for the background script
#[wasm_bindgen]
pub fn badge_for_url(url: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&chat_url::badge_for_url(url).style())
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize badge: {:?}", e)))
}

/// Content-script side: `{title, url, context}` of the current page
#[wasm_bindgen]
pub fn extract_chat_info() -> Result<JsValue, JsValue> {
    let source = DomPageSource::from_window().ok_or_else(|| JsValue::from_str("No document available"))?;
    let info = page_context::chat_info(&source);
    log::debug!("Extracted chat info for {}", info.url);

    serde_wasm_bindgen::to_value(&info)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize chat info: {:?}", e)))
}

/// Watches a chat page for load and client-side navigation
#[wasm_bindgen]
pub struct PageWatcher {
    tracker: NavigationTracker,
}

#[wasm_bindgen]
impl PageWatcher {
    #[wasm_bindgen(constructor)]
    pub fn new(url: String) -> PageWatcher {
        PageWatcher {
            tracker: NavigationTracker::new(url),
        }
    }

    /// Url to announce once the page has loaded
    pub fn ready(&self) -> String {
        self.tracker.ready().url().to_string()
    }

    /// Returns the new url when navigation happened, otherwise undefined
    pub fn observe(&mut self, url: &str) -> Option<String> {
        self.tracker
            .observe(url)
            .map(|event| match event {
                PageEvent::Navigated(url) | PageEvent::Ready(url) => url,
            })
    }
}
