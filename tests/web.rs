//! Browser tests for page reading. Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use chat_organizer::page_context::{DomPageSource, PageSource, chat_info};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn page_with(body: &str) -> DomPageSource {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(body);
    DomPageSource::new(document, "https://chatgpt.com/c/abc123".to_string())
}

#[wasm_bindgen_test]
fn test_dom_first_and_all_texts() {
    let page = page_with(
        r#"<div class="message">first message text</div><div class="message">second</div>"#,
    );

    assert_eq!(page.first_text(".message"), Some("first message text".to_string()));
    assert_eq!(page.all_texts(".message").len(), 2);
    assert!(page.all_texts(".missing").is_empty());
}

#[wasm_bindgen_test]
fn test_dom_chat_info() {
    let page = page_with(
        r#"<h1>Sourdough starter tips</h1>
           <div data-message-author-role="user">How long should I proof sourdough overnight?</div>
           <div data-message-author-role="user">And what hydration works best for rye flour?</div>"#,
    );

    let info = chat_info(&page);

    assert_eq!(info.title, "Sourdough starter tips");
    assert_eq!(info.url, "https://chatgpt.com/c/abc123");
    assert!(info.context.starts_with("How long should I proof sourdough overnight?"));
    assert!(info.context.ends_with("..."));
}
