/// Folder workflows: create with auto-add, guarded add, search filtering

use crate::chat_data::{Chat, ChatContext};
use crate::config::UNTITLED_CHAT;
use crate::error::{Result, StoreError};
use crate::matching::matches;
use crate::storage::FolderStore;

/// What happened when a folder was created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created { name: String },
    /// The open chat matched the new folder and was filed into it
    CreatedWithChat { name: String },
}

impl CreateOutcome {
    pub fn name(&self) -> &str {
        match self {
            CreateOutcome::Created { name } | CreateOutcome::CreatedWithChat { name } => name,
        }
    }
}

/// Create a folder, filing the open chat into it when it matches the name.
///
/// `current` is the chat page open in the active tab, if any.
pub fn create_folder(
    store: &mut FolderStore,
    name: &str,
    current: Option<&ChatContext>,
    now: &str,
) -> Result<CreateOutcome> {
    let name = name.trim();
    store.create(name, now)?;

    let Some(ctx) = current else {
        return Ok(CreateOutcome::Created { name: name.to_string() });
    };

    if !matches(&ctx.title, name, ctx.snippet()) || store.contains_chat(name, &ctx.url) {
        return Ok(CreateOutcome::Created { name: name.to_string() });
    }

    store.add_chat(name, Chat::new(ctx.title.clone(), ctx.url.clone(), now))?;
    log::info!("Auto-added {:?} to new folder {:?}", ctx.url, name);
    Ok(CreateOutcome::CreatedWithChat { name: name.to_string() })
}

/// A chat the user asked to file
#[derive(Debug, Clone, Copy)]
pub struct NewChat<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub context: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The chat does not look like it belongs; nothing was changed
    NeedsConfirmation,
}

/// Add a chat to a folder.
///
/// A blank title becomes "Untitled Chat". Urls already in the folder are
/// rejected. Unless `force` is set, a chat that does not match the folder
/// is held back for confirmation.
pub fn add_chat(
    store: &mut FolderStore,
    folder_name: &str,
    chat: NewChat<'_>,
    now: &str,
    force: bool,
) -> Result<AddOutcome> {
    if store.get(folder_name).is_none() {
        return Err(StoreError::FolderNotFound(folder_name.to_string()));
    }

    let title = match chat.title.trim() {
        "" => UNTITLED_CHAT,
        title => title,
    };

    if store.contains_chat(folder_name, chat.url) {
        log::warn!("{:?} is already in folder {:?}", chat.url, folder_name);
        return Err(StoreError::DuplicateChat(folder_name.to_string()));
    }

    if !force && !matches(title, folder_name, chat.context) {
        log::debug!("{:?} does not match folder {:?}", title, folder_name);
        return Ok(AddOutcome::NeedsConfirmation);
    }

    store.add_chat(folder_name, Chat::new(title, chat.url, now))?;
    Ok(AddOutcome::Added)
}

/// Folders the chat appears to belong to, in store order
pub fn matching_folders(store: &FolderStore, ctx: &ChatContext) -> Vec<String> {
    store
        .names()
        .filter(|name| matches(&ctx.title, name, ctx.snippet()))
        .map(str::to_string)
        .collect()
}

/// How a folder renders under the current search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderView {
    pub name: String,
    pub visible: bool,
    pub expanded: bool,
    /// Indices of chats to show
    pub visible_chats: Vec<usize>,
}

/// Apply a search query to every folder.
///
/// Filter logic:
/// - Empty query → everything visible
/// - Folder visible when its name or any chat title contains the query
/// - Chats visible when their title contains the query
/// - Expanded when it holds `current_url`, or when only its chats matched
pub fn filter_folders(store: &FolderStore, query: &str, current_url: Option<&str>) -> Vec<FolderView> {
    let query_lower = query.to_lowercase();

    store
        .list()
        .iter()
        .map(|folder| {
            let name_matches = folder.name.to_lowercase().contains(&query_lower);
            let visible_chats: Vec<usize> = folder
                .chats
                .iter()
                .enumerate()
                .filter(|(_, chat)| chat.title.to_lowercase().contains(&query_lower))
                .map(|(index, _)| index)
                .collect();
            let has_visible_chats = !visible_chats.is_empty();
            let holds_current = current_url.is_some_and(|url| folder.contains_url(url));

            FolderView {
                name: folder.name.clone(),
                visible: query.is_empty() || name_matches || has_visible_chats,
                expanded: holds_current || (!query.is_empty() && has_visible_chats && !name_matches),
                visible_chats,
            }
        })
        .collect()
}

/// "1 chat", "3 chats"
pub fn chat_count_label(count: usize) -> String {
    if count == 1 {
        "1 chat".to_string()
    } else {
        format!("{} chats", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: &str = "2024-10-28T10:30:00.000Z";
    const PASTA_URL: &str = "https://chatgpt.com/c/pasta";

    fn pasta_context() -> ChatContext {
        ChatContext {
            title: "Best pasta recipes for dinner".to_string(),
            url: PASTA_URL.to_string(),
            context: "How long should I boil fresh tagliatelle?".to_string(),
        }
    }

    fn create_test_store() -> FolderStore {
        let mut store = FolderStore::new();
        store.create("Cooking", NOW).unwrap();
        store.create("Science", NOW).unwrap();
        store
            .add_chat("Cooking", Chat::new("Bread baking", "https://chatgpt.com/c/bread", NOW))
            .unwrap();
        store
            .add_chat("Cooking", Chat::new("Knife skills", "https://chatgpt.com/c/knife", NOW))
            .unwrap();
        store
            .add_chat("Science", Chat::new("Quantum physics", "https://chatgpt.com/c/qp", NOW))
            .unwrap();
        store
    }

    #[test]
    fn test_create_folder_auto_adds_matching_chat() {
        let mut store = FolderStore::new();

        let outcome = create_folder(&mut store, "  Cooking ", Some(&pasta_context()), NOW).unwrap();

        assert_eq!(outcome, CreateOutcome::CreatedWithChat { name: "Cooking".to_string() });
        let folder = store.get("Cooking").unwrap();
        assert_eq!(folder.chats.len(), 1);
        assert_eq!(folder.chats[0].url, PASTA_URL);
        assert_eq!(folder.chats[0].added_at, NOW);
    }

    #[test]
    fn test_create_folder_skips_unrelated_chat() {
        let mut store = FolderStore::new();

        let outcome = create_folder(&mut store, "Garden", Some(&pasta_context()), NOW).unwrap();

        assert_eq!(outcome, CreateOutcome::Created { name: "Garden".to_string() });
        assert!(store.get("Garden").unwrap().chats.is_empty());
    }

    #[test]
    fn test_create_folder_without_current_chat() {
        let mut store = FolderStore::new();
        let outcome = create_folder(&mut store, "Cooking", None, NOW).unwrap();
        assert_eq!(outcome.name(), "Cooking");
        assert_eq!(store.total_chats(), 0);
    }

    #[test]
    fn test_create_folder_rejections() {
        let mut store = create_test_store();
        let before = store.clone();

        assert_eq!(
            create_folder(&mut store, "Cooking", Some(&pasta_context()), NOW).unwrap_err(),
            StoreError::DuplicateFolder("Cooking".to_string())
        );
        assert_eq!(create_folder(&mut store, "   ", None, NOW).unwrap_err(), StoreError::EmptyName);
        assert_eq!(store, before);
    }

    #[test]
    fn test_add_chat_matching() {
        let mut store = create_test_store();
        let chat = NewChat { title: "Pasta recipes", url: PASTA_URL, context: None };

        let outcome = add_chat(&mut store, "Cooking", chat, NOW, false).unwrap();

        assert_eq!(outcome, AddOutcome::Added);
        assert!(store.contains_chat("Cooking", PASTA_URL));
    }

    #[test]
    fn test_add_chat_needs_confirmation_then_force() {
        let mut store = create_test_store();
        let chat = NewChat { title: "Pasta recipes", url: PASTA_URL, context: None };

        let outcome = add_chat(&mut store, "Science", chat, NOW, false).unwrap();
        assert_eq!(outcome, AddOutcome::NeedsConfirmation);
        assert!(!store.contains_chat("Science", PASTA_URL));

        let outcome = add_chat(&mut store, "Science", chat, NOW, true).unwrap();
        assert_eq!(outcome, AddOutcome::Added);
        assert!(store.contains_chat("Science", PASTA_URL));
    }

    #[test]
    fn test_add_chat_context_rescues_vague_title() {
        let mut store = create_test_store();
        let chat = NewChat {
            title: "Quick question",
            url: PASTA_URL,
            context: Some("what spice goes with lamb"),
        };

        assert_eq!(add_chat(&mut store, "Cooking", chat, NOW, false).unwrap(), AddOutcome::Added);
    }

    #[test]
    fn test_add_chat_blank_title() {
        let mut store = create_test_store();
        let chat = NewChat { title: "   ", url: PASTA_URL, context: None };

        add_chat(&mut store, "Cooking", chat, NOW, true).unwrap();

        let folder = store.get("Cooking").unwrap();
        assert_eq!(folder.chats.last().unwrap().title, "Untitled Chat");
    }

    #[test]
    fn test_add_chat_duplicate_url() {
        let mut store = create_test_store();
        let before = store.clone();
        let chat = NewChat { title: "Bread again", url: "https://chatgpt.com/c/bread", context: None };

        let err = add_chat(&mut store, "Cooking", chat, NOW, true).unwrap_err();

        assert_eq!(err, StoreError::DuplicateChat("Cooking".to_string()));
        assert_eq!(store, before);
    }

    #[test]
    fn test_add_chat_missing_folder() {
        let mut store = create_test_store();
        let chat = NewChat { title: "Rome", url: "u", context: None };

        let err = add_chat(&mut store, "Travel", chat, NOW, true).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_matching_folders() {
        let store = create_test_store();
        assert_eq!(matching_folders(&store, &pasta_context()), vec!["Cooking"]);

        let physics = ChatContext {
            title: "discussing quantum physics".to_string(),
            url: "u".to_string(),
            context: String::new(),
        };
        assert_eq!(matching_folders(&store, &physics), vec!["Science"]);
    }

    #[test]
    fn test_filter_empty_query_shows_all() {
        let store = create_test_store();

        let views = filter_folders(&store, "", None);

        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.visible && !v.expanded));
        assert_eq!(views[0].visible_chats, vec![0, 1]);
    }

    #[test]
    fn test_filter_by_folder_name() {
        let store = create_test_store();

        let views = filter_folders(&store, "COOK", None);

        assert!(views[0].visible);
        assert!(!views[0].expanded);
        assert!(views[0].visible_chats.is_empty());
        assert!(!views[1].visible);
    }

    #[test]
    fn test_filter_by_chat_title_expands() {
        let store = create_test_store();

        let views = filter_folders(&store, "knife", None);

        assert!(views[0].visible);
        assert!(views[0].expanded);
        assert_eq!(views[0].visible_chats, vec![1]);
        assert!(!views[1].visible);
    }

    #[test]
    fn test_filter_expands_folder_with_current_chat() {
        let store = create_test_store();

        let views = filter_folders(&store, "", Some("https://chatgpt.com/c/qp"));

        assert!(!views[0].expanded);
        assert!(views[1].expanded);
    }

    #[test]
    fn test_chat_count_label() {
        assert_eq!(chat_count_label(0), "0 chats");
        assert_eq!(chat_count_label(1), "1 chat");
        assert_eq!(chat_count_label(7), "7 chats");
    }
}
