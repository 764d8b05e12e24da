/// Popup UI for Chat Organizer extension

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use patternfly_yew::prelude::*;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::chat_data::ChatContext;
use crate::chat_url::is_chat_url_with;
use crate::config::{CONFIG_STORAGE_KEY, OrganizerConfig};
use crate::error::StoreError;
use crate::operations::{AddOutcome, CreateOutcome, NewChat, add_chat, create_folder, filter_folders, matching_folders};
use crate::storage::FolderStore;
use crate::suggest::suggest;
use crate::ui::components::{CurrentChatBanner, FolderCard, FolderOptions, Notice, NoticeKind, NoticeView};

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getChatInfo(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn openTab(url: &str) -> Result<(), JsValue>;
}

#[derive(Clone, PartialEq)]
enum AppState {
    Loading,
    Idle,
    Error(String),
}

#[derive(Clone, PartialEq)]
enum OpenModal {
    None,
    CreateFolder,
    AddChat,
}

/// Active tab as reported by chrome.tabs.query
#[derive(Deserialize)]
struct TabRef {
    id: Option<i32>,
    url: Option<String>,
}

/// The chat page open in the active tab
#[derive(Clone, PartialEq)]
struct CurrentChat {
    url: String,
    info: Option<ChatContext>,
}

impl CurrentChat {
    /// Page info keyed by the tab's url
    fn context(&self) -> Option<ChatContext> {
        self.info.clone().map(|info| ChatContext {
            url: self.url.clone(),
            ..info
        })
    }
}

/// Shows a notice and clears it after the configured delay
#[derive(Clone)]
struct Notifier {
    notice: UseStateHandle<Option<Notice>>,
    seq: Rc<RefCell<u32>>,
    ms: u32,
}

impl Notifier {
    fn show(&self, kind: NoticeKind, message: impl Into<String>) {
        let id = {
            let mut seq = self.seq.borrow_mut();
            *seq += 1;
            *seq
        };
        self.notice.set(Some(Notice {
            id,
            kind,
            message: message.into(),
        }));

        let notice = self.notice.clone();
        let seq = self.seq.clone();
        let ms = self.ms;
        spawn_local(async move {
            sleep(ms).await;
            // a newer notice owns the slot now
            if *seq.borrow() == id {
                notice.set(None);
            }
        });
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading);
    let config = use_state(OrganizerConfig::default);
    let store = use_state(FolderStore::new);
    let current = use_state(|| None::<CurrentChat>);
    let search_query = use_state(String::new);
    let toggled = use_state(HashSet::<String>::new);
    let open_modal = use_state(|| OpenModal::None);
    let folder_input = use_state(String::new);
    let title_input = use_state(String::new);
    let selected_folder = use_state(|| None::<String>);
    let notice = use_state(|| None::<Notice>);
    let notice_seq = use_mut_ref(|| 0u32);

    let notifier = Notifier {
        notice: notice.clone(),
        seq: notice_seq.clone(),
        ms: config.notification_ms,
    };

    // Load configuration, folders and the active chat on mount
    {
        let state = state.clone();
        let config = config.clone();
        let store = store.clone();
        let current = current.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let loaded_config = load_config().await;

                match load_store(&loaded_config.folders_key).await {
                    Ok(data) => {
                        store.set(data);
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        log::error!("{}", e);
                        state.set(AppState::Error(format!("Failed to load: {}", e)));
                    }
                }

                match detect_current_chat(&loaded_config.chat_hosts).await {
                    Ok(chat) => current.set(chat),
                    Err(e) => log::error!("Error checking current tab: {}", e),
                }

                config.set(loaded_config);
            });
            || ()
        });
    }

    // Search handler
    let on_search_input = {
        let search_query = search_query.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                search_query.set(input.value());
            }
        })
    };

    let on_folder_input = {
        let folder_input = folder_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                folder_input.set(input.value());
            }
        })
    };

    let on_title_input = {
        let title_input = title_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                title_input.set(input.value());
            }
        })
    };

    let close_modal = {
        let open_modal = open_modal.clone();
        let folder_input = folder_input.clone();
        let title_input = title_input.clone();
        let selected_folder = selected_folder.clone();

        Callback::from(move |_: ()| {
            open_modal.set(OpenModal::None);
            folder_input.set(String::new());
            title_input.set(String::new());
            selected_folder.set(None);
        })
    };

    // Open the create dialog, prefilled with a suggested name
    let on_show_create = {
        let open_modal = open_modal.clone();
        let folder_input = folder_input.clone();
        let current = current.clone();

        Callback::from(move |_: MouseEvent| {
            let suggestion = (*current)
                .as_ref()
                .and_then(|chat| chat.info.as_ref())
                .and_then(|info| suggest(&info.title, info.snippet()));
            folder_input.set(suggestion.unwrap_or_default());
            open_modal.set(OpenModal::CreateFolder);
        })
    };

    let on_show_add = {
        let open_modal = open_modal.clone();
        let current = current.clone();
        let title_input = title_input.clone();
        let notifier = notifier.clone();

        Callback::from(move |_: MouseEvent| match &*current {
            Some(chat) => {
                let title = chat.info.as_ref().map(|info| info.title.clone()).unwrap_or_default();
                title_input.set(title);
                open_modal.set(OpenModal::AddChat);
            }
            None => notifier.show(NoticeKind::Warning, "No ChatGPT chat detected on current tab"),
        })
    };

    // Create folder, auto-filing the current chat when it matches
    let on_create = {
        let store = store.clone();
        let config = config.clone();
        let current = current.clone();
        let folder_input = folder_input.clone();
        let close_modal = close_modal.clone();
        let notifier = notifier.clone();

        Callback::from(move |_: ()| {
            let mut next = (*store).clone();
            let ctx = (*current).as_ref().and_then(CurrentChat::context);

            match create_folder(&mut next, folder_input.as_str(), ctx.as_ref(), &now_iso()) {
                Ok(outcome) => {
                    let message = match &outcome {
                        CreateOutcome::Created { name } => format!("Folder \"{}\" created", name),
                        CreateOutcome::CreatedWithChat { name } => {
                            format!("✅ Folder \"{}\" created and current chat automatically added!", name)
                        }
                    };
                    commit(&store, next, config.folders_key.clone(), notifier.clone());
                    notifier.show(NoticeKind::Success, message);
                    close_modal.emit(());
                }
                Err(e) => notifier.show(NoticeKind::Error, e.to_string()),
            }
        })
    };

    let on_folder_keypress = {
        let on_create = on_create.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                on_create.emit(());
            }
        })
    };

    // Add the current chat to the selected folder
    let on_add = {
        let store = store.clone();
        let config = config.clone();
        let current = current.clone();
        let title_input = title_input.clone();
        let selected_folder = selected_folder.clone();
        let close_modal = close_modal.clone();
        let notifier = notifier.clone();

        Callback::from(move |_: ()| {
            let Some(chat) = (*current).clone() else {
                notifier.show(NoticeKind::Warning, "No ChatGPT chat detected on current tab");
                return;
            };
            let Some(folder_name) = (*selected_folder).clone() else {
                notifier.show(NoticeKind::Error, "Please select a folder");
                return;
            };

            let context = chat.info.as_ref().and_then(|info| info.snippet()).map(str::to_string);
            let new_chat = NewChat {
                title: title_input.as_str(),
                url: &chat.url,
                context: context.as_deref(),
            };
            let now = now_iso();
            let mut next = (*store).clone();

            let result = match add_chat(&mut next, &folder_name, new_chat, &now, false) {
                Ok(AddOutcome::NeedsConfirmation) => {
                    let question = format!(
                        "The chat content doesn't seem to match the \"{}\" folder. Add anyway?",
                        folder_name
                    );
                    if !confirm(&question) {
                        return;
                    }
                    add_chat(&mut next, &folder_name, new_chat, &now, true)
                }
                other => other,
            };

            match result {
                Ok(_) => {
                    commit(&store, next, config.folders_key.clone(), notifier.clone());
                    notifier.show(NoticeKind::Success, format!("Chat added to \"{}\"", folder_name));
                    close_modal.emit(());
                }
                Err(StoreError::DuplicateChat(_)) => {
                    notifier.show(NoticeKind::Warning, "This chat is already in the folder")
                }
                Err(e) => notifier.show(NoticeKind::Error, e.to_string()),
            }
        })
    };

    let on_select_folder = {
        let selected_folder = selected_folder.clone();
        Callback::from(move |name: String| selected_folder.set(Some(name)))
    };

    let on_toggle_folder = {
        let toggled = toggled.clone();
        Callback::from(move |name: String| {
            let mut next = (*toggled).clone();
            if !next.remove(&name) {
                next.insert(name);
            }
            toggled.set(next);
        })
    };

    // Delete folder handler
    let on_delete_folder = {
        let store = store.clone();
        let config = config.clone();
        let notifier = notifier.clone();

        Callback::from(move |name: String| {
            let question = format!("Are you sure you want to delete the \"{}\" folder and all its chats?", name);
            if !confirm(&question) {
                return;
            }

            let mut next = (*store).clone();
            match next.delete(&name) {
                Ok(_) => {
                    commit(&store, next, config.folders_key.clone(), notifier.clone());
                    notifier.show(NoticeKind::Success, format!("Folder \"{}\" deleted", name));
                }
                Err(e) => log::debug!("Ignoring stale delete: {}", e),
            }
        })
    };

    // Remove chat handler
    let on_remove_chat = {
        let store = store.clone();
        let config = config.clone();
        let notifier = notifier.clone();

        Callback::from(move |(folder_name, index): (String, usize)| {
            if !confirm("Are you sure you want to remove this chat from the folder?") {
                return;
            }

            let mut next = (*store).clone();
            match next.remove_chat(&folder_name, index) {
                Ok(_) => {
                    commit(&store, next, config.folders_key.clone(), notifier.clone());
                    notifier.show(NoticeKind::Success, "Chat removed from folder");
                }
                Err(e) => log::debug!("Ignoring stale remove: {}", e),
            }
        })
    };

    let on_open_chat = {
        let notifier = notifier.clone();
        Callback::from(move |url: String| {
            let notifier = notifier.clone();
            spawn_local(async move {
                if let Err(e) = openTab(&url).await {
                    log::error!("Error opening chat: {:?}", e);
                    notifier.show(NoticeKind::Error, "Failed to open chat");
                }
            });
        })
    };

    let current_url = (*current).as_ref().map(|chat| chat.url.clone());
    let matching = (*current)
        .as_ref()
        .and_then(CurrentChat::context)
        .map(|ctx| matching_folders(&store, &ctx))
        .unwrap_or_default();
    let views = filter_folders(&store, &search_query, current_url.as_deref());
    let folder_names: Vec<String> = store.names().map(str::to_string).collect();

    html! {
        <div class="padding-20">
            <div class="header">
                <h1 class="popup-title">{"Chat Organizer"}</h1>
                <div class="header-actions">
                    <Button onclick={on_show_create} variant={ButtonVariant::Primary}>
                        {"📁 New Folder"}
                    </Button>
                    <Button onclick={on_show_add} variant={ButtonVariant::Secondary}>
                        {"➕ Add Chat"}
                    </Button>
                </div>
            </div>

            if let Some(n) = (*notice).clone() {
                <NoticeView notice={n} />
            }

            if let Some(url) = current_url.clone() {
                <CurrentChatBanner url={url} matching={matching} />
            }

            // Status display
            {match &*state {
                AppState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading folders..."}</p>
                    </div>
                },
                AppState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                AppState::Idle => html! {}
            }}

            // Search bar
            <div class="search-container">
                <input
                    type="text"
                    placeholder="Search folders and chats..."
                    value={(*search_query).clone()}
                    oninput={on_search_input}
                    class="search-input"
                />
            </div>

            // Folder list
            if store.is_empty() {
                <div class="empty-state">
                    <p>{"No folders yet."}</p>
                    <p class="empty-state-hint">{"Create a folder to start organizing your chats."}</p>
                </div>
            } else {
                <div class="folders-list">
                    {for views.iter().filter(|view| view.visible).filter_map(|view| {
                        store.get(&view.name).map(|folder| {
                            let expanded = view.expanded != toggled.contains(&view.name);
                            html! {
                                <FolderCard
                                    key={view.name.clone()}
                                    folder={folder.clone()}
                                    view={view.clone()}
                                    expanded={expanded}
                                    current_url={current_url.clone()}
                                    on_toggle={on_toggle_folder.clone()}
                                    on_delete={on_delete_folder.clone()}
                                    on_open_chat={on_open_chat.clone()}
                                    on_remove_chat={on_remove_chat.clone()}
                                />
                            }
                        })
                    })}
                </div>
            }

            // Create folder dialog
            if *open_modal == OpenModal::CreateFolder {
                <div class="modal show">
                    <div class="modal-content">
                        <h2>{"Create Folder"}</h2>
                        <input
                            type="text"
                            placeholder="Folder name"
                            value={(*folder_input).clone()}
                            oninput={on_folder_input}
                            onkeypress={on_folder_keypress}
                            class="folder-name-input"
                        />
                        <div class="modal-actions">
                            <Button onclick={close_modal.reform(|_| ())} variant={ButtonVariant::Secondary}>
                                {"Cancel"}
                            </Button>
                            <Button onclick={on_create.reform(|_| ())}>
                                {"Create"}
                            </Button>
                        </div>
                    </div>
                </div>
            }

            // Add chat dialog
            if *open_modal == OpenModal::AddChat {
                <div class="modal show">
                    <div class="modal-content">
                        <h2>{"Add Chat to Folder"}</h2>
                        <p class="chat-url-preview">{current_url.clone().unwrap_or_default()}</p>
                        <input
                            type="text"
                            placeholder="Chat title"
                            value={(*title_input).clone()}
                            oninput={on_title_input}
                            class="chat-title-input"
                        />
                        <FolderOptions
                            names={folder_names}
                            selected={(*selected_folder).clone()}
                            on_select={on_select_folder}
                        />
                        <div class="modal-actions">
                            <Button onclick={close_modal.reform(|_| ())} variant={ButtonVariant::Secondary}>
                                {"Cancel"}
                            </Button>
                            <Button onclick={on_add.reform(|_| ())}>
                                {"Add"}
                            </Button>
                        </div>
                    </div>
                </div>
            }

            <p class="footer-popup">
                {format!("{} folders • {} chats", store.len(), store.total_chats())}
            </p>
        </div>
    }
}

// Helper functions

async fn load_config() -> OrganizerConfig {
    match getStorage(CONFIG_STORAGE_KEY).await {
        Ok(value) if value.is_null() || value.is_undefined() => OrganizerConfig::default(),
        Ok(value) => match js_sys::JSON::stringify(&value) {
            Ok(json) => OrganizerConfig::from_json(&String::from(json)),
            Err(e) => {
                log::warn!("Unreadable configuration: {:?}", e);
                OrganizerConfig::default()
            }
        },
        Err(e) => {
            log::error!("Failed to get configuration: {:?}", e);
            OrganizerConfig::default()
        }
    }
}

async fn load_store(key: &str) -> Result<FolderStore, String> {
    let storage_js = getStorage(key)
        .await
        .map_err(|e| format!("Failed to get storage: {:?}", e))?;

    if storage_js.is_null() || storage_js.is_undefined() {
        Ok(FolderStore::new())
    } else {
        serde_wasm_bindgen::from_value(storage_js)
            .map_err(|e| format!("Failed to parse storage: {:?}", e))
    }
}

async fn save_store(key: &str, store: &FolderStore) -> Result<(), String> {
    // plain objects, not JS Maps, so the data stays readable by chrome.storage
    let storage_js = store
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("Failed to serialize storage: {:?}", e))?;

    setStorage(key, storage_js)
        .await
        .map_err(|e| format!("Failed to save storage: {:?}", e))
}

/// Show the new store immediately and persist it in the background
fn commit(store: &UseStateHandle<FolderStore>, next: FolderStore, key: String, notifier: Notifier) {
    store.set(next.clone());
    spawn_local(async move {
        if let Err(e) = save_store(&key, &next).await {
            log::error!("Error saving data: {}", e);
            notifier.show(NoticeKind::Error, "Failed to save data");
        }
    });
}

async fn detect_current_chat(hosts: &[String]) -> Result<Option<CurrentChat>, String> {
    let tab_js = getActiveTab()
        .await
        .map_err(|e| format!("Failed to query active tab: {:?}", e))?;
    if tab_js.is_null() || tab_js.is_undefined() {
        return Ok(None);
    }

    let tab: TabRef = serde_wasm_bindgen::from_value(tab_js)
        .map_err(|e| format!("Failed to parse tab: {:?}", e))?;
    let Some(url) = tab.url.filter(|url| is_chat_url_with(url, hosts)) else {
        return Ok(None);
    };

    let info = match tab.id {
        Some(id) => match getChatInfo(id).await {
            Ok(info_js) if info_js.is_null() || info_js.is_undefined() => None,
            Ok(info_js) => serde_wasm_bindgen::from_value::<ChatContext>(info_js).ok(),
            Err(e) => {
                log::info!("Could not get chat info from content script: {:?}", e);
                None
            }
        },
        None => None,
    };

    Ok(Some(CurrentChat { url, info }))
}

fn now_iso() -> String {
    String::from(js_sys::Date::new_0().to_iso_string())
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

async fn sleep(ms: u32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32);
        }
    });
    let _ = JsFuture::from(promise).await;
}
