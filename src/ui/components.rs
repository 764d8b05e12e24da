/// Reusable UI components

use patternfly_yew::prelude::*;
use yew::prelude::*;

use crate::chat_data::{Chat, Folder};
use crate::chat_url::extract_chat_id;
use crate::operations::{FolderView, chat_count_label};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// A transient message shown at the top of the popup
#[derive(Clone, PartialEq, Debug)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Properties, PartialEq)]
pub struct NoticeViewProps {
    pub notice: Notice,
}

#[function_component(NoticeView)]
pub fn notice_view(props: &NoticeViewProps) -> Html {
    let alert_type = match props.notice.kind {
        NoticeKind::Success => AlertType::Success,
        NoticeKind::Warning => AlertType::Warning,
        NoticeKind::Error => AlertType::Danger,
    };

    html! {
        <div class="notification">
            <Alert r#type={alert_type} title={props.notice.message.clone()} inline={true}>
            </Alert>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CurrentChatBannerProps {
    pub url: String,
    pub matching: Vec<String>,
}

/// Banner for the chat open in the active tab
#[function_component(CurrentChatBanner)]
pub fn current_chat_banner(props: &CurrentChatBannerProps) -> Html {
    html! {
        <div class="current-chat-info">
            <h2 class="current-chat-title">
                {format!("Current Chat ({})", extract_chat_id(&props.url))}
            </h2>
            if !props.matching.is_empty() {
                <div class="matching-folders">
                    <span class="match-label">{"Matches folders: "}</span>
                    <span class="match-list">{props.matching.join(", ")}</span>
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FolderCardProps {
    pub folder: Folder,
    pub view: FolderView,
    pub expanded: bool,
    #[prop_or_default]
    pub current_url: Option<String>,
    pub on_toggle: Callback<String>,
    pub on_delete: Callback<String>,
    pub on_open_chat: Callback<String>,
    pub on_remove_chat: Callback<(String, usize)>,
}

#[function_component(FolderCard)]
pub fn folder_card(props: &FolderCardProps) -> Html {
    let folder = &props.folder;

    html! {
        <div class={classes!("folder", props.expanded.then_some("expanded"))}>
            <div class="folder-header">
                <div
                    class="folder-info"
                    onclick={props.on_toggle.reform({
                        let name = folder.name.clone();
                        move |_| name.clone()
                    })}
                >
                    <span class="folder-icon">{if props.expanded { "📂" } else { "📁" }}</span>
                    <div class="folder-details">
                        <h3>{&folder.name}</h3>
                        <p>{chat_count_label(folder.chats.len())}</p>
                    </div>
                </div>
                <div class="folder-actions">
                    <Button
                        onclick={props.on_delete.reform({
                            let name = folder.name.clone();
                            move |_| name.clone()
                        })}
                        variant={ButtonVariant::Danger}
                        size={ButtonSize::Small}
                    >
                        {"🗑️"}
                    </Button>
                </div>
            </div>

            if props.expanded {
                <div class="folder-content">
                    if folder.chats.is_empty() {
                        <div class="empty-folder">{"No chats in this folder yet"}</div>
                    } else {
                        <div class="chat-list">
                            {for props.view.visible_chats.iter().filter_map(|&index| {
                                folder.chats.get(index).map(|chat| {
                                    let is_current = props.current_url.as_deref() == Some(chat.url.as_str());
                                    let folder_name = folder.name.clone();
                                    let url = chat.url.clone();

                                    html! {
                                        <ChatRow
                                            key={chat.url.clone()}
                                            chat={chat.clone()}
                                            is_current={is_current}
                                            on_open={props.on_open_chat.reform(move |_| url.clone())}
                                            on_remove={props.on_remove_chat.reform(move |_| (folder_name.clone(), index))}
                                        />
                                    }
                                })
                            })}
                        </div>
                    }
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ChatRowProps {
    pub chat: Chat,
    pub is_current: bool,
    pub on_open: Callback<()>,
    pub on_remove: Callback<()>,
}

#[function_component(ChatRow)]
pub fn chat_row(props: &ChatRowProps) -> Html {
    let chat = &props.chat;

    html! {
        <div class={classes!("chat-item", props.is_current.then_some("current-chat-item"))}>
            <div class="chat-details">
                <div class="chat-title">{&chat.title}</div>
                <a href={chat.url.clone()} class="chat-url" title={chat.url.clone()}>{&chat.url}</a>
            </div>
            <div class="chat-actions">
                <Button
                    onclick={props.on_open.reform(|_| ())}
                    variant={ButtonVariant::Secondary}
                    size={ButtonSize::Small}
                >
                    {"↗"}
                </Button>
                <Button
                    onclick={props.on_remove.reform(|_| ())}
                    variant={ButtonVariant::Danger}
                    size={ButtonSize::Small}
                >
                    {"✗"}
                </Button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FolderOptionsProps {
    pub names: Vec<String>,
    #[prop_or_default]
    pub selected: Option<String>,
    pub on_select: Callback<String>,
}

/// Radio-style folder picker for the add-chat dialog
#[function_component(FolderOptions)]
pub fn folder_options(props: &FolderOptionsProps) -> Html {
    if props.names.is_empty() {
        return html! {
            <p class="help-text">{"No folders available. Create a folder first."}</p>
        };
    }

    html! {
        <div class="folder-options">
            {for props.names.iter().map(|name| {
                let is_selected = props.selected.as_deref() == Some(name.as_str());
                let onclick = props.on_select.reform({
                    let name = name.clone();
                    move |_: MouseEvent| name.clone()
                });

                html! {
                    <div key={name.clone()} class={classes!("folder-option", is_selected.then_some("selected"))} {onclick}>
                        <input type="radio" name="selectedFolder" checked={is_selected} />
                        <label>{name}</label>
                    </div>
                }
            })}
        </div>
    }
}
