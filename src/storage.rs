/// Folder store persisted in chrome.storage.local
///
/// Folders keep their creation order and serialize as a JSON object keyed by
/// folder name, the layout stored under `chatFolders`:
///
/// ```json
/// { "Cooking": { "name": "Cooking", "chats": [ ... ], "createdAt": "..." } }
/// ```
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::chat_data::{Chat, Folder};
use crate::error::StoreError;

/// Root storage structure
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FolderStore {
    folders: Vec<Folder>,
}

impl FolderStore {
    pub fn new() -> Self {
        FolderStore { folders: Vec::new() }
    }

    /// All folders in creation order
    pub fn list(&self) -> &[Folder] {
        &self.folders
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.folders.iter().map(|f| f.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Folder, StoreError> {
        self.folders
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| StoreError::FolderNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Create an empty folder. Names are case-sensitive keys.
    pub fn create(&mut self, name: &str, created_at: &str) -> Result<&Folder, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self.get(name).is_some() {
            log::warn!("Rejected duplicate folder {:?}", name);
            return Err(StoreError::DuplicateFolder(name.to_string()));
        }

        self.folders.push(Folder::new(name, created_at));
        log::info!("Created folder {:?}", name);
        Ok(&self.folders[self.folders.len() - 1])
    }

    /// Delete a folder and every chat in it
    pub fn delete(&mut self, name: &str) -> Result<Folder, StoreError> {
        let position = self
            .folders
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| StoreError::FolderNotFound(name.to_string()))?;

        let folder = self.folders.remove(position);
        log::info!("Deleted folder {:?} with {} chats", name, folder.chats.len());
        Ok(folder)
    }

    /// Append a chat. Url de-duplication is the caller's job.
    pub fn add_chat(&mut self, folder_name: &str, chat: Chat) -> Result<(), StoreError> {
        let folder = self.get_mut(folder_name)?;
        log::debug!("Adding {:?} to folder {:?}", chat.url, folder_name);
        folder.chats.push(chat);
        Ok(())
    }

    /// Remove the chat at `index`, shifting later chats down
    pub fn remove_chat(&mut self, folder_name: &str, index: usize) -> Result<Chat, StoreError> {
        let folder = self.get_mut(folder_name)?;
        if index >= folder.chats.len() {
            return Err(StoreError::ChatNotFound {
                folder: folder_name.to_string(),
                index,
            });
        }

        let chat = folder.chats.remove(index);
        log::debug!("Removed {:?} from folder {:?}", chat.url, folder_name);
        Ok(chat)
    }

    pub fn contains_chat(&self, folder_name: &str, url: &str) -> bool {
        self.get(folder_name).is_some_and(|f| f.contains_url(url))
    }

    /// Names of folders that already hold `url`
    pub fn folders_containing(&self, url: &str) -> Vec<&str> {
        self.folders
            .iter()
            .filter(|f| f.contains_url(url))
            .map(|f| f.name.as_str())
            .collect()
    }

    pub fn total_chats(&self) -> usize {
        self.folders.iter().map(|f| f.chats.len()).sum()
    }
}

impl Serialize for FolderStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.folders.len()))?;
        for folder in &self.folders {
            map.serialize_entry(&folder.name, folder)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FolderStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(FolderStoreVisitor)
    }
}

struct FolderStoreVisitor;

impl<'de> Visitor<'de> for FolderStoreVisitor {
    type Value = FolderStore;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of folder names to folders")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<FolderStore, A::Error> {
        let mut store = FolderStore::new();
        while let Some((name, mut folder)) = access.next_entry::<String, Folder>()? {
            // the key wins over a stale or missing inner name
            store.folders.retain(|f| f.name != name);
            folder.name = name;
            store.folders.push(folder);
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: &str = "2024-10-28T10:30:00.000Z";

    fn create_test_store() -> FolderStore {
        let mut store = FolderStore::new();
        store.create("Cooking", NOW).unwrap();
        store.create("Work", NOW).unwrap();
        store
            .add_chat("Cooking", Chat::new("Pasta", "https://chatgpt.com/c/pasta", NOW))
            .unwrap();
        store
            .add_chat("Cooking", Chat::new("Bread", "https://chatgpt.com/c/bread", NOW))
            .unwrap();
        store
    }

    #[test]
    fn test_folder_store_new() {
        let store = FolderStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_create_keeps_order() {
        let store = create_test_store();
        let names: Vec<&str> = store.names().collect();
        assert_eq!(names, vec!["Cooking", "Work"]);
    }

    #[test]
    fn test_create_duplicate_rejected() {
        let mut store = create_test_store();
        let before = store.clone();

        let result = store.create("Cooking", NOW);

        assert_eq!(result.unwrap_err(), StoreError::DuplicateFolder("Cooking".to_string()));
        assert_eq!(store, before);
    }

    #[test]
    fn test_create_is_case_sensitive() {
        let mut store = create_test_store();
        assert!(store.create("cooking", NOW).is_ok());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_create_empty_rejected() {
        let mut store = FolderStore::new();
        assert_eq!(store.create("   ", NOW).unwrap_err(), StoreError::EmptyName);
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_cascades() {
        let mut store = create_test_store();

        let removed = store.delete("Cooking").unwrap();

        assert_eq!(removed.chats.len(), 2);
        assert!(store.get("Cooking").is_none());
        assert_eq!(store.total_chats(), 0);
    }

    #[test]
    fn test_delete_nonexistent() {
        let mut store = create_test_store();
        let err = store.delete("Travel").unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_chat_missing_folder() {
        let mut store = create_test_store();
        let err = store.add_chat("Travel", Chat::new("Rome", "u", NOW)).unwrap_err();
        assert_eq!(err, StoreError::FolderNotFound("Travel".to_string()));
    }

    #[test]
    fn test_remove_chat() {
        let mut store = create_test_store();

        let removed = store.remove_chat("Cooking", 0).unwrap();

        assert_eq!(removed.title, "Pasta");
        let remaining = &store.get("Cooking").unwrap().chats;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Bread");
    }

    #[test]
    fn test_remove_chat_stale_index() {
        let mut store = create_test_store();
        let before = store.clone();

        let err = store.remove_chat("Cooking", 5).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store, before);
    }

    #[test]
    fn test_url_may_live_in_several_folders() {
        let mut store = create_test_store();
        store
            .add_chat("Work", Chat::new("Pasta", "https://chatgpt.com/c/pasta", NOW))
            .unwrap();

        assert!(store.contains_chat("Work", "https://chatgpt.com/c/pasta"));
        assert_eq!(
            store.folders_containing("https://chatgpt.com/c/pasta"),
            vec!["Cooking", "Work"]
        );
    }

    #[test]
    fn test_serialization_is_keyed_by_name() {
        let store = create_test_store();

        let json = serde_json::to_value(&store).unwrap();

        assert_eq!(json["Cooking"]["name"], "Cooking");
        assert_eq!(json["Cooking"]["chats"][1]["title"], "Bread");
        assert_eq!(json["Work"]["createdAt"], NOW);
    }

    #[test]
    fn test_serialization_round_trip_keeps_order() {
        let mut store = FolderStore::new();
        for name in ["Zeta", "Alpha", "Mid"] {
            store.create(name, NOW).unwrap();
        }

        let json = serde_json::to_string(&store).unwrap();
        let deserialized: FolderStore = serde_json::from_str(&json).unwrap();

        let names: Vec<&str> = deserialized.names().collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_deserialize_key_overrides_inner_name() {
        let store: FolderStore =
            serde_json::from_str(r#"{"Travel":{"chats":[],"createdAt":"x"}}"#).unwrap();

        assert_eq!(store.get("Travel").unwrap().name, "Travel");
    }
}
