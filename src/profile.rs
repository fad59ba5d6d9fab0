//! Profile screen: user card, health history and settings.
//!
//! Edits go to a draft copy of the user info; leaving edit mode commits the
//! draft. Nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::models::profile::{ProfileField, UserInfo};

/// One user input on the profile screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ProfileAction {
    ToggleNotifications,
    ToggleEdit,
    UpdateField { field: ProfileField, value: String },
    SetNewHealthEntry { text: String },
    AddHealthEntry,
    RemoveHealthEntry { index: usize },
}

/// Snapshot of the profile screen, serialised to the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub editing: bool,
    pub notifications_enabled: bool,
    /// Draft while editing, committed info otherwise.
    pub user: UserInfo,
    pub new_health_entry: String,
    pub edit_button_label: &'static str,
}

#[derive(Debug, Clone)]
pub struct ProfileEditor {
    user: UserInfo,
    draft: UserInfo,
    editing: bool,
    notifications_enabled: bool,
    new_health_entry: String,
}

impl Default for ProfileEditor {
    fn default() -> Self {
        Self::new(UserInfo::default())
    }
}

impl ProfileEditor {
    pub fn new(user: UserInfo) -> Self {
        Self {
            draft: user.clone(),
            user,
            editing: false,
            notifications_enabled: true,
            new_health_entry: String::new(),
        }
    }

    pub fn apply(&mut self, action: ProfileAction) {
        match action {
            ProfileAction::ToggleNotifications => {
                self.notifications_enabled = !self.notifications_enabled
            }
            ProfileAction::ToggleEdit => self.toggle_edit(),
            ProfileAction::UpdateField { field, value } => self.draft.set_field(field, value),
            ProfileAction::SetNewHealthEntry { text } => self.new_health_entry = text,
            ProfileAction::AddHealthEntry => self.add_health_entry(),
            ProfileAction::RemoveHealthEntry { index } => self.remove_health_entry(index),
        }
    }

    pub fn user(&self) -> &UserInfo {
        &self.user
    }

    pub fn draft(&self) -> &UserInfo {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    pub fn view(&self) -> ProfileView {
        ProfileView {
            editing: self.editing,
            notifications_enabled: self.notifications_enabled,
            user: if self.editing {
                self.draft.clone()
            } else {
                self.user.clone()
            },
            new_health_entry: self.new_health_entry.clone(),
            edit_button_label: if self.editing { "Save" } else { "Edit Profile" },
        }
    }

    fn toggle_edit(&mut self) {
        if self.editing {
            self.user = self.draft.clone();
            tracing::debug!("Profile changes saved");
        }
        self.editing = !self.editing;
    }

    fn add_health_entry(&mut self) {
        let entry = self.new_health_entry.trim();
        if entry.is_empty() {
            return;
        }
        self.draft.health_history.push(entry.to_string());
        self.new_health_entry.clear();
    }

    fn remove_health_entry(&mut self, index: usize) {
        if index < self.draft.health_history.len() {
            self.draft.health_history.remove(index);
        }
    }
}
