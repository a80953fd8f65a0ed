//! Per-space questionnaire state: measurements, notes, media, preferences.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{is_filled, Identifiable};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
/// Free-text measurement fields; shoppers type whatever units they use.
pub struct Dimensions {
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub height: String,
}

impl Dimensions {
    /// True when all three measurements carry non-whitespace content.
    pub fn is_complete(&self) -> bool {
        is_filled(&self.length) && is_filled(&self.width) && is_filled(&self.height)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Host-side preview resource tied to one attachment. Released exactly once
/// when the attachment is discarded; releasing twice is a no-op.
pub struct PreviewHandle {
    token: String,
    released: bool,
}

impl PreviewHandle {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            released: false,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Marks the preview as released. Returns true only on the first call.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Host-supplied descriptor for a file the shopper picked.
pub struct MediaUpload {
    pub file_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub source_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Accepted photo or video attached to a space entry.
pub struct MediaAttachment {
    pub id: Uuid,
    pub file_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub source_key: String,
    pub preview: PreviewHandle,
}

impl MediaAttachment {
    pub fn from_upload(upload: MediaUpload) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            file_name: upload.file_name,
            size_bytes: upload.size_bytes,
            mime_type: upload.mime_type,
            source_key: upload.source_key,
            preview: PreviewHandle::new(format!("preview-{id}")),
        }
    }
}

impl Identifiable for MediaAttachment {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// One physical space of a selected area, with everything the stylist needs.
pub struct SpaceEntry {
    pub id: Uuid,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub keep_notes: String,
    #[serde(default)]
    pub remove_notes: String,
    #[serde(default)]
    pub unsure_notes: String,
    #[serde(default)]
    pub media: Vec<MediaAttachment>,
    #[serde(default)]
    pub style_preference: String,
    #[serde(default)]
    pub budget_range: String,
}

impl SpaceEntry {
    /// Attachments accepted per entry; extra uploads are ignored.
    pub const MAX_MEDIA: usize = 5;

    /// Fresh entry with a new identity and every field blank.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            nickname: String::new(),
            dimensions: Dimensions::default(),
            keep_notes: String::new(),
            remove_notes: String::new(),
            unsure_notes: String::new(),
            media: Vec::new(),
            style_preference: String::new(),
            budget_range: String::new(),
        }
    }

    pub fn has_style_and_budget(&self) -> bool {
        is_filled(&self.style_preference) && is_filled(&self.budget_range)
    }

    pub fn media_count(&self) -> usize {
        self.media.len()
    }

    /// Releases every attachment preview. Called when the entry is discarded.
    pub fn release_previews(&mut self) {
        for attachment in &mut self.media {
            attachment.preview.release();
        }
    }
}

impl Default for SpaceEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl Identifiable for SpaceEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Partial update merged into a [`SpaceEntry`]; absent fields stay untouched.
pub struct EntryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsure_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
}

impl EntryUpdate {
    pub fn apply(&self, entry: &mut SpaceEntry) {
        if let Some(nickname) = &self.nickname {
            entry.nickname = nickname.clone();
        }
        if let Some(dimensions) = &self.dimensions {
            entry.dimensions = dimensions.clone();
        }
        if let Some(keep) = &self.keep_notes {
            entry.keep_notes = keep.clone();
        }
        if let Some(remove) = &self.remove_notes {
            entry.remove_notes = remove.clone();
        }
        if let Some(unsure) = &self.unsure_notes {
            entry.unsure_notes = unsure.clone();
        }
        if let Some(style) = &self.style_preference {
            entry.style_preference = style.clone();
        }
        if let Some(budget) = &self.budget_range {
            entry.budget_range = budget.clone();
        }
    }
}

/// Resolves the display name for an entry within its area.
///
/// A trimmed nickname wins; otherwise the area label is numbered when the
/// area holds more than one entry, and used bare when it holds exactly one.
pub fn entry_label(area_label: &str, entry_count: usize, entry: &SpaceEntry, index: usize) -> String {
    let nickname = entry.nickname.trim();
    if !nickname.is_empty() {
        return nickname.to_string();
    }
    if entry_count > 1 {
        format!("{} {}", area_label, index + 1)
    } else {
        area_label.to_string()
    }
}

/// True when an entry is missing something only remote bookings require:
/// complete measurements and at least one photo or video.
pub fn missing_remote_assets(entry: &SpaceEntry) -> bool {
    !entry.dimensions.is_complete() || entry.media.is_empty()
}
