use uuid::Uuid;

use decora_domain::{
    AreaDefinition, EntryUpdate, MediaAttachment, MediaUpload, SpaceEntry,
};

use crate::{CoreError, Result};

/// One catalog area inside a wizard: the shopper's description plus a space
/// entry per physical room of that type. An area is "selected" while it has
/// at least one entry; the record itself lives for the whole wizard, so a
/// description typed before deselecting survives a later re-select.
#[derive(Debug, Clone)]
pub struct AreaSelection {
    pub area: AreaDefinition,
    pub description: String,
    pub entries: Vec<SpaceEntry>,
}

impl AreaSelection {
    fn new(area: AreaDefinition) -> Self {
        Self {
            area,
            description: String::new(),
            entries: Vec::new(),
        }
    }

    pub fn quantity(&self) -> usize {
        self.entries.len()
    }

    pub fn is_selected(&self) -> bool {
        !self.entries.is_empty()
    }
}

/// All per-area state of one wizard run, in catalog order.
#[derive(Debug, Clone)]
pub struct SelectionState {
    selections: Vec<AreaSelection>,
}

impl SelectionState {
    pub fn new(areas: &[AreaDefinition]) -> Self {
        Self {
            selections: areas.iter().cloned().map(AreaSelection::new).collect(),
        }
    }

    pub fn areas(&self) -> &[AreaSelection] {
        &self.selections
    }

    pub fn selection(&self, area_id: &str) -> Result<&AreaSelection> {
        self.selections
            .iter()
            .find(|selection| selection.area.id == area_id)
            .ok_or_else(|| CoreError::UnknownArea(area_id.to_string()))
    }

    fn selection_mut(&mut self, area_id: &str) -> Result<&mut AreaSelection> {
        self.selections
            .iter_mut()
            .find(|selection| selection.area.id == area_id)
            .ok_or_else(|| CoreError::UnknownArea(area_id.to_string()))
    }

    /// Areas the shopper currently has at least one space in.
    pub fn selected(&self) -> impl Iterator<Item = &AreaSelection> {
        self.selections.iter().filter(|s| s.is_selected())
    }

    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }

    pub fn total_entries(&self) -> usize {
        self.selections.iter().map(AreaSelection::quantity).sum()
    }

    /// Grows or shrinks an area to `desired` spaces. Negative values clamp
    /// to zero. Growth appends blank entries; surviving entries keep their
    /// identity and answers. Shrinking trims from the end and returns the
    /// discarded entries with their previews already released.
    pub fn set_quantity(&mut self, area_id: &str, desired: i64) -> Result<Vec<SpaceEntry>> {
        let selection = self.selection_mut(area_id)?;
        let desired = desired.max(0) as usize;
        let current = selection.entries.len();

        if desired > current {
            for _ in current..desired {
                selection.entries.push(SpaceEntry::new());
            }
            return Ok(Vec::new());
        }

        let mut discarded: Vec<SpaceEntry> = selection.entries.drain(desired..).collect();
        for entry in &mut discarded {
            entry.release_previews();
        }
        Ok(discarded)
    }

    /// Stores the free-text description. Kept for every area, though only
    /// the custom one surfaces it on the form.
    pub fn set_description(&mut self, area_id: &str, text: &str) -> Result<()> {
        self.selection_mut(area_id)?.description = text.to_string();
        Ok(())
    }

    /// Merges a partial update into one entry, found by identity.
    pub fn update_entry(
        &mut self,
        area_id: &str,
        entry_id: Uuid,
        update: &EntryUpdate,
    ) -> Result<()> {
        let entry = self.entry_mut(area_id, entry_id)?;
        update.apply(entry);
        Ok(())
    }

    /// Accepts uploads until the entry holds [`SpaceEntry::MAX_MEDIA`]
    /// attachments; anything beyond the cap is dropped without error.
    /// Returns the ids of the attachments actually added.
    pub fn attach_media(
        &mut self,
        area_id: &str,
        entry_id: Uuid,
        uploads: Vec<MediaUpload>,
    ) -> Result<Vec<Uuid>> {
        let entry = self.entry_mut(area_id, entry_id)?;
        let room = SpaceEntry::MAX_MEDIA.saturating_sub(entry.media.len());
        let mut added = Vec::new();
        for upload in uploads.into_iter().take(room) {
            let attachment = MediaAttachment::from_upload(upload);
            added.push(attachment.id);
            entry.media.push(attachment);
        }
        Ok(added)
    }

    /// Releases the attachment's preview and removes it from the entry,
    /// returning it so the host can drop its side of the preview.
    pub fn remove_media(
        &mut self,
        area_id: &str,
        entry_id: Uuid,
        media_id: Uuid,
    ) -> Result<MediaAttachment> {
        let entry = self.entry_mut(area_id, entry_id)?;
        let index = entry
            .media
            .iter()
            .position(|attachment| attachment.id == media_id)
            .ok_or(CoreError::UnknownAttachment(media_id))?;
        let mut attachment = entry.media.remove(index);
        attachment.preview.release();
        Ok(attachment)
    }

    /// Releases every preview still held. Called when a wizard is discarded.
    pub fn release_all(&mut self) -> Vec<MediaAttachment> {
        let mut released = Vec::new();
        for selection in &mut self.selections {
            for entry in &mut selection.entries {
                for attachment in &mut entry.media {
                    attachment.preview.release();
                }
                released.append(&mut entry.media);
            }
        }
        released
    }

    fn entry_mut(&mut self, area_id: &str, entry_id: Uuid) -> Result<&mut SpaceEntry> {
        self.selection_mut(area_id)?
            .entries
            .iter_mut()
            .find(|entry| entry.id == entry_id)
            .ok_or(CoreError::UnknownEntry(entry_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn areas() -> Vec<AreaDefinition> {
        vec![
            AreaDefinition::new("kitchen", "Kitchen", 220.0, ""),
            AreaDefinition::custom("other", "Other", 120.0, ""),
        ]
    }

    fn upload(name: &str) -> MediaUpload {
        MediaUpload {
            file_name: name.into(),
            size_bytes: 2048,
            mime_type: "image/png".into(),
            source_key: format!("uploads/{name}"),
        }
    }

    #[test]
    fn growing_keeps_existing_entries() {
        let mut state = SelectionState::new(&areas());
        state.set_quantity("kitchen", 2).unwrap();

        let first_ids: Vec<Uuid> = state.selection("kitchen").unwrap().entries
            .iter()
            .map(|entry| entry.id)
            .collect();

        state.set_quantity("kitchen", 4).unwrap();
        let grown = state.selection("kitchen").unwrap();
        assert_eq!(grown.quantity(), 4);
        assert_eq!(
            grown.entries[..2].iter().map(|e| e.id).collect::<Vec<_>>(),
            first_ids
        );
    }

    #[test]
    fn shrinking_trims_from_the_end_and_releases_previews() {
        let mut state = SelectionState::new(&areas());
        state.set_quantity("kitchen", 3).unwrap();
        let last_id = state.selection("kitchen").unwrap().entries[2].id;
        state
            .attach_media("kitchen", last_id, vec![upload("wall.png")])
            .unwrap();

        let discarded = state.set_quantity("kitchen", 2).unwrap();
        assert_eq!(discarded.len(), 1);
        assert_eq!(discarded[0].id, last_id);
        assert!(discarded[0].media[0].preview.is_released());
        assert_eq!(state.selection("kitchen").unwrap().quantity(), 2);
    }

    #[test]
    fn negative_quantities_clamp_to_zero() {
        let mut state = SelectionState::new(&areas());
        state.set_quantity("kitchen", 2).unwrap();
        state.set_quantity("kitchen", -5).unwrap();
        assert_eq!(state.selection("kitchen").unwrap().quantity(), 0);
        assert_eq!(state.selected_count(), 0);
    }

    #[test]
    fn description_survives_deselection() {
        let mut state = SelectionState::new(&areas());
        state.set_quantity("other", 1).unwrap();
        state.set_description("other", "Walk-in closet").unwrap();

        state.set_quantity("other", 0).unwrap();
        state.set_quantity("other", 1).unwrap();
        assert_eq!(
            state.selection("other").unwrap().description,
            "Walk-in closet"
        );
    }

    #[test]
    fn media_caps_silently_at_the_limit() {
        let mut state = SelectionState::new(&areas());
        state.set_quantity("kitchen", 1).unwrap();
        let entry_id = state.selection("kitchen").unwrap().entries[0].id;

        let uploads: Vec<MediaUpload> = (0..8).map(|i| upload(&format!("{i}.png"))).collect();
        let added = state.attach_media("kitchen", entry_id, uploads).unwrap();
        assert_eq!(added.len(), SpaceEntry::MAX_MEDIA);

        let extra = state
            .attach_media("kitchen", entry_id, vec![upload("extra.png")])
            .unwrap();
        assert!(extra.is_empty());
    }

    #[test]
    fn removing_media_releases_its_preview() {
        let mut state = SelectionState::new(&areas());
        state.set_quantity("kitchen", 1).unwrap();
        let entry_id = state.selection("kitchen").unwrap().entries[0].id;
        let added = state
            .attach_media("kitchen", entry_id, vec![upload("sink.png")])
            .unwrap();

        let removed = state.remove_media("kitchen", entry_id, added[0]).unwrap();
        assert!(removed.preview.is_released());
        assert_eq!(
            state.selection("kitchen").unwrap().entries[0].media_count(),
            0
        );
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut state = SelectionState::new(&areas());
        assert!(matches!(
            state.set_quantity("garage", 1),
            Err(CoreError::UnknownArea(_))
        ));

        state.set_quantity("kitchen", 1).unwrap();
        assert!(matches!(
            state.update_entry("kitchen", Uuid::new_v4(), &EntryUpdate::default()),
            Err(CoreError::UnknownEntry(_))
        ));
    }
}
