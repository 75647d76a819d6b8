use std::path::PathBuf;

use super::types::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    Drop(Vec<PathBuf>),
}

/// Turns the window's file drag state into drag events and keeps the
/// "drag active" highlight in sync. Only the first dropped file is used.
#[derive(Debug, Default)]
pub struct DropZone {
    active: bool,
    hovering: bool,
}

impl DropZone {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Derives this frame's events from egui's raw input.
    pub fn events_from_input(
        &mut self,
        hovering: bool,
        dropped: &[egui::DroppedFile],
    ) -> Vec<DragEvent> {
        let mut events = Vec::new();

        match (self.hovering, hovering) {
            (false, true) => events.push(DragEvent::Enter),
            (true, true) => events.push(DragEvent::Over),
            (true, false) if dropped.is_empty() => events.push(DragEvent::Leave),
            _ => {}
        }
        self.hovering = hovering;

        if !dropped.is_empty() {
            let paths = dropped.iter().filter_map(|f| f.path.clone()).collect();
            events.push(DragEvent::Drop(paths));
        }

        events
    }

    /// Applies one event. Returns the newly selected file on a usable drop.
    pub fn handle(&mut self, event: DragEvent) -> Option<SelectedFile> {
        match event {
            DragEvent::Enter | DragEvent::Over => {
                self.active = true;
                None
            }
            DragEvent::Leave => {
                self.active = false;
                None
            }
            DragEvent::Drop(paths) => {
                self.active = false;
                self.hovering = false;

                let first = paths.into_iter().next()?;
                match SelectedFile::from_path(&first) {
                    Ok(file) => {
                        tracing::debug!(name = %file.name, size = file.size, "File dropped");
                        Some(file)
                    }
                    Err(e) => {
                        tracing::warn!("Could not read dropped file {}: {}", first.display(), e);
                        None
                    }
                }
            }
        }
    }
}
