mod controller;
mod drop_zone;
mod selection;
mod types;

pub use controller::{PendingRedirect, UploadController};
pub use drop_zone::{DragEvent, DropZone};
pub use selection::FileSelectionDisplay;
pub use types::SelectedFile;
