mod card;
mod controller;

pub use card::{resolve_click, CardAction, DocumentCard};
pub use controller::{DocumentListController, ListView, DELETE_CONFIRMATION};
