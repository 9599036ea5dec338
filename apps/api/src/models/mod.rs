pub mod notes;

pub use notes::{NoteHistoryItem, StudyNotes};
