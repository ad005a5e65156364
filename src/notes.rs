//! Notes Document Model
//!
//! The persisted document is a raw HTML string. Headings and highlights
//! are encoded purely as marker classes on plain elements, so these
//! constants are the document's whole schema.

use crate::persist::{KeyValueStore, StoreError, NOTES_KEY};

/// Marker class for heading blocks (`<div class="heading">`)
pub const HEADING_CLASS: &str = "heading";
/// Marker class for highlighted spans (`<span class="highlight">`)
pub const HIGHLIGHT_CLASS: &str = "highlight";

/// Seed document for first-time users: a welcome line and one example
/// heading block, establishing the expected document shape.
pub fn welcome_document() -> String {
    format!(
        "Welcome to your notes app!<br><br>\
         <div class=\"{}\">My First Note</div>\
         <br>Start typing here...<br><br>",
        HEADING_CLASS
    )
}

/// Decide whether an Enter press at `caret` should become a heading.
///
/// Fires only when the code unit immediately before the caret is a
/// newline already present in the text content (the second Enter of a
/// double-Enter). `caret` counts UTF-16 code units, matching DOM
/// `Range` offsets. Returns the text to keep in place and the text to
/// reinsert after the new heading block.
pub fn heading_split(text: &str, caret: usize) -> Option<(String, String)> {
    let units: Vec<u16> = text.encode_utf16().collect();
    if caret == 0 || caret > units.len() {
        return None;
    }
    if units[caret - 1] != u16::from(b'\n') {
        return None;
    }
    let before = String::from_utf16_lossy(&units[..caret]);
    let after = String::from_utf16_lossy(&units[caret..]);
    Some((before, after))
}

/// Load the persisted document, if any
pub fn load(store: &dyn KeyValueStore) -> Option<String> {
    store.get(NOTES_KEY)
}

/// Persist the serialized editor content (whole-document overwrite)
pub fn save(store: &dyn KeyValueStore, html: &str) -> Result<(), StoreError> {
    store.set(NOTES_KEY, html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemStore;

    #[test]
    fn test_welcome_document_shape() {
        let doc = welcome_document();
        assert!(doc.starts_with("Welcome to your notes app!"));
        assert!(doc.contains("<div class=\"heading\">My First Note</div>"));
        assert!(doc.contains("Start typing here..."));
    }

    #[test]
    fn test_save_then_load_is_idempotent() {
        let store = MemStore::default();
        let doc = "line one\n<div class=\"heading\">H</div><span class=\"highlight\">hot</span>";

        save(&store, doc).unwrap();
        assert_eq!(load(&store).as_deref(), Some(doc));

        // Saving what was loaded changes nothing
        save(&store, &load(&store).unwrap()).unwrap();
        assert_eq!(load(&store).as_deref(), Some(doc));
    }

    #[test]
    fn test_no_saved_document_loads_none() {
        let store = MemStore::default();
        assert_eq!(load(&store), None);
    }

    #[test]
    fn test_heading_split_requires_preceding_newline() {
        // First Enter of a pair: no newline in the text yet
        assert_eq!(heading_split("note text", 9), None);
        // Caret at start of node
        assert_eq!(heading_split("\nrest", 0), None);
        // Caret past the end
        assert_eq!(heading_split("ab\n", 10), None);
    }

    #[test]
    fn test_heading_split_at_newline() {
        let (before, after) = heading_split("intro\nrest", 6).unwrap();
        assert_eq!(before, "intro\n");
        assert_eq!(after, "rest");
    }

    #[test]
    fn test_heading_split_at_end_of_text() {
        let (before, after) = heading_split("intro\n", 6).unwrap();
        assert_eq!(before, "intro\n");
        assert_eq!(after, "");
    }

    #[test]
    fn test_heading_split_counts_utf16_units() {
        // '🙂' is two UTF-16 code units, so the newline sits at offset 3
        let text = "🙂\nx";
        let (before, after) = heading_split(text, 3).unwrap();
        assert_eq!(before, "🙂\n");
        assert_eq!(after, "x");
    }
}
