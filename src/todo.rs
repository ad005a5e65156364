//! To-Do Operations
//!
//! Pure mutations over the ordered task list plus load/save through the
//! persistence port. Position in the Vec is the item's identity.

use crate::models::Todo;
use crate::persist::{KeyValueStore, StoreError, TODOS_KEY};

/// Append a new uncompleted task
pub fn add(todos: &mut Vec<Todo>, text: &str) {
    todos.push(Todo {
        text: text.to_string(),
        completed: false,
    });
}

/// Flip the completed flag at `index`; out-of-range is a no-op
pub fn toggle(todos: &mut Vec<Todo>, index: usize) {
    if let Some(todo) = todos.get_mut(index) {
        todo.completed = !todo.completed;
    }
}

/// Delete the task at `index`, shifting later tasks down by one;
/// out-of-range is a no-op
pub fn remove(todos: &mut Vec<Todo>, index: usize) {
    if index < todos.len() {
        todos.remove(index);
    }
}

/// Load the persisted list; a missing or unreadable value yields an
/// empty list rather than an error
pub fn load(store: &dyn KeyValueStore) -> Vec<Todo> {
    store
        .get(TODOS_KEY)
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

/// Persist the full list as one JSON array (whole-document overwrite)
pub fn save(store: &dyn KeyValueStore, todos: &[Todo]) -> Result<(), StoreError> {
    let json = serde_json::to_string(todos)
        .map_err(|err| StoreError::WriteFailed(err.to_string()))?;
    store.set(TODOS_KEY, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemStore;

    #[test]
    fn test_add_toggle_persisted_form() {
        let store = MemStore::default();
        let mut todos = load(&store);
        assert!(todos.is_empty());

        add(&mut todos, "Buy milk");
        add(&mut todos, "Walk dog");
        toggle(&mut todos, 0);
        save(&store, &todos).unwrap();

        assert_eq!(
            store.get(TODOS_KEY).unwrap(),
            r#"[{"text":"Buy milk","completed":true},{"text":"Walk dog","completed":false}]"#
        );
    }

    #[test]
    fn test_round_trip_reproduces_sequence() {
        let store = MemStore::default();
        let mut todos = Vec::new();
        add(&mut todos, "a");
        add(&mut todos, "b");
        add(&mut todos, "c");
        toggle(&mut todos, 1);
        remove(&mut todos, 0);
        save(&store, &todos).unwrap();

        assert_eq!(load(&store), todos);
    }

    #[test]
    fn test_remove_shifts_later_positions() {
        let mut todos = Vec::new();
        add(&mut todos, "first");
        add(&mut todos, "second");
        add(&mut todos, "third");
        toggle(&mut todos, 2);

        remove(&mut todos, 1);

        // Earlier item untouched, later item shifted down by one
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].text, "first");
        assert_eq!(todos[1].text, "third");
        assert!(todos[1].completed);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut todos = Vec::new();
        add(&mut todos, "only");
        toggle(&mut todos, 5);
        remove(&mut todos, 5);
        assert_eq!(todos.len(), 1);
        assert!(!todos[0].completed);
    }
}
