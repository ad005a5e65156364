//! Notes Widget
//!
//! A contenteditable editor with toolbar formatting, double-Enter
//! heading creation, and debounced autosave. The persisted form is the
//! editor's serialized innerHTML, so round-trip fidelity rides on the
//! browser's HTML serializer.

use gloo_timers::callback::Timeout;
use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::use_store;
use crate::notes;

/// Quiet period before an edit is persisted
const AUTOSAVE_DELAY_MS: u32 = 1_000;
/// How long the "Saved" indicator stays visible
const INDICATOR_MS: u32 = 2_000;

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Run a built-in rich-text command against the current selection
fn exec_format_command(command: &str) {
    if let Some(doc) = document().and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok()) {
        if let Err(err) = doc.exec_command(command) {
            web_sys::console::warn_1(&err);
        }
    }
}

/// Wrap the current selection in a highlight span. Collapsed or
/// element-straddling selections cannot be wrapped in a single node and
/// become a no-op.
fn highlight_selection() -> Option<()> {
    let doc = document()?;
    let selection = web_sys::window()?.get_selection().ok()??;
    if selection.range_count() == 0 {
        return None;
    }
    let range = selection.get_range_at(0).ok()?;
    let span = doc.create_element("span").ok()?;
    span.set_class_name(notes::HIGHLIGHT_CLASS);
    range.surround_contents(&span).ok()?;
    Some(())
}

/// Turn the second Enter of a double-Enter into a heading block.
///
/// Only fires when the caret sits in a text node directly after a
/// newline (see `notes::heading_split`). Splits the text node, inserts
/// an empty heading between the halves, and moves the caret into it.
/// Returns `None` when the gesture does not apply, in which case the
/// default Enter behavior must proceed.
fn insert_heading_at_caret() -> Option<()> {
    let doc = document()?;
    let selection = web_sys::window()?.get_selection().ok()??;
    if selection.range_count() == 0 {
        return None;
    }
    let range = selection.get_range_at(0).ok()?;
    let node = range.start_container().ok()?;
    let text: web_sys::Text = node.dyn_into().ok()?;
    let caret = range.start_offset().ok()? as usize;

    let (before, after) = notes::heading_split(&text.data(), caret)?;
    text.set_data(&before);

    let heading = doc.create_element("div").ok()?;
    heading.set_class_name(notes::HEADING_CLASS);
    let _ = heading.set_attribute("contenteditable", "true");

    let parent = text.parent_node()?;
    let anchor = text.next_sibling();
    if after.is_empty() {
        parent.insert_before(&heading, anchor.as_ref()).ok()?;
    } else {
        let tail = doc.create_text_node(&after);
        parent.insert_before(&tail, anchor.as_ref()).ok()?;
        parent.insert_before(&heading, Some(tail.as_ref())).ok()?;
    }

    // Caret into the new heading
    let caret_range = doc.create_range().ok()?;
    caret_range.set_start(&heading, 0).ok()?;
    caret_range.collapse_with_to_start(true);
    selection.remove_all_ranges().ok()?;
    selection.add_range(&caret_range).ok()?;
    Some(())
}

#[component]
pub fn NotesEditor() -> impl IntoView {
    let store = use_store();
    let editor_ref = NodeRef::<Div>::new();
    let (indicator, set_indicator) = signal(None::<&'static str>);
    let debounce = StoredValue::new_local(None::<Timeout>);
    let seeded = StoredValue::new(false);

    let load_into_editor = Callback::new({
        let store = store.clone();
        move |announce: bool| {
            let Some(editor) = editor_ref.get_untracked() else {
                return;
            };
            match notes::load(store.port()) {
                Some(saved) => {
                    editor.set_inner_html(&saved);
                    if announce {
                        if let Some(window) = web_sys::window() {
                            let _ = window.alert_with_message("Notes loaded successfully!");
                        }
                    }
                }
                None => editor.set_inner_html(&notes::welcome_document()),
            }
        }
    });

    // Seed the editor once it is mounted; never announces on page load
    Effect::new(move |_| {
        if editor_ref.get().is_some() && !seeded.get_value() {
            seeded.set_value(true);
            load_into_editor.run(false);
        }
    });

    let save_from_editor = Callback::new(move |announce: bool| {
        let Some(editor) = editor_ref.get_untracked() else {
            return;
        };
        if let Err(err) = notes::save(store.port(), &editor.inner_html()) {
            web_sys::console::warn_1(&format!("[NOTES] save failed: {}", err).into());
            return;
        }
        if announce {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message("Notes saved successfully!");
            }
        }
    });

    let focus_editor = move || {
        if let Some(editor) = editor_ref.get_untracked() {
            let _ = editor.focus();
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() != "Enter" {
            return;
        }
        // Suppress the default newline only when the heading gesture
        // actually fired
        if insert_heading_at_caret().is_some() {
            ev.prevent_default();
        }
    };

    // Debounced autosave: every input resets the countdown
    let on_input = move |_| {
        set_indicator.set(Some("Saving..."));
        debounce.update_value(|slot| {
            if let Some(pending) = slot.take() {
                pending.cancel();
            }
            *slot = Some(Timeout::new(AUTOSAVE_DELAY_MS, move || {
                save_from_editor.run(false);
                set_indicator.set(Some("Saved"));
                Timeout::new(INDICATOR_MS, move || set_indicator.set(None)).forget();
            }));
        });
    };

    view! {
        <div class="toolbar">
            <button title="Bold" on:click=move |_| {
                exec_format_command("bold");
                focus_editor();
            }>"Bold"</button>
            <button title="Highlight" on:click=move |_| {
                let _ = highlight_selection();
                focus_editor();
            }>"Highlight"</button>
            <button title="Clear Formatting" on:click=move |_| {
                exec_format_command("removeFormat");
                focus_editor();
            }>"Clear Format"</button>
            <button title="Save Notes" on:click=move |_| save_from_editor.run(true)>"Save"</button>
            <button title="Load Notes" on:click=move |_| load_into_editor.run(true)>"Load"</button>
            {move || indicator.get().map(|text| view! {
                <span class="save-indicator">{text}</span>
            })}
        </div>
        <div
            class="editor"
            node_ref=editor_ref
            contenteditable="true"
            spellcheck="false"
            {leptos::tachys::html::attribute::custom::custom_attribute("autocorrect", "off")}
            autocapitalize="off"
            on:keydown=on_keydown
            on:input=on_input
        ></div>
    }
}
