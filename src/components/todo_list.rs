//! To-Do Widget
//!
//! Full re-render of the task list on every mutation, add form at the
//! bottom. Every mutation persists the whole array through the port.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::use_store;
use crate::models::Todo;
use crate::todo;

#[component]
pub fn TodoList() -> impl IntoView {
    let store = use_store();
    let (todos, set_todos) = signal(todo::load(store.port()));
    let (new_text, set_new_text) = signal(String::new());

    // Callback so every handler below can share the port
    let persist = Callback::new(move |items: Vec<Todo>| {
        if let Err(err) = todo::save(store.port(), &items) {
            web_sys::console::warn_1(&format!("[TODO] save failed: {}", err).into());
        }
    });

    let add_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_text.get().trim().to_string();
        if text.is_empty() {
            return;
        }
        set_todos.update(|items| todo::add(items, &text));
        persist.run(todos.get_untracked());
        set_new_text.set(String::new());
    };

    view! {
        <div class="todo-list">
            {move || todos.get().into_iter().enumerate().map(|(index, item)| {
                view! {
                    <div class="todo-item" class:completed=item.completed>
                        <input
                            type="checkbox"
                            class="todo-checkbox"
                            prop:checked=item.completed
                            on:change=move |_| {
                                set_todos.update(|items| todo::toggle(items, index));
                                persist.run(todos.get_untracked());
                            }
                        />
                        <span class="todo-text">{item.text.clone()}</span>
                        <button
                            class="todo-delete"
                            on:click=move |_| {
                                set_todos.update(|items| todo::remove(items, index));
                                persist.run(todos.get_untracked());
                            }
                        >
                            "✕"
                        </button>
                    </div>
                }
            }).collect_view()}
        </div>
        <form class="todo-form" on:submit=add_todo>
            <input
                type="text"
                placeholder="Add a new task..."
                required=true
                prop:value=move || new_text.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_new_text.set(input.value());
                }
            />
            <button type="submit">"Add"</button>
        </form>
    }
}
