use dioxus::prelude::{use_signal, Signal};

#[derive(Clone, Copy)]
pub struct AppState {
    pub rows: Signal<Vec<Vec<String>>>,
    pub name_input: Signal<String>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
    pub status_is_error: Signal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            rows: use_signal(Vec::<Vec<String>>::new),
            name_input: use_signal(String::new),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
            status_is_error: use_signal(|| false),
        }
    }
}
