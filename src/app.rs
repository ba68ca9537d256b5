use std::sync::Arc;

use dioxus::prelude::*;

use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::app_state::AppState;
use crate::ui::styles::{
    root_container_style, split_header, status_style, table_cell_style, table_container_style,
    table_header_cell_style,
};
use crate::usecase::services::fill_service::FillService;

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

fn load_table(service: Arc<FillService>, state: AppState) {
    let AppState {
        mut rows,
        mut busy,
        mut status,
        mut status_is_error,
        ..
    } = state;
    *busy.write() = true;
    *status.write() = "Loading data…".to_string();
    spawn(async move {
        let result = run_blocking(move || service.table()).await;
        match result {
            Ok(Ok(loaded)) => {
                let count = loaded.len();
                *rows.write() = loaded;
                *status.write() = format!("[{}] Loaded {count} row(s)", timestamp());
                *status_is_error.write() = false;
            }
            Ok(Err(err)) => {
                *rows.write() = Vec::new();
                *status.write() = format!("[{}] Failed to load data: {err}", timestamp());
                *status_is_error.write() = true;
            }
            Err(err) => {
                *status.write() = format!("[{}] Failed to load data: {err:#}", timestamp());
                *status_is_error.write() = true;
            }
        }
        *busy.write() = false;
    });
}

fn submit_fill(service: Arc<FillService>, state: AppState) {
    let AppState {
        name_input,
        mut busy,
        mut status,
        mut status_is_error,
        ..
    } = state;
    if busy() {
        return;
    }
    let name = name_input().trim().to_string();
    if name.is_empty() {
        return;
    }

    *busy.write() = true;
    *status.write() = format!("Looking up {name}…");
    spawn(async move {
        let result = run_blocking(move || service.fill(&name)).await;
        match result {
            Ok(Ok(outcome)) => {
                *status.write() = format!("[{}] {}", timestamp(), outcome.summary());
                *status_is_error.write() = false;
            }
            Ok(Err(err)) => {
                *status.write() = format!("[{}] {err}", timestamp());
                *status_is_error.write() = true;
            }
            Err(err) => {
                *status.write() = format!("[{}] {err:#}", timestamp());
                *status_is_error.write() = true;
            }
        }
        *busy.write() = false;
    });
}

#[component]
pub fn App() -> Element {
    let service = use_context::<Arc<FillService>>();
    let state = AppState::new();
    let AppState {
        rows,
        mut name_input,
        busy,
        status,
        status_is_error,
    } = state;

    let service_for_init = service.clone();
    use_effect(move || load_table(service_for_init.clone(), state));

    let service_for_click = service.clone();
    let service_for_enter = service.clone();
    let service_for_reload = service.clone();
    let (header, body) = split_header(&rows(), service.header_rows());

    rsx! {
        div {
            style: "{root_container_style()}",
            h2 { style: "margin: 0;", "Employee Data" }

            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
                label { "Enter the name to extract information: " }
                input {
                    r#type: "text",
                    value: "{name_input}",
                    disabled: busy(),
                    oninput: move |event| name_input.set(event.value()),
                    onkeydown: move |event| {
                        if event.key() == Key::Enter {
                            submit_fill(service_for_enter.clone(), state);
                        }
                    },
                }
                button {
                    disabled: busy() || name_input().trim().is_empty(),
                    onclick: move |_| submit_fill(service_for_click.clone(), state),
                    "Fill presentation"
                }
                button {
                    disabled: busy(),
                    onclick: move |_| load_table(service_for_reload.clone(), state),
                    "Reload"
                }
            }

            span { style: "{status_style(status_is_error())}", "{status}" }

            div {
                style: "{table_container_style()}",
                table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                    thead {
                        for header_row in header.iter() {
                            tr {
                                for value in header_row.iter() {
                                    th { style: "{table_header_cell_style()}", "{value}" }
                                }
                            }
                        }
                    }
                    tbody {
                        for row in body.iter() {
                            tr {
                                for value in row.iter() {
                                    td { style: "{table_cell_style()}", "{value}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
