//! Inspect and reset the persisted listing filters.

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::error::Result;
use crate::state::{FileStore, GENDER_KEY, PAGE_KEY, forget, namespaced, read};

/// Show the persisted page and gender filter
pub fn cmd_state_show(output_json: bool) -> Result<()> {
    let store = FileStore::open_default();
    let page: u32 = read(&store, PAGE_KEY, 1);
    let gender: String = read(&store, GENDER_KEY, String::new());

    let gender_text = if gender.is_empty() {
        "all".to_string()
    } else {
        gender.clone()
    };
    let text = format!(
        "{}\n  {:<8} {}\n  {:<8} {}\n  {:<8} {}",
        "Listing state:".cyan().bold(),
        "page",
        page,
        "gender",
        gender_text,
        "file",
        store.path().display()
    );

    CommandOutput::new(json!({
        namespaced(PAGE_KEY): page,
        namespaced(GENDER_KEY): gender,
        "state_file": store.path().to_string_lossy(),
    }))
    .with_text(text)
    .print(output_json)
}

/// Forget the persisted page and gender filter
pub fn cmd_state_reset(output_json: bool) -> Result<()> {
    let mut store = FileStore::open_default();
    forget(&mut store, PAGE_KEY);
    forget(&mut store, GENDER_KEY);

    CommandOutput::new(json!({
        "action": "reset",
        "state_file": store.path().to_string_lossy(),
    }))
    .with_text("Listing state reset.")
    .print(output_json)
}
