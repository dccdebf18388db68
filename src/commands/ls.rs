use serde_json::json;

use super::{listing_controller, print_json};
use crate::config::Config;
use crate::display::format_listing;
use crate::error::{Result, UserdexError};
use crate::listing::FetchOutcome;
use crate::types::Gender;

/// Options for a one-shot listing
#[derive(Debug, Default)]
pub struct LsOptions {
    pub search: Option<String>,
    pub gender: Option<Gender>,
    pub all_genders: bool,
    pub page: Option<u32>,
    pub json: bool,
}

/// Render one listing page. Gender and page changes persist like in `browse`.
pub async fn cmd_ls(options: LsOptions) -> Result<()> {
    let config = Config::load()?;
    let mut ctl = listing_controller(&config)?;

    if options.all_genders {
        ctl.on_gender_change(None);
    } else if options.gender.is_some() {
        ctl.on_gender_change(options.gender);
    }
    if let Some(search) = &options.search {
        ctl.on_search(search);
    }
    if let Some(page) = options.page {
        ctl.on_page_change(page)?;
    }

    let outcome = ctl.refresh().await;
    let filter = ctl.filter();
    let view = ctl.view();

    if outcome == FetchOutcome::Failed {
        let message = view.error.clone().unwrap_or_default();
        return Err(UserdexError::Other(format!("failed to fetch users: {message}")));
    }

    if options.json {
        print_json(&json!({
            "filter": filter,
            "records": view.records,
            "pagination": view.pagination,
        }))
    } else {
        print!("{}", format_listing(view, &filter, true));
        Ok(())
    }
}
