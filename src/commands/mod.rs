mod browse;
mod config;
mod lookup;
mod ls;
mod state;

pub use browse::{BrowseCommand, cmd_browse, parse_browse_command};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use lookup::cmd_lookup_seed;
pub use ls::{LsOptions, cmd_ls};
pub use state::{cmd_state_reset, cmd_state_show};

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::listing::ListingController;
use crate::remote::RandomUserClient;
use crate::state::FileStore;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Command result that renders as JSON or as text
pub struct CommandOutput {
    json: serde_json::Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: serde_json::Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output_json: bool) -> Result<()> {
        match (output_json, self.text) {
            (false, Some(text)) => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}

/// Controller wired to the configured API and the on-disk state file.
pub(crate) fn listing_controller(
    config: &Config,
) -> Result<ListingController<RandomUserClient, FileStore>> {
    let client = RandomUserClient::from_config(config)?;
    Ok(ListingController::new(
        client,
        FileStore::open_default(),
        config.listing_config(),
    ))
}
