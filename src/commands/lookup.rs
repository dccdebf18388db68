use owo_colors::OwoColorize;

use super::print_json;
use crate::config::Config;
use crate::display::format_profile;
use crate::error::{Result, UserdexError};
use crate::remote::{CollectionSource, FetchParams, RandomUserClient, fetch_by_seed};

/// Fetch the record generated from `id` used as a seed.
///
/// Always warns: this is not the record originally shown under that id.
pub async fn cmd_lookup_seed(id: &str, output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let client = RandomUserClient::from_config(&config)?;

    let base = FetchParams::new()
        .nat(config.nationalities.clone())
        .version(config.api_version.clone());
    let params = fetch_by_seed(id, base);

    eprintln!(
        "{} seed lookups return a record generated from '{}', not the record originally listed under that id",
        "warning:".yellow().bold(),
        id
    );

    let batch = client.fetch_users(&params).await?;
    let user = batch
        .results
        .into_iter()
        .next()
        .ok_or_else(|| UserdexError::Api(format!("no record returned for seed '{id}'")))?;

    if output_json {
        print_json(&user)
    } else {
        print!("{}", format_profile(&user));
        Ok(())
    }
}
