use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use userdex::cli::{Cli, Commands, ConfigAction, StateAction};
use userdex::commands::{
    LsOptions, cmd_browse, cmd_config_get, cmd_config_set, cmd_config_show, cmd_lookup_seed,
    cmd_ls, cmd_state_reset, cmd_state_show,
};

/// Environment variable holding the log filter (e.g. `userdex=debug`).
const LOG_ENV: &str = "USERDEX_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ls {
            search,
            gender,
            all_genders,
            page,
            json,
        } => {
            cmd_ls(LsOptions {
                search,
                gender,
                all_genders,
                page,
                json,
            })
            .await
        }

        Commands::Browse => cmd_browse().await,

        Commands::LookupSeed { id, json } => cmd_lookup_seed(&id, json).await,

        Commands::State { action } => match action {
            StateAction::Show { json } => cmd_state_show(json),
            StateAction::Reset { json } => cmd_state_reset(json),
        },

        Commands::Config { action } => match action {
            ConfigAction::Show { json } => cmd_config_show(json),
            ConfigAction::Get { key, json } => cmd_config_get(&key, json),
            ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
