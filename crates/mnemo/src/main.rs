// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mnemo - a personalized conversational assistant with per-user memory.
//!
//! Binary entry point.

mod shell;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Mnemo - a personalized conversational assistant with per-user memory.
#[derive(Parser, Debug)]
#[command(name = "mnemo", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive chat session.
    Shell {
        /// User id to chat as.
        #[arg(long, default_value = "local")]
        user: String,
        /// Display name injected into the prompt.
        #[arg(long)]
        name: Option<String>,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match mnemo_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            mnemo_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.agent.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Some(Commands::Shell { user, name }) => {
            if let Err(e) = shell::run_shell(config, user, name).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("error: failed to render config: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("mnemo: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Config loads with defaults, no config file needed.
        let config = mnemo_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.agent.name, "mnemo");
    }
}
