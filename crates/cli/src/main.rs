// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `datallog` — the local step-graph execution engine CLI.

mod color;
mod commands;
mod exit_error;
mod logging;
mod project;

use clap::{Parser, Subcommand};

use exit_error::ExitError;

#[derive(Debug, Parser)]
#[command(name = "datallog", version = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH")))]
#[command(styles = color::styles())]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run an application's step graph locally.
    Run(commands::run::RunArgs),
    /// Push the current project's build cache layers to the remote registry.
    Push(commands::push::PushArgs),
    /// Remove this project's env directory and any stale worker sockets.
    Purge(commands::purge::PurgeArgs),
    /// Create a new project on the remote registry.
    CreateProject(commands::stub::CreateProjectArgs),
    /// Scaffold a new application within the current project.
    CreateApp(commands::stub::CreateAppArgs),
    /// Install a package into the project's requirements.
    Install(commands::stub::InstallArgs),
    /// Remove a package from the project's requirements.
    Uninstall(commands::stub::UninstallArgs),
    /// Authenticate with the remote registry.
    Login(commands::stub::LoginArgs),
    /// Clear stored credentials.
    Logout(commands::stub::LogoutArgs),
    /// Update the installed SDK.
    SdkUpdate(commands::stub::SdkUpdateArgs),
}

#[tokio::main]
async fn main() {
    let tool_dir = project::tool_dir().ok();
    let log_path = tool_dir
        .as_deref()
        .map(dtl_config::paths::log_file_path)
        .unwrap_or_else(|| std::path::PathBuf::from("datallog.log"));
    let _log_guard = logging::setup_logging(&log_path).ok();

    let cli = Cli::parse();
    if let Err(err) = dispatch(cli.command).await {
        eprintln!("{}", color::error(&format!("Error: {err}")));
        tracing::error!(error = %err, "command failed");
        std::process::exit(err.code);
    }
}

async fn dispatch(command: Commands) -> Result<(), ExitError> {
    match command {
        Commands::Run(args) => commands::run::handle(args).await,
        Commands::Push(args) => commands::push::handle(args).await,
        Commands::Purge(args) => commands::purge::handle(args),
        Commands::CreateProject(args) => commands::stub::create_project(args),
        Commands::CreateApp(args) => commands::stub::create_app(args),
        Commands::Install(args) => commands::stub::install(args),
        Commands::Uninstall(args) => commands::stub::uninstall(args),
        Commands::Login(args) => commands::stub::login(args),
        Commands::Logout(args) => commands::stub::logout(args),
        Commands::SdkUpdate(args) => commands::stub::sdk_update(args),
    }
}
