//! CLI help and version output specs.

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_exits_nonzero() {
    cli().fails().stderr_has("Usage:");
}

#[test]
fn help_flag_shows_usage() {
    cli().args(["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn run_help_lists_seed_and_parallelism_flags() {
    cli()
        .args(["run", "--help"])
        .passes()
        .stdout_has("--seed")
        .stdout_has("--parallelism")
        .stdout_has("--log-to-dir");
}

#[test]
fn push_help_lists_app_name() {
    cli().args(["push", "--help"]).passes().stdout_has("Usage:");
}

#[test]
fn version_flag_shows_version() {
    cli().args(["--version"]).passes().stdout_has("0.2");
}
