// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin stubs for verbs that belong to the remote registry's front-end
//! surface rather than this engine's scope: real argument parsing, a
//! clear not-yet-implemented message, nothing more.

use clap::Args;

use crate::exit_error::ExitError;

fn not_yet_implemented(verb: &str) -> ExitError {
    ExitError::new(1, format!("`datallog {verb}` is not yet implemented in this build."))
}

#[derive(Debug, Args)]
pub struct CreateProjectArgs {
    pub name: String,
    #[arg(long, default_value = "python-3.11")]
    pub runtime: String,
    #[arg(long, default_value = "us-east-1")]
    pub region: String,
}

pub fn create_project(_args: CreateProjectArgs) -> Result<(), ExitError> {
    Err(not_yet_implemented("create-project"))
}

#[derive(Debug, Args)]
pub struct CreateAppArgs {
    pub name: String,
}

pub fn create_app(_args: CreateAppArgs) -> Result<(), ExitError> {
    Err(not_yet_implemented("create-app"))
}

#[derive(Debug, Args)]
pub struct InstallArgs {
    pub package: Option<String>,
}

pub fn install(_args: InstallArgs) -> Result<(), ExitError> {
    Err(not_yet_implemented("install"))
}

#[derive(Debug, Args)]
pub struct UninstallArgs {
    pub package: String,
}

pub fn uninstall(_args: UninstallArgs) -> Result<(), ExitError> {
    Err(not_yet_implemented("uninstall"))
}

#[derive(Debug, Args)]
pub struct LoginArgs {}

pub fn login(_args: LoginArgs) -> Result<(), ExitError> {
    Err(not_yet_implemented("login"))
}

#[derive(Debug, Args)]
pub struct LogoutArgs {}

pub fn logout(_args: LogoutArgs) -> Result<(), ExitError> {
    Err(not_yet_implemented("logout"))
}

#[derive(Debug, Args)]
pub struct SdkUpdateArgs {}

pub fn sdk_update(_args: SdkUpdateArgs) -> Result<(), ExitError> {
    Err(not_yet_implemented("sdk-update"))
}
