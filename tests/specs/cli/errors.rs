//! Configuration and input-validation error specs: these surface
//! immediately, the operation aborts, and no workers are spawned.

use crate::prelude::*;

#[test]
fn run_without_current_path_env_var_fails_with_a_clear_message() {
    let mut cmd = cli();
    cmd.args(["run", "demo"]);
    cmd.env_remove("DATALLOG_CURRENT_PATH");
    cmd.fails().stderr_has("DATALLOG_CURRENT_PATH");
}

#[test]
fn run_with_missing_app_file_fails_before_touching_docker() {
    // No `apps/demo/demo.py` exists under this empty project, so the
    // missing-app check must fire before any container engine is invoked
    // (which would fail differently, and noisily, in a sandbox with no
    // docker/podman installed).
    let project = Project::empty();
    project
        .datallog()
        .args(["run", "demo"])
        .fails()
        .stderr_has("does not exist");
}

#[test]
fn run_with_invalid_inline_seed_json_fails_with_a_clear_message() {
    let project = Project::empty();
    project.file("apps/demo/demo.py", "# placeholder app\n");

    project
        .datallog()
        .args(["run", "demo", "--seed", "{not valid json"])
        .fails()
        .stderr_has("valid JSON");
}

#[test]
fn run_with_missing_seed_file_fails_with_a_clear_message() {
    let project = Project::empty();
    project.file("apps/demo/demo.py", "# placeholder app\n");

    project
        .datallog()
        .args(["run", "demo", "--seed-file", "no-such-seed.json"])
        .fails()
        .stderr_has("does not exist");
}

#[test]
fn parse_app_rejects_a_name_that_normalizes_to_empty() {
    let project = Project::empty();
    project
        .datallog()
        .args(["run", ""])
        .fails()
        .stderr_has("invalid app name");
}

#[test]
fn stub_verbs_report_not_yet_implemented_rather_than_silently_succeeding() {
    let project = Project::empty();
    project
        .datallog()
        .args(["login"])
        .fails()
        .stderr_has("not yet implemented");
    project
        .datallog()
        .args(["create-app", "demo"])
        .fails()
        .stderr_has("not yet implemented");
}
