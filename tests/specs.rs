//! End-to-end scenario specs for the `datallog` CLI, exercised against the
//! compiled binary. These cover the portion of the end-to-end scenarios
//! that does not require a container engine on the test host — full
//! execution scenarios are instead exercised at the `dtl-engine` crate
//! level against a fake worker speaking the wire protocol directly (see
//! `crates/engine/src/server_tests.rs`), since driving a real container
//! engine end to end from a workspace integration test isn't something
//! this environment can assume.

mod prelude;

mod cli {
    mod errors;
    mod help;
}
mod purge;
