#![allow(dead_code)]

pub mod project;
pub mod server;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

/// The launcher binary with a clean `JOBGURU_*` and `PYTHONPATH` environment.
pub fn jobguru() -> Command {
    let mut cmd = cargo_bin_cmd!("jobguru");
    cmd.env_remove("JOBGURU_HOST")
        .env_remove("JOBGURU_PORT")
        .env_remove("JOBGURU_RELOAD")
        .env_remove("PYTHONPATH")
        .env_remove("SCAM_MODEL_PATH")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}
