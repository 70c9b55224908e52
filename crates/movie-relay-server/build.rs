#![allow(missing_docs)]

use std::process::Command;

fn main() {
    // Falls back to "unknown" outside a git checkout or without git installed.
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| String::from(hash.trim()))
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| String::from("unknown"));

    println!("cargo:rustc-env=GIT_HASH={git_hash}");
    println!("cargo:rerun-if-changed=../../.git/HEAD");
}
