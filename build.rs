//! Stamps build metadata into the binary for `/version` and `BuildInfo`.

use std::env;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const UNKNOWN: &str = "unknown";

fn main() {
    emit("BUILD_TIME", build_time());
    emit("GIT_HASH", git_hash());
    emit("RUST_VERSION", rust_version());

    for var in ["SOURCE_DATE_EPOCH", "CERTFORGE_GIT_HASH", "DOCS_RS"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
    for path in [".git/HEAD", ".git/refs/heads/", "Cargo.toml"] {
        println!("cargo:rerun-if-changed={path}");
    }
}

fn emit(key: &str, value: String) {
    println!("cargo:rustc-env={key}={value}");
}

/// Seconds since the epoch; `SOURCE_DATE_EPOCH` pins it for reproducible builds
fn build_time() -> String {
    if let Some(epoch) = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .filter(|v| v.parse::<u64>().is_ok())
    {
        return epoch;
    }

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
        .to_string()
}

/// Commit of the working tree, overridable for builds without `.git`
fn git_hash() -> String {
    if let Ok(hash) = env::var("CERTFORGE_GIT_HASH") {
        return hash;
    }
    if env::var_os("DOCS_RS").is_some() {
        return "docs-rs-build".to_string();
    }

    command_stdout("git", &["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| UNKNOWN.into())
}

/// Version of the compiler cargo is driving
fn rust_version() -> String {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    command_stdout(&rustc, &["--version"]).unwrap_or_else(|| UNKNOWN.into())
}

fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }

    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
