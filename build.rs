use chrono::Utc;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Generates `$OUT_DIR/version.rs` with the package description, the build
/// time and the short commit hash shown by `gitmeta --version`.
fn main() {
    let out_dir = env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo");
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");

    let manifest = fs::read_to_string(Path::new(&manifest_dir).join("Cargo.toml"))
        .unwrap_or_default();
    let description = package_description(&manifest);
    let built = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let commit = short_commit_hash().unwrap_or_else(|| "unknown".to_string());

    // Debug formatting keeps quotes and backslashes valid Rust
    let generated = format!(
        "pub const DESCRIPTION: &str = {:?};\npub const BUILD_TIME: &str = {:?};\npub const GIT_HASH: &str = {:?};\n",
        description, built, commit
    );
    fs::write(Path::new(&out_dir).join("version.rs"), generated)
        .expect("cannot write version.rs");

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=.git/HEAD");
}

fn package_description(manifest: &str) -> String {
    manifest
        .parse::<toml::Table>()
        .ok()
        .as_ref()
        .and_then(|table| table.get("package"))
        .and_then(|package| package.get("description"))
        .and_then(|description| description.as_str())
        .unwrap_or_default()
        .to_string()
}

fn short_commit_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_string())
}
