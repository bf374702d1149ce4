//! Build script for storefront crate.
//!
//! Generates content-based hashes for static assets (CSS and the checkout
//! script) so they can be served with immutable cache headers.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    hash_asset("static/css/main.css", "css", "main", "CSS_HASH");
    hash_asset("static/js/checkout.js", "js", "checkout", "JS_HASH");
}

/// Hash a static asset and copy it to a derived directory with the hash in
/// its filename.
///
/// Sets `env_key` for use with `env!(...)` in filters.
fn hash_asset(relative: &str, kind: &str, stem: &str, env_key: &str) {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let asset_path = Path::new(&manifest_dir).join(relative);

    println!("cargo:rerun-if-changed={}", asset_path.display());

    let content = match fs::read(&asset_path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {relative}: {e}");
            println!("cargo:rustc-env={env_key}=");
            return;
        }
    };

    // First 8 chars of SHA256
    let mut hasher = Sha256::new();
    hasher.update(&content);
    let hash = format!("{:x}", hasher.finalize());
    let short_hash = &hash[..8];

    println!("cargo:rustc-env={env_key}={short_hash}");

    let derived_dir = Path::new(&manifest_dir)
        .join("static")
        .join(kind)
        .join("derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived asset directory");

    let derived_path = derived_dir.join(format!("{stem}.{short_hash}.{kind}"));
    fs::copy(&asset_path, &derived_path).expect("Failed to copy asset to derived directory");
}
