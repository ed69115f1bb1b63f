//! Build script for the storefront crate.
//!
//! Hashes `static/css/main.css` so templates can reference an immutable,
//! cache-busted filename.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let css_path = Path::new(&manifest_dir).join("static/css/main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let Ok(content) = fs::read(&css_path) else {
        // Stylesheet may not exist on a fresh checkout; templates then
        // reference an unhashed name.
        println!("cargo:rustc-env=CSS_HASH=");
        return;
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = digest.get(..8).unwrap_or_default();
    println!("cargo:rustc-env=CSS_HASH={short_hash}");

    // Copy to a derived name carrying the hash so the file can be served
    // with an immutable cache policy.
    let derived_dir = Path::new(&manifest_dir).join("static/css/derived");
    fs::create_dir_all(&derived_dir).expect("failed to create derived CSS directory");
    fs::copy(&css_path, derived_dir.join(format!("main.{short_hash}.css")))
        .expect("failed to copy hashed CSS");
}
