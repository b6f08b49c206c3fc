//! Build script for datasure - links a system DuckDB when not bundled

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=DUCKDB_LIB_PATH");

    // The bundled feature compiles DuckDB from source; nothing to locate
    if env::var_os("CARGO_FEATURE_BUNDLED").is_some() {
        return;
    }

    match find_duckdb_library() {
        Some(lib_path) => {
            println!("cargo:rustc-link-search=native={}", lib_path.display());
            println!("cargo:rustc-link-lib=duckdb");
        }
        None => {
            println!("cargo:warning=DuckDB library not found; set DUCKDB_LIB_PATH or build with --features bundled");
            println!("cargo:rustc-link-lib=duckdb");
        }
    }
}

fn find_duckdb_library() -> Option<PathBuf> {
    if let Some(path) = env::var_os("DUCKDB_LIB_PATH").map(PathBuf::from) {
        if check_duckdb_library(&path) {
            return Some(path);
        }
    }

    if let Some(path) = try_pkg_config() {
        return Some(path);
    }

    ["/usr/local/lib", "/usr/lib", "/opt/homebrew/lib", "/usr/lib/x86_64-linux-gnu"]
        .iter()
        .map(PathBuf::from)
        .find(|p| check_duckdb_library(p))
}

fn try_pkg_config() -> Option<PathBuf> {
    let output = Command::new("pkg-config")
        .args(["--libs-only-L", "duckdb"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8_lossy(&output.stdout)
        .split_whitespace()
        .filter_map(|flag| flag.strip_prefix("-L"))
        .map(PathBuf::from)
        .find(|p| check_duckdb_library(p))
}

fn check_duckdb_library(path: &Path) -> bool {
    ["libduckdb.so", "libduckdb.dylib", "duckdb.dll", "duckdb.lib", "libduckdb.a"]
        .iter()
        .any(|name| path.join(name).exists())
}
