// File: crates/overlay-core/build.rs
// Summary: Links the Windows system libraries Skia's font manager and ICU need.

fn main() {
    // registry lookups (RegOpenKeyExW, RegQueryInfoKeyW) from the font manager
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        println!("cargo:rustc-link-lib=advapi32");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
