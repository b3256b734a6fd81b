use std::env;
use std::fs;
use std::path::Path;
use vergen::{BuildBuilder, CargoBuilder, Emitter, RustcBuilder};

const PROFILES: [&str; 2] = ["debug", "release"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Emit build metadata at build time
    let build = BuildBuilder::default()
        .build_timestamp(true) // Build timestamp
        .build()?;

    let cargo = CargoBuilder::default()
        .opt_level(true) // Optimization level
        .target_triple(true) // Target triple (e.g., x86_64-unknown-linux-gnu)
        .build()?;

    let rustc = RustcBuilder::default()
        .semver(true) // Rust compiler version
        .channel(true) // Rust channel (stable, beta, nightly)
        .build()?;

    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&rustc)?
        .emit()?;

    // Copy config files to output directory
    copy_configs()?;

    Ok(())
}

fn copy_configs() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = env::var("OUT_DIR")?;
    let profile = env::var("PROFILE")?;

    // OUT_DIR is like: target/debug/build/sketch-keys-xxx/out
    // We want: target/debug/config
    let target_dir = Path::new(&out_dir)
        .parent()
        .and_then(|p| p.parent())
        .and_then(|p| p.parent())
        .ok_or("Could not determine target directory")?;

    let config_out_dir = target_dir.join("config");
    fs::create_dir_all(&config_out_dir)?;

    // Release builds only ship release.toml
    for name in PROFILES {
        if profile == "release" && name != "release" {
            continue;
        }

        let file_name = format!("{}.toml", name);
        let source = Path::new("config").join(&file_name);
        println!("cargo:rerun-if-changed={}", source.display());
        if source.exists() {
            fs::copy(&source, config_out_dir.join(&file_name))?;
        }
    }

    Ok(())
}
