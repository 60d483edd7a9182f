//! Кладёт `config.toml` из корня workspace рядом с бинарником backend
use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

fn target_profile_dir() -> Result<PathBuf, Box<dyn Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let profile = env::var("PROFILE")?;
    // OUT_DIR: target/<profile>/build/sop-backend-xxx/out
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
        .ok_or_else(|| format!("no target/{} directory above {}", profile, out_dir.display()).into())
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=../../config.toml");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let Some(workspace_root) = manifest_dir.parent().and_then(Path::parent) else {
        return Ok(());
    };

    let source = workspace_root.join("config.toml");
    if !source.exists() {
        println!(
            "cargo:warning=config.toml not found at {}, backend uses embedded defaults",
            source.display()
        );
        return Ok(());
    }

    let dest = target_profile_dir()?.join("config.toml");
    fs::copy(&source, &dest)?;
    Ok(())
}
