// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bundles a deploy directory into an upload-ready ZIP archive: every file
//! under the deploy path (skipping `__pycache__` and the `env/` directory)
//! added under a `deploy/` prefix, plus a `build.json` manifest entry at
//! the archive root.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::RegistryError;

pub fn bundle_deploy_directory(
    deploy_path: &Path,
    manifest: &serde_json::Value,
    output_zip: &Path,
) -> Result<usize, RegistryError> {
    let file = File::create(output_zip)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut file_count = 0;
    for entry in WalkDir::new(deploy_path).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(deploy_path)
            .unwrap_or(entry.path());
        if relative
            .components()
            .any(|c| c.as_os_str() == "__pycache__")
        {
            continue;
        }
        if relative.starts_with("env") {
            continue;
        }

        let arcname = Path::new("deploy").join(relative);
        writer.start_file(arcname.to_string_lossy(), options)?;
        let contents = std::fs::read(entry.path())?;
        writer.write_all(&contents)?;
        file_count += 1;
    }

    if file_count == 0 {
        return Err(RegistryError::Network(format!(
            "no files found in deploy directory {}",
            deploy_path.display()
        )));
    }

    let manifest_json = serde_json::to_string_pretty(manifest)
        .map_err(|e| RegistryError::Network(format!("invalid manifest: {e}")))?;
    writer.start_file("build.json", options)?;
    writer.write_all(manifest_json.as_bytes())?;

    writer.finish()?;
    Ok(file_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn bundles_files_and_skips_env_and_pycache() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("app.py"), b"print(1)").unwrap();
        std::fs::create_dir(dir.path().join("env")).unwrap();
        std::fs::write(dir.path().join("env").join("lib.so"), b"bin").unwrap();
        std::fs::create_dir(dir.path().join("__pycache__")).unwrap();
        std::fs::write(dir.path().join("__pycache__").join("c.pyc"), b"x").unwrap();

        let out = dir.path().join("out.zip");
        let manifest = serde_json::json!({"requirements_hash": "a", "application_hash": "b"});
        let count = bundle_deploy_directory(dir.path(), &manifest, &out).unwrap();

        assert_eq!(count, 1);
        assert!(out.exists());
    }

    #[test]
    fn empty_deploy_dir_is_an_error() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.zip");
        let manifest = serde_json::json!({});
        assert!(bundle_deploy_directory(dir.path(), &manifest, &out).is_err());
    }
}
