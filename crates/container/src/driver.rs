// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess-based container driver: a narrow adapter that shells out to
//! `docker`/`podman` for image inspection, builds, package
//! installs, build-cache hash derivation, and worker invocation.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tempfile::Builder as TempFileBuilder;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};

use crate::engine::Engine;
use crate::error::ContainerError;
use crate::hash::{parse_hash_output, BuildCacheKeys};
use crate::image::{classify_presence, parse_image_timestamp, ImagePresence};
use crate::tee::tee;

const IMAGE_PREFIX: &str = "datallog-runtime-";

/// A bind-mount volume spec, `host_path:container_path`.
#[derive(Debug, Clone)]
pub struct Volume {
    pub host: PathBuf,
    pub container: String,
}

impl Volume {
    pub fn new(host: impl Into<PathBuf>, container: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            container: container.into(),
        }
    }

    fn as_arg(&self) -> String {
        format!("{}:{}:Z", self.host.display(), self.container)
    }
}

pub struct ContainerDriver {
    engine: Engine,
    runtimes_dir: PathBuf,
}

impl ContainerDriver {
    pub fn new(engine: Engine, runtimes_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            runtimes_dir: runtimes_dir.into(),
        }
    }

    fn image_tag(&self, runtime: &str) -> String {
        format!("{IMAGE_PREFIX}{runtime}")
    }

    fn base_command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(self.engine.binary());
        cmd.args(args);
        cmd.env("DOCKER_BUILDKIT", "1");
        cmd.env("LANG", "C.UTF-8");
        cmd.env("LANGUAGE", "C.UTF-8");
        cmd.env("LC_ALL", "C.UTF-8");
        cmd.env("BUILDKIT_PROGRESS", "plain");
        cmd
    }

    /// Runs a command to completion, teeing stdout/stderr, and mapping a
    /// "cannot connect to daemon" failure to a distinct error kind.
    async fn run_captured(
        &self,
        mut cmd: Command,
        print_output: bool,
    ) -> Result<(String, String), ContainerError> {
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        let mut child = cmd.spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("child stdout not piped"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("child stderr not piped"))?;
        let stdout_buf = tee(stdout, print_output, false);
        let stderr_buf = tee(stderr, print_output, true);

        let status = child.wait().await?;
        let stdout = stdout_buf.await.lock().clone();
        let stderr = stderr_buf.await.lock().clone();

        if status.success() {
            Ok((stdout, stderr))
        } else if stderr.contains("Cannot connect to the Docker daemon") {
            Err(ContainerError::EngineUnreachable)
        } else {
            Err(ContainerError::EngineFailure { stdout, stderr })
        }
    }

    pub async fn image_exists(&self, runtime: &str) -> Result<ImagePresence, ContainerError> {
        let tag = self.image_tag(runtime);
        let ids = self
            .base_command(&["images", "-q", &tag])
            .output()
            .await?;
        let id = String::from_utf8_lossy(&ids.stdout).trim().to_string();
        if id.is_empty() {
            return Ok(ImagePresence::Absent);
        }

        let inspect = self
            .base_command(&["inspect", "-f", "{{ .Created }}", &tag])
            .output()
            .await?;
        let raw = String::from_utf8_lossy(&inspect.stdout).trim().to_string();
        let created = parse_image_timestamp(&raw)?;

        let dockerfile = self.runtimes_dir.join(runtime);
        let mtime = std::fs::metadata(&dockerfile)
            .and_then(|m| m.modified())
            .ok()
            .map(chrono::DateTime::<chrono::Utc>::from);

        if mtime.is_none() {
            return Ok(ImagePresence::Absent);
        }

        Ok(classify_presence(Some(created), mtime))
    }

    pub async fn build(&self, runtime: &str) -> Result<(), ContainerError> {
        let tag = self.image_tag(runtime);
        let dockerfile = self.runtimes_dir.join(runtime);
        let mut cmd = self.base_command(&[
            "buildx",
            "build",
            "--no-cache",
            "--platform",
            "linux/amd64",
            "-t",
            &tag,
            "-f",
            &dockerfile.to_string_lossy(),
            &self.runtimes_dir.to_string_lossy(),
        ]);
        cmd.current_dir(&self.runtimes_dir);
        self.run_captured(cmd, true)
            .await
            .map_err(|_| ContainerError::BuildFailed {
                runtime: runtime.to_string(),
            })?;
        Ok(())
    }

    /// `run --rm -it <volumes> <user-mapping> --platform linux/amd64 <extra>
    /// datallog-runtime-<image> <command> <args...>`.
    pub async fn run(
        &self,
        image: &str,
        command: &str,
        args: &[String],
        volumes: &[Volume],
        extra_args: &[String],
        print_output: bool,
    ) -> Result<(String, String), ContainerError> {
        let tag = self.image_tag(image);
        let mut argv: Vec<String> = vec!["run".into()];
        for vol in volumes {
            argv.push("-v".into());
            argv.push(vol.as_arg());
        }
        argv.push("--rm".into());
        argv.push("-it".into());
        argv.extend(self.engine.user_mapping_args());
        argv.push("--platform".into());
        argv.push("linux/amd64".into());
        argv.extend(extra_args.iter().cloned());
        argv.push(tag);
        argv.push(command.to_string());
        argv.extend(args.iter().cloned());

        let refs: Vec<&str> = argv.iter().map(String::as_str).collect();
        let cmd = self.base_command(&refs);
        self.run_captured(cmd, print_output).await
    }

    pub async fn install_packages(
        &self,
        requirements_file: &Path,
        env_dir: &Path,
        image: &str,
    ) -> Result<(), ContainerError> {
        self.install(requirements_file, env_dir, image, None, &[])
            .await
    }

    pub async fn install_from_requirements(
        &self,
        requirements_file: &Path,
        extra_input: &Path,
        env_dir: &Path,
        image: &str,
    ) -> Result<(), ContainerError> {
        self.install(
            requirements_file,
            env_dir,
            image,
            Some("requirements"),
            &[Volume::new(extra_input, "/extra_input")],
        )
        .await
    }

    pub async fn install_from_packages_list(
        &self,
        packages_file: &Path,
        env_dir: &Path,
        image: &str,
    ) -> Result<(), ContainerError> {
        self.install(packages_file, env_dir, image, Some("packages-list"), &[])
            .await
    }

    async fn install(
        &self,
        requirements_file: &Path,
        env_dir: &Path,
        image: &str,
        mode: Option<&str>,
        extra_volumes: &[Volume],
    ) -> Result<(), ContainerError> {
        let mut volumes = vec![
            Volume::new(requirements_file, "/requirements.txt"),
            Volume::new(env_dir, "/env"),
        ];
        volumes.extend(extra_volumes.iter().cloned());
        let args: Vec<String> = mode.into_iter().map(str::to_string).collect();
        self.run(image, "/install_packages.sh", &args, &volumes, &[], true)
            .await?;
        Ok(())
    }

    pub async fn generate_hash(
        &self,
        deploy_dir: &Path,
        env_dir: &Path,
        image: &str,
    ) -> Result<BuildCacheKeys, ContainerError> {
        let volumes = vec![
            Volume::new(deploy_dir, "/deploy"),
            Volume::new(env_dir, "/env"),
        ];
        let (stdout, _stderr) = self
            .run(image, "/gen_hash.sh", &[], &volumes, &[], false)
            .await?;
        parse_hash_output(&stdout)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn spawn_worker(
        &self,
        image: &str,
        env_dir: &Path,
        deploy_dir: &Path,
        socket_path: &Path,
        worker_id: u64,
        log_to_dir: Option<&Path>,
    ) -> Result<Child, ContainerError> {
        let tag = self.image_tag(image);
        let mut argv: Vec<String> = vec!["run".into()];
        argv.push("-v".into());
        argv.push(Volume::new(env_dir, "/env").as_arg());
        argv.push("-v".into());
        argv.push(Volume::new(deploy_dir, "/deploy").as_arg());
        argv.push("-v".into());
        argv.push(Volume::new(socket_path, "/tmp/datallog_worker.sock").as_arg());
        if let Some(log_dir) = log_to_dir {
            argv.push("-v".into());
            argv.push(Volume::new(log_dir, "/logs").as_arg());
        }
        argv.push("--rm".into());
        argv.push("-it".into());
        argv.extend(self.engine.user_mapping_args());
        argv.push("--platform".into());
        argv.push("linux/amd64".into());
        argv.push("-w".into());
        argv.push("/deploy".into());
        argv.push(tag);
        argv.push("/env/bin/python".into());
        argv.push("-m".into());
        argv.push("datallog.utils.worker".into());
        argv.push(worker_id.to_string());

        let refs: Vec<&str> = argv.iter().map(String::as_str).collect();
        let mut cmd = self.base_command(&refs);
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
        cmd.stdin(Stdio::inherit());
        Ok(cmd.spawn()?)
    }

    pub async fn generate_build(
        &self,
        image: &str,
        deploy_dir: &Path,
        env_dir: &Path,
    ) -> Result<serde_json::Value, ContainerError> {
        let build_file = TempFileBuilder::new().suffix(".json").tempfile()?;
        let build_path = build_file.path().to_path_buf();

        let volumes = vec![
            Volume::new(deploy_dir, "/deploy"),
            Volume::new(env_dir, "/env"),
            Volume::new(&build_path, "/build.json"),
        ];
        self.run(
            image,
            "/env/bin/python",
            &["-m".into(), "datallog.utils.generate_build_file".into()],
            &volumes,
            &["-w".into(), "/deploy".into()],
            false,
        )
        .await?;

        let mut contents = String::new();
        tokio::fs::File::open(&build_path)
            .await?
            .read_to_string(&mut contents)
            .await?;
        serde_json::from_str(&contents).map_err(|e| ContainerError::EngineFailure {
            stdout: String::new(),
            stderr: format!("invalid build manifest: {e}"),
        })
    }
}
