//! Container runtime driven through its CLI.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::info;
use tokio::process::Command;
use tsu_core::{
    CommandOutput, ContainerController, ContainerSpec, ContainerStep, CoreError, CoreResult,
};

/// `docker` (or a compatible runtime such as `podman`) invoked as a child process.
pub struct DockerCli {
    runtime: String,
    timeout: Duration,
}

impl DockerCli {
    pub fn new(runtime: &str, timeout: Duration) -> Self {
        Self {
            runtime: runtime.to_string(),
            timeout,
        }
    }

    async fn invoke(&self, step: ContainerStep, args: Vec<String>) -> CoreResult<CommandOutput> {
        info!("{} {}", self.runtime, args.join(" "));

        let child = Command::new(&self.runtime)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, child).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(CoreError::container(
                    step,
                    format!("failed to start {}: {}", self.runtime, e),
                    String::new(),
                ));
            }
            Err(_) => {
                return Err(CoreError::container(
                    step,
                    format!("timed out after {}s", self.timeout.as_secs()),
                    String::new(),
                ));
            }
        };

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(CoreError::container(
                step,
                format!("{} exited with {}", self.runtime, output.status),
                combined,
            ));
        }

        Ok(CommandOutput {
            status: output.status.code(),
            output: combined,
        })
    }
}

#[async_trait]
impl ContainerController for DockerCli {
    async fn remove(&self, spec: &ContainerSpec) -> CoreResult<CommandOutput> {
        self.invoke(ContainerStep::Remove, spec.remove_args()).await
    }

    async fn run(&self, spec: &ContainerSpec) -> CoreResult<CommandOutput> {
        self.invoke(ContainerStep::Run, spec.run_args()).await
    }
}
