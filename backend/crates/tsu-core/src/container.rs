use std::fmt;
use std::path::PathBuf;

/// Ports published by the voice server: voice (UDP), ServerQuery and file
/// transfer (TCP).
pub const PORT_MAPPINGS: [&str; 3] = ["9987:9987/udp", "10011:10011", "30033:30033"];

/// Data directory location inside the container.
pub const CONTAINER_DATA_PATH: &str = "/data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStep {
    Remove,
    Run,
}

impl ContainerStep {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Remove => "remove",
            Self::Run => "run",
        }
    }
}

impl fmt::Display for ContainerStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to recreate: container name, image and the host data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub data_dir: PathBuf,
}

impl ContainerSpec {
    /// Arguments for a forced remove by name.
    pub fn remove_args(&self) -> Vec<String> {
        vec![
            String::from("rm"),
            String::from("-f"),
            self.name.clone(),
        ]
    }

    /// Arguments for a detached run with the fixed port mappings and data mount.
    pub fn run_args(&self) -> Vec<String> {
        let mut args = vec![String::from("run"), String::from("-d")];
        for mapping in PORT_MAPPINGS {
            args.push(String::from("-p"));
            args.push(String::from(mapping));
        }
        args.push(String::from("-v"));
        args.push(format!(
            "{}:{}",
            self.data_dir.display(),
            CONTAINER_DATA_PATH
        ));
        args.push(format!("--name={}", self.name));
        args.push(self.image.clone());
        args
    }
}

/// Exit status and combined stdout/stderr of one runtime invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: Option<i32>,
    pub output: String,
}
