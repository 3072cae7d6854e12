#![allow(dead_code)]

//! Test infrastructure for tsu-updater integration tests

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// Start a fake ServerQuery endpoint reporting `version`. Serves one client.
pub async fn start_query_server(version: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();

    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let (read_half, mut write_half) = stream.into_split();
        let greeting = "TS3\n\rWelcome to the TeamSpeak 3 ServerQuery interface.\n\r";
        if write_half.write_all(greeting.as_bytes()).await.is_err() {
            return;
        }

        let mut lines = BufReader::new(read_half).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let reply = match line.as_str() {
                "version" => format!(
                    "version={} build=1500452811 platform=Linux\n\rerror id=0 msg=ok\n\r",
                    version
                ),
                "quit" => break,
                _ => String::from("error id=256 msg=command\\snot\\sfound\n\r"),
            };
            if write_half.write_all(reply.as_bytes()).await.is_err() {
                break;
            }
        }
    });

    address
}

/// A shell script standing in for the container runtime.
///
/// Every invocation appends its arguments to `calls.log`; `rm` and `run`
/// exit with the given status codes.
pub struct FakeRuntime {
    pub dir: TempDir,
    pub script: PathBuf,
    pub log: PathBuf,
}

impl FakeRuntime {
    #[cfg(unix)]
    pub fn new(rm_status: i32, run_status: i32) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let script = dir.path().join("fake-docker");
        let log = dir.path().join("calls.log");
        let body = format!(
            "#!/bin/sh\n\
             echo \"$@\" >> '{log}'\n\
             case \"$1\" in\n\
               rm) echo \"$3\"; exit {rm_status} ;;\n\
               run) echo 4f1c2d; echo 'Unable to find image locally' >&2; exit {run_status} ;;\n\
             esac\n",
            log = log.display(),
        );
        std::fs::write(&script, body).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir, script, log }
    }

    pub fn runtime(&self) -> String {
        self.script.display().to_string()
    }

    /// Recorded invocations, one argument string per call.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .map(|s| s.lines().map(String::from).collect())
            .unwrap_or_default()
    }
}

/// Data directory containing a server database with `contents`.
pub fn data_dir_with_database(contents: &[u8]) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(tsu_core::DATABASE_FILENAME), contents).unwrap();
    dir
}

pub fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}
