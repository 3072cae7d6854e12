//! Lock file that keeps scheduled runs from overlapping.
//!
//! Exclusion comes from an OS advisory lock (`flock` / `LockFileEx`) on a
//! file that is never deleted. The kernel drops the lock when the owning
//! process exits. The JSON inside is informational only.

use crate::{UpdaterError, UpdaterResult};

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::panic::Location;
use std::path::{Path, PathBuf};

use error_location::ErrorLocation;
use log::debug;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

#[cfg(unix)]
const LOCK_FILE_MODE: u32 = 0o600; // Owner read/write only

/// Held for the duration of one update run.
#[derive(Debug)]
pub struct LockFile {
    path: PathBuf,
    file: Option<File>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct LockInfo {
    pid: u32,
    started_at: String,
}

impl LockFile {
    /// Try to acquire the lock file.
    ///
    /// Fails with `AlreadyRunning` while another process (or another handle
    /// in this process) holds it. Content left behind by a crashed run does
    /// not matter.
    pub fn acquire(path: &Path) -> UpdaterResult<Self> {
        let file =
            Self::open(path).map_err(|e| UpdaterError::lock_acquisition(path.to_path_buf(), e))?;

        let locked = Self::try_lock_exclusive(&file)
            .map_err(|e| UpdaterError::lock_acquisition(path.to_path_buf(), e))?;
        if !locked {
            return Err(UpdaterError::AlreadyRunning {
                path: path.to_path_buf(),
                owner: Self::describe_owner(path),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Self::write_info(&file)
            .map_err(|e| UpdaterError::lock_acquisition(path.to_path_buf(), e))?;
        debug!("Locked {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open (creating if needed) without truncating; the holder may be
    /// reading its own record.
    fn open(path: &Path) -> std::io::Result<File> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            std::fs::create_dir_all(dir)?;
        }

        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true).truncate(false);
        #[cfg(unix)]
        options.mode(LOCK_FILE_MODE);

        options.open(path)
    }

    /// Replace the file content with the current process info. Only called
    /// while the OS lock is held.
    fn write_info(mut file: &File) -> std::io::Result<()> {
        let info = LockInfo {
            pid: std::process::id(),
            started_at: chrono::Utc::now().to_rfc3339(),
        };
        let content = serde_json::to_string_pretty(&info)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;

        file.set_len(0)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()
    }

    /// Best-effort description of the current holder for error output.
    fn describe_owner(path: &Path) -> String {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str::<LockInfo>(&content).ok())
            .map(|info| format!("PID {} since {}", info.pid, info.started_at))
            .unwrap_or_else(|| String::from("unknown owner"))
    }

    /// Non-blocking exclusive lock. `Ok(false)` means someone else holds it.
    #[cfg(unix)]
    fn try_lock_exclusive(file: &File) -> std::io::Result<bool> {
        use std::os::unix::io::AsRawFd;

        // flock locks belong to the open file description, so two handles
        // in one process also exclude each other.
        let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
        if rc == 0 {
            return Ok(true);
        }

        let err = std::io::Error::last_os_error();
        if err.kind() == ErrorKind::WouldBlock {
            Ok(false)
        } else {
            Err(err)
        }
    }

    /// Non-blocking exclusive lock (Windows).
    #[cfg(windows)]
    fn try_lock_exclusive(file: &File) -> std::io::Result<bool> {
        use std::os::windows::io::AsRawHandle;
        use windows_sys::Win32::Foundation::ERROR_LOCK_VIOLATION;
        use windows_sys::Win32::Storage::FileSystem::{
            LOCKFILE_EXCLUSIVE_LOCK, LOCKFILE_FAIL_IMMEDIATELY, LockFileEx,
        };
        use windows_sys::Win32::System::IO::OVERLAPPED;

        unsafe {
            let mut overlapped: OVERLAPPED = std::mem::zeroed();
            let ok = LockFileEx(
                file.as_raw_handle(),
                LOCKFILE_EXCLUSIVE_LOCK | LOCKFILE_FAIL_IMMEDIATELY,
                0,
                u32::MAX,
                u32::MAX,
                &mut overlapped,
            );
            if ok != 0 {
                return Ok(true);
            }
        }

        let err = std::io::Error::last_os_error();
        if err.raw_os_error() == Some(ERROR_LOCK_VIOLATION as i32) {
            Ok(false)
        } else {
            Err(err)
        }
    }

    /// Release the lock. Also called on drop.
    ///
    /// The file stays in place: an acquirer may already hold a handle to it.
    pub fn release(&mut self) {
        if let Some(file) = self.file.take() {
            file.set_len(0).ok();
            // Closing the handle drops the OS lock.
            drop(file);
        }
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        self.release();
    }
}
