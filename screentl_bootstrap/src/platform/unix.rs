// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! POSIX platform implementation (Linux, macOS) backed by `libc`.

use super::{Platform, PlatformError};
use async_trait::async_trait;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub struct UnixPlatform;

impl UnixPlatform {
    pub fn new() -> Self {
        Self
    }

    fn get_page_size_impl() -> usize {
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if size > 0 {
            size as usize
        } else {
            4096
        }
    }

    fn get_cpu_count_impl() -> usize {
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    }

    /// Reads `/proc/meminfo` for total/available memory. Falls back to
    /// `sysconf` (total only, no "available" concept) when `/proc` is
    /// absent, as on macOS.
    fn get_memory_info_impl() -> Result<(u64, u64), PlatformError> {
        if let Ok(contents) = std::fs::read_to_string("/proc/meminfo") {
            let mut total = None;
            let mut available = None;
            for line in contents.lines() {
                if let Some(rest) = line.strip_prefix("MemTotal:") {
                    total = parse_meminfo_kb(rest);
                } else if let Some(rest) = line.strip_prefix("MemAvailable:") {
                    available = parse_meminfo_kb(rest);
                }
            }
            if let (Some(total), Some(available)) = (total, available) {
                return Ok((total, available));
            }
        }

        let page_size = Self::get_page_size_impl() as u64;
        let total_pages = unsafe { libc::sysconf(libc::_SC_PHYS_PAGES) };
        if total_pages > 0 {
            let total = total_pages as u64 * page_size;
            Ok((total, total))
        } else {
            Err(PlatformError::NotSupported("unable to determine system memory".to_string()))
        }
    }
}

fn parse_meminfo_kb(rest: &str) -> Option<u64> {
    rest.trim().strip_suffix(" kB").and_then(|n| n.trim().parse::<u64>().ok()).map(|kb| kb * 1024)
}

impl Default for UnixPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Platform for UnixPlatform {
    fn page_size(&self) -> usize {
        Self::get_page_size_impl()
    }

    fn cpu_count(&self) -> usize {
        Self::get_cpu_count_impl()
    }

    fn total_memory(&self) -> Result<u64, PlatformError> {
        Self::get_memory_info_impl().map(|(total, _)| total)
    }

    fn available_memory(&self) -> Result<u64, PlatformError> {
        Self::get_memory_info_impl().map(|(_, available)| available)
    }

    fn line_separator(&self) -> &'static str {
        "\n"
    }

    fn path_separator(&self) -> char {
        ':'
    }

    fn platform_name(&self) -> &'static str {
        if cfg!(target_os = "macos") {
            "macos"
        } else {
            "linux"
        }
    }

    fn temp_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }

    fn is_elevated(&self) -> bool {
        unsafe { libc::geteuid() == 0 }
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<(), PlatformError> {
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(PlatformError::Io)
    }

    fn is_executable(&self, path: &Path) -> bool {
        std::fs::metadata(path)
            .map(|meta| meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    async fn sync_file(&self, file: &tokio::fs::File) -> Result<(), PlatformError> {
        file.sync_all().await?;
        Ok(())
    }
}
