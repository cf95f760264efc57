//! Finding and opening the game process

use super::ProcessHandle;
use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use crate::memory::ProcessLocator;
use crate::windows::bindings::{psapi, ProcessSnapshot};
use crate::windows::utils::image_name_matches;
use tracing::{debug, info};

/// [`ProcessLocator`] backed by ToolHelp32 and PSAPI
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsProcessLocator;

impl WindowsProcessLocator {
    pub fn new() -> Self {
        WindowsProcessLocator
    }
}

impl ProcessLocator for WindowsProcessLocator {
    type Memory = ProcessHandle;

    fn find_process(&self, name: &str) -> MemoryResult<ProcessId> {
        let entry = ProcessSnapshot::new()?
            .find(|entry| image_name_matches(&entry.exe_name, name))
            .ok_or_else(|| MemoryError::ProcessNotFound(name.to_string()))?;
        info!("Found {} with PID {}", entry.exe_name, entry.pid);
        Ok(entry.pid)
    }

    fn open(&self, pid: ProcessId) -> MemoryResult<ProcessHandle> {
        let handle = ProcessHandle::open(pid)?;
        debug!("Opened process {} for read/write", pid);
        Ok(handle)
    }

    fn module_base(&self, memory: &ProcessHandle, module: &str) -> MemoryResult<Address> {
        unsafe {
            let raw = memory.raw();
            for hmodule in psapi::enum_process_modules(raw)? {
                let Ok(name) = psapi::get_module_base_name(raw, hmodule) else {
                    continue;
                };
                if image_name_matches(&name, module) {
                    let base = Address::new(psapi::get_module_base(raw, hmodule)?);
                    debug!("Module {} loaded at {}", name, base);
                    return Ok(base);
                }
            }
        }
        Err(MemoryError::ModuleNotFound(module.to_string()))
    }
}
