//! ToolHelp32 process snapshots

use crate::core::types::{MemoryError, MemoryResult, ProcessId};
use crate::windows::types::Handle;
use crate::windows::utils::{wide_to_string, ErrorCode};
use std::mem;
use winapi::shared::minwindef::FALSE;
use winapi::um::tlhelp32::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};

/// One running process as the snapshot saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: ProcessId,
    pub exe_name: String,
}

/// Iterator over a process snapshot
pub struct ProcessSnapshot {
    snapshot: Handle,
    first_called: bool,
}

impl ProcessSnapshot {
    /// Takes a snapshot of every running process
    pub fn new() -> MemoryResult<Self> {
        let raw = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) };
        let snapshot = Handle::new(raw);
        if !snapshot.is_valid() {
            return Err(MemoryError::WindowsApi(format!(
                "Failed to create process snapshot: {}",
                ErrorCode::last_error()
            )));
        }
        Ok(ProcessSnapshot {
            snapshot,
            first_called: false,
        })
    }
}

impl Iterator for ProcessSnapshot {
    type Item = ProcessEntry;

    fn next(&mut self) -> Option<Self::Item> {
        unsafe {
            let mut entry: PROCESSENTRY32W = mem::zeroed();
            entry.dwSize = mem::size_of::<PROCESSENTRY32W>() as u32;

            let success = if self.first_called {
                Process32NextW(self.snapshot.raw(), &mut entry)
            } else {
                self.first_called = true;
                Process32FirstW(self.snapshot.raw(), &mut entry)
            };
            if success == FALSE {
                return None;
            }

            Some(ProcessEntry {
                pid: entry.th32ProcessID,
                exe_name: wide_to_string(&entry.szExeFile),
            })
        }
    }
}
