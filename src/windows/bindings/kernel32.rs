//! Kernel32.dll bindings for process handles and memory transfer

use crate::core::types::{MemoryError, MemoryResult};
use crate::windows::utils::ErrorCode;
use winapi::shared::minwindef::{DWORD, FALSE, LPCVOID, LPVOID};
use winapi::um::handleapi::CloseHandle;
use winapi::um::memoryapi::{ReadProcessMemory, WriteProcessMemory};
use winapi::um::minwinbase::STILL_ACTIVE;
use winapi::um::processthreadsapi::{GetExitCodeProcess, OpenProcess};
use winapi::um::winnt::HANDLE;

/// Safe wrapper for OpenProcess
pub fn open_process(pid: u32, desired_access: u32) -> MemoryResult<HANDLE> {
    let handle = unsafe { OpenProcess(desired_access, FALSE, pid) };
    if !handle.is_null() {
        return Ok(handle);
    }
    match ErrorCode::last_error() {
        ErrorCode::AccessDenied => Err(MemoryError::access_denied(
            pid,
            "OpenProcess refused read/write access",
        )),
        ErrorCode::InvalidParameter => Err(MemoryError::ProcessNotFound(format!("PID: {}", pid))),
        code => Err(MemoryError::WindowsApi(format!(
            "OpenProcess({}) failed: {}",
            pid, code
        ))),
    }
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle
pub unsafe fn close_handle(handle: HANDLE) -> MemoryResult<()> {
    if handle.is_null() {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(MemoryError::WindowsApi(format!(
            "CloseHandle failed: {}",
            ErrorCode::last_error()
        )))
    } else {
        Ok(())
    }
}

/// Safe wrapper for ReadProcessMemory.
///
/// Returns the number of bytes copied; the caller decides whether a short
/// copy is an error.
///
/// # Safety
/// The handle must be a valid process handle opened with `PROCESS_VM_READ`
pub unsafe fn read_process_memory(
    handle: HANDLE,
    address: u64,
    buffer: &mut [u8],
) -> Result<usize, ErrorCode> {
    let mut bytes_read = 0;

    let result = ReadProcessMemory(
        handle,
        address as usize as LPCVOID,
        buffer.as_mut_ptr() as LPVOID,
        buffer.len(),
        &mut bytes_read,
    );

    if result == FALSE {
        Err(ErrorCode::last_error())
    } else {
        Ok(bytes_read)
    }
}

/// Safe wrapper for WriteProcessMemory
///
/// # Safety
/// The handle must be a valid process handle opened with `PROCESS_VM_WRITE`
pub unsafe fn write_process_memory(
    handle: HANDLE,
    address: u64,
    data: &[u8],
) -> Result<usize, ErrorCode> {
    let mut bytes_written = 0;

    let result = WriteProcessMemory(
        handle,
        address as usize as LPVOID,
        data.as_ptr() as LPCVOID,
        data.len(),
        &mut bytes_written,
    );

    if result == FALSE {
        Err(ErrorCode::last_error())
    } else {
        Ok(bytes_written)
    }
}

/// True while the process behind `handle` is still running.
///
/// A handle the exit code cannot be queried through counts as gone.
///
/// # Safety
/// The handle must be a process handle opened with query access
pub unsafe fn process_is_alive(handle: HANDLE) -> bool {
    let mut code: DWORD = 0;
    if GetExitCodeProcess(handle, &mut code) == FALSE {
        return false;
    }
    code == STILL_ACTIVE
}
