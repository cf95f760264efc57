//! PSAPI.dll bindings for module lookup

use crate::core::types::{MemoryError, MemoryResult};
use crate::windows::utils::{wide_to_string, ErrorCode};
use std::mem;
use winapi::shared::minwindef::{FALSE, HMODULE, MAX_PATH};
use winapi::um::psapi::{EnumProcessModules, GetModuleBaseNameW, GetModuleInformation, MODULEINFO};
use winapi::um::winnt::HANDLE;

/// Safe wrapper for EnumProcessModules, growing the buffer until every
/// module fits
///
/// # Safety
/// The handle must be a valid process handle
pub unsafe fn enum_process_modules(handle: HANDLE) -> MemoryResult<Vec<HMODULE>> {
    let mut modules: Vec<HMODULE> = vec![std::ptr::null_mut(); 1024];

    loop {
        let mut bytes_needed = 0u32;
        let capacity = (modules.len() * mem::size_of::<HMODULE>()) as u32;
        let result = EnumProcessModules(handle, modules.as_mut_ptr(), capacity, &mut bytes_needed);

        if result == FALSE {
            return Err(MemoryError::WindowsApi(format!(
                "EnumProcessModules failed: {}",
                ErrorCode::last_error()
            )));
        }

        let count = bytes_needed as usize / mem::size_of::<HMODULE>();
        if bytes_needed <= capacity {
            modules.truncate(count);
            return Ok(modules);
        }
        modules.resize(count, std::ptr::null_mut());
    }
}

/// Safe wrapper for GetModuleBaseNameW
///
/// # Safety
/// The handle must be a valid process handle and module must be valid
pub unsafe fn get_module_base_name(handle: HANDLE, module: HMODULE) -> MemoryResult<String> {
    let mut buffer = [0u16; MAX_PATH];

    let length = GetModuleBaseNameW(handle, module, buffer.as_mut_ptr(), MAX_PATH as u32);
    if length == 0 {
        return Err(MemoryError::WindowsApi(format!(
            "GetModuleBaseNameW failed: {}",
            ErrorCode::last_error()
        )));
    }

    Ok(wide_to_string(&buffer[..length as usize]))
}

/// Load address of `module` in the process
///
/// # Safety
/// The handle must be a valid process handle and module must be valid
pub unsafe fn get_module_base(handle: HANDLE, module: HMODULE) -> MemoryResult<u64> {
    let mut info: MODULEINFO = mem::zeroed();

    let result = GetModuleInformation(
        handle,
        module,
        &mut info,
        mem::size_of::<MODULEINFO>() as u32,
    );
    if result == FALSE {
        return Err(MemoryError::WindowsApi(format!(
            "GetModuleInformation failed: {}",
            ErrorCode::last_error()
        )));
    }

    Ok(info.lpBaseOfDll as usize as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_null_handle_operations() {
        unsafe {
            assert!(enum_process_modules(ptr::null_mut()).is_err());
            assert!(get_module_base(ptr::null_mut(), ptr::null_mut()).is_err());
            assert!(get_module_base_name(ptr::null_mut(), ptr::null_mut()).is_err());
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_current_process_modules() {
        unsafe {
            let current = winapi::um::processthreadsapi::GetCurrentProcess();
            let modules = enum_process_modules(current).unwrap();
            assert!(!modules.is_empty());

            // The executable image is always listed first
            let name = get_module_base_name(current, modules[0]).unwrap();
            assert!(!name.is_empty());
            assert_ne!(get_module_base(current, modules[0]).unwrap(), 0);
        }
    }
}
