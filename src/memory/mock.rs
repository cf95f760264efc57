//! Mock foreign memory
//!
//! A sparse, byte-addressed stand-in for a live process used by unit and
//! integration tests. Unmapped bytes fail to read, like unmapped pages.

use super::{ForeignMemory, ProcessLocator};
use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MockState {
    bytes: HashMap<u64, u8>,
    faults: Vec<(u64, u64)>,
    exited: Option<ProcessId>,
    reads: Vec<(Address, usize)>,
    writes: Vec<(Address, usize)>,
}

impl MockState {
    fn faulted(&self, start: u64, len: usize) -> bool {
        let end = start.saturating_add(len as u64);
        self.faults
            .iter()
            .any(|&(lo, hi)| start < hi && lo < end)
    }
}

/// Cloneable handle to shared mock memory
#[derive(Debug, Clone, Default)]
pub struct MockMemory {
    state: Arc<Mutex<MockState>>,
}

impl MockMemory {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the memory from the others
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Maps `len` zero bytes at `address`, keeping bytes already present
    pub fn map(&self, address: Address, len: usize) {
        let mut state = self.state();
        for i in 0..len as u64 {
            state.bytes.entry(address.as_u64() + i).or_insert(0);
        }
    }

    /// Stores bytes directly, mapping them if needed
    pub fn poke(&self, address: Address, data: &[u8]) {
        let mut state = self.state();
        for (i, b) in data.iter().enumerate() {
            state.bytes.insert(address.as_u64() + i as u64, *b);
        }
    }

    pub fn poke_u8(&self, address: Address, value: u8) {
        self.poke(address, &[value]);
    }

    pub fn poke_u16(&self, address: Address, value: u16) {
        self.poke(address, &value.to_le_bytes());
    }

    pub fn poke_u32(&self, address: Address, value: u32) {
        self.poke(address, &value.to_le_bytes());
    }

    pub fn poke_u64(&self, address: Address, value: u64) {
        self.poke(address, &value.to_le_bytes());
    }

    /// Stores a fixed-width UTF-16LE string
    pub fn poke_wide(&self, address: Address, text: &str, max_chars: usize) {
        self.poke(address, &super::encode_wide_fixed(text, max_chars));
    }

    /// Reads bytes without logging; `None` if any byte is unmapped
    pub fn peek(&self, address: Address, len: usize) -> Option<Vec<u8>> {
        let state = self.state();
        (0..len as u64)
            .map(|i| state.bytes.get(&(address.as_u64() + i)).copied())
            .collect()
    }

    /// Makes every access overlapping the range fail
    pub fn fault(&self, address: Address, len: usize) {
        let start = address.as_u64();
        self.state()
            .faults
            .push((start, start.saturating_add(len as u64)));
    }

    /// Simulates the target process exiting
    pub fn terminate(&self, pid: ProcessId) {
        self.state().exited = Some(pid);
    }

    /// Whether any read started at `address`
    pub fn was_read(&self, address: Address) -> bool {
        self.state().reads.iter().any(|&(a, _)| a == address)
    }

    pub fn read_count(&self) -> usize {
        self.state().reads.len()
    }

    pub fn write_count(&self) -> usize {
        self.state().writes.len()
    }

    pub fn clear_log(&self) {
        let mut state = self.state();
        state.reads.clear();
        state.writes.clear();
    }
}

impl ForeignMemory for MockMemory {
    fn read_bytes(&self, address: Address, len: usize) -> MemoryResult<Vec<u8>> {
        let mut state = self.state();
        state.reads.push((address, len));
        if let Some(pid) = state.exited {
            return Err(MemoryError::ProcessExited(pid));
        }
        if state.faulted(address.as_u64(), len) {
            return Err(MemoryError::read_failed(address, "injected fault"));
        }
        (0..len as u64)
            .map(|i| state.bytes.get(&(address.as_u64().wrapping_add(i))).copied())
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(|| MemoryError::read_failed(address, "unmapped"))
    }

    fn write_bytes(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        let mut state = self.state();
        state.writes.push((address, data.len()));
        if let Some(pid) = state.exited {
            return Err(MemoryError::ProcessExited(pid));
        }
        if state.faulted(address.as_u64(), data.len()) {
            return Err(MemoryError::write_failed(address, "injected fault"));
        }
        let base = address.as_u64();
        let mapped = (0..data.len() as u64).all(|i| state.bytes.contains_key(&(base + i)));
        if !mapped {
            return Err(MemoryError::write_failed(address, "unmapped"));
        }
        for (i, b) in data.iter().enumerate() {
            state.bytes.insert(base + i as u64, *b);
        }
        Ok(())
    }
}

/// Process locator serving a single [`MockMemory`]
#[derive(Debug, Clone, Default)]
pub struct MockProcessLocator {
    pub memory: MockMemory,
    processes: Vec<(String, ProcessId)>,
    modules: Vec<(String, Address)>,
    denied: Vec<ProcessId>,
}

impl MockProcessLocator {
    pub fn new(memory: MockMemory) -> Self {
        MockProcessLocator {
            memory,
            ..Default::default()
        }
    }

    pub fn with_process(mut self, name: &str, pid: ProcessId) -> Self {
        self.processes.push((name.to_string(), pid));
        self
    }

    pub fn with_module(mut self, name: &str, base: Address) -> Self {
        self.modules.push((name.to_string(), base));
        self
    }

    pub fn deny(mut self, pid: ProcessId) -> Self {
        self.denied.push(pid);
        self
    }
}

impl ProcessLocator for MockProcessLocator {
    type Memory = MockMemory;

    fn find_process(&self, name: &str) -> MemoryResult<ProcessId> {
        self.processes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, pid)| pid)
            .ok_or_else(|| MemoryError::ProcessNotFound(name.to_string()))
    }

    fn open(&self, pid: ProcessId) -> MemoryResult<MockMemory> {
        if self.denied.contains(&pid) {
            return Err(MemoryError::access_denied(pid, "mock denial"));
        }
        Ok(self.memory.clone())
    }

    fn module_base(&self, _memory: &MockMemory, module: &str) -> MemoryResult<Address> {
        self.modules
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(module))
            .map(|&(_, base)| base)
            .ok_or_else(|| MemoryError::ModuleNotFound(module.to_string()))
    }
}
