//! Table base resolution
//!
//! A table's address moves between game builds. Each [`TableResolver`] holds
//! an ordered list of [`LocateTable`] strategies; the first candidate that
//! passes the table's validator wins and is cached until invalidated.

pub mod validators;

pub use validators::{validate_player_table, validate_team_table};

use crate::core::types::{Address, MemoryResult};
use crate::memory::{ForeignMemory, MemoryReadExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// One way of producing a candidate table base
pub trait LocateTable: fmt::Debug + Send + Sync {
    /// Computes a candidate; read failures reject only this strategy
    fn candidate(&self, memory: &dyn ForeignMemory, module_base: Address) -> MemoryResult<Address>;
}

/// `[[module_base + rva] (+ deref)] + final_offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerChain {
    pub rva: u64,
    pub final_offset: u64,
    #[serde(default)]
    pub extra_deref: bool,
}

impl PointerChain {
    pub const fn new(rva: u64, final_offset: u64, extra_deref: bool) -> Self {
        PointerChain {
            rva,
            final_offset,
            extra_deref,
        }
    }
}

impl LocateTable for PointerChain {
    fn candidate(&self, memory: &dyn ForeignMemory, module_base: Address) -> MemoryResult<Address> {
        let mut ptr = memory.read_ptr(module_base.offset(self.rva))?;
        if self.extra_deref {
            ptr = memory.read_ptr(ptr)?;
        }
        Ok(ptr.offset(self.final_offset))
    }
}

/// `module_base + rva`, no dereference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticOffset {
    pub rva: u64,
}

impl LocateTable for StaticOffset {
    fn candidate(&self, _memory: &dyn ForeignMemory, module_base: Address) -> MemoryResult<Address> {
        Ok(module_base.offset(self.rva))
    }
}

/// Resolves and caches the base of one record table
#[derive(Debug)]
pub struct TableResolver {
    table: String,
    strategies: Vec<Box<dyn LocateTable>>,
    cached: Option<Address>,
}

impl TableResolver {
    pub fn new(table: impl Into<String>) -> Self {
        TableResolver {
            table: table.into(),
            strategies: Vec::new(),
            cached: None,
        }
    }

    /// Builds a resolver from pointer chains followed by an optional static base
    pub fn from_chains(
        table: impl Into<String>,
        chains: &[PointerChain],
        static_rva: Option<u64>,
    ) -> Self {
        let mut resolver = Self::new(table);
        for chain in chains {
            resolver.push(Box::new(*chain));
        }
        if let Some(rva) = static_rva {
            resolver.push(Box::new(StaticOffset { rva }));
        }
        resolver
    }

    /// Appends a strategy; earlier strategies take precedence
    pub fn push(&mut self, strategy: Box<dyn LocateTable>) {
        self.strategies.push(strategy);
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn cached(&self) -> Option<Address> {
        self.cached
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Returns the cached base or tries every strategy in order.
    ///
    /// Strategies after the first accepted candidate are never evaluated.
    pub fn resolve<F>(
        &mut self,
        memory: &dyn ForeignMemory,
        module_base: Address,
        validator: F,
    ) -> Option<Address>
    where
        F: Fn(&dyn ForeignMemory, Address) -> bool,
    {
        if let Some(base) = self.cached {
            return Some(base);
        }

        for (i, strategy) in self.strategies.iter().enumerate() {
            match strategy.candidate(memory, module_base) {
                Ok(candidate) if validator(memory, candidate) => {
                    info!(
                        "{} table resolved at {} via strategy {} ({:?})",
                        self.table, candidate, i, strategy
                    );
                    self.cached = Some(candidate);
                    return Some(candidate);
                }
                Ok(candidate) => {
                    debug!(
                        "{} candidate {} from {:?} failed validation",
                        self.table, candidate, strategy
                    );
                }
                Err(e) => {
                    debug!("{} strategy {:?} unreadable: {}", self.table, strategy, e);
                }
            }
        }

        warn!(
            "{} table unresolved after {} strategies",
            self.table,
            self.strategies.len()
        );
        None
    }
}
