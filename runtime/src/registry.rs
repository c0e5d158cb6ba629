//! Kernel registry mapping operation names to formulas.
//!
//! Replaces the one-compiled-unit-per-formula scheme with a single table:
//! built-in kernels are seeded at first use and hosts may register closures
//! via [`FnKernel`](crate::kernel::FnKernel) alongside them.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use snafu::OptionExt;
use tracing::debug;

use crate::error::{KernelNotFoundSnafu, Result};
use crate::kernel::Kernel;
use crate::kernels::{Eye, FillPair, PeriodicRamp, SquarePair};

pub struct KernelRegistry {
    kernels: RwLock<HashMap<String, Arc<dyn Kernel>>>,
}

impl KernelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { kernels: RwLock::new(HashMap::new()) }
    }

    /// Create a registry seeded with the built-in kernels.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(Eye::new(8)));
        registry.register(Arc::new(PeriodicRamp::new(20, 10.0)));
        registry.register(Arc::new(FillPair::new(2.0, 3.0)));
        registry.register(Arc::new(SquarePair));
        registry
    }

    /// Register a kernel under its own name, replacing any previous entry.
    pub fn register(&self, kernel: Arc<dyn Kernel>) {
        debug!(kernel = kernel.name(), "registering kernel");
        self.kernels.write().insert(kernel.name().to_string(), kernel);
    }

    /// Look up a kernel by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Kernel>> {
        self.kernels.read().get(name).map(Arc::clone).context(KernelNotFoundSnafu { name })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kernels.read().contains_key(name)
    }

    /// Registered kernel names, unordered.
    pub fn names(&self) -> Vec<String> {
        self.kernels.read().keys().cloned().collect()
    }
}

impl Default for KernelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KernelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KernelRegistry").field("kernels", &self.kernels.read().len()).finish()
    }
}

/// Global kernel registry instance.
static REGISTRY: Lazy<KernelRegistry> = Lazy::new(KernelRegistry::with_builtins);

/// Get the global kernel registry.
pub fn registry() -> &'static KernelRegistry {
    &REGISTRY
}
