use crate::ast::{Bindings, CompiledExpression, Compiler, Number};
use crate::error::Result;
use log::debug;
use lru::LruCache;
use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorConfig {
    /// Number of compiled expressions kept around. `0` disables the cache.
    pub cache_capacity: usize,
    pub fold_constants: bool,
    /// Reject bindings the expression does not reference.
    pub strict_bindings: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 128,
            fold_constants: true,
            strict_bindings: false,
        }
    }
}

/// Compiles expressions on demand and remembers the most recently used ones,
/// keyed by their source text.
pub struct Calculator {
    config: CalculatorConfig,
    compiler: Compiler,
    cache: Option<LruCache<String, CompiledExpression>>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

impl Calculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            config,
            compiler: Compiler::new().with_constant_folding(config.fold_constants),
            cache: NonZeroUsize::new(config.cache_capacity).map(LruCache::new),
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn compile(&mut self, expression: &str) -> Result<CompiledExpression> {
        if let Some(compiled) = self.cache.as_mut().and_then(|cache| cache.get(expression)) {
            debug!("Cache hit for expression: {}", expression);
            return Ok(compiled.clone());
        }

        debug!("Cache miss for expression: {}", expression);
        let compiled = self.compiler.compile_expression(expression)?;
        if let Some(cache) = self.cache.as_mut() {
            cache.put(expression.to_string(), compiled.clone());
        }
        Ok(compiled)
    }

    pub fn calculate(&mut self, expression: &str, bindings: &Bindings) -> Result<Number> {
        let compiled = self.compile(expression)?;
        let value = if self.config.strict_bindings {
            compiled.invoke_strict(bindings)?
        } else {
            compiled.invoke(bindings)?
        };
        Ok(value)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.as_ref().map_or(0, LruCache::len)
    }

    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }
}
