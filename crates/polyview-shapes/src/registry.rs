//! Registry of shape builders.

use crate::BuildFn;

/// Every builder function name starts with this prefix; the rest is the
/// shape identifier.
pub const BUILD_FUNCTION_PREFIX: &str = "build_";

/// One registered builder.
#[derive(Clone)]
pub struct ShapeEntry {
    /// Group the builder belongs to, used for report ordering.
    pub module: String,
    /// Builder function name, always starting with [`BUILD_FUNCTION_PREFIX`].
    pub function: String,
    pub build: BuildFn,
}

impl ShapeEntry {
    /// Function name without the `build_` prefix.
    pub fn identifier(&self) -> &str {
        self.function
            .strip_prefix(BUILD_FUNCTION_PREFIX)
            .unwrap_or(&self.function)
    }

    /// Output filename, `{identifier}.json`.
    pub fn json_file(&self) -> String {
        format!("{}.json", self.identifier())
    }
}

impl std::fmt::Debug for ShapeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeEntry")
            .field("module", &self.module)
            .field("function", &self.function)
            .finish()
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// A builder with this function name is already registered.
    AlreadyRegistered(String),
    /// The function name does not start with `build_`.
    MissingPrefix(String),
    /// No builder matches this name or identifier.
    NotFound(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyRegistered(name) => write!(f, "Builder already registered: {}", name),
            Self::MissingPrefix(name) => write!(
                f,
                "Builder name '{}' must start with '{}'",
                name, BUILD_FUNCTION_PREFIX
            ),
            Self::NotFound(name) => write!(f, "Unknown shape: {}", name),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Ordered collection of shape builders.
///
/// Entries keep their registration order; reports sort by
/// `(module, function)` themselves.
#[derive(Debug, Default, Clone)]
pub struct ShapeRegistry {
    entries: Vec<ShapeEntry>,
}

impl ShapeRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a builder.
    pub fn register(
        &mut self,
        module: impl Into<String>,
        function: impl Into<String>,
        build: BuildFn,
    ) -> Result<(), RegistryError> {
        let function = function.into();
        if !function.starts_with(BUILD_FUNCTION_PREFIX) || function.len() == BUILD_FUNCTION_PREFIX.len() {
            return Err(RegistryError::MissingPrefix(function));
        }
        if self.get(&function).is_some() {
            return Err(RegistryError::AlreadyRegistered(function));
        }

        self.entries.push(ShapeEntry {
            module: module.into(),
            function,
            build,
        });
        Ok(())
    }

    /// Gets a builder by function name.
    pub fn get(&self, function: &str) -> Option<&ShapeEntry> {
        self.entries.iter().find(|e| e.function == function)
    }

    /// Finds a builder by identifier (`cube`) or function name (`build_cube`).
    pub fn find(&self, name: &str) -> Option<&ShapeEntry> {
        self.get(name)
            .or_else(|| self.entries.iter().find(|e| e.identifier() == name))
    }

    /// Iterates over builders in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ShapeEntry> {
        self.entries.iter()
    }

    /// Resolves `names` to entries; an empty selection means every entry.
    ///
    /// The result keeps registration order and contains each entry once.
    pub fn select(&self, names: &[String]) -> Result<Vec<&ShapeEntry>, RegistryError> {
        if names.is_empty() {
            return Ok(self.entries.iter().collect());
        }

        let mut wanted = Vec::with_capacity(names.len());
        for name in names {
            let entry = self
                .find(name)
                .ok_or_else(|| RegistryError::NotFound(name.clone()))?;
            wanted.push(entry.function.as_str());
        }
        Ok(self
            .entries
            .iter()
            .filter(|e| wanted.contains(&e.function.as_str()))
            .collect())
    }

    /// Unregisters a builder by function name.
    pub fn unregister(&mut self, function: &str) -> Result<ShapeEntry, RegistryError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.function == function)
            .ok_or_else(|| RegistryError::NotFound(function.to_string()))?;
        Ok(self.entries.remove(index))
    }

    /// Returns the number of registered builders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no builders are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
