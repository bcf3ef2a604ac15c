//! Generator configuration
//!
//! Everything that may vary between two runs on the same model lives here, plus the target selection
//! ([`crate::backend::target::TargetKind`]), which is passed alongside.

/// Package clause used when none (or an empty one) is configured.
pub const DEFAULT_PACKAGE: &str = "tax";

/// Type name used when neither the configuration nor the model provides one.
pub const DEFAULT_CLASS_NAME: &str = "Calculation";

/// Generation configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Package/namespace of the generated file
    pub package_name: String,
    /// Name of the generated aggregate type; `None` means "use the model name"
    pub class_name: Option<String>,
    /// Number of spaces per indentation level
    pub indent_width: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE.to_string(),
            class_name: None,
            indent_width: 4,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the package name
    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = name.into();
        self
    }

    /// Set the generated type name
    pub fn with_class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Package name to emit; blank names fall back to [`DEFAULT_PACKAGE`].
    pub fn effective_package(&self) -> &str {
        let name = self.package_name.trim();
        if name.is_empty() { DEFAULT_PACKAGE } else { name }
    }

    /// Type name to emit: the configured name, else the model name, else [`DEFAULT_CLASS_NAME`].
    pub fn effective_class_name<'a>(&'a self, model_name: &'a str) -> &'a str {
        match self.class_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ if !model_name.trim().is_empty() => model_name.trim(),
            _ => DEFAULT_CLASS_NAME,
        }
    }
}
