//! The check registry.
//!
//! Maps a check identifier to its declared type, context, and constructor.
//! Third-party checks register through the same interface as built-ins;
//! selection operates purely over identifiers and group names.

use std::sync::Arc;

use tabval_core::{ConfigError, Schema};

use crate::check::{Check, CheckContext, CheckType};
use crate::checks;
use crate::relations::ForeignKeyResolver;

/// Per-table context handed to check constructors.
pub struct CheckSetup<'a> {
    /// Name of the resource under validation
    pub resource_name: &'a str,
    /// The resolved schema for the table, if any
    pub schema: Option<&'a Schema>,
    /// The run's foreign key resolver
    pub relations: Option<&'a Arc<ForeignKeyResolver>>,
}

/// Constructor producing a fresh check instance for one table session.
pub type CheckFactory = Box<dyn Fn(&CheckSetup<'_>) -> Box<dyn Check> + Send + Sync>;

struct RegistryEntry {
    code: String,
    check_type: CheckType,
    context: CheckContext,
    factory: CheckFactory,
}

/// A check selected for a run, ready to be instantiated per table.
pub struct SelectedCheck<'a> {
    /// The check identifier
    pub code: &'a str,
    /// Declared group
    pub check_type: CheckType,
    /// Declared context
    pub context: CheckContext,
    factory: &'a CheckFactory,
}

impl std::fmt::Debug for SelectedCheck<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedCheck")
            .field("code", &self.code)
            .field("check_type", &self.check_type)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl SelectedCheck<'_> {
    /// Creates a fresh instance with per-session state.
    pub fn instantiate(&self, setup: &CheckSetup<'_>) -> CheckInstance {
        CheckInstance {
            code: self.code.to_string(),
            check_type: self.check_type,
            context: self.context,
            check: (self.factory)(setup),
        }
    }
}

/// An instantiated check bound to one table session.
pub struct CheckInstance {
    /// The check identifier, stamped onto the errors it emits
    pub code: String,
    /// Declared group
    pub check_type: CheckType,
    /// Declared context
    pub context: CheckContext,
    /// The check itself
    pub check: Box<dyn Check>,
}

/// Registry of available checks.
///
/// Built-ins register in their execution order; selection preserves
/// registration order within each group and orders groups structure →
/// schema → custom.
pub struct CheckRegistry {
    entries: Vec<RegistryEntry>,
}

impl CheckRegistry {
    /// An empty registry with no checks.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The registry of built-in checks.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();

        registry.register("blank-header", CheckType::Structure, CheckContext::Head, |_| {
            Box::new(checks::BlankHeader)
        });
        registry.register(
            "duplicate-header",
            CheckType::Structure,
            CheckContext::Head,
            |_| Box::new(checks::DuplicateHeader),
        );
        registry.register("blank-row", CheckType::Structure, CheckContext::Body, |_| {
            Box::new(checks::BlankRow)
        });
        registry.register(
            "duplicate-row",
            CheckType::Structure,
            CheckContext::Body,
            |_| Box::new(checks::DuplicateRow::new()),
        );
        registry.register("extra-value", CheckType::Structure, CheckContext::Body, |_| {
            Box::new(checks::ExtraValue)
        });
        registry.register(
            "missing-value",
            CheckType::Structure,
            CheckContext::Body,
            |_| Box::new(checks::MissingValue),
        );

        registry.register("extra-header", CheckType::Schema, CheckContext::Head, |_| {
            Box::new(checks::ExtraHeader)
        });
        registry.register("missing-header", CheckType::Schema, CheckContext::Head, |_| {
            Box::new(checks::MissingHeader)
        });
        registry.register(
            "non-matching-header",
            CheckType::Schema,
            CheckContext::Head,
            |_| Box::new(checks::NonMatchingHeader),
        );
        registry.register(
            "type-or-format-error",
            CheckType::Schema,
            CheckContext::Body,
            |_| Box::new(checks::TypeOrFormat),
        );
        registry.register(
            "required-constraint",
            CheckType::Schema,
            CheckContext::Body,
            |_| Box::new(checks::RequiredConstraint),
        );
        registry.register(
            "pattern-constraint",
            CheckType::Schema,
            CheckContext::Body,
            |_| Box::new(checks::PatternConstraint::new()),
        );
        registry.register(
            "unique-constraint",
            CheckType::Schema,
            CheckContext::Body,
            |setup| Box::new(checks::UniqueConstraint::new(setup.schema)),
        );
        registry.register(
            "enumerable-constraint",
            CheckType::Schema,
            CheckContext::Body,
            |_| Box::new(checks::EnumerableConstraint),
        );
        registry.register(
            "minimum-constraint",
            CheckType::Schema,
            CheckContext::Body,
            |_| Box::new(checks::MinimumConstraint),
        );
        registry.register(
            "maximum-constraint",
            CheckType::Schema,
            CheckContext::Body,
            |_| Box::new(checks::MaximumConstraint),
        );
        registry.register("foreign-key", CheckType::Schema, CheckContext::Body, |setup| {
            Box::new(checks::ForeignKeyCheck::new(setup))
        });

        registry
    }

    /// Registers a check under an identifier.
    ///
    /// Later registrations win over earlier ones with the same identifier.
    pub fn register<F>(
        &mut self,
        code: &str,
        check_type: CheckType,
        context: CheckContext,
        factory: F,
    ) where
        F: Fn(&CheckSetup<'_>) -> Box<dyn Check> + Send + Sync + 'static,
    {
        self.entries.retain(|entry| entry.code != code);
        self.entries.push(RegistryEntry {
            code: code.to_string(),
            check_type,
            context,
            factory: Box::new(factory),
        });
    }

    /// True if an identifier names a registered check or a group.
    fn is_known(&self, identifier: &str) -> bool {
        matches!(identifier, "structure" | "schema" | "custom")
            || self.entries.iter().any(|entry| entry.code == identifier)
    }

    fn matches(entry: &RegistryEntry, identifier: &str) -> bool {
        entry.code == identifier || entry.check_type.group() == identifier
    }

    /// Resolves a selection into an ordered list of checks.
    ///
    /// `checks` restricts to exactly the named identifiers or groups (all
    /// registered checks when `None`); `skip_checks` excludes afterwards.
    /// Unknown identifiers in either list are a configuration error.
    pub fn select(
        &self,
        checks: Option<&[String]>,
        skip_checks: &[String],
    ) -> Result<Vec<SelectedCheck<'_>>, ConfigError> {
        for identifier in checks.into_iter().flatten().chain(skip_checks) {
            if !self.is_known(identifier) {
                return Err(ConfigError::UnknownCheck(identifier.clone()));
            }
        }

        let mut selected: Vec<&RegistryEntry> = self
            .entries
            .iter()
            .filter(|entry| match checks {
                Some(identifiers) => identifiers
                    .iter()
                    .any(|identifier| Self::matches(entry, identifier)),
                None => true,
            })
            .filter(|entry| {
                !skip_checks
                    .iter()
                    .any(|identifier| Self::matches(entry, identifier))
            })
            .collect();

        selected.sort_by_key(|entry| entry.check_type.rank());

        Ok(selected
            .into_iter()
            .map(|entry| SelectedCheck {
                code: &entry.code,
                check_type: entry.check_type,
                context: entry.context,
                factory: &entry.factory,
            })
            .collect())
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabval_core::ValidationError;

    #[test]
    fn test_builtin_selection_orders_structure_first() {
        let registry = CheckRegistry::builtin();
        let selected = registry.select(None, &[]).unwrap();

        assert_eq!(selected[0].code, "blank-header");
        let first_schema = selected
            .iter()
            .position(|check| check.check_type == CheckType::Schema)
            .unwrap();
        assert!(selected[..first_schema]
            .iter()
            .all(|check| check.check_type == CheckType::Structure));
    }

    #[test]
    fn test_select_by_code_and_group() {
        let registry = CheckRegistry::builtin();

        let only = registry
            .select(Some(&["extra-value".to_string()]), &[])
            .unwrap();
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].code, "extra-value");

        let structure = registry
            .select(Some(&["structure".to_string()]), &[])
            .unwrap();
        assert_eq!(structure.len(), 6);
    }

    #[test]
    fn test_skip_checks() {
        let registry = CheckRegistry::builtin();
        let selected = registry
            .select(None, &["duplicate-row".to_string()])
            .unwrap();
        assert!(selected.iter().all(|check| check.code != "duplicate-row"));
    }

    #[test]
    fn test_unknown_identifier_is_config_error() {
        let registry = CheckRegistry::builtin();
        assert_eq!(
            registry
                .select(Some(&["bad-check".to_string()]), &[])
                .unwrap_err(),
            ConfigError::UnknownCheck("bad-check".to_string())
        );
        assert!(registry.select(None, &["nope".to_string()]).is_err());
    }

    #[test]
    fn test_custom_checks_order_after_builtins() {
        struct Custom;
        impl Check for Custom {
            fn check_row(
                &mut self,
                _row_number: usize,
                _cells: &mut Vec<crate::cell::Cell>,
            ) -> Vec<ValidationError> {
                vec![ValidationError::new("custom-check", "found")]
            }
        }

        let mut registry = CheckRegistry::builtin();
        registry.register("custom-check", CheckType::Custom, CheckContext::Body, |_| {
            Box::new(Custom)
        });

        let selected = registry.select(None, &[]).unwrap();
        assert_eq!(selected.last().unwrap().code, "custom-check");

        let only_custom = registry
            .select(Some(&["custom".to_string()]), &[])
            .unwrap();
        assert_eq!(only_custom.len(), 1);
    }
}
