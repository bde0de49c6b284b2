//! Section handlers and their registry.
//!
//! Each [`Section`] has one handler owning its field catalog. The parser
//! looks handlers up in a [`HandlerRegistry`] and runs every handler whose
//! heading was found on a page.
//!
//! # Example
//!
//! ```
//! use claimform::sections::{HandlerRegistry, SectionHandler};
//! use claimform::Section;
//!
//! let registry = HandlerRegistry::with_defaults();
//! let handler = registry.get(Section::ClaimantInfo).unwrap();
//! let payload = handler.extract("1A. Claimant's Full Name: Ilyas Malik");
//! let fields = payload.form_fields.unwrap();
//! assert_eq!(fields.value("1a_claimant_full_name"), Some("Ilyas Malik"));
//! ```

mod claimant;
mod medical;
mod signatures;
mod supplement_a;
mod supplement_b;
mod supplement_c;
mod supplement_d;
mod travel;

pub use claimant::ClaimantInfoHandler;
pub use medical::MedicalInfoHandler;
pub use signatures::SignaturesHandler;
pub use supplement_a::SupplementAHandler;
pub use supplement_b::SupplementBHandler;
pub use supplement_c::SupplementCHandler;
pub use supplement_d::SupplementDHandler;
pub use travel::TravelClaimsHandler;

use crate::model::{PagePayload, Section};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Form furniture that is never claimant data (company header, titles).
pub(crate) const HEADER_NOISE: &[&str] = &[
    "worldtrips",
    "world trips",
    "claimant statement",
    "farmington hills",
    "docusign",
    "p.o. box",
];

/// Postal codes printed in the company header.
pub(crate) const HEADER_POSTAL_CODES: &[&str] = &["48333"];

/// Trait for section handlers.
///
/// Implement this trait to support a new section or to replace a built-in
/// handler. A handler only ever emits its own fixed key set, whatever
/// candidate matched.
pub trait SectionHandler: Send + Sync {
    /// The section this handler extracts.
    fn section(&self) -> Section;

    /// Get the name of this handler.
    fn name(&self) -> &str {
        self.section().label()
    }

    /// Every key this handler can emit: field and signature keys, or the
    /// table name followed by its column keys.
    fn output_keys(&self) -> Vec<&'static str>;

    /// Extract this section's payload from one page.
    fn extract(&self, page_text: &str) -> PagePayload;
}

/// Registry of section handlers.
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<Section, Arc<dyn SectionHandler>>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create a registry with the eight built-in handlers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ClaimantInfoHandler));
        registry.register(Arc::new(TravelClaimsHandler));
        registry.register(Arc::new(MedicalInfoHandler));
        registry.register(Arc::new(SignaturesHandler));
        registry.register(Arc::new(SupplementAHandler));
        registry.register(Arc::new(SupplementBHandler));
        registry.register(Arc::new(SupplementCHandler));
        registry.register(Arc::new(SupplementDHandler));
        registry
    }

    /// Register a handler, returning the one it replaces.
    pub fn register(&mut self, handler: Arc<dyn SectionHandler>) -> Option<Arc<dyn SectionHandler>> {
        self.handlers.insert(handler.section(), handler)
    }

    /// Get the handler for a section.
    pub fn get(&self, section: Section) -> Option<Arc<dyn SectionHandler>> {
        self.handlers.get(&section).cloned()
    }

    /// Check if a section has a handler.
    pub fn supports(&self, section: Section) -> bool {
        self.handlers.contains_key(&section)
    }

    /// Sections with a handler, in form order.
    pub fn sections(&self) -> Vec<Section> {
        let mut sections: Vec<Section> = self.handlers.keys().copied().collect();
        sections.sort();
        sections
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("sections", &self.sections())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldMap;

    struct StubHandler;

    impl SectionHandler for StubHandler {
        fn section(&self) -> Section {
            Section::SupplementD
        }

        fn output_keys(&self) -> Vec<&'static str> {
            vec!["stub"]
        }

        fn extract(&self, _page_text: &str) -> PagePayload {
            PagePayload::fields(FieldMap::with_keys(&["stub"]))
        }
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = HandlerRegistry::with_defaults();
        assert_eq!(registry.sections(), Section::ALL.to_vec());
        for section in Section::ALL {
            assert_eq!(registry.get(section).map(|h| h.section()), Some(section));
        }
    }

    #[test]
    fn test_registry_register_replaces() {
        let mut registry = HandlerRegistry::with_defaults();
        let old = registry.register(Arc::new(StubHandler));
        assert_eq!(old.map(|h| h.section()), Some(Section::SupplementD));

        let handler = registry.get(Section::SupplementD).unwrap();
        assert_eq!(handler.output_keys(), vec!["stub"]);
        assert_eq!(handler.name(), Section::SupplementD.label());
    }

    #[test]
    fn test_empty_registry() {
        let registry = HandlerRegistry::new();
        assert!(!registry.supports(Section::ClaimantInfo));
        assert!(registry.get(Section::ClaimantInfo).is_none());
    }

    #[test]
    fn test_handlers_emit_only_declared_keys() {
        let registry = HandlerRegistry::with_defaults();
        let noise = "1A. Claimant's Full Name: A B 2A. Gender: Male X Yes No 07/09/23 Clinic 10.00";
        for section in Section::ALL {
            let handler = registry.get(section).unwrap();
            let declared = handler.output_keys();
            let payload = handler.extract(noise);
            let emitted = payload
                .form_fields
                .iter()
                .chain(payload.signatures.iter())
                .flat_map(|m| m.keys().map(str::to_string).collect::<Vec<_>>())
                .chain(payload.tables.iter().flat_map(|t| {
                    t.iter()
                        .flat_map(|(name, rows)| {
                            std::iter::once(name.to_string()).chain(
                                rows.iter().flat_map(|r| r.keys().map(str::to_string).collect::<Vec<_>>()),
                            )
                        })
                        .collect::<Vec<_>>()
                }));
            for key in emitted {
                assert!(declared.contains(&key.as_str()), "{} emitted undeclared key {}", section, key);
            }
        }
    }
}
