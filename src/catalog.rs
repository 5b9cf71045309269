//! Registry of every declared kind, built once at startup.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use tracing::info;

use crate::config::{CatalogConfig, EntryConfig};
use crate::domain::{DomainBuilder, EnumDomain, FlagDomain, ValueDomain};
use crate::error::CatalogError;
use crate::state_machine::TransitionGraph;

/// A registered kind, by class.
#[derive(Debug, Clone, Copy)]
pub enum KindRef<'a> {
    Enum(&'a Arc<EnumDomain>),
    Flags(&'a Arc<FlagDomain>),
    States(&'a Arc<TransitionGraph>),
}

impl KindRef<'_> {
    pub fn class(&self) -> &'static str {
        match self {
            KindRef::Enum(_) => "enum",
            KindRef::Flags(_) => "flags",
            KindRef::States(_) => "states",
        }
    }

    /// `(name, value)` pairs in definition order, values rendered as text.
    pub fn entries(&self) -> Vec<(String, String)> {
        match self {
            KindRef::Enum(domain) => render(domain.entries()),
            KindRef::Flags(domain) => render(domain.domain().entries()),
            KindRef::States(graph) => render(graph.domain().entries()),
        }
    }
}

fn render<V: ToString>(entries: &[(String, V)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(name, value)| (name.clone(), value.to_string()))
        .collect()
}

/// Kind names are unique across all three classes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    enums: BTreeMap<String, Arc<EnumDomain>>,
    flags: BTreeMap<String, Arc<FlagDomain>>,
    states: BTreeMap<String, Arc<TransitionGraph>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every kind in `config`, failing on the first definition defect.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for def in &config.enums {
            let domain = declare(ValueDomain::builder(&def.kind), &def.values).build()?;
            catalog.register_enum(domain)?;
        }
        for def in &config.flags {
            let domain = declare(ValueDomain::builder(&def.kind), &def.values).build()?;
            catalog.register_flags(domain)?;
        }
        for def in &config.states {
            let domain = declare(ValueDomain::builder(&def.kind), &def.values).build()?;
            let domain = Arc::new(domain);
            let graph = def
                .initial
                .iter()
                .fold(TransitionGraph::builder(domain), |b, state| b.initial(state));
            let graph = def
                .transitions
                .iter()
                .fold(graph, |b, (from, targets)| b.edges(from, targets))
                .build()?;
            catalog.register_states(graph)?;
        }

        info!(
            enums = catalog.enums.len(),
            flags = catalog.flags.len(),
            states = catalog.states.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn register_enum(&mut self, domain: EnumDomain) -> Result<Arc<EnumDomain>, CatalogError> {
        self.ensure_unique(domain.kind())?;
        let domain = Arc::new(domain);
        self.enums
            .insert(domain.kind().to_string(), Arc::clone(&domain));
        Ok(domain)
    }

    /// Runs the flag shape check once, here, so later lookups never repeat it.
    pub fn register_flags(
        &mut self,
        domain: ValueDomain<u64>,
    ) -> Result<Arc<FlagDomain>, CatalogError> {
        self.ensure_unique(domain.kind())?;
        let domain = Arc::new(FlagDomain::new(domain)?);
        self.flags
            .insert(domain.kind().to_string(), Arc::clone(&domain));
        Ok(domain)
    }

    pub fn register_states(
        &mut self,
        graph: TransitionGraph,
    ) -> Result<Arc<TransitionGraph>, CatalogError> {
        self.ensure_unique(graph.kind())?;
        let graph = Arc::new(graph);
        self.states
            .insert(graph.kind().to_string(), Arc::clone(&graph));
        Ok(graph)
    }

    fn ensure_unique(&self, kind: &str) -> Result<(), CatalogError> {
        if self.lookup(kind).is_ok() {
            return Err(CatalogError::DuplicateKind(kind.to_string()));
        }
        Ok(())
    }

    pub fn enumeration(&self, kind: &str) -> Result<&Arc<EnumDomain>, CatalogError> {
        self.enums
            .get(kind)
            .ok_or_else(|| CatalogError::UnknownKind(kind.to_string()))
    }

    pub fn flags(&self, kind: &str) -> Result<&Arc<FlagDomain>, CatalogError> {
        self.flags
            .get(kind)
            .ok_or_else(|| CatalogError::UnknownKind(kind.to_string()))
    }

    pub fn state_graph(&self, kind: &str) -> Result<&Arc<TransitionGraph>, CatalogError> {
        self.states
            .get(kind)
            .ok_or_else(|| CatalogError::UnknownKind(kind.to_string()))
    }

    pub fn lookup(&self, kind: &str) -> Result<KindRef<'_>, CatalogError> {
        if let Some(domain) = self.enums.get(kind) {
            return Ok(KindRef::Enum(domain));
        }
        if let Some(domain) = self.flags.get(kind) {
            return Ok(KindRef::Flags(domain));
        }
        self.state_graph(kind).map(KindRef::States)
    }

    /// Every registered kind, sorted by name.
    pub fn kinds(&self) -> Vec<(&str, KindRef<'_>)> {
        let mut kinds: Vec<(&str, KindRef<'_>)> = self
            .enums
            .iter()
            .map(|(k, d)| (k.as_str(), KindRef::Enum(d)))
            .chain(self.flags.iter().map(|(k, d)| (k.as_str(), KindRef::Flags(d))))
            .chain(self.states.iter().map(|(k, g)| (k.as_str(), KindRef::States(g))))
            .collect();
        kinds.sort_by(|a, b| a.0.cmp(b.0));
        kinds
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.flags.is_empty() && self.states.is_empty()
    }
}

fn declare<V>(builder: DomainBuilder<V>, entries: &[EntryConfig<V>]) -> DomainBuilder<V>
where
    V: Clone + Eq + Hash + fmt::Display,
{
    entries
        .iter()
        .fold(builder, |b, entry| b.value(&entry.name, entry.value.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumeration::Enumeration;
    use crate::error::EnumError;
    use crate::flags::FlagSet;
    use crate::state_machine::StateMachine;

    const CATALOG: &str = r#"
        [[enums]]
        kind = "Color"
        values = [
            { name = "RED", value = "red" },
            { name = "GREEN", value = "green" },
        ]

        [[flags]]
        kind = "Permission"
        values = [
            { name = "READ", value = 1 },
            { name = "WRITE", value = 2 },
            { name = "EXEC", value = 4 },
        ]

        [[states]]
        kind = "Step"
        values = [
            { name = "STEP_1", value = "Paso1" },
            { name = "STEP_2", value = "Paso2" },
            { name = "STEP_3", value = "Paso3" },
            { name = "STEP_4", value = "Paso4" },
        ]
        initial = ["Paso1"]
        transitions = { Paso1 = ["Paso2", "Paso3"], Paso4 = [] }
    "#;

    fn catalog() -> Catalog {
        Catalog::from_config(&CatalogConfig::parse(CATALOG).unwrap()).unwrap()
    }

    #[test]
    fn registers_every_class() {
        let catalog = catalog();
        let color = catalog.enumeration("Color").unwrap();
        assert!(Enumeration::of(color, "green").is_ok());

        let perms = catalog.flags("Permission").unwrap();
        assert_eq!(FlagSet::of(perms, 5).unwrap().named_values(), ["READ", "EXEC"]);

        let step = catalog.state_graph("Step").unwrap();
        assert!(step.is_terminal("Paso4"));
        assert!(step.is_unrestricted("Paso2"));
        let sm = StateMachine::of(step, "Paso1").unwrap();
        assert!(sm.transition("Paso4").is_err());
    }

    #[test]
    fn lookup_and_kinds() {
        let catalog = catalog();
        assert_eq!(catalog.lookup("Permission").unwrap().class(), "flags");
        assert!(matches!(
            catalog.lookup("Shape"),
            Err(CatalogError::UnknownKind(kind)) if kind == "Shape"
        ));
        let names: Vec<&str> = catalog.kinds().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["Color", "Permission", "Step"]);
    }

    #[test]
    fn entries_render_in_definition_order() {
        let catalog = catalog();
        let entries = catalog.lookup("Permission").unwrap().entries();
        assert_eq!(entries[2], ("EXEC".to_string(), "4".to_string()));
    }

    #[test]
    fn wrong_class_lookup_is_unknown() {
        let catalog = catalog();
        assert!(catalog.flags("Color").is_err());
        assert!(catalog.enumeration("Step").is_err());
    }

    #[test]
    fn invalid_flag_shape_fails_registration() {
        let config = CatalogConfig::parse(
            r#"
            [[flags]]
            kind = "Broken"
            values = [{ name = "A", value = 1 }, { name = "B", value = 3 }]
            "#,
        )
        .unwrap();
        let err = Catalog::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Domain(EnumError::DomainDefinition { .. })
        ));
    }

    #[test]
    fn duplicate_kind_across_classes_is_rejected() {
        let mut catalog = catalog();
        let domain = ValueDomain::builder("Color").value("ONE", 1u64).build().unwrap();
        assert!(matches!(
            catalog.register_flags(domain),
            Err(CatalogError::DuplicateKind(_))
        ));
    }

    #[test]
    fn unknown_transition_state_fails_registration() {
        let config = CatalogConfig::parse(
            r#"
            [[states]]
            kind = "Door"
            values = [{ name = "OPEN", value = "open" }]
            initial = ["open"]
            transitions = { open = ["closed"] }
            "#,
        )
        .unwrap();
        assert!(Catalog::from_config(&config).is_err());
    }
}
