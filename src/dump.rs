//! Deterministic listing of a [`Registry`] snapshot.

use std::fmt;

use serde::Serialize;

use crate::scheme::{Registry, TypeDescriptor, TypeKey};

pub const HEADER: &str = "Dumping known types ...";
pub const KINDS_HEADER: &str = "Dumping GVK ...";

/// Registry entries sorted by group, then version, then kind.
pub struct RegistryDump<'a> {
    entries: Vec<(&'a TypeKey, &'a TypeDescriptor)>,
}

#[derive(Serialize)]
struct Entry<'a> {
    #[serde(flatten)]
    key: &'a TypeKey,
    #[serde(rename = "type")]
    type_name: &'a str,
    plural: &'a str,
    namespaced: bool,
}

/// YAML document: the sorted registry plus the kinds resolved for a type.
#[derive(Serialize)]
struct Report<'a> {
    types: Vec<Entry<'a>>,
    kinds: &'a [TypeKey],
}

impl<'a> RegistryDump<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        let mut entries: Vec<_> = registry.iter().collect();
        // Keys are unique, so an unstable sort is still deterministic.
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        Self { entries }
    }

    pub fn entries(&self) -> &[(&'a TypeKey, &'a TypeDescriptor)] {
        &self.entries
    }

    /// Renders the registry and `kinds` as a single YAML mapping.
    pub fn to_yaml(&self, kinds: &[TypeKey]) -> Result<String, serde_yaml::Error> {
        let types = self
            .entries()
            .iter()
            .map(|(key, descriptor)| Entry {
                key,
                type_name: descriptor.type_name(),
                plural: descriptor.plural(),
                namespaced: descriptor.namespaced(),
            })
            .collect();
        serde_yaml::to_string(&Report { types, kinds })
    }
}

impl fmt::Display for RegistryDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        for (key, descriptor) in self.entries() {
            writeln!(f, "  {key} -> {descriptor}")?;
        }
        Ok(())
    }
}

/// Text listing of the kinds a type resolved to.
pub struct KindsDump<'a>(pub &'a [TypeKey]);

impl fmt::Display for KindsDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{KINDS_HEADER}")?;
        for kind in self.0 {
            writeln!(f, " - {kind}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::apps::v1::Deployment;
    use k8s_openapi::api::core::v1::{ConfigMap, Secret};

    use super::*;
    use crate::scheme::{builtin, openshift, Scheme};

    fn registry(entries: &[(TypeKey, TypeDescriptor)]) -> Registry {
        entries.iter().cloned().collect()
    }

    fn kinds(dump: &RegistryDump<'_>) -> Vec<(String, String, String)> {
        dump.entries()
            .iter()
            .map(|(key, _)| (key.group.clone(), key.version.clone(), key.kind.clone()))
            .collect()
    }

    fn entry_lines(output: &str) -> Vec<&str> {
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some(HEADER));
        lines.collect()
    }

    #[test]
    fn empty_registry_prints_only_header() {
        let registry = Registry::new();
        let output = RegistryDump::new(&registry).to_string();
        assert_eq!(output, format!("{HEADER}\n"));
        assert!(entry_lines(&output).is_empty());
    }

    #[test]
    fn sorts_by_group_then_version() {
        let registry = registry(&[
            (TypeKey::new("apps", "v1", "Deployment"), TypeDescriptor::of::<Deployment>()),
            (TypeKey::new("core", "v1", "Secret"), TypeDescriptor::of::<Secret>()),
            (TypeKey::new("apps", "v1beta1", "Deployment"), TypeDescriptor::of::<ConfigMap>()),
        ]);
        let dump = RegistryDump::new(&registry);

        assert_eq!(
            kinds(&dump),
            vec![
                ("apps".into(), "v1".into(), "Deployment".into()),
                ("apps".into(), "v1beta1".into(), "Deployment".into()),
                ("core".into(), "v1".into(), "Secret".into()),
            ]
        );
    }

    #[test]
    fn kind_breaks_group_version_ties() {
        let registry = registry(&[
            (TypeKey::new("", "v1", "Secret"), TypeDescriptor::of::<Secret>()),
            (TypeKey::new("", "v1", "ConfigMap"), TypeDescriptor::of::<ConfigMap>()),
        ]);
        let output = RegistryDump::new(&registry).to_string();

        let lines = entry_lines(&output);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  /v1, Kind=ConfigMap -> "));
        assert!(lines[0].ends_with("ConfigMap"));
        assert!(lines[1].starts_with("  /v1, Kind=Secret -> "));
    }

    #[test]
    fn full_scheme_dump_is_sorted_and_complete() {
        let mut scheme = Scheme::new();
        scheme
            .install(&[builtin::add_to_scheme, openshift::add_to_scheme])
            .unwrap();
        let registry = scheme.all_known_types();
        let dump = RegistryDump::new(&registry);

        let output = dump.to_string();
        assert_eq!(entry_lines(&output).len(), registry.len());
        assert!(dump.entries().windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn dump_is_idempotent() {
        let mut scheme = Scheme::new();
        scheme.install(&[builtin::add_to_scheme]).unwrap();
        let registry = scheme.all_known_types();

        let first = RegistryDump::new(&registry).to_string();
        let second = RegistryDump::new(&registry).to_string();
        assert_eq!(first, second);
        let kinds = [TypeKey::of::<Secret>().list_key()];
        assert_eq!(
            RegistryDump::new(&registry).to_yaml(&kinds).unwrap(),
            RegistryDump::new(&registry).to_yaml(&kinds).unwrap()
        );
    }

    #[test]
    fn yaml_keeps_sort_order_and_fields() {
        let registry = registry(&[
            (TypeKey::of::<Secret>(), TypeDescriptor::of::<Secret>()),
            (TypeKey::of::<Deployment>(), TypeDescriptor::of::<Deployment>()),
        ]);
        let yaml = RegistryDump::new(&registry).to_yaml(&[]).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        let types = parsed["types"].as_sequence().unwrap();
        assert_eq!(types.len(), 2);
        // "" sorts before "apps".
        assert_eq!(types[0]["group"], "");
        assert_eq!(types[0]["kind"], "Secret");
        assert_eq!(types[0]["plural"], "secrets");
        assert_eq!(types[0]["namespaced"], true);
        assert_eq!(types[1]["group"], "apps");
        assert_eq!(types[1]["version"], "v1");
        assert_eq!(types[1]["kind"], "Deployment");
        assert!(types[1]["type"].as_str().unwrap().ends_with("Deployment"));
        assert!(parsed["kinds"].as_sequence().unwrap().is_empty());
    }

    #[test]
    fn yaml_carries_resolved_kinds() {
        let mut scheme = Scheme::new();
        scheme
            .install(&[builtin::add_to_scheme, openshift::add_to_scheme])
            .unwrap();
        let registry = scheme.all_known_types();
        let kinds = [TypeKey::of::<Secret>().list_key()];

        let yaml = RegistryDump::new(&registry).to_yaml(&kinds).unwrap();
        // One document, no trailing text.
        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed["types"].as_sequence().unwrap().len(), registry.len());
        let kinds = parsed["kinds"].as_sequence().unwrap();
        assert_eq!(kinds.len(), 1);
        assert_eq!(kinds[0]["group"], "");
        assert_eq!(kinds[0]["version"], "v1");
        assert_eq!(kinds[0]["kind"], "SecretList");
    }

    #[test]
    fn kinds_dump_lists_each_kind() {
        let kinds = [
            TypeKey::new("", "v1", "SecretList"),
            TypeKey::new("apps", "v1", "DeploymentList"),
        ];
        assert_eq!(
            KindsDump(&kinds).to_string(),
            format!("{KINDS_HEADER}\n - /v1, Kind=SecretList\n - apps/v1, Kind=DeploymentList\n")
        );
    }
}
