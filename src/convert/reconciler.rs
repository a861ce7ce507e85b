use crate::core::{Reporter, Version};
use crate::nuget::LegacyManifest;
use std::collections::BTreeMap;

/// Choose one version per package name across every discovered legacy
/// manifest.
///
/// The maximum version by semantic precedence wins. A name seen at more
/// than one distinct version produces a single warning listing every
/// distinct version in ascending order. Names are case-sensitive here;
/// only conflict detection against existing files is case-insensitive.
pub fn reconcile(
    manifests: &[LegacyManifest],
    reporter: &dyn Reporter,
) -> BTreeMap<String, Version> {
    let mut by_name: BTreeMap<String, Vec<Version>> = BTreeMap::new();
    for manifest in manifests {
        for entry in &manifest.packages {
            by_name
                .entry(entry.name.clone())
                .or_default()
                .push(entry.version.clone());
        }
    }

    let mut chosen = BTreeMap::new();
    for (name, mut versions) in by_name {
        versions.sort();
        versions.dedup();

        if versions.len() > 1 {
            let listed: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
            reporter.warn(&format!(
                "{} is referenced at multiple versions: {}. Using {}",
                name,
                listed.join(", "),
                listed[listed.len() - 1],
            ));
        }

        if let Some(max) = versions.pop() {
            chosen.insert(name, max);
        }
    }
    chosen
}
