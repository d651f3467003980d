//! Properties of plugin composition that hold for any set of plugins.

use bedwars_core::test_utils::{FailingPlugin, ScriptedPlugin, TempDir, fixture_namespace, snapshot_tree};
use bedwars_core::{LifecycleEvent, PackageBuilder};
use proptest::prelude::*;

fn builder_with(labels: &[String], failing_at: Option<usize>) -> PackageBuilder {
    let mut builder = PackageBuilder::new("Composition", fixture_namespace().as_str()).unwrap();
    for (i, label) in labels.iter().enumerate() {
        if failing_at == Some(i) {
            builder.register_plugin(Box::new(FailingPlugin::new(&format!("failing{i}"))));
        }
        builder.use_plugin(|ns| {
            ScriptedPlugin::with_lines(&format!("p{i}"), ns, label).writing(&format!("extra{i}"))
        });
    }
    builder
}

fn labels() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z]{1,8}", 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Plugin A's lines precede plugin B's in every script iff A was
    /// registered first.
    #[test]
    fn scripts_follow_registration_order(labels in labels()) {
        let scripts = builder_with(&labels, None).lifecycle_scripts();
        for event in LifecycleEvent::ALL {
            let expected: Vec<String> = labels
                .iter()
                .map(|label| format!("say {label} {event}"))
                .collect();
            prop_assert_eq!(scripts.get(event), expected.as_slice());
        }
    }

    /// Two builds of the same definition produce the same bytes.
    #[test]
    fn builds_are_reproducible(labels in labels()) {
        let a = TempDir::new("prop_repro_a");
        let b = TempDir::new("prop_repro_b");
        builder_with(&labels, None).build(a.path()).unwrap();
        builder_with(&labels, None).build(b.path()).unwrap();
        prop_assert_eq!(snapshot_tree(a.path()), snapshot_tree(b.path()));
    }

    /// A single failing plugin anywhere in the registry leaves nothing
    /// behind.
    #[test]
    fn any_failure_leaves_no_trace(labels in labels(), at in 0usize..6) {
        let at = at % labels.len();
        let out = TempDir::new("prop_atomic");
        prop_assert!(builder_with(&labels, Some(at)).build(out.path()).is_err());
        prop_assert!(!out.path().join("bw").exists());
    }

    /// Success leaves the full artifact set: metadata, two tags, four
    /// lifecycle functions and every plugin's extra function.
    #[test]
    fn success_leaves_complete_artifacts(labels in labels()) {
        let out = TempDir::new("prop_complete");
        let report = builder_with(&labels, None).build(out.path()).unwrap();
        let files = snapshot_tree(out.path());
        prop_assert_eq!(files.len(), 1 + 2 + 4 + labels.len());
        prop_assert_eq!(report.files_written.len(), files.len());
    }
}
