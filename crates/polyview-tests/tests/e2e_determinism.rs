//! Shape files are byte-identical across runs and output directories.

use std::collections::BTreeMap;

use polyview_geometry::HullAdapter;
use polyview_shapes::builtin_registry;
use polyview_tests::harness::TestHarness;
use pretty_assertions::assert_eq;

fn file_hashes(harness: &TestHarness) -> BTreeMap<String, String> {
    harness
        .output_files()
        .into_iter()
        .map(|name| {
            let hash = blake3::hash(&harness.read_bytes(&name)).to_hex().to_string();
            (name, hash)
        })
        .collect()
}

#[test]
fn test_builtin_outputs_are_deterministic() {
    let registry = builtin_registry();
    let adapter = HullAdapter::with_default_provider();

    let first = TestHarness::new();
    let second = TestHarness::new();
    let a = first.run(&registry, &adapter).unwrap();
    let b = second.run(&registry, &adapter).unwrap();

    assert_eq!(a.succeeded, b.succeeded);
    let hashes_a: Vec<_> = a.results.iter().map(|r| r.hash.clone()).collect();
    let hashes_b: Vec<_> = b.results.iter().map(|r| r.hash.clone()).collect();
    assert_eq!(hashes_a, hashes_b);
    assert_eq!(file_hashes(&first), file_hashes(&second));
}

#[test]
fn test_reported_hash_matches_file_contents() {
    let harness = TestHarness::new();
    let summary = harness
        .run(&builtin_registry(), &HullAdapter::with_default_provider())
        .unwrap();
    let on_disk = file_hashes(&harness);

    for result in summary.results.iter().filter(|r| r.is_success()) {
        assert_eq!(result.hash.as_ref(), on_disk.get(&result.json_file));
    }
}

#[test]
fn test_rerun_in_place_rewrites_identical_files() {
    let harness = TestHarness::new();
    let registry = builtin_registry();
    let adapter = HullAdapter::with_default_provider();

    harness.run(&registry, &adapter).unwrap();
    let before = file_hashes(&harness);
    harness.run(&registry, &adapter).unwrap();
    assert_eq!(file_hashes(&harness), before);
}
