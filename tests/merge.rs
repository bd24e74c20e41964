// tests/merge.rs

//! Reconciliation tests: catalog/package-database merging, merge modes,
//! zombie detection, reload behaviour.

mod common;

use common::{category, collection, installed, package, pkg_db, stable_version, unstable_version};
use portview::installed::{InstalledEntry, InstalledLister, PkgDbLister};
use portview::{MergeMode, MergedPackageList, Provenance};

fn entry(category: &str, dir: &str) -> InstalledEntry {
    InstalledEntry {
        category: category.to_string(),
        package_dir: dir.to_string(),
        path: None,
    }
}

#[test]
fn test_full_load_agreeing_sources() {
    let catalog = collection(vec![category(
        "dev-qt",
        vec![package(
            "qtcore",
            vec![installed(stable_version("5.15.3"), vec![])],
        )],
    )]);

    let mut list = MergedPackageList::new();
    list.load(
        &catalog,
        vec![entry("dev-qt", "qtcore-5.15.3")],
        MergeMode::Add,
    );

    let ledger = list.ledger("dev-qt", "qtcore").unwrap();
    assert_eq!(ledger.get("5.15.3").unwrap().provenance(), Provenance::Both);
    assert!(!list.is_zombie("dev-qt", "qtcore"));
    assert!(list.zombie_list().is_empty());
}

#[test]
fn test_zombie_iff_installed_without_catalog_record() {
    let catalog = collection(vec![category(
        "dev-qt",
        vec![package(
            "qtcore",
            vec![installed(stable_version("5.15.3"), vec![])],
        )],
    )]);

    let mut list = MergedPackageList::new();
    list.load(
        &catalog,
        vec![
            entry("dev-qt", "qtcore-5.15.3"),
            entry("app-misc", "oldtool-0.9"),
        ],
        MergeMode::Add,
    );

    for (key, ledger) in list.iter() {
        let orphaned = ledger
            .values()
            .any(|info| info.in_installed() && !info.in_available());
        assert_eq!(list.is_zombie(&key.category, &key.name), orphaned);
    }
    assert!(list.is_zombie("app-misc", "oldtool"));
    assert_eq!(list.zombie_list(), vec!["app-misc/oldtool".to_string()]);
}

#[test]
fn test_merge_only_never_creates_keys() {
    let catalog = collection(vec![category(
        "dev-qt",
        vec![package(
            "qtcore",
            vec![installed(stable_version("5.15.3"), vec![])],
        )],
    )]);

    let mut list = MergedPackageList::new();
    list.load(
        &catalog,
        vec![
            entry("dev-qt", "qtcore-5.15.3"),
            entry("app-misc", "oldtool-0.9"),
        ],
        MergeMode::MergeOnly,
    );

    assert_eq!(list.package_count(), 1);
    assert!(list.ledger("app-misc", "oldtool").is_none());
    // The skipped package is also invisible to zombie detection.
    assert!(!list.is_zombie("app-misc", "oldtool"));
}

#[test]
fn test_repeated_load_is_idempotent() {
    let catalog = collection(vec![
        category(
            "dev-qt",
            vec![
                package(
                    "qtcore",
                    vec![
                        installed(stable_version("5.15.2"), vec![]),
                        installed(unstable_version("5.15.3"), vec![]),
                    ],
                ),
                package("qtgui", vec![stable_version("5.15.3")]),
            ],
        ),
        category(
            "app-misc",
            vec![package("tool", vec![installed(stable_version("1.0"), vec![])])],
        ),
    ]);
    let entries = || {
        vec![
            entry("dev-qt", "qtcore-5.15.2"),
            entry("dev-qt", "qtcore-5.15.3"),
            entry("app-misc", "tool-1.0"),
            entry("app-misc", "legacy-2.1"),
        ]
    };

    let snapshot = |list: &MergedPackageList| {
        let mut packages: Vec<_> = list
            .iter()
            .map(|(key, ledger)| {
                (
                    key.to_string(),
                    ledger
                        .values()
                        .map(|info| (info.version().to_string(), info.provenance()))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        packages.sort();
        (packages, list.zombie_list())
    };

    let mut list = MergedPackageList::new();
    list.load(&catalog, entries(), MergeMode::Add);
    let first = snapshot(&list);

    list.load(&catalog, entries(), MergeMode::Add);
    let second = snapshot(&list);

    assert_eq!(first, second);
    assert_eq!(list.zombie_list(), vec!["app-misc/legacy".to_string()]);
}

#[test]
fn test_load_from_on_disk_package_db() {
    let catalog = collection(vec![category(
        "dev-qt",
        vec![package(
            "qt-creator",
            vec![installed(unstable_version("12.4.3"), vec![])],
        )],
    )]);

    let db = pkg_db(&[
        ("dev-qt", "qt-creator-12.4.3"),
        ("dev-qt", "not-a-version-dir"),
    ]);
    let entries = PkgDbLister::new(db.path()).list().unwrap();

    let mut list = MergedPackageList::new();
    list.load(&catalog, entries, MergeMode::Add);

    // The malformed directory was skipped, the real one merged with its path.
    assert_eq!(list.package_count(), 1);
    let ledger = list.ledger("dev-qt", "qt-creator").unwrap();
    let info = ledger.get("12.4.3").unwrap();
    assert_eq!(info.provenance(), Provenance::Both);
    assert!(info.install_path().unwrap().ends_with("dev-qt/qt-creator-12.4.3"));
}

#[test]
fn test_empty_catalog_degrades_to_nothing() {
    let mut list = MergedPackageList::new();
    list.load(&collection(vec![]), Vec::new(), MergeMode::Add);
    assert!(list.is_empty());
    assert!(list.zombie_list().is_empty());
}
