//! End-to-end reconciliation scenarios

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use wp_manifest::{Change, Directives, ManifestFile, Reconciler, reconcile};

fn directives() -> Directives {
    Directives::new("public").unwrap()
}

fn render(value: &Value) -> String {
    ManifestFile::render(value).unwrap()
}

fn keys(value: &Value) -> Vec<String> {
    value.as_object().unwrap().keys().cloned().collect()
}

#[test]
fn test_empty_manifest_gets_every_directive() {
    let result = reconcile(json!({}), &directives()).unwrap();

    let expected = json!({
        "repositories": [
            {"type": "composer", "url": "https://wpackagist.org"}
        ],
        "config": {"sort-packages": true},
        "extra": {
            "public-dir": "public",
            "wordpress-install-dir": "public/wp",
            "installer-paths": {
                "public/wp/wp-content/plugins/{$name}/": ["type:wordpress-plugin"],
                "public/themes/{$name}/": ["type:wordpress-theme"]
            }
        }
    });
    assert_eq!(render(&result.manifest), render(&expected));
    assert_eq!(
        result.changes,
        vec![
            Change::PublicDirSet { value: "public".into() },
            Change::InstallDirSet { value: "public/wp".into() },
            Change::RepositoryAdded { url: "https://wpackagist.org".into() },
            Change::InstallerTagAdded {
                path: "public/wp/wp-content/plugins/{$name}/".into(),
                tag: "type:wordpress-plugin".into(),
            },
            Change::InstallerTagAdded {
                path: "public/themes/{$name}/".into(),
                tag: "type:wordpress-theme".into(),
            },
            Change::SortingEnabled,
            Change::Reordered,
        ]
    );
}

#[test]
fn test_foreign_plugin_path_keeps_other_tags() {
    let manifest = json!({
        "extra": {
            "installer-paths": {
                "old/path/{$name}/": ["type:wordpress-plugin", "type:library"]
            }
        }
    });

    let result = reconcile(manifest, &directives()).unwrap();
    let paths = &result.manifest["extra"]["installer-paths"];

    assert_eq!(paths["old/path/{$name}/"], json!(["type:library"]));
    assert_eq!(
        paths["public/wp/wp-content/plugins/{$name}/"],
        json!(["type:wordpress-plugin"])
    );
    assert!(result.changes.contains(&Change::InstallerTagRemoved {
        path: "old/path/{$name}/".into(),
        tag: "type:wordpress-plugin".into(),
    }));
}

#[test]
fn test_foreign_plugin_path_removed_when_emptied() {
    let manifest = json!({
        "extra": {"installer-paths": {"old/path/{$name}/": ["type:wordpress-plugin"]}}
    });

    let result = reconcile(manifest, &directives()).unwrap();
    let paths = result.manifest["extra"]["installer-paths"].as_object().unwrap();

    assert!(!paths.contains_key("old/path/{$name}/"));
    assert_eq!(paths.len(), 2);
    assert!(result.changes.contains(&Change::InstallerPathRemoved {
        path: "old/path/{$name}/".into()
    }));
}

#[test]
fn test_path_with_both_tags_loses_both() {
    let manifest = json!({
        "extra": {
            "installer-paths": {
                "wp-content/{$name}/": ["type:wordpress-theme", "type:wordpress-plugin"]
            }
        }
    });

    let result = reconcile(manifest, &directives()).unwrap();
    let paths = result.manifest["extra"]["installer-paths"].as_object().unwrap();

    assert!(!paths.contains_key("wp-content/{$name}/"));
}

#[test]
fn test_canonical_path_keeps_colocated_tags() {
    let manifest = json!({
        "extra": {
            "installer-paths": {
                "public/themes/{$name}/": ["type:wordpress-muplugin"]
            }
        }
    });

    let result = reconcile(manifest, &directives()).unwrap();

    assert_eq!(
        result.manifest["extra"]["installer-paths"]["public/themes/{$name}/"],
        json!(["type:wordpress-muplugin", "type:wordpress-theme"])
    );
}

#[test]
fn test_require_sorted_alphabetically() {
    let manifest = json!({"require": {"b/pkg": "^1.0", "a/pkg": "^2.0"}});

    let result = reconcile(manifest, &directives()).unwrap();

    assert_eq!(keys(&result.manifest["require"]), vec!["a/pkg", "b/pkg"]);
    assert_eq!(result.manifest["require"]["a/pkg"], "^2.0");
    assert_eq!(result.manifest["require"]["b/pkg"], "^1.0");
}

#[test]
fn test_configured_manifest_is_untouched() {
    // Out of canonical order on purpose: a satisfied manifest skips ordering too.
    let manifest = json!({
        "extra": {"wordpress-install-dir": "public/wp", "public-dir": "public"},
        "require": {"z/pkg": "*", "a/pkg": "*"},
        "config": {"sort-packages": true},
        "name": "acme/site",
        "repositories": [{"type": "composer", "url": "https://wpackagist.org/"}]
    });
    let before = render(&manifest);

    let result = reconcile(manifest, &directives()).unwrap();

    assert!(!result.is_changed());
    assert_eq!(render(&result.manifest), before);
}

#[test]
fn test_top_level_order() {
    let manifest = json!({
        "scripts": {"test": "phpunit"},
        "x-custom": 1,
        "extra": {},
        "require": {},
        "name": "acme/site",
        "another": true,
        "autoload": {"files": ["helpers.php"], "psr-4": {"App\\": "src/"}}
    });

    let result = reconcile(manifest, &directives()).unwrap();

    assert_eq!(
        keys(&result.manifest),
        vec![
            "name",
            "repositories",
            "require",
            "autoload",
            "config",
            "extra",
            "scripts",
            "x-custom",
            "another",
        ]
    );
    assert_eq!(keys(&result.manifest["autoload"]), vec!["psr-4", "files"]);
}

#[test]
fn test_existing_public_dir_is_kept() {
    let manifest = json!({"extra": {"public-dir": "web"}});

    let result = Reconciler::new(directives()).reconcile(manifest).unwrap();

    assert_eq!(result.manifest["extra"]["public-dir"], "web");
    assert_eq!(result.manifest["extra"]["wordpress-install-dir"], "public/wp");
}

#[test]
fn test_http_repository_counts_as_present() {
    let manifest = json!({
        "repositories": [
            {"type": "vcs", "url": "https://github.com/acme/theme"},
            {"type": "composer", "url": "http://wpackagist.org"}
        ]
    });

    let result = reconcile(manifest, &directives()).unwrap();

    assert_eq!(result.manifest["repositories"].as_array().unwrap().len(), 2);
    assert!(!result.changes.iter().any(|c| matches!(c, Change::RepositoryAdded { .. })));
}

#[test]
fn test_second_run_is_noop() {
    let manifest = json!({
        "name": "acme/site",
        "require": {"wpackagist-plugin/akismet": "*", "johnpbloch/wordpress": "^6.0"},
        "extra": {"installer-paths": {"legacy/{$name}/": ["type:wordpress-theme"]}}
    });

    let first = reconcile(manifest, &directives()).unwrap();
    let second = reconcile(first.manifest.clone(), &directives()).unwrap();

    assert!(first.is_changed());
    assert!(!second.is_changed());
    assert_eq!(render(&second.manifest), render(&first.manifest));
}

#[rstest]
#[case::extra(json!({"extra": []}))]
#[case::config(json!({"config": []}))]
#[case::installer_paths(json!({"extra": {"installer-paths": []}}))]
#[case::autoload(json!({"autoload": [], "name": "acme/site"}))]
fn test_empty_list_sections_read_as_empty_objects(#[case] input: Value) {
    let result = reconcile(input, &directives()).unwrap();
    let manifest = &result.manifest;

    assert_eq!(manifest["extra"]["public-dir"], "public");
    assert_eq!(manifest["extra"]["wordpress-install-dir"], "public/wp");
    assert_eq!(
        manifest["extra"]["installer-paths"]["public/themes/{$name}/"],
        json!(["type:wordpress-theme"])
    );
    assert_eq!(manifest["config"]["sort-packages"], true);

    let again = reconcile(result.manifest.clone(), &directives()).unwrap();
    assert!(again.changes.is_empty());
}

#[test]
fn test_empty_autoload_list_is_left_in_place() {
    let result = reconcile(json!({"autoload": [], "name": "acme/site"}), &directives()).unwrap();
    assert_eq!(result.manifest["autoload"], json!([]));
}
