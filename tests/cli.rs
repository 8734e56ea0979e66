use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

const MANIFEST: &str = r#"{
  "theme.js": {
    "isEntry": true,
    "src": "theme.js",
    "file": "theme.A1B2.js",
    "imports": ["vendor"],
    "css": []
  },
  "vendor": {
    "file": "vendor.C3D4.js",
    "css": ["vendor.E5F6.css"]
  },
  "style.css": {
    "src": "style.css",
    "file": "style.0A0B.css"
  }
}"#;

fn write_project(root: &Path, config: &str) {
    fs::write(root.join("vite-liquid.toml"), config).unwrap();
    fs::create_dir_all(root.join("shopify/assets")).unwrap();
    fs::write(root.join("shopify/assets/manifest.json"), MANIFEST).unwrap();
}

fn vite_liquid() -> Command {
    Command::cargo_bin("vite-liquid").unwrap()
}

#[test]
fn build_writes_tag_and_client_snippets() {
    let dir = tempfile::tempdir().unwrap();
    write_project(
        dir.path(),
        "input = \"frontend/entrypoints/**/*\"\ntheme_root = \"shopify\"\n\n[build]\ncss_code_split = false\n",
    );

    vite_liquid()
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("Rendered 2 entries"));

    let tags = fs::read_to_string(dir.path().join("shopify/snippets/vite-tag.liquid")).unwrap();
    let expected = "{%- # theme-check-disable UndefinedObject -%}\n\n\
{%- if vite-tag == 'theme.js' -%}\n  \
<script type=\"module\" crossorigin=\"anonymous\" src=\"{{ 'theme.A1B2.js' | asset_url }}\"></script>\n  \
<link crossorigin=\"anonymous\" rel=\"modulepreload\" as=\"script\" href=\"{{ 'vendor.C3D4.js' | asset_url }}\">\n  \
<link rel=\"stylesheet\" href=\"{{ 'vendor.E5F6.css' | asset_url }}\">\n\
{%- endif -%}\n\n\
{%- if vite-tag == 'style.css' -%}\n  \
<link rel=\"stylesheet\" href=\"{{ 'style.0A0B.css' | asset_url }}\">\n\
{%- endif -%}";
    assert_eq!(tags, expected);

    let client = fs::read_to_string(dir.path().join("shopify/snippets/vite-client.liquid")).unwrap();
    assert_eq!(client, "");
}

#[test]
fn build_flag_overrides_css_code_split() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), "input = \"a.ts\"\ntheme_root = \"shopify\"\n");

    vite_liquid()
        .current_dir(dir.path())
        .args(["build", "--css-code-split", "true"])
        .assert()
        .success();

    let tags = fs::read_to_string(dir.path().join("shopify/snippets/vite-tag.liquid")).unwrap();
    assert!(tags.contains("'theme.js'"));
    assert!(!tags.contains("'style.css'"));
}

#[test]
fn build_ignores_dev_server_settings() {
    let dir = tempfile::tempdir().unwrap();
    write_project(
        dir.path(),
        "input = \"a.ts\"\ntheme_root = \"shopify\"\n\n[server]\nhost = \"bad host\"\n",
    );

    vite_liquid()
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .success();

    assert!(dir.path().join("shopify/snippets/vite-tag.liquid").exists());
}

#[test]
fn build_fails_without_manifest() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("vite-liquid.toml"), "input = \"a.ts\"\n").unwrap();

    vite_liquid()
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("manifest not found"));

    assert!(!dir.path().join("snippets/vite-tag.liquid").exists());
}

#[test]
fn missing_input_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("vite-liquid.toml"), "theme_root = \"shopify\"\n").unwrap();

    vite_liquid()
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing configuration for \"input\""));
}

#[test]
fn missing_config_file() {
    let dir = tempfile::tempdir().unwrap();

    vite_liquid()
        .current_dir(dir.path())
        .args(["--config", "nope.toml", "build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing configuration."));
}
