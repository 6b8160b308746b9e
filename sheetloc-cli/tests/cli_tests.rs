use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn sheetloc_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("sheetloc"))
}

const CONFIG: &str = r#"
source = "translations.csv"
tab = "Strings"
res_dir = "res"
platform = "ios"

[formats]
count = "integer"
"#;

const SHEET: &str = "key,lang_en,lang_es\n\
items,{count} items,{count} artículos\n\
hello,Hello,\n";

fn setup(dir: &Path) {
    fs::write(dir.join("sheetloc.toml"), CONFIG).unwrap();
    fs::write(dir.join("translations.csv"), SHEET).unwrap();
    fs::create_dir_all(dir.join("res")).unwrap();
}

#[test]
fn test_cli_generate_writes_files() {
    let temp_dir = TempDir::new().unwrap();
    setup(temp_dir.path());

    let output = sheetloc_cmd()
        .args([
            "generate",
            "-c",
            temp_dir.path().join("sheetloc.toml").to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 key(s) written to 2 file(s), 1 warning(s)"));

    let es = fs::read_to_string(temp_dir.path().join("res/es.lproj/Localizable.strings")).unwrap();
    assert!(es.contains("\"items\" = \"%1$ld artículos\";"));
    assert!(!es.contains("hello"));
}

#[test]
fn test_cli_generate_json_report() {
    let temp_dir = TempDir::new().unwrap();
    setup(temp_dir.path());

    let output = sheetloc_cmd()
        .args([
            "generate",
            "-c",
            temp_dir.path().join("sheetloc.toml").to_str().unwrap(),
            "--platform",
            "android",
            "--json",
        ])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["keys"], 2);
    assert_eq!(v["written"].as_array().unwrap().len(), 2);
    assert_eq!(v["diagnostics"][0]["kind"], "localization_missing");
    assert_eq!(v["diagnostics"][0]["key"], "hello");
    assert!(temp_dir.path().join("res/values-es/strings.xml").exists());
}

#[test]
fn test_cli_strict_flag_fails() {
    let temp_dir = TempDir::new().unwrap();
    setup(temp_dir.path());

    let output = sheetloc_cmd()
        .args([
            "generate",
            "-c",
            temp_dir.path().join("sheetloc.toml").to_str().unwrap(),
            "--strict",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(r#""hello" is missing for "es" language"#));
    assert_eq!(fs::read_dir(temp_dir.path().join("res")).unwrap().count(), 0);
}

#[test]
fn test_cli_check_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    setup(temp_dir.path());

    let output = sheetloc_cmd()
        .args([
            "check",
            "-c",
            temp_dir.path().join("sheetloc.toml").to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 key(s), language(s): en, es"));
    assert!(stdout.contains(r#""hello" is missing for "es" language"#));
    assert_eq!(fs::read_dir(temp_dir.path().join("res")).unwrap().count(), 0);
}

#[test]
fn test_cli_missing_config() {
    let temp_dir = TempDir::new().unwrap();

    let output = sheetloc_cmd()
        .args([
            "check",
            "-c",
            temp_dir.path().join("nope.toml").to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}
