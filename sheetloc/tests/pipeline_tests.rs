use indoc::indoc;
use sheetloc::{DelimitedFileSource, Diagnostic, Error, RunConfig, run};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SHEET: &str = indoc! {r#"
    key,comment,lang_en,lang_fr,lang_pt-BR
    welcome,Home screen,"Welcome, {name}!","Bienvenue, {name} !","Bem-vindo, {name}!"
    cart_items,Cart badge,{count} items in {name}'s cart,{count} articles,{count} itens
    ,orphan row,No key,Pas de clé,Sem chave
    discount,Promo,{percent}% off,{percent} % de réduction,
"#};

fn write_config(dir: &Path, extra: &str) -> RunConfig {
    let config = format!(
        indoc! {r#"
            source = "translations.csv"
            tab = "Strings"
            res_dir = "res"
            platform = "android"
            {}

            [formats]
            name = "string"
            count = "integer"
            percent = "integer"
        "#},
        extra
    );
    fs::write(dir.join("translations.csv"), SHEET).unwrap();
    fs::write(dir.join("sheetloc.toml"), config).unwrap();
    fs::create_dir_all(dir.join("res")).unwrap();
    RunConfig::from_file(dir.join("sheetloc.toml")).unwrap()
}

#[test]
fn test_lenient_run_writes_android_resources() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");
    let source = DelimitedFileSource::from_path(&config.source);

    let report = run(&config, &source).unwrap();

    assert_eq!(report.keys, 3);
    assert_eq!(
        report.diagnostics,
        vec![
            Diagnostic::KeyMissing {
                tab: "Strings".to_string(),
                line: 4,
            },
            Diagnostic::LocalizationMissing {
                tab: "Strings".to_string(),
                line: 5,
                key: "discount".to_string(),
                lang: "pt-BR".to_string(),
            },
        ]
    );

    let en = fs::read_to_string(dir.path().join("res/values-en/strings.xml")).unwrap();
    assert_eq!(
        en,
        indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <!-- This file is automatically generated by sheetloc. Do not edit it manually. -->
            <resources>
                <string name="cart_items">%1$d items in %2$s\'s cart</string>
                <string name="discount">%1$d%% off</string>
                <string name="welcome">Welcome, %1$s!</string>
            </resources>
        "#}
    );

    let pt = fs::read_to_string(dir.path().join("res/values-pt-rBR/strings.xml")).unwrap();
    assert!(pt.contains("<string name=\"welcome\">Bem-vindo, %1$s!</string>"));
    assert!(!pt.contains("discount"));
}

#[test]
fn test_default_localization_goes_to_unqualified_values() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        indoc! {r#"
            [default_localization]
            lang = "en"
            path = "res/values/strings.xml"
        "#},
    );
    let source = DelimitedFileSource::from_path(&config.source);

    let report = run(&config, &source).unwrap();

    let default_path = dir.path().join("res/values/strings.xml");
    assert!(report.written.contains(&default_path));
    assert!(fs::read_to_string(&default_path).unwrap().contains("Welcome, %1$s!"));
    assert!(!dir.path().join("res/values-en").exists());
    assert!(dir.path().join("res/values-fr/strings.xml").exists());
}

#[test]
fn test_strict_run_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "strict = true");
    let source = DelimitedFileSource::from_path(&config.source);

    let err = run(&config, &source).unwrap_err();

    match err {
        Error::KeyMissing { tab, line } => {
            assert_eq!(tab, "Strings");
            assert_eq!(line, 4);
        }
        other => panic!("expected KeyMissing, got {:?}", other),
    }
    assert_eq!(fs::read_dir(dir.path().join("res")).unwrap().count(), 0);
}

#[test]
fn test_undeclared_format_aborts_lenient_run() {
    let dir = TempDir::new().unwrap();
    let mut config = write_config(dir.path(), "");
    config.formats.remove("percent");
    let source = DelimitedFileSource::from_path(&config.source);

    let err = run(&config, &source).unwrap_err();

    assert!(matches!(
        err,
        Error::UndeclaredFormat { ref name, line: 5, .. } if name == "percent"
    ));
    assert_eq!(fs::read_dir(dir.path().join("res")).unwrap().count(), 0);
}

#[test]
fn test_missing_res_dir_is_reported() {
    let dir = TempDir::new().unwrap();
    let mut config = write_config(dir.path(), "");
    config.res_dir = dir.path().join("missing");
    let source = DelimitedFileSource::from_path(&config.source);

    let err = run(&config, &source).unwrap_err();
    assert!(matches!(err, Error::ResDirUnreachable { .. }));
}
