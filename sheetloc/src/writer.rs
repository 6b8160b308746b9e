//! Writes [`Localizations`] to one resource file per language.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::Error, platforms::Platform, types::Localizations};

/// Writes one language somewhere other than the platform's usual location,
/// e.g. English into Android's unqualified `values/strings.xml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DefaultLocalization {
    /// Language code, as captured from the header row.
    pub lang: String,
    /// Literal output file path.
    pub path: PathBuf,
}

/// Options for [`write_localizations`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WriteOptions {
    pub default_localization: Option<DefaultLocalization>,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends `lang` to `path` instead of the platform's computed location.
    pub fn with_default_localization(
        mut self,
        lang: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        self.default_localization = Some(DefaultLocalization {
            lang: lang.into(),
            path: path.into(),
        });
        self
    }

    /// Output file for `lang`: the override path if `lang` is the default
    /// language and the path is not empty, otherwise the platform's location.
    pub fn resolve_path(&self, platform: &dyn Platform, res_dir: &Path, lang: &str) -> PathBuf {
        match &self.default_localization {
            Some(default)
                if !default.lang.is_empty()
                    && default.lang == lang
                    && !default.path.as_os_str().is_empty() =>
            {
                default.path.clone()
            }
            _ => platform
                .localization_dir(lang, res_dir)
                .join(platform.localization_file_name(lang)),
        }
    }
}

/// Writes every language in `localizations` through `platform`.
///
/// `res_dir` must already exist. Each file holds the platform header, one
/// line per key (sorted by key) and the platform footer, so repeated runs on
/// the same model produce identical bytes. Returns the written paths, ordered
/// by language.
///
/// Files written before a failure are left on disk.
pub fn write_localizations<P: AsRef<Path>>(
    platform: &dyn Platform,
    res_dir: P,
    localizations: &Localizations,
    options: &WriteOptions,
) -> Result<Vec<PathBuf>, Error> {
    let res_dir = res_dir.as_ref();
    check_res_dir(res_dir)?;

    let mut written = Vec::new();
    for (lang, entries) in localizations.by_language() {
        let path = options.resolve_path(platform, res_dir, lang);
        let mut file = LanguageFile::create(&path, lang)?;
        write_language(platform, lang, &entries, &mut file.writer)
            .map_err(|source| file.error(source))?;
        file.finish()?;

        tracing::debug!(lang, path = %path.display(), entries = entries.len(), "wrote localizations");
        written.push(path);
    }

    Ok(written)
}

/// Writes one language's header, entries and footer to any writer.
pub fn write_language<W: Write>(
    platform: &dyn Platform,
    lang: &str,
    entries: &BTreeMap<&str, &str>,
    mut writer: W,
) -> io::Result<()> {
    writer.write_all(platform.header(lang).as_bytes())?;
    for (key, value) in entries {
        writer.write_all(platform.localization(lang, key, value).as_bytes())?;
    }
    writer.write_all(platform.footer(lang).as_bytes())?;
    Ok(())
}

fn check_res_dir(res_dir: &Path) -> Result<(), Error> {
    let metadata = fs::metadata(res_dir).map_err(|source| Error::ResDirUnreachable {
        path: res_dir.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(Error::ResDirUnreachable {
            path: res_dir.to_path_buf(),
            source: io::Error::other("not a directory"),
        });
    }
    Ok(())
}

/// An open output file. Dropping it closes the handle.
struct LanguageFile {
    path: PathBuf,
    lang: String,
    writer: BufWriter<File>,
}

impl LanguageFile {
    /// Creates intermediate directories, then creates (or truncates) the file.
    fn create(path: &Path, lang: &str) -> Result<Self, Error> {
        let error = |source| Error::Write {
            path: path.to_path_buf(),
            lang: lang.to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(error)?;
        }
        let file = File::create(path).map_err(error)?;

        Ok(Self {
            path: path.to_path_buf(),
            lang: lang.to_string(),
            writer: BufWriter::new(file),
        })
    }

    fn error(&self, source: io::Error) -> Error {
        Error::Write {
            path: self.path.clone(),
            lang: self.lang.clone(),
            source,
        }
    }

    fn finish(mut self) -> Result<(), Error> {
        self.writer.flush().map_err(|source| self.error(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::{Android, Apple};
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn model() -> Localizations {
        vec![
            (
                "zebra".to_string(),
                HashMap::from([
                    ("en".to_string(), "Zebra".to_string()),
                    ("fr".to_string(), "Zèbre".to_string()),
                ]),
            ),
            (
                "apple".to_string(),
                HashMap::from([
                    ("en".to_string(), "Apple".to_string()),
                    ("fr".to_string(), "Pomme".to_string()),
                ]),
            ),
            (
                "mango".to_string(),
                HashMap::from([("en".to_string(), "Mango".to_string())]),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_writes_one_file_per_language() {
        let dir = TempDir::new().unwrap();
        let written =
            write_localizations(&Android, dir.path(), &model(), &WriteOptions::new()).unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("values-en/strings.xml"),
                dir.path().join("values-fr/strings.xml"),
            ]
        );

        let en = fs::read_to_string(dir.path().join("values-en/strings.xml")).unwrap();
        let expected = format!(
            "{}{}{}{}{}",
            Android.header("en"),
            "    <string name=\"apple\">Apple</string>\n",
            "    <string name=\"mango\">Mango</string>\n",
            "    <string name=\"zebra\">Zebra</string>\n",
            Android.footer("en"),
        );
        assert_eq!(en, expected);

        let fr = fs::read_to_string(dir.path().join("values-fr/strings.xml")).unwrap();
        assert!(fr.contains("<string name=\"apple\">Pomme</string>"));
        assert!(!fr.contains("mango"));
    }

    #[test]
    fn test_rewrite_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en.lproj/Localizable.strings");

        write_localizations(&Apple, dir.path(), &model(), &WriteOptions::new()).unwrap();
        let first = fs::read(&path).unwrap();
        write_localizations(&Apple, dir.path(), &model(), &WriteOptions::new()).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_default_localization_override() {
        let dir = TempDir::new().unwrap();
        let default_path = dir.path().join("values/strings.xml");
        let options = WriteOptions::new().with_default_localization("en", &default_path);

        let written = write_localizations(&Android, dir.path(), &model(), &options).unwrap();

        assert!(written.contains(&default_path));
        assert!(default_path.exists());
        assert!(!dir.path().join("values-en").exists());
        assert!(dir.path().join("values-fr/strings.xml").exists());
    }

    #[test]
    fn test_empty_override_path_is_ignored() {
        let options = WriteOptions::new().with_default_localization("en", "");
        let path = options.resolve_path(&Android, Path::new("res"), "en");
        assert_eq!(path, PathBuf::from("res/values-en/strings.xml"));
    }

    #[test]
    fn test_missing_res_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err =
            write_localizations(&Android, &missing, &model(), &WriteOptions::new()).unwrap_err();
        assert!(matches!(err, Error::ResDirUnreachable { ref path, .. } if *path == missing));
        assert!(!missing.exists());
    }

    #[test]
    fn test_res_dir_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("res");
        fs::write(&file, "").unwrap();
        let err = write_localizations(&Android, &file, &model(), &WriteOptions::new()).unwrap_err();
        assert!(matches!(err, Error::ResDirUnreachable { .. }));
    }

    #[test]
    fn test_write_error_carries_path_and_language() {
        let dir = TempDir::new().unwrap();
        // a file where the language directory should go
        fs::write(dir.path().join("values-en"), "").unwrap();
        let err =
            write_localizations(&Android, dir.path(), &model(), &WriteOptions::new()).unwrap_err();
        match err {
            Error::Write { path, lang, .. } => {
                assert_eq!(lang, "en");
                assert_eq!(path, dir.path().join("values-en/strings.xml"));
            }
            other => panic!("expected Write error, got {:?}", other),
        }
    }

    #[test]
    fn test_write_language_to_memory() {
        let entries = BTreeMap::from([("b", "B"), ("a", "A")]);
        let mut out = Vec::new();
        write_language(&Apple, "en", &entries, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let body = out.strip_prefix(&Apple.header("en")).unwrap();
        assert_eq!(body, "\"a\" = \"A\";\n\"b\" = \"B\";\n");
    }
}
