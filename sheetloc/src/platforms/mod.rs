//! Target platforms sheetloc can write resource files for.
//!
//! Each platform implements the [`Platform`] capability: where a language's
//! file lives, how the file is framed, how one entry is written and how a
//! placeholder becomes a native format token. [`PlatformType`] selects one by
//! name.

pub mod android;
pub mod apple;
pub mod properties;

use std::{
    borrow::Cow,
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
    str::FromStr,
};

pub use android::Android;
pub use apple::Apple;
pub use properties::Properties;

use crate::{error::Error, types::FormatKind};

/// Everything the pipeline needs to know about one target platform.
pub trait Platform {
    /// Short platform name, used in error messages.
    fn name(&self) -> &'static str;

    /// Directory holding the resource file for `lang`, under `res_dir`.
    fn localization_dir(&self, lang: &str, res_dir: &Path) -> PathBuf;

    /// File name of the resource file for `lang`.
    fn localization_file_name(&self, lang: &str) -> String;

    /// Text written once at the start of a language's file.
    fn header(&self, lang: &str) -> String;

    /// Text written once at the end of a language's file.
    fn footer(&self, lang: &str) -> String;

    /// One entry, including its trailing newline.
    fn localization(&self, lang: &str, key: &str, value: &str) -> String;

    /// Native token for a placeholder of `kind` at zero-based position `index`.
    ///
    /// Returns the reason as `Err` when the platform has no token for `kind`.
    fn indexed_format(&self, index: usize, kind: FormatKind) -> Result<String, String>;

    /// Escapes text around placeholders so the platform won't read it as a
    /// format token.
    fn escape_literal<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

/// Every supported platform, for selection by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformType {
    /// Android `res/values-<lang>/strings.xml`.
    Android,
    /// Apple `<lang>.lproj/Localizable.strings`.
    Apple,
    /// Java `messages_<lang>.properties` for `ResourceBundle`.
    Properties,
}

impl PlatformType {
    /// Returns the capability implementation for this platform.
    pub fn platform(&self) -> Box<dyn Platform> {
        match self {
            PlatformType::Android => Box::new(Android),
            PlatformType::Apple => Box::new(Apple),
            PlatformType::Properties => Box::new(Properties),
        }
    }
}

/// Prints the canonical name accepted by [`FromStr`].
///
/// ```rust
/// use sheetloc::platforms::PlatformType;
/// assert_eq!(PlatformType::Android.to_string(), "android");
/// assert_eq!(PlatformType::Apple.to_string(), "ios");
/// assert_eq!(PlatformType::Properties.to_string(), "properties");
/// ```
impl Display for PlatformType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformType::Android => write!(f, "android"),
            PlatformType::Apple => write!(f, "ios"),
            PlatformType::Properties => write!(f, "properties"),
        }
    }
}

/// Accepts the following case-insensitive names:
/// - `"android"`, `"xml"` → `PlatformType::Android`
/// - `"ios"`, `"apple"`, `"macos"`, `"strings"` → `PlatformType::Apple`
/// - `"properties"`, `"java"` → `PlatformType::Properties`
///
/// Returns [`Error::UnknownPlatform`] for anything else.
impl FromStr for PlatformType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "android" | "xml" => Ok(PlatformType::Android),
            "ios" | "apple" | "macos" | "strings" => Ok(PlatformType::Apple),
            "properties" | "java" => Ok(PlatformType::Properties),
            other => Err(Error::UnknownPlatform(other.to_string())),
        }
    }
}

impl<'de> serde::Deserialize<'de> for PlatformType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Doubles every `%` so printf-style platforms print it literally.
pub(crate) fn escape_percent(text: &str) -> Cow<'_, str> {
    if text.contains('%') {
        Cow::Owned(text.replace('%', "%%"))
    } else {
        Cow::Borrowed(text)
    }
}
