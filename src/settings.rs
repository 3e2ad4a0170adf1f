//! Key/value settings stored as tab-separated rows, e.g. custom accidental glyphs.
//!
//! Every row holds a key and a value separated by a tab. Tabs, line breaks and backslashes inside
//! keys and values are escaped as `\t`, `\n`, `\r` and `\\`.

use crate::accidental::Accidental;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Read, Write};

const ROW_SEPARATOR: char = '\n';
const FIELD_SEPARATOR: char = '\t';

/// An ordered key/value table. Keys keep the position of their first insertion.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Settings {
    entries: Vec<(String, String)>,
}

impl Settings {
    /// Imports settings from a TSV source.
    ///
    /// ```
    /// # use edo31::settings::Settings;
    /// let settings = Settings::import(&b"SHARP\t\xe2\x99\xaf\n\nNote\tline 1\\nline 2\n"[..]).unwrap();
    ///
    /// assert_eq!(settings.get("SHARP"), Some("♯"));
    /// assert_eq!(settings.get("Note"), Some("line 1\nline 2"));
    /// assert_eq!(settings.get("FLAT"), None);
    /// ```
    pub fn import(mut reader: impl Read) -> Result<Self, SettingsImportError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let mut settings = Settings::default();
        for (line_index, row) in content.split(ROW_SEPARATOR).enumerate() {
            if row.is_empty() {
                continue;
            }
            let line_number = line_index + 1;

            let mut fields = parse_row(row).map_err(|sequence| {
                SettingsImportError::EscapeSequenceError {
                    line_number,
                    sequence,
                }
            })?;
            if fields.len() < 2 {
                return Err(SettingsImportError::MissingValue { line_number });
            }
            let value = fields.swap_remove(1);
            let key = fields.swap_remove(0);
            settings.set(key, value);
        }

        Ok(settings)
    }

    /// Writes all entries in insertion order, one row per entry.
    pub fn export(&self, mut writer: impl Write) -> io::Result<()> {
        for (key, value) in &self.entries {
            write!(
                writer,
                "{}{FIELD_SEPARATOR}{}{ROW_SEPARATOR}",
                escape(key),
                escape(value)
            )?;
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing_key, _)| existing_key == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing_key, _)| *existing_key == key)
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Error reported when importing [`Settings`] fails.
#[derive(Debug)]
pub enum SettingsImportError {
    IoError(io::Error),

    /// The row contains a backslash not followed by `\`, `n`, `r` or `t`.
    EscapeSequenceError {
        line_number: usize,
        sequence: String,
    },

    /// The row contains a key but no value.
    MissingValue { line_number: usize },
}

impl Display for SettingsImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SettingsImportError::IoError(err) => write!(f, "Could not read settings: {err}"),
            SettingsImportError::EscapeSequenceError {
                line_number,
                sequence,
            } => write!(
                f,
                "Invalid escape sequence at line {line_number}: {sequence}"
            ),
            SettingsImportError::MissingValue { line_number } => {
                write!(f, "Missing value at line {line_number}")
            }
        }
    }
}

impl From<io::Error> for SettingsImportError {
    fn from(v: io::Error) -> Self {
        Self::IoError(v)
    }
}

/// Splits a row into its fields and unescapes them.
///
/// On failure, the offending escape sequence is returned.
pub fn parse_row(row: &str) -> Result<Vec<String>, String> {
    row.split(FIELD_SEPARATOR).map(unescape).collect()
}

fn unescape(escaped: &str) -> Result<String, String> {
    let mut unescaped = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => unescaped.push('\\'),
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some('t') => unescaped.push('\t'),
            Some(other) => return Err(format!("\\{other}")),
            None => return Err("\\".to_owned()),
        }
    }
    Ok(unescaped)
}

/// Escapes a key or value so it fits into a single TSV field.
///
/// ```
/// # use edo31::settings;
/// assert_eq!(settings::escape("a\tb"), "a\\tb");
/// assert_eq!(settings::escape("C:\\scores\n"), "C:\\\\scores\\n");
/// ```
pub fn escape(value: &str) -> String {
    // Backslashes go first; escaping them after TAB would double the escapes and break reading back
    value
        .replace('\\', "\\\\")
        .replace('\t', "\\t")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Display strings for accidentals, configurable through [`Settings`].
#[derive(Clone, Debug, Default)]
pub struct AccidentalGlyphs {
    glyphs: BTreeMap<Accidental, String>,
}

impl AccidentalGlyphs {
    /// Reads glyphs from settings keyed by accidental identifiers, e.g. `SHARP_SLASH`.
    ///
    /// Unknown keys are skipped.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut glyphs = BTreeMap::new();
        for (key, value) in settings.iter() {
            match key.parse::<Accidental>() {
                Ok(accidental) => {
                    log::trace!("Custom glyph for {accidental}: {value}");
                    glyphs.insert(accidental, value.to_owned());
                }
                Err(err) => log::warn!("Ignoring glyph setting: {err}"),
            }
        }
        Self { glyphs }
    }

    /// The configured glyph or, if there is none, [`Accidental::default_glyph`].
    pub fn glyph(&self, accidental: Accidental) -> &str {
        self.glyphs
            .get(&accidental)
            .map(String::as_str)
            .unwrap_or_else(|| accidental.default_glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaping_round_trip() {
        let mut settings = Settings::default();
        settings.set("plain", "value");
        settings.set("tab\tkey", "back\\slash");
        settings.set("lines", "a\nb\r\nc");
        settings.set("escaped", "\\t is not a tab");
        settings.set("mixed", "\\\t");

        let mut exported = Vec::new();
        settings.export(&mut exported).unwrap();
        assert_eq!(
            String::from_utf8(exported.clone()).unwrap(),
            "plain\tvalue\n\
             tab\\tkey\tback\\\\slash\n\
             lines\ta\\nb\\r\\nc\n\
             escaped\t\\\\t is not a tab\n\
             mixed\t\\\\\\t\n"
        );

        assert_eq!(Settings::import(&exported[..]).unwrap(), settings);
    }

    #[test]
    fn later_rows_override_earlier_ones() {
        let settings = Settings::import(&b"a\t1\nb\t2\na\t3\n"[..]).unwrap();
        assert_eq!(
            settings.iter().collect::<Vec<_>>(),
            [("a", "3"), ("b", "2")]
        );
    }

    #[test]
    fn extra_columns_are_ignored() {
        let settings = Settings::import(&b"key\tvalue\tcomment"[..]).unwrap();
        assert_eq!(settings.get("key"), Some("value"));
        assert_eq!(settings.len(), 1);
    }

    #[test]
    fn invalid_escape_sequences() {
        assert!(matches!(
            Settings::import(&b"a\t1\n\nb\tC:\\scores"[..]),
            Err(SettingsImportError::EscapeSequenceError {
                line_number: 3,
                ref sequence,
            }) if sequence == "\\s"
        ));
        assert!(matches!(
            Settings::import(&b"a\t1\\"[..]),
            Err(SettingsImportError::EscapeSequenceError {
                line_number: 1,
                ref sequence,
            }) if sequence == "\\"
        ));
    }

    #[test]
    fn missing_value() {
        assert!(matches!(
            Settings::import(&b"a\t1\nb\n"[..]),
            Err(SettingsImportError::MissingValue { line_number: 2 })
        ));
    }

    #[test]
    fn empty_input() {
        assert!(Settings::import(&b""[..]).unwrap().is_empty());
        assert!(Settings::import(&b"\n\n"[..]).unwrap().is_empty());
    }

    #[test]
    fn custom_glyphs() {
        let settings =
            Settings::import(&b"SHARP_SLASH\t+\nFLAT\tflat\nQUARTER_SHARP\t?\n"[..]).unwrap();
        let glyphs = AccidentalGlyphs::from_settings(&settings);

        assert_eq!(glyphs.glyph(Accidental::SharpSlash), "+");
        assert_eq!(glyphs.glyph(Accidental::Flat), "flat");
        assert_eq!(glyphs.glyph(Accidental::Sharp), "#");
        assert_eq!(glyphs.glyph(Accidental::None), "");
    }
}
