use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Unix permission bitmask for a generated file or directory.
///
/// Invariant: `0` means "unset". Anything else is used verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileMode(u32);

impl FileMode {
    /// Mode used for parent directories when a file does not declare one.
    pub const DEFAULT_DIR: FileMode = FileMode(0o755);

    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn is_unset(&self) -> bool {
        self.0 == 0
    }

    /// Return `self`, or `fallback` when unset.
    pub const fn or(self, fallback: FileMode) -> FileMode {
        if self.is_unset() { fallback } else { self }
    }

    /// Parse an octal mode string: `"0644"`, `"644"` or `"0o644"`.
    pub fn parse_octal(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("0o")
            .or_else(|| trimmed.strip_prefix("0O"))
            .unwrap_or(trimmed);
        if digits.is_empty() {
            return None;
        }
        u32::from_str_radix(digits, 8).ok().map(Self)
    }
}

impl From<u32> for FileMode {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

impl Serialize for FileMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

// YAML 1.2 reads a bare `0644` as a string, so both shapes are accepted.
impl<'de> Deserialize<'de> for FileMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ModeVisitor;

        impl de::Visitor<'_> for ModeVisitor {
            type Value = FileMode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a file mode as an integer or an octal string such as \"0644\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<FileMode, E> {
                u32::try_from(v)
                    .map(FileMode)
                    .map_err(|_| E::custom(format!("file mode {v} is out of range")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<FileMode, E> {
                u32::try_from(v)
                    .map(FileMode)
                    .map_err(|_| E::custom(format!("file mode {v} is out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FileMode, E> {
                FileMode::parse_octal(v)
                    .ok_or_else(|| E::custom(format!("'{v}' is not an octal file mode")))
            }

            fn visit_unit<E: de::Error>(self) -> Result<FileMode, E> {
                Ok(FileMode::default())
            }
        }

        deserializer.deserialize_any(ModeVisitor)
    }
}
