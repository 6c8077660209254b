use crate::error::Result;
use std::path::Path;

/// A decoded property list dictionary, XML or binary.
pub struct PlistFile {
    pub data: plist::Dictionary,
}

impl PlistFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = plist::from_file::<_, plist::Dictionary>(path.as_ref())?;
        Ok(Self { data })
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_string())
    }

    /// String value for `key`, empty when the key is missing or not a string.
    pub fn string_or_empty(&self, key: &str) -> String {
        self.get_string(key).unwrap_or_default().to_string()
    }
}
