use std::fmt;

/// A free-text postal address as entered by a user.
///
/// There is no fixed structure: it might be a complete postal
/// address or only the name of a neighbourhood. Country or region
/// qualifiers may or may not be included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The address without leading and trailing whitespace.
    pub fn trimmed(&self) -> &str {
        self.0.trim()
    }

    pub fn is_empty(&self) -> bool {
        self.trimmed().is_empty()
    }

    /// Checks if the address mentions one of the given markers,
    /// ignoring the case of both sides.
    pub fn contains_any<S: AsRef<str>>(&self, markers: &[S]) -> bool {
        let lower = self.0.to_lowercase();
        markers
            .iter()
            .map(|m| m.as_ref().trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .any(|m| lower.contains(&m))
    }
}

impl From<String> for Address {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<&str> for Address {
    fn from(from: &str) -> Self {
        from.to_owned().into()
    }
}

impl From<Address> for String {
    fn from(from: Address) -> Self {
        from.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
