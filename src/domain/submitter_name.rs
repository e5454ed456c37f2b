use std::fmt::Display;

/// A first or last name as typed into the form. Stored verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitterName(String);

impl SubmitterName {
    pub fn parse(s: String) -> Result<Self, String> {
        if s.is_empty() {
            return Err("name must not be empty".to_string());
        }

        Ok(Self(s))
    }
}

impl Display for SubmitterName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SubmitterName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
