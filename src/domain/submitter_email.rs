use std::fmt::Display;

use validator::validate_email;

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitterEmail(String);

impl SubmitterEmail {
    /// Only the basic `local@domain` shape is checked; deliverability is not.
    pub fn parse(s: String) -> Result<Self, String> {
        match validate_email(&s) {
            true => Ok(Self(s)),
            false => Err(format!("{} is not a valid email address", s)),
        }
    }
}

impl Display for SubmitterEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SubmitterEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
