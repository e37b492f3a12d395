use unicode_segmentation::UnicodeSegmentation;

const MAX_GRAPHEMES: usize = 150;
const ALLOWED_PUNCTUATION: [char; 5] = ['@', '.', '+', '-', '_'];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    pub fn parse(s: String) -> Result<Self, String> {
        if s.trim().is_empty() {
            Err(format!("Username '{}' has no non-whitespace characters.", s))
        } else if s.graphemes(true).count() > MAX_GRAPHEMES {
            Err(format!("Username {} is too long.", s))
        } else if let Some(c) = s
            .chars()
            .find(|&c| !c.is_alphanumeric() && !ALLOWED_PUNCTUATION.contains(&c))
        {
            Err(format!("Username {} contains the forbidden character {:?}.", s, c))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
