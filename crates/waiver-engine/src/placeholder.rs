//! Placeholder keys, token syntaxes and the ordered replacement map
//!
//! Templates in the wild mark fields inconsistently, so a key such as
//! `OWNER` is looked for in every supported syntax:
//!
//! 1. `[OWNER]`
//! 2. `{{OWNER}}`
//! 3. `{OWNER}`
//! 4. `OWNER` (bare; uppercase keys only)
//!
//! A key given already wrapped (e.g. `{{OwnerName}}`) matches only that syntax.

/// A way of marking a placeholder in template text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenSyntax {
    Bracketed,
    DoubleBraced,
    Braced,
    Bare,
}

impl TokenSyntax {
    /// Matching priority, highest first
    pub const PRIORITY: [TokenSyntax; 4] = [
        TokenSyntax::Bracketed,
        TokenSyntax::DoubleBraced,
        TokenSyntax::Braced,
        TokenSyntax::Bare,
    ];

    /// Position in [`TokenSyntax::PRIORITY`]; lower wins
    pub fn rank(&self) -> usize {
        match self {
            TokenSyntax::Bracketed => 0,
            TokenSyntax::DoubleBraced => 1,
            TokenSyntax::Braced => 2,
            TokenSyntax::Bare => 3,
        }
    }

    pub fn wrap(&self, name: &str) -> String {
        match self {
            TokenSyntax::Bracketed => format!("[{}]", name),
            TokenSyntax::DoubleBraced => format!("{{{{{}}}}}", name),
            TokenSyntax::Braced => format!("{{{}}}", name),
            TokenSyntax::Bare => name.to_string(),
        }
    }

    fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            TokenSyntax::Bracketed => ("[", "]"),
            TokenSyntax::DoubleBraced => ("{{", "}}"),
            TokenSyntax::Braced => ("{", "}"),
            TokenSyntax::Bare => ("", ""),
        }
    }
}

/// Bare matching is limited to `UPPER_SNAKE` names so ordinary prose
/// ("the Owner shall...") is never rewritten.
pub fn is_bare_token(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// A parsed placeholder key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    name: String,
    syntax: Option<TokenSyntax>,
}

impl Placeholder {
    /// Parse a map key, detecting an explicit wrapping syntax
    pub fn parse(key: &str) -> Self {
        let key = key.trim();
        for syntax in [
            TokenSyntax::DoubleBraced,
            TokenSyntax::Bracketed,
            TokenSyntax::Braced,
        ] {
            let (open, close) = syntax.delimiters();
            if let Some(inner) = key
                .strip_prefix(open)
                .and_then(|rest| rest.strip_suffix(close))
            {
                let inner = inner.trim();
                if !inner.is_empty() && !inner.contains(['[', ']', '{', '}']) {
                    return Self {
                        name: inner.to_string(),
                        syntax: Some(syntax),
                    };
                }
            }
        }
        Self {
            name: key.to_string(),
            syntax: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn syntax(&self) -> Option<TokenSyntax> {
        self.syntax
    }

    /// Literal tokens to search for, in priority order
    pub fn tokens(&self) -> Vec<(TokenSyntax, String)> {
        if self.name.is_empty() {
            return Vec::new();
        }
        match self.syntax {
            Some(syntax) => vec![(syntax, syntax.wrap(&self.name))],
            None => TokenSyntax::PRIORITY
                .into_iter()
                .filter(|s| *s != TokenSyntax::Bare || is_bare_token(&self.name))
                .map(|s| (s, s.wrap(&self.name)))
                .collect(),
        }
    }
}

/// Ordered mapping from placeholder key to replacement value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: Vec<(String, String)>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; an existing key keeps its position
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PlaceholderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PlaceholderMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for PlaceholderMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_forms() {
        assert_eq!(TokenSyntax::Bracketed.wrap("OWNER"), "[OWNER]");
        assert_eq!(TokenSyntax::DoubleBraced.wrap("OWNER"), "{{OWNER}}");
        assert_eq!(TokenSyntax::Braced.wrap("OWNER"), "{OWNER}");
        assert_eq!(TokenSyntax::Bare.wrap("OWNER"), "OWNER");
    }

    #[test]
    fn test_parse_detects_explicit_syntax() {
        let p = Placeholder::parse("{{OwnerName}}");
        assert_eq!(p.name(), "OwnerName");
        assert_eq!(p.syntax(), Some(TokenSyntax::DoubleBraced));

        assert_eq!(Placeholder::parse("[OWNER]").syntax(), Some(TokenSyntax::Bracketed));
        assert_eq!(Placeholder::parse("{Owner}").syntax(), Some(TokenSyntax::Braced));
        assert_eq!(Placeholder::parse("OWNER").syntax(), None);
        // Unbalanced wrappers fall back to a bare name
        assert_eq!(Placeholder::parse("{{x}").syntax(), None);
    }

    #[test]
    fn test_bare_tokens_are_uppercase_only() {
        assert!(is_bare_token("OWNER_NAME"));
        assert!(is_bare_token("LINE2"));
        assert!(!is_bare_token("Owner"));
        assert!(!is_bare_token("_____"));

        let tokens: Vec<String> = Placeholder::parse("Owner")
            .tokens()
            .into_iter()
            .map(|(_, t)| t)
            .collect();
        assert_eq!(tokens, vec!["[Owner]", "{{Owner}}", "{Owner}"]);
    }

    #[test]
    fn test_tokens_follow_priority() {
        let syntaxes: Vec<TokenSyntax> = Placeholder::parse("OWNER")
            .tokens()
            .into_iter()
            .map(|(s, _)| s)
            .collect();
        assert_eq!(syntaxes, TokenSyntax::PRIORITY.to_vec());
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut map: PlaceholderMap = [("A", "1"), ("B", "2")].into_iter().collect();
        map.insert("A", "3");
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("A", "3"), ("B", "2")]);
        assert_eq!(map.len(), 2);
    }
}
