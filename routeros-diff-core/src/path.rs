use std::fmt::{self, Display, Formatter};

use serde::{Serialize, Serializer};

/// Location of a section in the configuration namespace, e.g. `/ip firewall filter`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionPath {
    segments: Vec<String>,
}

impl SectionPath {
    /// The root path `/`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from its name segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Read a path written as `/seg1 seg2 ...`.
    pub fn parse(text: &str) -> Self {
        Self::new(text.trim().trim_start_matches('/').split_whitespace())
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Path of the child section called `name`.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }
}

impl Display for SectionPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join(" "))
    }
}

impl Serialize for SectionPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::SectionPath;

    #[test]
    fn parse_and_display_round_trip() {
        let path = SectionPath::parse("/ip firewall  filter");
        assert_eq!(path.segments(), ["ip", "firewall", "filter"]);
        assert_eq!(path.to_string(), "/ip firewall filter");
        assert_eq!(SectionPath::parse("/"), SectionPath::root());
        assert_eq!(SectionPath::root().to_string(), "/");
    }

    #[test]
    fn child_and_parent_are_inverse() {
        let path = SectionPath::parse("/ip firewall");
        let child = path.child("nat");
        assert_eq!(child.name(), Some("nat"));
        assert_eq!(child.parent(), Some(path));
        assert_eq!(SectionPath::root().parent(), None);
    }
}
