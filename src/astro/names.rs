//! Name sources for star systems.

use std::fs;
use std::io;
use std::path::Path;

/// Supplies names for new star systems.
pub trait NameSource {
    fn next_name(&mut self) -> String;
}

/// Hands out names from a fixed list in order.
///
/// Once the list is used up it starts again with a numeric suffix, so
/// names stay unique.
#[derive(Debug, Clone)]
pub struct NameList {
    names: Vec<String>,
    next: usize,
}

impl NameList {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }

    /// Reads one name per line, skipping blank lines and `#` comments.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::new(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        ))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl NameSource for NameList {
    fn next_name(&mut self) -> String {
        let n = self.next;
        self.next += 1;
        if self.names.is_empty() {
            return format!("System {}", n + 1);
        }
        let name = &self.names[n % self.names.len()];
        match n / self.names.len() {
            0 => name.clone(),
            round => format!("{} {}", name, round + 1),
        }
    }
}

/// Names of the form `<prefix> <n>`.
#[derive(Debug, Clone)]
pub struct Numbered {
    prefix: String,
    next: u32,
}

impl Numbered {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
        }
    }
}

impl NameSource for Numbered {
    fn next_name(&mut self) -> String {
        let name = format!("{} {}", self.prefix, self.next);
        self.next += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_list_wraps_with_suffix() {
        let mut names = NameList::new(["Aldo", "Brin"]);
        let got: Vec<String> = (0..5).map(|_| names.next_name()).collect();
        assert_eq!(got, vec!["Aldo", "Brin", "Aldo 2", "Brin 2", "Aldo 3"]);
    }

    #[test]
    fn test_empty_list_still_names() {
        let mut names = NameList::new(Vec::<String>::new());
        assert_eq!(names.next_name(), "System 1");
        assert_eq!(names.next_name(), "System 2");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# names").unwrap();
        writeln!(file, "Cygni").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  Vega  ").unwrap();
        let mut names = NameList::from_file(file.path()).unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names.next_name(), "Cygni");
        assert_eq!(names.next_name(), "Vega");
    }

    #[test]
    fn test_numbered() {
        let mut names = Numbered::new("Test");
        assert_eq!(names.next_name(), "Test 1");
        assert_eq!(names.next_name(), "Test 2");
    }
}
