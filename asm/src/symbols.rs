use indexmap::IndexMap;

/// Label name -> bound machine line. Populated incrementally during
/// pass 1, read-only during pass 2.
#[derive(Debug, Default)]
pub struct Symbols(IndexMap<String, usize>);

impl Symbols {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Binds a label; returns the previously bound line on a duplicate,
    /// leaving the original binding in place.
    pub fn insert(&mut self, label: String, mac_line: usize) -> Option<usize> {
        if let Some(&prev) = self.0.get(&label) {
            return Some(prev);
        }
        self.0.insert(label, mac_line);
        None
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.0.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keeps_first() {
        let mut symbols = Symbols::new();
        assert_eq!(symbols.insert("a".to_string(), 1), None);
        assert_eq!(symbols.insert("a".to_string(), 9), Some(1));
        assert_eq!(symbols.get("a"), Some(1));
        assert_eq!(symbols.get("b"), None);
        assert_eq!(symbols.len(), 1);
    }
}
