use indexmap::IndexMap;

/// A named group of `key = value` properties, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    properties: IndexMap<String, String>,
}

impl Section {
    #[must_use]
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            properties: IndexMap::with_capacity(8),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Returns the previous value when the key already existed.
    pub(crate) fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.properties.insert(key, value)
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<String> {
        self.properties.shift_remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_in_place() {
        let mut section = Section::new("main".to_owned());
        section.insert("a".to_owned(), "1".to_owned());
        section.insert("b".to_owned(), "2".to_owned());

        let previous = section.insert("a".to_owned(), "3".to_owned());

        assert_eq!(previous.as_deref(), Some("1"));
        assert_eq!(
            section.properties().collect::<Vec<_>>(),
            vec![("a", "3"), ("b", "2")]
        );
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut section = Section::new("main".to_owned());
        for key in ["x", "y", "z"] {
            section.insert(key.to_owned(), String::new());
        }

        assert_eq!(section.remove("y"), Some(String::new()));
        assert_eq!(section.remove("y"), None);
        assert_eq!(section.keys().collect::<Vec<_>>(), vec!["x", "z"]);
    }
}
