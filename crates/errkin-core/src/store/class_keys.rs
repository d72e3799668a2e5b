use std::collections::HashMap;

/// Kind name -> own context field names
///
/// Plain single-threaded table; `Registry` owns the locking. Registering a
/// name again replaces its field list.
#[derive(Debug, Clone, Default)]
pub struct ClassKeyRegistry {
    keys: HashMap<String, Vec<String>>,
}

impl ClassKeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `fields` under `name`, returning the replaced list if any
    pub fn register(&mut self, name: &str, fields: Vec<String>) -> Option<Vec<String>> {
        self.keys.insert(name.to_string(), fields)
    }

    /// Own fields registered for `name`
    pub fn own_fields(&self, name: &str) -> Option<&[String]> {
        self.keys.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

/// Trim, drop empties and drop repeats, keeping first occurrence order
pub(crate) fn normalize_fields<I, S>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for field in fields {
        let field = field.as_ref().trim();
        if field.is_empty() || out.iter().any(|existing| existing == field) {
            continue;
        }
        out.push(field.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_last_wins() {
        let mut keys = ClassKeyRegistry::new();
        assert!(keys.register("Data", vec!["source".into()]).is_none());

        let previous = keys.register("Data", vec!["table".into()]);

        assert_eq!(previous, Some(vec!["source".to_string()]));
        assert_eq!(keys.own_fields("Data"), Some(&["table".to_string()][..]));
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_unknown_name_is_none() {
        let keys = ClassKeyRegistry::new();
        assert!(keys.own_fields("Nope").is_none());
        assert!(!keys.contains("Nope"));
        assert!(keys.is_empty());
    }

    #[test]
    fn test_normalize_fields_dedups_in_order() {
        let fields = normalize_fields(["b", "a", " b ", "", "c", "a"]);
        assert_eq!(fields, vec!["b", "a", "c"]);
    }
}
