//! Precomputed, sorted view of a select's options.
//!
//! [`OptionIndex`] resolves every option once when the option list or the
//! resolver changes, sorts the result with [`collate`](crate::collate), and
//! answers filter queries without touching the caller's options again.

use crate::collate::SortKey;
use crate::option::OptionResolver;

/// One resolved option.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedOption {
    /// Position in the caller's option list.
    pub index: usize,
    /// Display text.
    pub display: String,
    /// Lowercased display text, matched against the search term.
    pub display_lower: String,
    /// Collation key for sorting.
    pub key: SortKey,
    /// Resolved value.
    pub value: i64,
}

/// Options resolved and sorted once per options/resolver change.
#[derive(Debug, Clone, Default)]
pub struct OptionIndex {
    entries: Vec<IndexedOption>,
}

impl OptionIndex {
    /// Resolve and sort `options`. Equal sort keys keep their input order.
    pub fn build<T: 'static>(options: &[T], resolver: &dyn OptionResolver<T>) -> Self {
        let mut entries: Vec<IndexedOption> = options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let display = resolver.display_text(option);
                IndexedOption {
                    index,
                    display_lower: display.to_lowercase(),
                    key: SortKey::new(&display),
                    display,
                    value: resolver.value(option),
                }
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Self { entries }
    }

    /// Number of indexed options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no options.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at sorted position `pos`.
    pub fn get(&self, pos: usize) -> Option<&IndexedOption> {
        self.entries.get(pos)
    }

    /// All entries in sorted order.
    pub fn entries(&self) -> &[IndexedOption] {
        &self.entries
    }

    /// Sorted positions whose lowercased display text contains the
    /// lowercased `term`. An empty term matches everything.
    pub fn filter(&self, term: &str) -> Vec<usize> {
        if term.is_empty() {
            return (0..self.entries.len()).collect();
        }
        let needle = term.to_lowercase();
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.display_lower.contains(&needle))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// First entry (in sorted order) whose value is `value`.
    pub fn find_value(&self, value: i64) -> Option<&IndexedOption> {
        self.entries.iter().find(|e| e.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{resolve_with, FieldResolver, Record};
    use pretty_assertions::assert_eq;

    fn names(index: &OptionIndex, positions: &[usize]) -> Vec<String> {
        positions
            .iter()
            .filter_map(|&p| index.get(p))
            .map(|e| e.display.clone())
            .collect()
    }

    fn records(names: &[&str]) -> Vec<Record> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Record::with_id(i as i64 + 1).with("name", *n))
            .collect()
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let opts = records(&["Ventas Norte", "Compras", "VENTAS SUR"]);
        let index = OptionIndex::build(&opts, &FieldResolver::new());
        assert_eq!(names(&index, &index.filter("ventas")), vec!["Ventas Norte", "VENTAS SUR"]);
        assert_eq!(names(&index, &index.filter("NOR")), vec!["Ventas Norte"]);
        assert!(index.filter("xyz").is_empty());
    }

    #[test]
    fn empty_term_keeps_everything_sorted() {
        let opts = records(&["úrsula", "Ana", "Úrsula", "ñu", "nube"]);
        let index = OptionIndex::build(&opts, &FieldResolver::new());
        assert_eq!(
            names(&index, &index.filter("")),
            vec!["Ana", "nube", "ñu", "úrsula", "Úrsula"]
        );
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let opts = records(&["Úrsula", "Ana", "úrsula"]);
        let index = OptionIndex::build(&opts, &FieldResolver::new());
        let order: Vec<usize> = index.entries().iter().map(|e| e.index).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn building_does_not_touch_options() {
        let opts = records(&["b", "a"]);
        let before = opts.clone();
        let _ = OptionIndex::build(&opts, &FieldResolver::new());
        assert_eq!(opts, before);
    }

    #[test]
    fn find_value_uses_resolved_value() {
        struct Plaza {
            id: i64,
            code: String,
        }
        let opts = vec![
            Plaza { id: 10, code: "diez".into() },
            Plaza { id: 20, code: "veinte".into() },
        ];
        let resolver = resolve_with(|p: &Plaza| p.code.clone(), |p: &Plaza| p.id);
        let index = OptionIndex::build(&opts, &resolver);
        assert_eq!(index.find_value(20).map(|e| e.display.as_str()), Some("veinte"));
        assert!(index.find_value(0).is_none());
    }

    #[test]
    fn filter_matches_accented_text_literally() {
        let opts = records(&["Administración", "Dirección"]);
        let index = OptionIndex::build(&opts, &FieldResolver::new());
        assert_eq!(index.filter("CIÓN").len(), 2);
        assert!(index.filter("cion").is_empty());
    }
}
