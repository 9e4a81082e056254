//! Conversion between a list's stored item string and its checkable items.
//!
//! Items are stored as one string joined with `", "`. Item names never
//! contain commas; the items validator rejects them before anything is
//! formatted.

use crate::DisplayItem;

pub const SEPARATOR: &str = ", ";

/// Splits a stored item string into trimmed, non-empty item names.
///
/// Absent, empty and whitespace-only input all yield an empty list. Empty
/// segments (`"Pain,,Lait"`) are dropped rather than reported.
pub fn parse(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}

/// Joins item names into the stored representation.
///
/// Names are expected to be trimmed and comma-free already.
pub fn format<S: AsRef<str>>(items: &[S]) -> String {
    let names: Vec<&str> = items.iter().map(|item| item.as_ref()).collect();
    names.join(SEPARATOR)
}

/// Trims a name and uppercases its first character.
pub fn normalize(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Names of the items still left to buy, in their original order.
pub fn reconcile(items: &[DisplayItem]) -> Vec<String> {
    items
        .iter()
        .filter(|item| !item.completed)
        .map(|item| item.name.clone())
        .collect()
}

pub fn display_items(raw: Option<&str>) -> Vec<DisplayItem> {
    parse(raw)
        .into_iter()
        .enumerate()
        .map(|(id, name)| DisplayItem::new(id, name))
        .collect()
}

/// Parses free-form input and normalizes every item, as done when items
/// are entered by the user.
pub fn normalize_input(input: &str) -> Vec<String> {
    parse(Some(input))
        .iter()
        .map(|item| normalize(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, completed: bool) -> DisplayItem {
        DisplayItem {
            id: 0,
            name: name.to_string(),
            completed,
        }
    }

    #[test]
    fn test_parse_empty_inputs() {
        assert!(parse(None).is_empty());
        assert!(parse(Some("")).is_empty());
        assert!(parse(Some("   ")).is_empty());
        assert!(parse(Some(" , ,, ")).is_empty());
    }

    #[test]
    fn test_parse_mixed_spacing() {
        assert_eq!(parse(Some("Pain, Lait,Œufs")), vec!["Pain", "Lait", "Œufs"]);
        assert_eq!(
            parse(Some(" Pain ,Lait,, Œufs ")),
            vec!["Pain", "Lait", "Œufs"]
        );
    }

    #[test]
    fn test_parse_drops_empty_segments() {
        assert_eq!(parse(Some("Pain,,Lait")), vec!["Pain", "Lait"]);
        assert_eq!(parse(Some(",Pain,")), vec!["Pain"]);
    }

    #[test]
    fn test_parse_does_not_capitalize() {
        assert_eq!(parse(Some("pain, lait")), vec!["pain", "lait"]);
    }

    #[test]
    fn test_format() {
        assert_eq!(format::<&str>(&[]), "");
        assert_eq!(format(&["Pain"]), "Pain");
        assert_eq!(format(&["Pain", "Lait", "Œufs"]), "Pain, Lait, Œufs");
    }

    #[test]
    fn test_format_then_parse_preserves_items() {
        let cases: Vec<Vec<&str>> = vec![
            vec![],
            vec!["Pain"],
            vec!["Pain", "Lait", "Œufs"],
            vec!["Pommes de terre", "Lait demi écrémé", "2 baguettes"],
            vec!["x", "x", "x"],
        ];
        for items in cases {
            assert_eq!(parse(Some(format(&items).as_str())), items);
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  pain "), "Pain");
        assert_eq!(normalize("œufs"), "Œufs");
        assert_eq!(normalize("lait Demi"), "Lait Demi");
        assert_eq!(normalize("Pain"), "Pain");
        assert_eq!(normalize("2 baguettes"), "2 baguettes");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_collapses_case_variants() {
        assert_eq!(normalize("pain"), normalize("Pain"));
    }

    #[test]
    fn test_reconcile_drops_completed() {
        let items = vec![item("Pain", false), item("Lait", true)];
        assert_eq!(reconcile(&items), vec!["Pain"]);
    }

    #[test]
    fn test_reconcile_keeps_order() {
        let items = vec![
            item("Pain", false),
            item("Lait", true),
            item("Œufs", false),
            item("Beurre", false),
        ];
        assert_eq!(reconcile(&items), vec!["Pain", "Œufs", "Beurre"]);
    }

    #[test]
    fn test_reconcile_all_completed_is_empty() {
        let items = vec![item("Pain", true), item("Lait", true)];
        assert!(reconcile(&items).is_empty());
        assert_eq!(format(&reconcile(&items)), "");
    }

    #[test]
    fn test_display_items_assigns_positions() {
        let items = display_items(Some("Pain, Lait, Œufs"));
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], DisplayItem::new(0, "Pain"));
        assert_eq!(items[2].id, 2);
        assert!(items.iter().all(|i| !i.completed));
        assert!(display_items(None).is_empty());
    }

    #[test]
    fn test_normalize_input() {
        assert_eq!(
            normalize_input("pain,  lait ,, œufs"),
            vec!["Pain", "Lait", "Œufs"]
        );
        assert!(normalize_input("").is_empty());
    }

    #[test]
    fn test_session_reconciliation_end_to_end() {
        let mut items = display_items(Some("Pain, Lait, Œufs"));
        items[1].set_completed(true);
        assert_eq!(format(&reconcile(&items)), "Pain, Œufs");
    }
}
