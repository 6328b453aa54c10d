// Pure filtering logic - no host imports allowed.
// This module derives the visible subset of the snapshot and can be unit
// tested without any session wiring.

use crate::state::Tab;

/// Derive the visible subset of `tabs` for a search term.
///
/// A tab is visible iff the term is empty, or its title (lower-cased)
/// contains the term (lower-cased) as a substring. A tab with no title
/// behaves as having an empty title: excluded for any non-empty term.
///
/// Pure read: input order is preserved, the snapshot is never mutated, and
/// identical inputs always produce identical output.
pub fn visible<'a>(tabs: &'a [Tab], search_term: &str) -> Vec<&'a Tab> {
    if search_term.is_empty() {
        return tabs.iter().collect();
    }
    let needle = search_term.to_lowercase();
    tabs.iter()
        .filter(|tab| {
            tab.title
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

/// Ids of the visible subset, in snapshot order. This is what the group
/// action operates on.
pub fn visible_ids(tabs: &[Tab], search_term: &str) -> Vec<crate::state::TabId> {
    visible(tabs, search_term).iter().map(|t| t.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TabId;
    use rstest::rstest;

    fn sample_tabs() -> Vec<Tab> {
        vec![
            Tab::new(TabId(1), Some("GitHub")),
            Tab::new(TabId(2), Some("Gmail")),
            Tab::new(TabId(3), None::<String>),
        ]
    }

    #[rstest]
    // Empty term matches everything, untitled included
    #[case("", vec![1, 2, 3])]
    // Case-insensitive substring over titles
    #[case("gm", vec![2])]
    #[case("GM", vec![2])]
    #[case("git", vec![1])]
    #[case("GiT", vec![1])]
    #[case("g", vec![1, 2])]
    // No match
    #[case("zzz", vec![])]
    // Untitled tabs never match a non-empty term
    #[case("new tab", vec![])]
    fn test_visible_matrix(#[case] term: &str, #[case] expected_ids: Vec<u32>) {
        let tabs = sample_tabs();
        let ids: Vec<u32> = visible(&tabs, term).iter().map(|t| t.id.0).collect();
        assert_eq!(ids, expected_ids);
    }

    #[test]
    fn empty_term_is_identity() {
        let tabs = sample_tabs();
        let result = visible(&tabs, "");
        assert_eq!(result.len(), tabs.len());
        for (got, want) in result.iter().zip(tabs.iter()) {
            assert_eq!(*got, want);
        }
    }

    #[test]
    fn preserves_snapshot_order() {
        let tabs = vec![
            Tab::new(TabId(5), Some("b search")),
            Tab::new(TabId(1), Some("a search")),
            Tab::new(TabId(9), Some("c search")),
        ];
        let ids: Vec<u32> = visible(&tabs, "search").iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![5, 1, 9]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let tabs = sample_tabs();
        let once: Vec<Tab> = visible(&tabs, "g").into_iter().cloned().collect();
        let twice: Vec<Tab> = visible(&once, "g").into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn filtering_never_mutates_input() {
        let tabs = sample_tabs();
        let before = tabs.clone();
        let _ = visible(&tabs, "gm");
        let _ = visible(&tabs, "");
        assert_eq!(tabs, before);
    }

    #[test]
    fn case_insensitive_agrees_with_uppercased_term() {
        let tabs = sample_tabs();
        for term in ["gm", "hub", "mail", "x"] {
            let lower: Vec<u32> = visible(&tabs, term).iter().map(|t| t.id.0).collect();
            let upper: Vec<u32> = visible(&tabs, &term.to_uppercase())
                .iter()
                .map(|t| t.id.0)
                .collect();
            assert_eq!(lower, upper, "term {:?}", term);
        }
    }

    #[test]
    fn visible_ids_follow_visible() {
        let tabs = sample_tabs();
        assert_eq!(visible_ids(&tabs, "gm"), vec![TabId(2)]);
        assert_eq!(
            visible_ids(&tabs, ""),
            vec![TabId(1), TabId(2), TabId(3)]
        );
    }
}
