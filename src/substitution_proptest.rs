//! Property-based tests for URL substitution.
//!
//! These tests use proptest to generate rule tables and URLs and check that
//! lookup depends only on the first case-insensitive match.

#[cfg(test)]
mod proptest_tests {
    use crate::config::UrlSubstitution;
    use crate::substitution::resolve;
    use proptest::prelude::*;

    fn rule(url: &str, sub: &str) -> UrlSubstitution {
        UrlSubstitution {
            url: url.to_string(),
            sub: sub.to_string(),
        }
    }

    fn url_strategy() -> impl Strategy<Value = String> {
        "https://[a-zA-Z]{1,8}/[a-zA-Z0-9_-]{1,12}\\.git"
    }

    fn rules_strategy() -> impl Strategy<Value = Vec<UrlSubstitution>> {
        prop::collection::vec((url_strategy(), url_strategy()), 0..8).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(url, sub)| rule(&url, &sub))
                .collect()
        })
    }

    proptest! {
        /// Property: the result is the `sub` of the first rule whose url matches ignoring case
        #[test]
        fn resolve_returns_first_case_insensitive_match(
            url in url_strategy(),
            rules in rules_strategy(),
        ) {
            let expected = rules
                .iter()
                .find(|r| r.url.to_lowercase() == url.to_lowercase())
                .map(|r| r.sub.as_str());
            prop_assert_eq!(resolve(&url, &rules), expected);
        }

        /// Property: changing the case of the looked-up url never changes the result
        #[test]
        fn resolve_is_case_insensitive(url in url_strategy(), rules in rules_strategy()) {
            prop_assert_eq!(resolve(&url, &rules), resolve(&url.to_uppercase(), &rules));
            prop_assert_eq!(resolve(&url, &rules), resolve(&url.to_lowercase(), &rules));
        }

        /// Property: reordering rules that do not match never changes the result
        #[test]
        fn resolve_ignores_order_of_non_matching_rules(
            url in url_strategy(),
            sub in url_strategy(),
            others in rules_strategy(),
            position in 0usize..8,
        ) {
            let others: Vec<UrlSubstitution> = others
                .into_iter()
                .filter(|r| r.url.to_lowercase() != url.to_lowercase())
                .collect();

            let mut rules = others.clone();
            rules.insert(position.min(rules.len()), rule(&url, &sub));

            let mut reversed: Vec<UrlSubstitution> = others.into_iter().rev().collect();
            reversed.insert(position.min(reversed.len()), rule(&url, &sub));

            prop_assert_eq!(resolve(&url, &rules), Some(sub.as_str()));
            prop_assert_eq!(resolve(&url, &reversed), Some(sub.as_str()));
        }

        /// Property: duplicating the matching rule does not change the result
        #[test]
        fn resolve_unchanged_by_duplicate_match(url in url_strategy(), rules in rules_strategy()) {
            let before = resolve(&url, &rules).map(str::to_string);
            if let Some(index) = rules
                .iter()
                .position(|r| r.url.to_lowercase() == url.to_lowercase())
            {
                let mut duplicated = rules.clone();
                duplicated.insert(index + 1, rules[index].clone());
                duplicated.push(rules[index].clone());
                prop_assert_eq!(resolve(&url, &duplicated).map(str::to_string), before);
            }
        }

        /// Property: a url that no rule names resolves to nothing
        #[test]
        fn resolve_without_match_is_none(rules in rules_strategy()) {
            prop_assert_eq!(resolve("file:///not/in/any/rule", &rules), None);
        }
    }
}
