//! Property tests for the lexical resolver.

use proptest::prelude::*;

use calcfind::catalog::{CatalogIndex, CatalogItem, is_stop_word};
use calcfind::resolve::explain;
use calcfind::test_utils::{item, sample_catalog};
use calcfind::{ResolverConfig, resolve};

fn sample() -> CatalogIndex {
    CatalogIndex::build(sample_catalog()).unwrap()
}

fn arb_word() -> impl Strategy<Value = String> {
    "[a-z]{3,9}".prop_filter("stop word", |w| !is_stop_word(w))
}

fn arb_query() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::vec(arb_word(), 0..6).prop_map(|words| words.join(" ")),
        prop::collection::vec(
            prop::sample::select(vec![
                "mortgage", "body", "mass", "convert", "pressure", "tip", "estimate", "savings",
            ]),
            1..4,
        )
        .prop_map(|words| words.join(" ")),
        ".{0,40}",
    ]
}

fn score_for(query: &str, index: &CatalogIndex, identifier: &str) -> f64 {
    explain(query, index, &ResolverConfig::default())
        .into_iter()
        .find(|row| row.identifier == identifier)
        .map_or(0.0, |row| row.normalized)
}

proptest! {
    #[test]
    fn resolution_is_deterministic(query in arb_query()) {
        let index = sample();
        let config = ResolverConfig::default();
        let first = resolve(&query, &index, &config);
        let second = resolve(&query, &index, &config);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn build_order_does_not_matter(
        items in Just(sample_catalog()).prop_shuffle(),
        query in arb_query(),
    ) {
        let shuffled = CatalogIndex::build(items).unwrap();
        let reference = sample();
        prop_assert_eq!(shuffled.fingerprint(), reference.fingerprint());
        for id in reference.all_identifiers() {
            prop_assert_eq!(shuffled.tokens(id), reference.tokens(id));
        }
        let config = ResolverConfig::default();
        prop_assert_eq!(resolve(&query, &shuffled, &config), resolve(&query, &reference, &config));
    }

    // At most three query words score at most 18 raw; the keyword's extra
    // token only outweighs its +3 once raw passes roughly 6x the token count.
    #[test]
    fn adding_a_query_token_as_keyword_never_lowers_score(
        target in 0..sample_catalog().len(),
        words in prop::collection::vec(arb_word(), 1..4),
    ) {
        let query = words.join(" ");
        let items = sample_catalog();
        let identifier = items[target].identifier.clone();
        let before = score_for(&query, &CatalogIndex::build(items.clone()).unwrap(), &identifier);

        let mut boosted: Vec<CatalogItem> = items;
        boosted[target].keywords.insert(words[0].clone());
        let after = score_for(&query, &CatalogIndex::build(boosted).unwrap(), &identifier);

        prop_assert!(after >= before, "before {} after {}", before, after);
        prop_assert!(after > 0.0);
    }

    #[test]
    fn blank_queries_never_match(query in "[ \t\n.,!?;:'\"-]{0,20}") {
        let result = resolve(&query, &sample(), &ResolverConfig::default());
        prop_assert!(result.identifier.is_none());
        prop_assert!(result.alternates.is_empty());
    }

    #[test]
    fn equal_items_resolve_to_smaller_identifier(
        a in "[a-m][a-z]{2,8}",
        b in "[n-z][a-z]{2,8}",
    ) {
        let index = CatalogIndex::build([
            item(&b, "Loan Tool", "Plan a loan", "finance"),
            item(&a, "Loan Tool", "Plan a loan", "finance"),
        ])
        .unwrap();
        let result = resolve("loan tool", &index, &ResolverConfig::default());
        prop_assert_eq!(result.identifier.as_deref(), Some(a.as_str()));
    }

    #[test]
    fn confidence_is_top_of_ranking(query in arb_query()) {
        let result = resolve(&query, &sample(), &ResolverConfig::default());
        if result.identifier.is_some() {
            prop_assert!(result.confidence > 0.0);
            prop_assert!(result.alternates.iter().all(|alt| alt.score <= result.confidence));
        }
        prop_assert!(result.alternates.len() <= ResolverConfig::default().max_results);
    }
}
