//! Property tests for matcher semantics and the level curve.

use std::sync::Arc;

use proptest::prelude::*;
use tagscope_engine::{level_for, level_threshold, BatchEvaluator, MatcherCache};
use tagscope_types::{ContentType, MatchContent, TagPattern};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_needle() -> impl Strategy<Value = String> {
    "[a-zA-Z]{1,4}"
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z ]{0,40}"
}

fn text_types() -> impl Strategy<Value = ContentType> {
    prop_oneof![
        Just(ContentType::CommitMessage),
        Just(ContentType::PrTitle),
        Just(ContentType::PrDescription),
        Just(ContentType::IssueTitle),
        Just(ContentType::Comment),
    ]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn string_match_is_case_folded_substring(
        needle in arb_needle(),
        text in arb_text(),
        content_type in text_types(),
    ) {
        let cache = MatcherCache::new();
        let matcher = cache.get_matcher(&TagPattern::string(needle.clone(), content_type));
        let expected = text.trim().to_lowercase().contains(&needle.to_lowercase());
        prop_assert_eq!(matcher.test(&MatchContent::new(text, content_type)), expected);
    }

    #[test]
    fn negation_inverts_result(
        needle in arb_needle(),
        text in arb_text(),
        regex in any::<bool>(),
    ) {
        let cache = MatcherCache::new();
        let positive = if regex {
            TagPattern::regex(needle.clone(), ContentType::PrTitle)
        } else {
            TagPattern::string(needle.clone(), ContentType::PrTitle)
        };
        let negative = positive.clone().negative();
        let content = MatchContent::pr_title(text);

        prop_assert_eq!(
            cache.get_matcher(&negative).test(&content),
            !cache.get_matcher(&positive).test(&content)
        );
    }

    #[test]
    fn other_content_types_never_match(
        needle in arb_needle(),
        text in arb_text(),
        negative in any::<bool>(),
    ) {
        let cache = MatcherCache::new();
        let mut pattern = TagPattern::string(needle, ContentType::FilePath);
        if negative {
            pattern = pattern.negative();
        }
        let content = MatchContent::commit_message(text);
        prop_assert!(!cache.get_matcher(&pattern).test(&content));
    }

    #[test]
    fn word_boundary_rejects_word_prefixes(word in "[a-z]{3,8}") {
        let cache = MatcherCache::new();
        let content = MatchContent::pr_title(format!("x {word} y"));
        let prefix = &word[..word.len() - 1];

        let whole = TagPattern::string(word.clone(), ContentType::PrTitle).word_boundary();
        let partial = TagPattern::string(prefix, ContentType::PrTitle).word_boundary();
        prop_assert!(cache.get_matcher(&whole).test(&content));
        prop_assert!(!cache.get_matcher(&partial).test(&content));
    }

    #[test]
    fn negative_hit_vetoes_batch(
        needles in prop::collection::vec(arb_needle(), 1..5),
        prefix in arb_text(),
        suffix in arb_text(),
    ) {
        let evaluator = BatchEvaluator::new(Arc::new(MatcherCache::new()));
        let mut patterns: Vec<TagPattern> = needles
            .into_iter()
            .map(|n| TagPattern::string(n, ContentType::CommitMessage))
            .collect();
        patterns.push(TagPattern::string("zzvetozz", ContentType::CommitMessage).negative());

        let content = MatchContent::commit_message(format!("{prefix} zzvetozz {suffix}"));
        prop_assert!(evaluator.match_batch(&patterns, &content).is_empty());
    }

    #[test]
    fn level_is_monotonic(a in 0.0f64..1e9, b in 0.0f64..1e9) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(level_for(low).level <= level_for(high).level);
    }

    #[test]
    fn level_brackets_score(score in 0.0f64..1e12) {
        let level = level_for(score);
        prop_assert!(level_threshold(level.level) <= score);
        prop_assert!(score < level_threshold(level.level + 1));
        prop_assert!((0.0..=1.0).contains(&level.progress));
        prop_assert_eq!(level.points_to_next, level_threshold(level.level + 1));
    }
}
