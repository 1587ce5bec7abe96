//! End-to-end matching and scoring scenarios over the public API.

use std::sync::Arc;

use tagscope_engine::{level_for, BatchEvaluator, MatcherCache, TagScoringEngine};
use tagscope_types::{
    ContentType, MatchContent, PatternOptions, PatternStrategy, TagCategory, TagPattern, TagRule,
    TaggingConfig,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const CONFIG: &str = r#"
tags:
  area:
    - name: core
      category: AREA
      patterns: ["core/"]
      weight: 2
    - name: docs
      category: AREA
      patterns: ["docs/"]
  role:
    - name: bug-fixer
      category: ROLE
      patterns: ["fix"]
  tech:
    - name: typescript
      category: TECH
      patterns: [".ts", "typescript"]
rules:
  - name: react
    category: TECH
    patterns:
      - pattern: "**/*.{tsx,jsx}"
        pattern_type: GLOB
        target: FILE_PATH
      - pattern: "\\breact\\b"
        pattern_type: REGEX
        target: PR_TITLE
"#;

#[test]
fn config_driven_scoring() {
    init_tracing();
    let config = TaggingConfig::from_yaml_str(CONFIG).unwrap();
    let rules = config.rules().unwrap();
    let engine = TagScoringEngine::new(Arc::new(MatcherCache::with_config(config.engine)));

    let contents = vec![
        MatchContent::file_path("packages/core/index.ts"),
        MatchContent::file_path("packages/core/util.ts"),
        MatchContent::file_path("packages\\ui\\Button.tsx"),
        MatchContent::file_path("docs/intro.md"),
        MatchContent::pr_title("Fix React hydration"),
        MatchContent::pr_title("Port build to TypeScript"),
    ];

    let scores: Vec<(String, f64)> = engine
        .score(&rules, &contents)
        .into_iter()
        .map(|s| (s.tag, s.score))
        .collect();

    // typescript: three .ts/.tsx paths plus one title
    assert_eq!(
        scores,
        vec![
            ("core".to_string(), 4.0),
            ("typescript".to_string(), 4.0),
            ("react".to_string(), 2.0),
            ("docs".to_string(), 1.0),
            ("bug-fixer".to_string(), 1.0),
        ]
    );
}

#[test]
fn batch_veto_example() {
    let evaluator = BatchEvaluator::new(Arc::new(MatcherCache::new()));
    let patterns = vec![
        TagPattern::string("typescript", ContentType::CommitMessage),
        TagPattern::string("experimental", ContentType::CommitMessage).negative(),
    ];

    let content = MatchContent::commit_message("add experimental typescript feature");
    assert_eq!(evaluator.match_batch(&patterns[..1], &content), vec![0]);
    assert!(evaluator.match_batch(&patterns, &content).is_empty());
}

#[test]
fn case_sensitivity() {
    let cache = MatcherCache::new();
    let content = MatchContent::pr_title("a test");

    let insensitive = TagPattern::string("TEST", ContentType::PrTitle);
    assert!(cache.get_matcher(&insensitive).test(&content));

    let sensitive = TagPattern::string("TEST", ContentType::PrTitle).case_sensitive();
    assert!(!cache.get_matcher(&sensitive).test(&content));
}

#[test]
fn word_boundaries_reject_partial_words() {
    let cache = MatcherCache::new();
    let content = MatchContent::pr_title("add a test for parsing");
    for pattern_type in [PatternStrategy::String, PatternStrategy::Regex] {
        let options = PatternOptions::new().word_boundary(true);
        let whole = TagPattern::new("test", pattern_type, ContentType::PrTitle, options).unwrap();
        let partial = TagPattern::new("tes", pattern_type, ContentType::PrTitle, options).unwrap();
        assert!(cache.get_matcher(&whole).test(&content), "{pattern_type}");
        assert!(!cache.get_matcher(&partial).test(&content), "{pattern_type}");
    }
}

#[test]
fn glob_matches_full_path() {
    let cache = MatcherCache::new();
    let shallow = cache.get_matcher(&TagPattern::glob("*.ts"));
    let deep = cache.get_matcher(&TagPattern::glob("**/*.ts"));

    assert!(shallow.test(&MatchContent::file_path("file.ts")));
    assert!(!shallow.test(&MatchContent::file_path("path/to/file.ts")));
    assert!(deep.test(&MatchContent::file_path("file.ts")));
    assert!(deep.test(&MatchContent::file_path("path/to/file.ts")));

    let star_run = cache.get_matcher(&TagPattern::glob("src/**.ts"));
    assert!(!star_run.is_disabled());
    assert!(star_run.test(&MatchContent::file_path("src/a.ts")));

    let caret = cache.get_matcher(&TagPattern::glob("src/[^a]*.ts"));
    assert!(caret.test(&MatchContent::file_path("src/b.ts")));
    assert!(!caret.test(&MatchContent::file_path("src/a.ts")));
}

#[test]
fn content_type_scoping() {
    let cache = MatcherCache::new();
    let path_rule = TagPattern::string("core", ContentType::FilePath);
    let negated = path_rule.clone().negative();
    let commit = MatchContent::commit_message("core/lib.rs");

    assert!(!cache.get_matcher(&path_rule).test(&commit));
    assert!(!cache.get_matcher(&negated).test(&commit));
}

#[test]
fn cache_identity() {
    let cache = MatcherCache::new();
    let a = TagPattern::string("core", ContentType::FilePath).with_options(
        PatternOptions::new().negative(false).case_sensitive(false).word_boundary(true),
    );
    let b = TagPattern::string("core", ContentType::FilePath).with_options(
        PatternOptions::new().word_boundary(true).case_sensitive(false).negative(false),
    );
    let c = b.clone().case_sensitive();

    assert!(Arc::ptr_eq(&cache.get_matcher(&a), &cache.get_matcher(&b)));
    assert!(!Arc::ptr_eq(&cache.get_matcher(&a), &cache.get_matcher(&c)));
    assert_eq!(cache.len(), 2);
}

#[test]
fn misconfigured_glob_is_penalised_once() {
    init_tracing();
    let cache = MatcherCache::new();
    let mut pattern = TagPattern::glob("*.md");
    pattern.target = ContentType::CommitMessage;

    let first = cache.get_matcher(&pattern);
    assert!(first.is_disabled());
    assert!(!first.test(&MatchContent::commit_message("README.md")));
    assert!(Arc::ptr_eq(&first, &cache.get_matcher(&pattern)));
}

#[test]
fn weighted_accumulation() {
    let rules = vec![TagRule::new("core", TagCategory::Area)
        .with_pattern(TagPattern::string("core/", ContentType::FilePath))
        .with_weight(2.0)];
    let contents: Vec<_> = ["core/a.rs", "core/b.rs", "core/c.rs"]
        .into_iter()
        .map(MatchContent::file_path)
        .collect();

    let scored = TagScoringEngine::new(Arc::new(MatcherCache::new()))
        .score_with_levels(&rules, &contents);
    assert_eq!(scored[0].score.score, 6.0);
    assert_eq!(scored[0].expertise, level_for(6.0));
}
