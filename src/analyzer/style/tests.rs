use std::path::Path;

use rstest::{fixture, rstest};

use super::*;

#[fixture]
fn indexer() -> StyleIndexer {
    StyleIndexer::new()
}

fn index(indexer: &StyleIndexer, source: &str) -> SelectorSet {
    indexer.index(Path::new("/src/card/card.scss"), source).unwrap()
}

#[rstest]
fn test_flat_class_selectors(indexer: StyleIndexer) {
    let set = index(
        &indexer,
        r#".card { color: red; }
.title, .subtitle { margin: 0; }
"#,
    );
    assert_eq!(set, SelectorSet::from_iter(["card", "title", "subtitle"]));
}

#[rstest]
fn test_nested_parent_suffix(indexer: StyleIndexer) {
    let set = index(
        &indexer,
        r#".card {
  padding: 4px;
  &-header {
    font-weight: bold;
  }
}
"#,
    );
    assert!(set.contains("card"));
    assert!(set.contains("card-header"));
    assert_eq!(set.len(), 2);
}

#[rstest]
fn test_nested_descendant_class(indexer: StyleIndexer) {
    let set = index(
        &indexer,
        r#".list {
  .item { display: block; }
}
"#,
    );
    assert_eq!(set, SelectorSet::from_iter(["list", "item"]));
}

#[rstest]
fn test_variable_in_selector(indexer: StyleIndexer) {
    let set = index(
        &indexer,
        r#"$size: lg;
.btn-#{$size} { height: 48px; }
"#,
    );
    assert!(set.contains("btn-lg"));
}

#[rstest]
fn test_duplicate_selectors_collapse(indexer: StyleIndexer) {
    let set = index(
        &indexer,
        r#".a { color: red; }
.a { color: blue; }
"#,
    );
    assert_eq!(set.len(), 1);
}

#[rstest]
fn test_non_class_selectors_define_nothing(indexer: StyleIndexer) {
    let set = index(
        &indexer,
        r#"div { color: red; }
#main { color: blue; }
"#,
    );
    assert!(set.is_empty());
}

#[rstest]
fn test_empty_stylesheet(indexer: StyleIndexer) {
    assert!(index(&indexer, "").is_empty());
}

#[rstest]
fn test_mixin_arguments_do_not_shadow_variables(indexer: StyleIndexer) {
    let set = index(
        &indexer,
        r#"$size: lg;
@mixin m($size: sm) {
  height: 10px;
}
.a {
  @include m($size: xs);
}
.btn-#{$size} { height: 48px; }
"#,
    );
    assert_eq!(set, SelectorSet::from_iter(["btn-lg", "a"]));
}

#[rstest]
fn test_rules_inside_media_query(indexer: StyleIndexer) {
    let set = index(
        &indexer,
        r#"@media (max-width: 600px) {
  .compact { padding: 0; }
}
"#,
    );
    assert!(set.contains("compact"));
}
