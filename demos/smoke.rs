//! Smoke test for regenum pattern enumeration

use regenum::{compile, parse};

fn main() {
    println!("Running regenum smoke tests...\n");

    test_literal();
    test_optional();
    test_alternation();
    test_list_and_range();
    test_named_classes();
    test_bounded_repeat();
    test_indexed_access();
    test_big_language();

    println!("\n✅ All smoke tests passed!");
}

fn words(pattern: &str) -> Vec<String> {
    let gen = compile(&parse(pattern).unwrap()).unwrap();
    gen.words().collect()
}

fn test_literal() {
    assert_eq!(words("abc"), vec!["abc"]);
    println!("✓ Literal");
}

fn test_optional() {
    assert_eq!(words("ab?"), vec!["a", "ab"]);
    println!("✓ Optional");
}

fn test_alternation() {
    assert_eq!(words("(a|b)(c|d)"), vec!["ac", "ad", "bc", "bd"]);
    assert_eq!(words("a|b|c"), vec!["a", "b", "c"]);
    println!("✓ Alternation");
}

fn test_list_and_range() {
    assert_eq!(words("[abc]"), vec!["a", "b", "c"]);
    assert_eq!(words("[w-z]"), vec!["w", "x", "y", "z"]);
    println!("✓ Lists and ranges");
}

fn test_named_classes() {
    assert_eq!(words(r"\d").len(), 10);
    assert_eq!(words(r"[\l]").len(), 26);
    assert_eq!(words(r"[\L]").len(), 26);
    println!("✓ Named classes");
}

fn test_bounded_repeat() {
    assert_eq!(
        words("[ab]{2,3}"),
        vec![
            "aa", "ab", "ba", "bb", "aaa", "aab", "aba", "abb", "baa", "bab",
            "bba", "bbb",
        ]
    );
    println!("✓ Bounded repetition");
}

fn test_indexed_access() {
    let gen = compile(&parse(r"[\d]{2}").unwrap()).unwrap();
    assert_eq!(gen.len(), 100);
    assert_eq!(gen.at(42).unwrap(), "42");
    assert!(gen.at(100).is_err());
    println!("✓ Indexed access");
}

fn test_big_language() {
    // Too large to iterate, cheap to index.
    let gen = compile(&parse(r"[\l\d]{1,12}").unwrap()).unwrap();
    assert!(gen.len() > u64::MAX as u128 / 4_000_000);
    let probe = gen.at(gen.len() - 1).unwrap();
    assert_eq!(probe.len(), 12);
    println!("✓ Big language ({} words)", gen.len());
}
