use crate::common::{RecordingBackend, doc_comment};
use comment_tests::Transformer;
use comment_tests::parsing::{block_comments, extract_code_blocks, parse_doc_comment};
use comment_tests::{SourceUnit, TreeSitterScanner};

const SOURCE: &str = r#"
/**
 * Counter utilities.
 *
 * ```ts
 * const c = new Counter();
 * c.increment();
 * ```
 *
 * @example
 * ```ts
 * expect(new Counter().value).toBe(0);
 * ```
 */
export class Counter {
    value = 0;

    /**
     * @example
     * ```
     * const c = new Counter();
     * if (c.value === 0) {
     *     c.increment();
     * }
     * ```
     */
    increment(): void {
        this.value += 1;
    }
}
"#;

#[test]
fn test_snippets_follow_document_order() {
    let transformer = Transformer::new(RecordingBackend::new());
    let snippets = transformer.extract_snippets(SOURCE, "counter.ts").unwrap();

    assert_eq!(snippets.len(), 3);
    assert_eq!(
        snippets[0].text,
        "const c = new Counter();\nc.increment();"
    );
    assert_eq!(snippets[1].text, "expect(new Counter().value).toBe(0);");
    assert_eq!(
        snippets[2].text,
        "const c = new Counter();\nif (c.value === 0) {\n    c.increment();\n}"
    );
    for (position, snippet) in snippets.iter().enumerate() {
        assert_eq!(snippet.index, position);
    }
}

#[test]
fn test_extraction_is_deterministic() {
    let transformer = Transformer::new(RecordingBackend::new());
    let first = transformer.extract_snippets(SOURCE, "counter.ts").unwrap();
    let second = transformer.extract_snippets(SOURCE, "counter.ts").unwrap();
    assert_eq!(first, second);

    let other = Transformer::new(RecordingBackend::new());
    assert_eq!(other.extract_snippets(SOURCE, "counter.ts").unwrap(), first);
    assert_eq!(
        transformer.combine(SOURCE, "counter.ts").unwrap(),
        other.combine(SOURCE, "counter.ts").unwrap()
    );
}

#[test]
fn test_unmatched_fence_yields_one_fewer_snippet() {
    let source = doc_comment(&["```", "kept();", "```", "```", "dangling();"]);
    let transformer = Transformer::new(RecordingBackend::new());
    let snippets = transformer.extract_snippets(&source, "dangling.ts").unwrap();

    // three markers, one snippet
    assert_eq!(snippets.len(), 1);
    assert_eq!(snippets[0].text, "kept();");
}

#[test]
fn test_dangling_fence_does_not_leak_into_next_comment() {
    let source = format!(
        "{}{}",
        doc_comment(&["```", "lost();"]),
        doc_comment(&["```", "found();", "```"])
    );
    let transformer = Transformer::new(RecordingBackend::new());
    let snippets = transformer.extract_snippets(&source, "two.ts").unwrap();
    assert_eq!(snippets.len(), 1);
    assert_eq!(snippets[0].text, "found();");
    assert_eq!(snippets[0].index, 0);
}

#[test]
fn test_stages_compose_by_hand() {
    let source = SourceUnit::new("counter.ts", SOURCE);
    let comments = block_comments(&TreeSitterScanner::new(), &source).unwrap();
    assert_eq!(comments.len(), 2);

    let doc = parse_doc_comment(&comments[0]);
    assert_eq!(doc.tags.len(), 1);
    assert_eq!(doc.tags[0].tag_name.as_deref(), Some("example"));
    assert_eq!(extract_code_blocks(&doc.description).len(), 1);
    assert_eq!(extract_code_blocks(&doc.tags[0].description).len(), 1);
}
