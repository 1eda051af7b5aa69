use crate::common::{RecordingBackend, doc_comment};
use comment_tests::{
    OutputFormat, Settings, SourceMapMode, Strategy, TransformError, TransformOptions, Transformer,
};

const MARKER: &str = "describe(\"comment-test-cases\"";

fn options() -> TransformOptions {
    TransformOptions(serde_json::json!({
        "config": { "testRegex": [], "testMatch": [], "testPathIgnorePatterns": [] }
    }))
}

#[test]
fn test_hello_world_comment_gets_one_test_case() {
    let source = format!(
        "\n{}",
        doc_comment(&["```", "console.log('Hello, World!');", "```"])
    );
    let transformer = Transformer::new(RecordingBackend::new());

    let combined = transformer.combine(&source, "hello-world.ts").unwrap();
    assert_eq!(combined.matches("test(\"comment-test-case #").count(), 1);
    assert!(combined.contains("test(\"comment-test-case #0\", async () => {"));
    assert!(combined.starts_with(&source), "original text must come first");

    let output = transformer
        .process(&source, "hello-world.ts", &options())
        .unwrap();
    assert!(output.code.contains(MARKER));
    assert!(output.code.contains("comment-test-case #0"));
    assert!(output.map.is_some(), "default mode returns a source map");
}

#[test]
fn test_source_without_comments_is_passed_through() {
    let source = "console.log('Hello, World!');";
    let backend = RecordingBackend::new();
    let transformer = Transformer::new(backend);

    let output = transformer
        .process(source, "hello-world.ts", &options())
        .unwrap();
    assert!(!output.code.contains(MARKER));

    let requests = transformer.backend().requests();
    assert_eq!(requests.len(), 1, "only the file itself is compiled");
    assert_eq!(requests[0].entry_text, source);
    assert_eq!(requests[0].filename, "hello-world.ts");
}

#[test]
fn test_test_files_are_transformed_too() {
    let transformer = Transformer::new(RecordingBackend::new());
    let output = transformer
        .process(
            "console.log('Hello, World!');",
            "hello-world.test.ts",
            &options(),
        )
        .unwrap();
    assert!(!output.code.is_empty());
    assert!(output.map.is_some());
}

#[test]
fn test_comment_without_fence_adds_no_suite() {
    let source = format!(
        "{}export function add(a: number, b: number) {{ return a + b; }}\n",
        doc_comment(&["Adds two numbers.", "@param a left", "@param b right"])
    );
    let transformer = Transformer::new(RecordingBackend::new());
    let output = transformer.process(&source, "add.ts", &options()).unwrap();
    assert!(!output.code.contains(MARKER));
    assert!(!output.code.contains("describe("));
}

#[test]
fn test_line_comments_are_ignored() {
    let source = "// ```\n// notATest();\n// ```\nexport const x = 1;\n";
    let transformer = Transformer::new(RecordingBackend::new());
    let output = transformer.process(source, "lines.ts", &options()).unwrap();
    assert!(!output.code.contains(MARKER));
}

#[test]
fn test_isolated_snippets_compile_separately_before_the_file() {
    let source = format!(
        "{}export const answer = 42;\n",
        doc_comment(&[
            "```ts",
            "import { answer } from './answer';",
            "export const doubled = answer * 2;",
            "```",
        ])
    );
    let transformer = Transformer::new(RecordingBackend::new());
    let output = transformer
        .process(&source, "answer.ts", &options())
        .unwrap();

    let requests = transformer.backend().requests();
    assert_eq!(requests.len(), 2);

    let snippet = &requests[0];
    assert_eq!(snippet.filename, "answer.ts#comment-test-case-0");
    assert_eq!(
        snippet.entry_text,
        "import { answer } from './answer';\nexport const doubled = answer * 2;"
    );
    assert_eq!(snippet.format, OutputFormat::Cjs);
    assert_eq!(snippet.source_map, SourceMapMode::None);

    let file = &requests[1];
    assert_eq!(file.filename, "answer.ts");
    assert!(file.bundle);
    assert_eq!(file.external, vec!["*".to_string()]);
    assert_eq!(file.source_map, SourceMapMode::Both);
    assert!(
        file.entry_text
            .contains("const module = { exports: {} };\n// compiled: answer.ts#comment-test-case-0"),
        "compiled snippet follows the export placeholder"
    );
    assert!(output.code.contains(MARKER));
}

#[test]
fn test_await_snippet_is_embedded_without_separate_compile() {
    let source = doc_comment(&[
        "```",
        "const value = await Promise.resolve(1);",
        "expect(value).toBe(1);",
        "```",
    ]);
    // any isolated snippet compile would be rejected
    let transformer = Transformer::new(RecordingBackend::failing_on("#comment-test-case-"));
    let output = transformer
        .process(&source, "await.ts", &options())
        .unwrap();

    let requests = transformer.backend().requests();
    assert_eq!(requests.len(), 1, "only the combined file is compiled");
    assert!(requests[0].entry_text.contains(
        "async () => {\nconst module = { exports: {} };\nconst value = await Promise.resolve(1);\nexpect(value).toBe(1);\n});"
    ));
    assert!(output.code.contains(MARKER));
}

#[test]
fn test_unknown_typescript_syntax_reaches_the_backend() {
    let source = format!(
        "{}export type * from './types';\n",
        doc_comment(&["```", "run();", "```"])
    );
    let transformer = Transformer::new(RecordingBackend::new());
    let output = transformer.process(&source, "index.ts", &options()).unwrap();

    assert!(output.code.contains("comment-test-case #0"));
    let requests = transformer.backend().requests();
    assert_eq!(requests.last().unwrap().filename, "index.ts");
}

#[test]
fn test_inline_strategy_embeds_raw_snippet() {
    let mut settings = Settings::default();
    settings.synthesis.strategy = Strategy::Inline;
    let transformer = Transformer::with_settings(RecordingBackend::new(), settings);

    let source = doc_comment(&["```", "expect(1 + 1).toBe(2);", "```"]);
    let combined = transformer.combine(&source, "inline.js").unwrap();
    assert!(combined.contains("async () => {\nexpect(1 + 1).toBe(2);\n});"));
    assert!(!combined.contains("const module"));
    assert!(transformer.backend().requests().is_empty());
}

#[test]
fn test_suite_carries_tooling_pragmas() {
    let source = doc_comment(&["```", "run();", "```"]);
    let transformer = Transformer::new(RecordingBackend::new());
    let combined = transformer.combine(&source, "pragmas.ts").unwrap();
    assert!(combined.contains("/* istanbul ignore next */"));
    assert!(combined.contains("/* eslint-disable */"));
}

#[test]
fn test_snippet_compile_failure_propagates() {
    let source = doc_comment(&["```", "let x y = 1;", "```"]);
    let transformer = Transformer::new(RecordingBackend::failing_on("#comment-test-case-"));
    let err = transformer
        .process(&source, "broken-example.ts", &options())
        .unwrap_err();
    match err {
        TransformError::Compilation { file, line, column, .. } => {
            assert_eq!(file, "broken-example.ts#comment-test-case-0");
            assert_eq!((line, column), (1, 1));
        }
        other => panic!("Expected Compilation, got {other:?}"),
    }
    // the combined file is never compiled after a snippet failed
    assert_eq!(transformer.backend().requests().len(), 1);
}

#[test]
fn test_source_syntax_error_propagates() {
    let transformer = Transformer::new(RecordingBackend::new());
    let err = transformer
        .process("%%% /* lost */ %%%\n", "broken.ts", &options())
        .unwrap_err();
    assert_eq!(err.status_code(), "SOURCE_SYNTAX_ERROR");
    assert!(transformer.backend().requests().is_empty());
}

#[test]
fn test_typescript_and_jsx_sources() {
    let ts = format!(
        "{}export interface Point {{ x: number; y: number }}\nexport const origin: Point = {{ x: 0, y: 0 }};\n",
        doc_comment(&["```", "console.log(origin);", "```"])
    );
    let tsx = format!(
        "{}export const App = () => <main className=\"app\">hi</main>;\n",
        doc_comment(&["```tsx", "render(<App />);", "```"])
    );

    let transformer = Transformer::new(RecordingBackend::new());
    assert_eq!(transformer.extract_snippets(&ts, "point.ts").unwrap().len(), 1);
    assert_eq!(transformer.extract_snippets(&tsx, "App.tsx").unwrap().len(), 1);
}
