//! Integration tests for the whole front end.
//!
//! These tests drive source text through the public entry points and check
//! the resulting programs, their canonical rendering and the diagnostics.

use agentsh::{
    ast::ast::{Expression, Statement, StmtType},
    parse, render_error, tokenize,
};

const PIPELINE: &str = r#"
import { search, fetch } from "./tools.ash"

mcp Files {
  command: "mcp-files"
  args: ["--root", "."]
}

model claude {
  provider: "anthropic",
  temperature: 0.2,
}

agent Researcher {
  model: claude
  tools: [search, fetch]
  prompt: """
    You research topics.
      Cite sources.
    """
}

tool summarize(text: string, limit: number): string {
  if (text == null) {
    throw "no text"
  } else if (limit <= 0) {
    return ""
  }
  return text
}

topics = ["rust", "parsers"]
for (topic of topics) {
  try {
    report = topic | Researcher | summarize(limit ?? 100)
  } catch (error) {
    log(`failed: ${error.message}`)
    continue
  }
}
"#;

#[test]
fn test_parse_complete_pipeline() {
    let (program, diagnostics) = parse(PIPELINE);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics.errors());

    let types: Vec<StmtType> = program
        .statements
        .iter()
        .map(|statement| statement.get_stmt_type())
        .collect();

    assert_eq!(
        types,
        vec![
            StmtType::Import,
            StmtType::Mcp,
            StmtType::Model,
            StmtType::Agent,
            StmtType::Tool,
            StmtType::Assignment,
            StmtType::ForOf,
        ]
    );
}

#[test]
fn test_triple_quoted_prompt_is_dedented() {
    let (program, _) = parse(PIPELINE);

    let Statement::Agent(agent) = &program.statements[3] else {
        panic!("expected the agent declaration");
    };
    let Some(Expression::String(prompt)) = agent.get("prompt") else {
        panic!("expected a string prompt");
    };
    assert_eq!(prompt.value, "You research topics.\n  Cite sources.");
}

#[test]
fn test_rendering_is_a_fixed_point() {
    let (program, diagnostics) = parse(PIPELINE);
    assert!(diagnostics.is_empty());

    let rendered = program.to_string();
    let (reparsed, diagnostics) = parse(&rendered);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics.errors());
    assert_eq!(reparsed.to_string(), rendered);
}

#[test]
fn test_model_keyword_as_config_key() {
    let (program, diagnostics) = parse("agent A { model: claude }");
    assert!(diagnostics.is_empty());

    let Statement::Agent(agent) = &program.statements[0] else {
        panic!("expected an agent declaration");
    };
    assert_eq!(
        agent.get("model").map(|value| value.to_string()),
        Some(String::from("claude"))
    );
}

#[test]
fn test_pipe_with_parentheses_matches_default_precedence() {
    let (implicit, _) = parse("a + b | Agent");
    let (explicit, _) = parse("(a + b) | Agent");

    assert_eq!(implicit.to_string(), "((a + b) | Agent)");
    assert_eq!(implicit.to_string(), explicit.to_string());
}

#[test]
fn test_independent_errors_are_all_reported() {
    let source = "good = 1\nbad = (\nagent A { 1: 2 }\nx = 5; y = 6\nlast = 2";
    let (program, diagnostics) = parse(source);

    let lines: Vec<usize> = diagnostics
        .iter()
        .map(|error| error.get_position().line)
        .collect();
    assert_eq!(lines, vec![3, 3, 4]);
    assert_eq!(
        program
            .statements
            .iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<_>>(),
        vec!["good = 1", "x = 5", "y = 6", "last = 2"]
    );
}

#[test]
fn test_unterminated_literal_reports_start_line() {
    let source = "a = 1\nb = \"\"\"\nnever closed";
    let (_, diagnostics) = tokenize(source);

    assert_eq!(
        diagnostics.errors(),
        vec!["unterminated triple-quoted string starting at line 2, column 5"]
    );

    let (_, diagnostics) = parse(source);
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_render_error_for_same_line_statement() {
    let source = "x = 5 y = 10";
    let (_, diagnostics) = parse(source);
    let error = diagnostics.iter().next().expect("one diagnostic");

    let rendered = render_error(error, source, "main.ash");
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "Error: SameLineStatement (put each statement on its own line)");
    assert_eq!(lines[1], "-> main.ash:1:7");
    assert_eq!(lines[3], "1 | x = 5 y = 10");
    assert_eq!(lines[4], "  | ------^");
}

#[test]
fn test_program_can_cross_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<agentsh::ast::ast::Program>();

    let handle = std::thread::spawn(|| parse("agent A { model: claude }").0);
    let program = handle.join().expect("parser thread panicked");
    assert_eq!(program.statements.len(), 1);
}
