// Integration tests for the WTFZOMFG interpreter

use wtfzomfg::errors::Diagnostic;
use wtfzomfg::memory::value::Cell;
use wtfzomfg::parser::ast::Operation;
use wtfzomfg::parser::lexer::tokenize;
use wtfzomfg::parser::parse::parse;
use wtfzomfg::pipeline::{interpret, Interpretation, Stage};
use wtfzomfg::terminal::MockTerminal;

fn run(source: &str, memory_size: usize) -> (Interpretation, MockTerminal) {
    let mut terminal = MockTerminal::new();
    let result = interpret(source, memory_size, true, &mut terminal);
    (result, terminal)
}

fn run_with_input(source: &str, memory_size: usize, input: &[&str]) -> (Interpretation, MockTerminal) {
    let mut terminal = MockTerminal::new().with_input(input.iter().copied());
    let result = interpret(source, memory_size, true, &mut terminal);
    (result, terminal)
}

#[test]
fn test_increment_and_print_decimal() {
    let (result, terminal) = run("+++\\", 1);

    assert_eq!(result.tokens.len(), 4);
    assert_eq!(terminal.output(), "3");
    assert_eq!(result.state.current(), Some(Cell::Int(3)));
}

#[test]
fn test_print_literal_translates_newline() {
    let (result, terminal) = run("'Hello\\n\"", 1);

    assert_eq!(terminal.output(), "Hello\n");
    assert_eq!(result.state.memory.cells(), &[Cell::Int(0)]);
    assert_eq!(result.state.pointer, 0);
}

#[test]
fn test_multi_word_print_literal() {
    let (_, terminal) = run("'Hello,   world!\\n\"", 1);
    assert_eq!(terminal.output(), "Hello, world!\n");
}

#[test]
fn test_goto_back_to_label_before_loop_terminates() {
    let (result, _) = run("+++ ;loop ( - :loop )", 1);

    assert_eq!(result.state.current(), Some(Cell::Int(0)));
    assert!(result.state.errors.is_empty());
}

#[test]
fn test_label_payload_takes_rest_of_word() {
    let (result, _) = run(";loop(+:loop)", 1);

    assert_eq!(result.instructions.len(), 1);
    assert_eq!(result.instructions[0].operation, Operation::LabelDeclare);
    assert_eq!(result.instructions[0].argument(), Some("loop(+:loop)"));
    assert_eq!(result.steps, 1);
}

#[test]
fn test_division_by_zero_leaves_cell() {
    let (result, _) = run("=7 d", 2);

    assert_eq!(result.state.current(), Some(Cell::Int(7)));
    assert_eq!(result.state.errors.len(), 1);
    assert!(matches!(
        result.state.errors[0],
        Diagnostic::DivisionByZero { .. }
    ));
}

#[test]
fn test_goto_resumes_after_declaration() {
    let (_, terminal) = run(":skip 'no\" ;skip 'yes\"", 1);
    assert_eq!(terminal.output(), "yes");
}

#[test]
fn test_backward_conditional_goto() {
    let (_, terminal) = run("=3 ;top \\ - ?top", 1);
    assert_eq!(terminal.output(), "321");
}

#[test]
fn test_goto_zero_breaks_out() {
    let (result, terminal) = run("=2 ;top !out \\ - :top ;out 'done\"", 1);

    assert_eq!(terminal.output(), "21done");
    assert_eq!(result.state.current(), Some(Cell::Int(0)));
}

#[test]
fn test_nested_loops_multiply() {
    // cell0 * cell1 accumulated into cell2
    let (result, _) = run("=3 > =4 < ( > ( > + > + << - ) >> ( << + >> - ) <<< - )", 4);
    assert_eq!(result.state.memory.get(2), Some(Cell::Int(12)));
}

#[test]
fn test_comment_line_yields_nothing() {
    let (tokens, errors) = tokenize("# nothing to see here ( + )\n+");

    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 1);
}

#[test]
fn test_block_comment_across_lines() {
    let (result, terminal) = run("[ this +\n is skipped ] + \\", 1);

    assert_eq!(result.instructions.len(), 2);
    assert_eq!(terminal.output(), "1");
}

#[test]
fn test_unknown_character_location() {
    let (tokens, errors) = tokenize("+ +\n- x$ +");

    assert_eq!(tokens.len(), 4);
    assert_eq!(errors.len(), 2);
    match &errors[1] {
        Diagnostic::UnknownCharacter {
            character,
            word,
            location,
        } => {
            assert_eq!(*character, '$');
            assert_eq!(word, "x$");
            assert_eq!((location.line, location.word), (2, 2));
        }
        other => panic!("unexpected diagnostic {:?}", other),
    }
}

#[test]
fn test_parse_twice_is_identical() {
    let (tokens, _) = tokenize("=5 ( - .x ) ;a :a 'end\"");
    assert_eq!(parse(&tokens), parse(&tokens));
}

#[test]
fn test_scan_and_subtract_ascii() {
    let (result, terminal) = run_with_input("^ @0 \\", 1, &["7"]);

    assert_eq!(terminal.output(), "7");
    assert_eq!(result.output, "7\n7");
}

#[test]
fn test_scan_decimal_not_numeric() {
    let (result, _) = run_with_input("/", 1, &["twelve"]);

    assert_eq!(result.state.current(), Some(Cell::Int(0)));
    assert!(matches!(
        &result.state.errors[..],
        [Diagnostic::NotNumeric { .. }]
    ));
}

#[test]
fn test_character_cells_reject_arithmetic() {
    let (result, _) = run_with_input("^ +", 1, &["a"]);

    assert_eq!(result.state.current(), Some(Cell::Char('a')));
    assert!(matches!(
        &result.state.errors[..],
        [Diagnostic::TypeMismatch { .. }]
    ));
}

#[test]
fn test_copy_and_move_operations() {
    let (result, terminal) = run("=9 & %3 _3 \\ *-2 \\ w", 4);

    assert_eq!(terminal.output(), "991 [9, 9, 0, 9]\n");
    assert_eq!(result.state.pointer, 1);
}

#[test]
fn test_declining_stops_pipeline() {
    let mut terminal = MockTerminal::new().with_answers([false]);
    let result = interpret("+ ? ] \\", 1, false, &mut terminal);

    assert_eq!(result.halted_after, Some(Stage::Parsing));
    assert_eq!(terminal.prompts(), &[(Stage::Parsing, 1)]);
    assert_eq!(terminal.output(), "");
}

#[test]
fn test_demo_hello() {
    let (_, terminal) = run(include_str!("../demos/hello.wtf"), 1);
    assert_eq!(terminal.output(), "Hello, world!\n");
}

#[test]
fn test_demo_countdown() {
    let (result, terminal) = run(include_str!("../demos/countdown.wtf"), 1);

    assert_eq!(terminal.get_output(), vec!["5", "4", "3", "2", "1", "Liftoff!"]);
    assert!(result.state.errors.is_empty());
}

#[test]
fn test_demo_multiply() {
    let (result, terminal) = run_with_input(include_str!("../demos/multiply.wtf"), 2, &["6", "7"]);

    assert_eq!(terminal.output(), "42\n");
    assert!(result.lexer_errors.is_empty());
}

#[test]
fn test_demo_digits() {
    let (_, terminal) = run_with_input(include_str!("../demos/digits.wtf"), 2, &["4"]);
    assert_eq!(terminal.output(), "8\n");
}

#[test]
fn test_scanned_digit_prints_its_value() {
    let (result, terminal) = run_with_input("^ \\", 1, &["7"]);

    assert_eq!(result.state.current(), Some(Cell::Char('7')));
    assert_eq!(terminal.output(), "7");
    assert!(result.state.errors.is_empty());
}
