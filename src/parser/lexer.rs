//! Lexer (tokenizer) for WTFZOMFG source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Source is read line by line and split into whitespace separated words; each
//! word is handed to a small state machine that knows about the multi-word
//! literals (comments and print strings).
//!
//! Unknown characters are recorded as [`Diagnostic::UnknownCharacter`] and
//! skipped, so lexing always produces a result.

use super::ast::SourceLocation;
use crate::errors::Diagnostic;
use std::fmt;

/// Every character in the WTFZOMFG token table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Control
    LabelGoto,        // :
    LabelDeclare,     // ;
    LabelGotoNonzero, // ?
    LabelGotoZero,    // !
    LoopStart,        // (
    LoopEnd,          // )
    IfStart,          // {
    IfEnd,            // }

    // Cell/pointer manipulation
    CellIncrease,        // +
    CellDecrease,        // -
    CellFlip,            // |
    CellSet,             // =
    CellIncreaseWith,    // ~
    CopyValueRight,      // &
    CopyValueTo,         // %
    PointerMoveLeft,     // <
    PointerMoveRight,    // >
    PointerMoveTo,       // _
    PointerMoveRelative, // *
    CellSubtractAscii,   // @

    // Arithmetic
    CellAddRight,      // a
    CellSubtractRight, // s
    CellMultiplyRight, // m
    CellDivideRight,   // d

    // Input/output
    ScanAscii,        // ^
    ScanDecimal,      // /
    PrintCellAscii,   // v
    PrintCellDecimal, // \
    PrintCharacter,   // .
    PrintUntil,       // '
    PrintStop,        // "

    // Commenting
    Comment,      // #
    CommentStart, // [
    CommentEnd,   // ]

    // Debug
    PrintProgramState, // w
}

impl Command {
    /// Look up the command for a source character
    pub fn from_symbol(symbol: char) -> Option<Command> {
        let command = match symbol {
            ':' => Command::LabelGoto,
            ';' => Command::LabelDeclare,
            '?' => Command::LabelGotoNonzero,
            '!' => Command::LabelGotoZero,
            '(' => Command::LoopStart,
            ')' => Command::LoopEnd,
            '{' => Command::IfStart,
            '}' => Command::IfEnd,
            '+' => Command::CellIncrease,
            '-' => Command::CellDecrease,
            '|' => Command::CellFlip,
            '=' => Command::CellSet,
            '~' => Command::CellIncreaseWith,
            '&' => Command::CopyValueRight,
            '%' => Command::CopyValueTo,
            '<' => Command::PointerMoveLeft,
            '>' => Command::PointerMoveRight,
            '_' => Command::PointerMoveTo,
            '*' => Command::PointerMoveRelative,
            '@' => Command::CellSubtractAscii,
            'a' => Command::CellAddRight,
            's' => Command::CellSubtractRight,
            'm' => Command::CellMultiplyRight,
            'd' => Command::CellDivideRight,
            '^' => Command::ScanAscii,
            '/' => Command::ScanDecimal,
            'v' => Command::PrintCellAscii,
            '\\' => Command::PrintCellDecimal,
            '.' => Command::PrintCharacter,
            '\'' => Command::PrintUntil,
            '"' => Command::PrintStop,
            '#' => Command::Comment,
            '[' => Command::CommentStart,
            ']' => Command::CommentEnd,
            'w' => Command::PrintProgramState,
            _ => return None,
        };
        Some(command)
    }

    /// The source character for this command
    pub fn symbol(self) -> char {
        match self {
            Command::LabelGoto => ':',
            Command::LabelDeclare => ';',
            Command::LabelGotoNonzero => '?',
            Command::LabelGotoZero => '!',
            Command::LoopStart => '(',
            Command::LoopEnd => ')',
            Command::IfStart => '{',
            Command::IfEnd => '}',
            Command::CellIncrease => '+',
            Command::CellDecrease => '-',
            Command::CellFlip => '|',
            Command::CellSet => '=',
            Command::CellIncreaseWith => '~',
            Command::CopyValueRight => '&',
            Command::CopyValueTo => '%',
            Command::PointerMoveLeft => '<',
            Command::PointerMoveRight => '>',
            Command::PointerMoveTo => '_',
            Command::PointerMoveRelative => '*',
            Command::CellSubtractAscii => '@',
            Command::CellAddRight => 'a',
            Command::CellSubtractRight => 's',
            Command::CellMultiplyRight => 'm',
            Command::CellDivideRight => 'd',
            Command::ScanAscii => '^',
            Command::ScanDecimal => '/',
            Command::PrintCellAscii => 'v',
            Command::PrintCellDecimal => '\\',
            Command::PrintCharacter => '.',
            Command::PrintUntil => '\'',
            Command::PrintStop => '"',
            Command::Comment => '#',
            Command::CommentStart => '[',
            Command::CommentEnd => ']',
            Command::PrintProgramState => 'w',
        }
    }

    /// Commands that take the rest of their word as a payload
    pub fn takes_payload(self) -> bool {
        matches!(
            self,
            Command::LabelGoto
                | Command::LabelDeclare
                | Command::LabelGotoNonzero
                | Command::LabelGotoZero
                | Command::CellSet
                | Command::CellIncreaseWith
                | Command::CopyValueTo
                | Command::PointerMoveTo
                | Command::PointerMoveRelative
                | Command::CellSubtractAscii
                | Command::PrintCharacter
                | Command::PrintUntil
                | Command::Comment
                | Command::CommentStart
        )
    }

    /// Comments are dropped before the token stream reaches the parser
    pub fn is_comment(self) -> bool {
        matches!(self, Command::Comment | Command::CommentStart)
    }

    /// The collect state a multi-word literal opens, if any
    fn literal_state(self) -> Option<LexerState> {
        match self {
            Command::Comment => Some(LexerState::UntilNewline),
            Command::CommentStart => Some(LexerState::UntilEndComment),
            Command::PrintUntil => Some(LexerState::UntilEndPrint),
            _ => None,
        }
    }
}

/// States the lexer can be in between words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerState {
    Default,
    UntilNewline,
    UntilEndComment,
    UntilEndPrint,
}

impl LexerState {
    /// Character closing the literal collected in this state.
    /// `UntilNewline` is closed by the end of the line instead.
    fn terminator(self) -> Option<char> {
        match self {
            LexerState::UntilEndComment => Some(']'),
            LexerState::UntilEndPrint => Some('"'),
            LexerState::Default | LexerState::UntilNewline => None,
        }
    }
}

/// A lexical unit: a command and the text it carries.
///
/// A token without a command is a continuation of the previous token's
/// literal; those only exist between [`Lexer::tokenize`] and
/// [`combine_tokens`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub command: Option<Command>,
    pub payload: Option<String>,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(command: Command, payload: Option<String>, location: SourceLocation) -> Self {
        Token {
            command: Some(command),
            payload,
            location,
        }
    }

    fn continuation(text: &str, location: SourceLocation) -> Self {
        Token {
            command: None,
            payload: Some(text.to_string()),
            location,
        }
    }

    pub fn is_continuation(&self) -> bool {
        self.command.is_none()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.command, &self.payload) {
            (Some(command), Some(payload)) => {
                write!(f, "'{}' \"{}\"", command.symbol(), payload)
            }
            (Some(command), None) => write!(f, "'{}'", command.symbol()),
            (None, Some(payload)) => write!(f, "continuation \"{}\"", payload),
            (None, None) => write!(f, "empty continuation"),
        }
    }
}

/// One unit of lexer input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Word<'a> {
    Text(&'a str),
    LineEnd,
}

/// Lexer for WTFZOMFG source code
pub struct Lexer<'a> {
    words: Vec<(Word<'a>, SourceLocation)>,
    state: LexerState,
    tokens: Vec<Token>,
    errors: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'a str) -> Self {
        let mut words = Vec::new();
        for (line_index, line) in source.lines().enumerate() {
            let line_nr = line_index + 1;
            let mut word_nr = 0;
            for text in line.split_whitespace() {
                word_nr += 1;
                words.push((Word::Text(text), SourceLocation::new(line_nr, word_nr)));
            }
            words.push((Word::LineEnd, SourceLocation::new(line_nr, word_nr + 1)));
        }

        Lexer {
            words,
            state: LexerState::Default,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire input.
    ///
    /// Continuations are folded into their literal and comments are removed
    /// before the tokens are returned.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let words = std::mem::take(&mut self.words);
        for (word, location) in words {
            self.lex_word(word, location);
        }

        let tokens = strip_comments(combine_tokens(self.tokens));
        (tokens, self.errors)
    }

    fn lex_word(&mut self, word: Word<'a>, location: SourceLocation) {
        match (self.state, word) {
            (LexerState::Default, Word::LineEnd) => {}
            (LexerState::Default, Word::Text(text)) => self.lex_default(text, location),
            (LexerState::UntilNewline, Word::LineEnd) => self.state = LexerState::Default,
            (_, Word::LineEnd) => {}
            (state, Word::Text(text)) => self.collect(state, text, location),
        }
    }

    /// Scan a word outside of any literal, one command per character
    fn lex_default(&mut self, text: &str, location: SourceLocation) {
        for (offset, ch) in text.char_indices() {
            match Command::from_symbol(ch) {
                Some(command) if command.takes_payload() => {
                    let rest = &text[offset + ch.len_utf8()..];
                    self.open_payload(command, rest, location);
                    return;
                }
                Some(command) => self.tokens.push(Token::new(command, None, location)),
                None => self.errors.push(Diagnostic::UnknownCharacter {
                    character: ch,
                    word: text.to_string(),
                    location,
                }),
            }
        }
    }

    /// Emit a payload command, entering a collect state if its literal is still open
    fn open_payload(&mut self, command: Command, rest: &str, location: SourceLocation) {
        let mut payload = rest;
        if let Some(state) = command.literal_state() {
            match state.terminator().and_then(|end| rest.strip_suffix(end)) {
                Some(closed) => payload = closed,
                None => self.state = state,
            }
        }

        let payload = (!payload.is_empty()).then(|| payload.to_string());
        self.tokens.push(Token::new(command, payload, location));
    }

    /// Append a word to the literal currently being collected
    fn collect(&mut self, state: LexerState, text: &str, location: SourceLocation) {
        match state.terminator().and_then(|end| text.strip_suffix(end)) {
            Some(closed) => {
                self.tokens.push(Token::continuation(closed, location));
                self.state = LexerState::Default;
            }
            None => self.tokens.push(Token::continuation(text, location)),
        }
    }
}

/// Tokenize `source` in one call
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    Lexer::new(source).tokenize()
}

/// Fold continuation tokens into the payload of the nearest preceding real
/// token, space-joined in source order.
pub fn combine_tokens(tokens: Vec<Token>) -> Vec<Token> {
    let mut combined: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        if !token.is_continuation() {
            combined.push(token);
            continue;
        }

        let Some(piece) = token.payload.filter(|piece| !piece.is_empty()) else {
            continue;
        };
        // A continuation with nothing before it has nowhere to go
        if let Some(previous) = combined.last_mut() {
            match previous.payload.as_mut() {
                Some(payload) if !payload.is_empty() => {
                    payload.push(' ');
                    payload.push_str(&piece);
                }
                _ => previous.payload = Some(piece),
            }
        }
    }

    combined
}

/// Drop comment tokens together with their text
pub fn strip_comments(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|token| !token.command.is_some_and(Command::is_comment))
        .collect()
}
