//! Lexer (tokenizer) for the mini-C language
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. Tokenization is total: unrecognized or malformed input becomes
//! [`TokenKind::Error`] tokens and scanning continues, so one bad character
//! never hides later, well-formed tokens. Comments are emitted as ordinary
//! tokens rather than discarded; the parser decides where they are allowed.

use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::LazyLock;

/// Longest lexeme stored on a token. Characters past the bound are dropped
/// from the stored lexeme while scanning still consumes the full token.
pub const MAX_LEXEME_LEN: usize = 100;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Identifiers and keywords
    Identifier,
    Keyword,

    // Literals
    IntDec,
    IntHex,
    IntOct,
    Real,
    Str,
    CharLit,

    // Comments (kept in the stream)
    LineComment,
    BlockComment,

    // Operators
    Assign,    // =
    Eq,        // ==
    NotEq,     // !=
    Less,      // <
    LessEq,    // <=
    Greater,   // >
    GreaterEq, // >=
    Not,       // !
    AndAnd,    // &&
    OrOr,      // ||
    Inc,       // ++
    Dec,       // --
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /

    // Punctuation
    Semicolon, // ;
    Comma,     // ,
    Dot,       // .
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }

    // End of input (synthesized by the parser, never stored in the stream)
    Eof,

    // Lexical anomaly: unrecognized character or malformed literal
    Error,
}

impl TokenKind {
    /// True for the two comment kinds, which the parser skips contextually.
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// True for integer literals in any base.
    pub fn is_integer(self) -> bool {
        matches!(self, TokenKind::IntDec | TokenKind::IntHex | TokenKind::IntOct)
    }

    /// True for any literal kind usable as a primary expression.
    pub fn is_literal(self) -> bool {
        self.is_integer()
            || matches!(self, TokenKind::Real | TokenKind::Str | TokenKind::CharLit)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::IntDec => "integer literal",
            TokenKind::IntHex => "hex integer literal",
            TokenKind::IntOct => "octal integer literal",
            TokenKind::Real => "real literal",
            TokenKind::Str => "string literal",
            TokenKind::CharLit => "character literal",
            TokenKind::LineComment => "line comment",
            TokenKind::BlockComment => "block comment",
            TokenKind::Assign => "'='",
            TokenKind::Eq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::LessEq => "'<='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEq => "'>='",
            TokenKind::Not => "'!'",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Inc => "'++'",
            TokenKind::Dec => "'--'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Eof => "end of file",
            TokenKind::Error => "invalid token",
        };
        f.write_str(name)
    }
}

/// A single token: a kind plus the exact source substring that produced it,
/// truncated at [`MAX_LEXEME_LEN`]. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    /// Build a token, applying the lexeme length bound.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        let mut lexeme: String = lexeme.into();
        if lexeme.chars().count() > MAX_LEXEME_LEN {
            lexeme = lexeme.chars().take(MAX_LEXEME_LEN).collect();
        }
        Self { kind, lexeme }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Keyword => write!(f, "'{}'", self.lexeme),
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Error => write!(f, "invalid token '{}'", self.lexeme),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

/// Reserved words of the language. Checked against every identifier-shaped
/// lexeme at tokenization time.
static KEYWORDS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "if", "else", "while", "for", "return", "int", "float", "double",
        "char", "bool", "void",
    ]
    .into_iter()
    .collect()
});

/// True if `word` is a reserved word.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word)
}

/// True if `word` names a primitive type.
pub fn is_type_keyword(word: &str) -> bool {
    matches!(word, "int" | "float" | "double" | "char" | "bool" | "void")
}

/// Policy switches for the lexer.
///
/// The drafts of this language disagree on whether unterminated strings and
/// block comments are errors or are silently closed at end of input; the
/// default here is to close them silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexerOptions {
    /// Emit an [`TokenKind::Error`] token for unterminated string literals
    /// and block comments instead of closing them implicitly.
    pub error_on_unterminated: bool,
}

/// Tokenize `source` with default options.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

/// Lexer over a fully resident source buffer.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    options: LexerOptions,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self::with_options(input, LexerOptions::default())
    }

    pub fn with_options(input: &str, options: LexerOptions) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            options,
        }
    }

    /// Tokenize the entire input. Total: every anomaly becomes an error
    /// token and scanning continues, so the loop always reaches the end of
    /// the buffer. The end-of-file sentinel is not stored; the parser
    /// synthesizes it when its cursor runs past the last token.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let start = self.position;
            let Some(ch) = self.advance() else {
                break;
            };
            tokens.push(self.next_token(ch, start));
        }

        tokens
    }

    /// Scan the token that starts with `ch` at position `start`; `ch` is
    /// already consumed, and every path consumes at least that character.
    fn next_token(&mut self, ch: char, start: usize) -> Token {
        match ch {
            '"' => self.string_literal(start),
            '\'' => self.char_literal(start),
            '0'..='9' => self.number_literal(start),
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.real_fraction(start)
                } else {
                    self.make_token(TokenKind::Dot, start)
                }
            }
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(start),
            '/' => {
                if self.peek() == Some('/') {
                    self.line_comment(start)
                } else if self.peek() == Some('*') {
                    self.block_comment(start)
                } else {
                    self.make_token(TokenKind::Slash, start)
                }
            }
            '=' => self.one_or_two(start, TokenKind::Assign, '=', TokenKind::Eq),
            '<' => self.one_or_two(start, TokenKind::Less, '=', TokenKind::LessEq),
            '>' => self.one_or_two(start, TokenKind::Greater, '=', TokenKind::GreaterEq),
            '!' => self.one_or_two(start, TokenKind::Not, '=', TokenKind::NotEq),
            '+' => self.one_or_two(start, TokenKind::Plus, '+', TokenKind::Inc),
            '-' => self.one_or_two(start, TokenKind::Minus, '-', TokenKind::Dec),
            // The language has no bitwise operators: bare '&' and '|' are
            // lexing errors.
            '&' => self.one_or_two(start, TokenKind::Error, '&', TokenKind::AndAnd),
            '|' => self.one_or_two(start, TokenKind::Error, '|', TokenKind::OrOr),
            '*' => self.make_token(TokenKind::Star, start),
            ';' => self.make_token(TokenKind::Semicolon, start),
            ',' => self.make_token(TokenKind::Comma, start),
            '(' => self.make_token(TokenKind::LParen, start),
            ')' => self.make_token(TokenKind::RParen, start),
            '{' => self.make_token(TokenKind::LBrace, start),
            '}' => self.make_token(TokenKind::RBrace, start),
            '[' => self.make_token(TokenKind::LBracket, start),
            ']' => self.make_token(TokenKind::RBracket, start),
            _ => self.make_token(TokenKind::Error, start),
        }
    }

    /// Single-character token, upgraded to `two` when the next character is
    /// `second`.
    fn one_or_two(
        &mut self,
        start: usize,
        one: TokenKind,
        second: char,
        two: TokenKind,
    ) -> Token {
        if self.peek() == Some(second) {
            self.advance();
            self.make_token(two, start)
        } else {
            self.make_token(one, start)
        }
    }

    /// Identifier or keyword: letter/underscore start already consumed.
    fn identifier_or_keyword(&mut self, start: usize) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let kind = if is_keyword(&self.lexeme_from(start)) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.make_token(kind, start)
    }

    /// Numeric literal with the leading digit already consumed.
    ///
    /// Decimal vs. real is decided by scanning the whole digit run and then
    /// looking for `.`/`e`/`E`; a leading `0` selects hex (with `x`/`X`) or
    /// octal classification once the real forms are ruled out.
    fn number_literal(&mut self, start: usize) -> Token {
        let first = self.input[start];

        if first == '0' && matches!(self.peek(), Some('x' | 'X')) {
            self.advance();
            let mut digits = 0usize;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
                digits += 1;
            }
            // "0x" with no digit after the prefix is malformed.
            let kind = if digits == 0 { TokenKind::Error } else { TokenKind::IntHex };
            return self.make_token(kind, start);
        }

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        match self.peek() {
            Some('.') => {
                self.advance();
                self.real_fraction(start)
            }
            Some('e' | 'E') => self.real_exponent(start),
            _ => {
                if first == '0' {
                    // Octal: every digit after the leading zero must be 0-7.
                    let octal_ok = self.input[start + 1..self.position]
                        .iter()
                        .all(|c| ('0'..='7').contains(c));
                    let kind = if octal_ok { TokenKind::IntOct } else { TokenKind::Error };
                    self.make_token(kind, start)
                } else {
                    self.make_token(TokenKind::IntDec, start)
                }
            }
        }
    }

    /// Fractional digits of a real literal, then the optional exponent.
    /// Shared entry point for `123.45`-style literals and the leading-dot
    /// form `.5`.
    fn real_fraction(&mut self, start: usize) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        self.real_exponent(start)
    }

    /// Optional signed exponent of a real literal. An exponent marker with
    /// no following digit is malformed.
    fn real_exponent(&mut self, start: usize) -> Token {
        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return self.make_token(TokenKind::Error, start);
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        self.make_token(TokenKind::Real, start)
    }

    /// String literal, opening quote already consumed. Contents are taken
    /// verbatim up to the closing quote; an unterminated literal is closed
    /// implicitly at end of line or end of input unless the options ask for
    /// an error token instead.
    fn string_literal(&mut self, start: usize) -> Token {
        loop {
            match self.peek() {
                Some('"') => {
                    self.advance();
                    return self.make_token(TokenKind::Str, start);
                }
                Some('\n') | None => {
                    let kind = if self.options.error_on_unterminated {
                        TokenKind::Error
                    } else {
                        TokenKind::Str
                    };
                    return self.make_token(kind, start);
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Character literal, opening quote already consumed: a backslash
    /// escape or one raw character, then an expected closing quote.
    /// Malformed forms still produce a character-literal token with
    /// whatever was scanned.
    fn char_literal(&mut self, start: usize) -> Token {
        match self.peek() {
            None => return self.make_token(TokenKind::CharLit, start),
            Some('\'') => {
                // Empty literal; tolerated.
                self.advance();
                return self.make_token(TokenKind::CharLit, start);
            }
            Some('\\') => {
                self.advance();
                if self.peek().is_some() {
                    self.advance();
                }
            }
            Some(_) => {
                self.advance();
            }
        }

        if self.peek() == Some('\'') {
            self.advance();
        }
        self.make_token(TokenKind::CharLit, start)
    }

    /// Line comment: `//` up to (not including) the end of line.
    fn line_comment(&mut self, start: usize) -> Token {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
        self.make_token(TokenKind::LineComment, start)
    }

    /// Block comment: `/*` up to the first `*/`, or end of input under the
    /// default close-silently policy.
    fn block_comment(&mut self, start: usize) -> Token {
        self.advance(); // '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return self.make_token(TokenKind::BlockComment, start);
            }
            self.advance();
        }

        let kind = if self.options.error_on_unterminated {
            TokenKind::Error
        } else {
            TokenKind::BlockComment
        };
        self.make_token(kind, start)
    }

    /// Skip contiguous whitespace; never emitted as tokens.
    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.advance();
        }
    }

    fn lexeme_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    fn make_token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, self.lexeme_from(start))
    }

    /// Peek at the current character without consuming.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters.
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to the next character.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("int x;");

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[0].lexeme, "int");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!(tokens[2].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t\r\n  \n").is_empty());
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = tokenize("if elsewhere _tmp2 return");

        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "elsewhere");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[3].kind, TokenKind::Keyword);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("== <= >= != && || ++ -- = < > ! + -"),
            vec![
                TokenKind::Eq,
                TokenKind::LessEq,
                TokenKind::GreaterEq,
                TokenKind::NotEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Inc,
                TokenKind::Dec,
                TokenKind::Assign,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Not,
                TokenKind::Plus,
                TokenKind::Minus,
            ]
        );
    }

    #[test]
    fn test_bare_ampersand_and_pipe_are_errors() {
        assert_eq!(kinds("a & b"), vec![
            TokenKind::Identifier,
            TokenKind::Error,
            TokenKind::Identifier,
        ]);
        assert_eq!(kinds("|")[0], TokenKind::Error);
    }

    #[test]
    fn test_integer_literals() {
        let tokens = tokenize("42 0x2F 017 0 99");

        assert_eq!(tokens[0].kind, TokenKind::IntDec);
        assert_eq!(tokens[0].lexeme.parse::<i64>().unwrap(), 42);
        assert_eq!(tokens[1].kind, TokenKind::IntHex);
        assert_eq!(i64::from_str_radix(&tokens[1].lexeme[2..], 16).unwrap(), 0x2F);
        assert_eq!(tokens[2].kind, TokenKind::IntOct);
        assert_eq!(i64::from_str_radix(&tokens[2].lexeme[1..], 8).unwrap(), 0o17);
        assert_eq!(tokens[3].kind, TokenKind::IntOct);
        assert_eq!(tokens[3].lexeme, "0");
        assert_eq!(tokens[4].kind, TokenKind::IntDec);
    }

    #[test]
    fn test_malformed_numbers() {
        // Hex prefix with no digits, octal with 8, dangling exponent marker.
        assert_eq!(kinds("0x")[0], TokenKind::Error);
        assert_eq!(kinds("08")[0], TokenKind::Error);
        assert_eq!(kinds("1e")[0], TokenKind::Error);
        assert_eq!(kinds("1e+")[0], TokenKind::Error);
    }

    #[test]
    fn test_real_literals() {
        for src in ["3.14", "1.", ".5", "1e5", "2.5e-3", ".5E+2", "0.25"] {
            let tokens = tokenize(src);
            assert_eq!(tokens.len(), 1, "source {:?}", src);
            assert_eq!(tokens[0].kind, TokenKind::Real, "source {:?}", src);
            assert_eq!(tokens[0].lexeme, src);
        }
    }

    #[test]
    fn test_dot_without_digit_is_punctuation() {
        assert_eq!(kinds("p.x"), vec![
            TokenKind::Identifier,
            TokenKind::Dot,
            TokenKind::Identifier,
        ]);
    }

    #[test]
    fn test_string_literal() {
        let tokens = tokenize("\"hello world\" x");
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].lexeme, "\"hello world\"");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_unterminated_string_policy() {
        // Default: close silently at end of line.
        let tokens = tokenize("\"oops\nx");
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].lexeme, "\"oops");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);

        // Opt-in strict policy.
        let options = LexerOptions { error_on_unterminated: true };
        let tokens = Lexer::with_options("\"oops", options).tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Error);
    }

    #[test]
    fn test_char_literals() {
        let tokens = tokenize(r"'a' '\n' '\''");
        assert_eq!(tokens.len(), 3);
        for t in &tokens {
            assert_eq!(t.kind, TokenKind::CharLit);
        }
        assert_eq!(tokens[0].lexeme, "'a'");
        assert_eq!(tokens[1].lexeme, r"'\n'");
    }

    #[test]
    fn test_comments_are_tokens() {
        let tokens = tokenize("int x; // trailing\n/* block\ncomment */ y");

        assert_eq!(tokens[3].kind, TokenKind::LineComment);
        assert_eq!(tokens[3].lexeme, "// trailing");
        assert_eq!(tokens[4].kind, TokenKind::BlockComment);
        assert_eq!(tokens[5].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_unterminated_block_comment_policy() {
        let tokens = tokenize("/* never closed");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::BlockComment);

        let options = LexerOptions { error_on_unterminated: true };
        let tokens = Lexer::with_options("/* never closed", options).tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Error);
    }

    #[test]
    fn test_unknown_character_advances() {
        // '@' and '#' are not in the language; each becomes one error token
        // and scanning keeps going.
        assert_eq!(kinds("@#x"), vec![
            TokenKind::Error,
            TokenKind::Error,
            TokenKind::Identifier,
        ]);
    }

    #[test]
    fn test_lexeme_round_trip() {
        // With no interior whitespace, concatenated lexemes reproduce the
        // source exactly.
        let source = "x=(a+1)*fn(2,0x1F);";
        let joined: String = tokenize(source).iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(joined, source);
    }

    #[test]
    fn test_lexeme_truncation() {
        let long = "a".repeat(MAX_LEXEME_LEN + 40);
        let tokens = tokenize(&long);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme.chars().count(), MAX_LEXEME_LEN);
    }
}
