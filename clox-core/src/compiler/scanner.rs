//! 词法扫描器
//!
//! 逐字符有限状态机，按需（拉取式）产生 token：
//! - 每次调用 [`Scanner::scan_token`] 恰好返回一个 token
//! - 到达输入末尾后始终返回 `Eof`，不会越过缓冲区末尾
//! - 非法输入以 `Error` token 的形式返回，扫描本身从不中断

use super::token::{Token, TokenKind};

/// 未闭合的字符串
pub const UNTERMINATED_STRING: &str = "Unterminated string.";
/// 无法识别的字符
pub const UNEXPECTED_CHARACTER: &str = "Unexpected character.";

/// 扫描器状态
#[derive(Debug, Clone)]
pub struct Scanner<'src> {
    source: &'src str,
    /// 当前 token 的起始偏移
    start: usize,
    /// 扫描游标
    current: usize,
    /// 当前行号
    line: usize,
    /// 迭代器是否已经产出过 Eof
    done: bool,
}

impl<'src> Scanner<'src> {
    /// 从源代码开头开始扫描，行号置为 1
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            done: false,
        }
    }

    /// 扫描下一个 token
    pub fn scan_token(&mut self) -> Token<'src> {
        self.skip_whitespace();
        self.start = self.current;

        if self.is_at_end() {
            return self.make_token(TokenKind::Eof);
        }

        let c = self.advance();

        if is_alpha(c) {
            return self.identifier();
        }
        if c.is_ascii_digit() {
            return self.number();
        }

        match c {
            b'(' => self.make_token(TokenKind::LeftParen),
            b')' => self.make_token(TokenKind::RightParen),
            b'{' => self.make_token(TokenKind::LeftBrace),
            b'}' => self.make_token(TokenKind::RightBrace),
            b';' => self.make_token(TokenKind::Semicolon),
            b',' => self.make_token(TokenKind::Comma),
            b'.' => self.make_token(TokenKind::Dot),
            b'-' => self.make_token(TokenKind::Minus),
            b'+' => self.make_token(TokenKind::Plus),
            b'/' => self.make_token(TokenKind::Slash),
            b'*' => self.make_token(TokenKind::Star),
            b'!' => self.either(b'=', TokenKind::BangEqual, TokenKind::Bang),
            b'=' => self.either(b'=', TokenKind::EqualEqual, TokenKind::Equal),
            b'<' => self.either(b'=', TokenKind::LessEqual, TokenKind::Less),
            b'>' => self.either(b'=', TokenKind::GreaterEqual, TokenKind::Greater),
            b'"' => self.string(),
            _ => {
                // 多字节 UTF-8 字符整体跳过，保证后续切片落在字符边界上
                self.skip_continuation_bytes();
                self.error_token(UNEXPECTED_CHARACTER)
            }
        }
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    #[inline]
    fn advance(&mut self) -> u8 {
        let c = self.source.as_bytes()[self.current];
        self.current += 1;
        c
    }

    /// 查看当前字符，末尾返回 0
    #[inline]
    fn peek(&self) -> u8 {
        self.source.as_bytes().get(self.current).copied().unwrap_or(0)
    }

    /// 查看下一个字符，越界返回 0
    #[inline]
    fn peek_next(&self) -> u8 {
        self.source
            .as_bytes()
            .get(self.current + 1)
            .copied()
            .unwrap_or(0)
    }

    /// 下一个字符等于 `expected` 时消费它并返回 true，否则游标不动
    fn match_next(&mut self, expected: u8) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn either(&mut self, expected: u8, matched: TokenKind, otherwise: TokenKind) -> Token<'src> {
        let kind = if self.match_next(expected) {
            matched
        } else {
            otherwise
        };
        self.make_token(kind)
    }

    fn skip_continuation_bytes(&mut self) {
        while !self.is_at_end() && !self.source.is_char_boundary(self.current) {
            self.current += 1;
        }
    }

    /// 跳过空白、换行和行注释
    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                b' ' | b'\r' | b'\t' => {
                    self.advance();
                }
                b'\n' => {
                    self.line += 1;
                    self.advance();
                }
                b'/' if self.peek_next() == b'/' => {
                    while self.peek() != b'\n' && !self.is_at_end() {
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        Token {
            kind,
            lexeme: &self.source[self.start..self.current],
            start: self.start,
            line: self.line,
        }
    }

    fn error_token(&self, message: &'static str) -> Token<'src> {
        Token {
            kind: TokenKind::Error,
            lexeme: message,
            start: self.start,
            line: self.line,
        }
    }

    fn identifier(&mut self) -> Token<'src> {
        while is_alpha(self.peek()) || self.peek().is_ascii_digit() {
            self.advance();
        }
        let kind = self.identifier_kind();
        self.make_token(kind)
    }

    /// 按首字母（必要时第二个字母）分派，只比较剩余后缀
    fn identifier_kind(&self) -> TokenKind {
        let text = &self.source.as_bytes()[self.start..self.current];
        match text[0] {
            b'a' => check_keyword(text, 1, b"nd", TokenKind::And),
            b'c' => check_keyword(text, 1, b"lass", TokenKind::Class),
            b'e' => check_keyword(text, 1, b"lse", TokenKind::Else),
            b'f' if text.len() > 1 => match text[1] {
                b'a' => check_keyword(text, 2, b"lse", TokenKind::False),
                b'o' => check_keyword(text, 2, b"r", TokenKind::For),
                b'u' => check_keyword(text, 2, b"n", TokenKind::Fun),
                _ => TokenKind::Identifier,
            },
            b'i' => check_keyword(text, 1, b"f", TokenKind::If),
            b'n' => check_keyword(text, 1, b"il", TokenKind::Nil),
            b'o' => check_keyword(text, 1, b"r", TokenKind::Or),
            b'p' => check_keyword(text, 1, b"rint", TokenKind::Print),
            b'r' => check_keyword(text, 1, b"eturn", TokenKind::Return),
            b's' => check_keyword(text, 1, b"uper", TokenKind::Super),
            b't' if text.len() > 1 => match text[1] {
                b'h' => check_keyword(text, 2, b"is", TokenKind::This),
                b'r' => check_keyword(text, 2, b"ue", TokenKind::True),
                _ => TokenKind::Identifier,
            },
            b'v' => check_keyword(text, 1, b"ar", TokenKind::Var),
            b'w' => check_keyword(text, 1, b"hile", TokenKind::While),
            _ => TokenKind::Identifier,
        }
    }

    fn number(&mut self) -> Token<'src> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // 小数部分：`.` 后必须紧跟数字
        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        self.make_token(TokenKind::Number)
    }

    /// 字符串 token 包含两侧引号
    fn string(&mut self) -> Token<'src> {
        while self.peek() != b'"' && !self.is_at_end() {
            if self.peek() == b'\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return self.error_token(UNTERMINATED_STRING);
        }

        // 闭合引号
        self.advance();
        self.make_token(TokenKind::String)
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Token<'src>;

    /// 依次产出所有 token，包括最后的 `Eof`，之后返回 None
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.scan_token();
        if token.is_eof() {
            self.done = true;
        }
        Some(token)
    }
}

#[inline]
fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

/// 长度相同且剩余后缀一致时返回关键字，否则是标识符
#[inline]
fn check_keyword(text: &[u8], start: usize, rest: &[u8], kind: TokenKind) -> TokenKind {
    if text.len() == start + rest.len() && &text[start..] == rest {
        kind
    } else {
        TokenKind::Identifier
    }
}
