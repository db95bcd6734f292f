//! Token 类型定义

use std::fmt;

/// Token 种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // 单字符符号
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // 单/双字符符号
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // 字面量
    Identifier,
    String,
    Number,

    // 关键字
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    /// 词法错误，lexeme 为错误信息
    Error,
    /// 输入结束
    Eof,
}

impl TokenKind {
    /// 获取 token 名称
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "TOKEN_LEFT_PAREN",
            TokenKind::RightParen => "TOKEN_RIGHT_PAREN",
            TokenKind::LeftBrace => "TOKEN_LEFT_BRACE",
            TokenKind::RightBrace => "TOKEN_RIGHT_BRACE",
            TokenKind::Comma => "TOKEN_COMMA",
            TokenKind::Dot => "TOKEN_DOT",
            TokenKind::Minus => "TOKEN_MINUS",
            TokenKind::Plus => "TOKEN_PLUS",
            TokenKind::Semicolon => "TOKEN_SEMICOLON",
            TokenKind::Slash => "TOKEN_SLASH",
            TokenKind::Star => "TOKEN_STAR",
            TokenKind::Bang => "TOKEN_BANG",
            TokenKind::BangEqual => "TOKEN_BANG_EQUAL",
            TokenKind::Equal => "TOKEN_EQUAL",
            TokenKind::EqualEqual => "TOKEN_EQUAL_EQUAL",
            TokenKind::Greater => "TOKEN_GREATER",
            TokenKind::GreaterEqual => "TOKEN_GREATER_EQUAL",
            TokenKind::Less => "TOKEN_LESS",
            TokenKind::LessEqual => "TOKEN_LESS_EQUAL",
            TokenKind::Identifier => "TOKEN_IDENTIFIER",
            TokenKind::String => "TOKEN_STRING",
            TokenKind::Number => "TOKEN_NUMBER",
            TokenKind::And => "TOKEN_AND",
            TokenKind::Class => "TOKEN_CLASS",
            TokenKind::Else => "TOKEN_ELSE",
            TokenKind::False => "TOKEN_FALSE",
            TokenKind::For => "TOKEN_FOR",
            TokenKind::Fun => "TOKEN_FUN",
            TokenKind::If => "TOKEN_IF",
            TokenKind::Nil => "TOKEN_NIL",
            TokenKind::Or => "TOKEN_OR",
            TokenKind::Print => "TOKEN_PRINT",
            TokenKind::Return => "TOKEN_RETURN",
            TokenKind::Super => "TOKEN_SUPER",
            TokenKind::This => "TOKEN_THIS",
            TokenKind::True => "TOKEN_TRUE",
            TokenKind::Var => "TOKEN_VAR",
            TokenKind::While => "TOKEN_WHILE",
            TokenKind::Error => "TOKEN_ERROR",
            TokenKind::Eof => "TOKEN_EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Token：源代码的零拷贝视图
///
/// `lexeme` 借用自源代码缓冲区，生命周期与之绑定。
/// 错误 token 的 `lexeme` 是错误信息而不是源代码片段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    /// token 在源代码中的字节偏移
    pub start: usize,
    /// token 首字符所在行，1-based
    pub line: usize,
}

impl<'src> Token<'src> {
    #[inline]
    pub fn lexeme(&self) -> &'src str {
        self.lexeme
    }

    /// 源代码片段长度（字节）
    #[inline]
    pub fn len(&self) -> usize {
        self.lexeme.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lexeme.is_empty()
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:4} {:<20} '{}'", self.line, self.kind.name(), self.lexeme)
    }
}
