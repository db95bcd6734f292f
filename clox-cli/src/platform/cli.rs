//! CLI 格式化输出
//!
//! 提供命令行友好的错误显示和源码上下文打印。

use crate::error::CliError;

/// 错误行前后显示的上下文行数
const CONTEXT_LINES: usize = 2;

/// 打印错误；有源代码时显示出错行的上下文
pub fn print_error(e: &CliError, source: Option<&str>) {
    eprintln!("Error: {e}");

    let (Some(source), Some(line)) = (source, e.line()) else {
        return;
    };
    if let Some(context) = source_context(source, line, caret_column(e, source, line)) {
        eprint!("{context}");
    }
}

/// 编译错误的插入符所在列；诊断偏移不在 `line` 上时不显示插入符
fn caret_column(e: &CliError, source: &str, line: usize) -> Option<usize> {
    let CliError::Compile(c) = e else {
        return None;
    };
    let (offset_line, column) = position_of(source, c.diagnostics.first()?.offset);
    (offset_line == line).then_some(column)
}

/// 字节偏移所在的 (行, 列)，均为 1-based
pub fn position_of(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, source[line_start..offset].chars().count() + 1)
}

/// 渲染源代码上下文（错误行前后几行），行号越界时返回 `None`
pub fn source_context(source: &str, error_line: usize, column: Option<usize>) -> Option<String> {
    let lines: Vec<&str> = source.lines().collect();
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return None;
    }

    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(total_lines);
    let width = end_line.to_string().len();

    let mut out = format!("{}|--\n", "-".repeat(width + 1));
    for line_idx in start_line..=end_line {
        out.push_str(&format!("{line_idx:>width$} | {}\n", lines[line_idx - 1]));
        if line_idx == error_line {
            if let Some(col) = column {
                let marker = " ".repeat(col.saturating_sub(1));
                out.push_str(&format!("{:width$} | {marker}^\n", ""));
            }
        }
    }
    out.push_str(&format!("{}|--\n", "-".repeat(width + 1)));
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clox_core::compile;

    #[test]
    fn test_position_of() {
        let source = "var a;\n  @";
        assert_eq!(position_of(source, 0), (1, 1));
        assert_eq!(position_of(source, 9), (2, 3));
        assert_eq!(position_of(source, 100), (2, 4));
    }

    #[test]
    fn test_caret_on_error_line() {
        let source = "var a;\nvar b = @;";
        let err = CliError::from(compile(source).unwrap_err());
        assert_eq!(caret_column(&err, source, 2), Some(9));
    }

    #[test]
    fn test_no_caret_for_multiline_unterminated_string() {
        // 诊断行是字符串结束处（第 3 行），偏移指向第 1 行的开引号
        let source = "var s = \"one\ntwo\nthree";
        let err = CliError::from(compile(source).unwrap_err());
        assert_eq!(err.line(), Some(3));
        assert_eq!(caret_column(&err, source, 3), None);

        let text = source_context(source, 3, caret_column(&err, source, 3)).unwrap();
        assert!(!text.contains('^'));
    }

    #[test]
    fn test_source_context_with_marker() {
        let source = "one\ntwo\nthree @\nfour";
        let text = source_context(source, 3, Some(7)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "--|--");
        assert_eq!(lines[1], "1 | one");
        assert_eq!(lines[3], "3 | three @");
        assert_eq!(lines[4], "  |       ^");
        assert_eq!(lines[5], "4 | four");
        assert_eq!(lines.last(), Some(&"--|--"));
    }

    #[test]
    fn test_source_context_without_marker() {
        let text = source_context("a\nb", 2, None).unwrap();
        assert!(!text.contains('^'));
        assert!(text.contains("2 | b"));
    }

    #[test]
    fn test_source_context_out_of_range() {
        assert!(source_context("a", 0, None).is_none());
        assert!(source_context("a", 2, None).is_none());
    }
}
