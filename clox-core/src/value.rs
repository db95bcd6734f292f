//! 运行时值
//!
//! 当前只实现数值子集：所有值都是双精度浮点数。

/// 运行时值
pub type Value = f64;

/// `%g` 的有效数字位数
const PRECISION: i32 = 6;

/// 按 C `%g` 格式化数值
///
/// 保留 6 位有效数字并去掉末尾的 0；十进制指数小于 -4 或不小于 6 时
/// 使用指数形式（`1.23457e+06`）。
pub fn format_value(value: Value) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // 先按指数形式舍入，得到舍入后的十进制指数
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if (-4..PRECISION).contains(&exp) {
        let fixed = format!("{:.*}", (PRECISION - 1 - exp) as usize, value);
        trim_fraction(&fixed).to_string()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    }
}

/// 去掉小数部分末尾的 0，以及随之多余的小数点
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
