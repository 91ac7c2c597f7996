//! 终端中分页显示交易对列表。

use crate::data::Product;
use std::io::{self, BufRead, Write};

/// 每显示多少行询问一次是否继续
pub const PAGE_SIZE: usize = 10;

pub const PROMPT: &str = "Continue? (y/n) ";

fn row(id: &str, base: &str, quote: &str) -> String {
    format!("{id:<10}{base:<10}{quote:<10}\n")
}

/// 表头加上一行等宽的 `=`，宽度包含表头末尾的换行符
fn header() -> String {
    let mut header = row("ID", "Base", "Quote");
    let width = header.len();
    header.extend(std::iter::repeat_n('=', width));
    header
}

/// 询问用户是否继续显示。
///
/// `y` 或直接回车表示继续，`n` 表示停止，其他输入会重新询问。
/// 输入结束时视为继续。
fn ask_to_continue<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<bool> {
    let mut line = String::new();
    loop {
        output.write_all(PROMPT.as_bytes())?;
        output.flush()?;

        line.clear();
        input.read_line(&mut line)?;
        match line.trim().to_lowercase().as_str() {
            "y" | "" => return Ok(true),
            "n" => return Ok(false),
            _ => continue,
        }
    }
}

/// 输出交易对表格，每 [`PAGE_SIZE`] 行暂停一次。
///
/// 返回实际输出的行数。
pub fn render_products<R: BufRead, W: Write>(
    products: &[Product],
    input: &mut R,
    output: &mut W,
) -> io::Result<usize> {
    let header = header();
    writeln!(output, "{header}")?;

    let mut shown = 0;
    for product in products {
        output.write_all(
            row(&product.id, &product.base_currency, &product.quote_currency).as_bytes(),
        )?;
        shown += 1;

        if shown % PAGE_SIZE == 0 {
            writeln!(output)?;
            if !ask_to_continue(input, output)? {
                break;
            }
            writeln!(output)?;
            writeln!(output, "{header}")?;
        }
    }

    output.flush()?;
    Ok(shown)
}
