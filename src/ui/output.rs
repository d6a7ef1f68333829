//! Status lines and field blocks

use super::context::OutputMode;
use console::{style, StyledObject};

/// Outcome shown in front of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Ok,
    Warn,
    Fail,
    Note,
}

impl Mark {
    fn tag(self) -> StyledObject<&'static str> {
        match self {
            Self::Ok => style("[OK]").green(),
            Self::Warn => style("[WARN]").yellow(),
            Self::Fail => style("[FAIL]").red(),
            Self::Note => style("[--]").dim(),
        }
    }
}

/// Print one status line, with an optional parenthesised detail
pub fn status(mode: OutputMode, mark: Mark, message: &str, detail: Option<&str>) {
    let line = match detail {
        Some(detail) => format!("{} ({})", message, detail),
        None => message.to_string(),
    };

    match mode {
        OutputMode::Terminal => {
            let shown = match mark {
                Mark::Ok => cliclack::log::success(&line),
                Mark::Warn => cliclack::log::warning(&line),
                Mark::Fail => cliclack::log::error(&line),
                Mark::Note => cliclack::log::remark(&line),
            };
            shown.ok();
        }
        OutputMode::Plain => println!("  {} {}", mark.tag(), line),
    }
}

/// Print a titled block of rows with the names aligned
pub fn fields(mode: OutputMode, title: &str, rows: &[(&str, String)]) {
    match mode {
        OutputMode::Terminal => {
            cliclack::log::info(style(title).bold()).ok();
        }
        OutputMode::Plain => println!("{}", title),
    }
    for row in align(rows) {
        println!("  {}", row);
    }
}

fn align(rows: &[(&str, String)]) -> Vec<String> {
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(name, value)| format!("{:<width$}  {}", name, value, width = width))
        .collect()
}
