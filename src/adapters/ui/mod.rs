pub mod banner;
pub mod tui;

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};

/// Writes each `(color, text)` pair as one line and resets the color after it.
pub fn paint_lines<'a>(lines: impl IntoIterator<Item = (Color, &'a str)>) {
    let mut out = stdout();
    for (color, text) in lines {
        let _ = out.execute(SetForegroundColor(color));
        let _ = out.execute(Print(text));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }
    let _ = out.flush();
}

/// Prints the welcome banner and applies the theme for all subsequent inquire prompts.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}
