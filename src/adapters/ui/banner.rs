//! Startup banner: "TG-UPLOADER" in figlet's standard font, shaded top to bottom.

use super::paint_lines;
use crossterm::style::Color;
use figlet_rs::FIGfont;

/// Telegram Blue (#229ed9).
pub const TELEGRAM_BLUE: Color = Color::Rgb {
    r: 0x22,
    g: 0x9e,
    b: 0xd9,
};
/// Cyber Green (#0ff0fc).
pub const CYBER_GREEN: Color = Color::Rgb {
    r: 0x0f,
    g: 0xf0,
    b: 0xfc,
};

/// Color of row `row` out of `rows`, blending `from` into `to`. Non-RGB inputs yield `to`.
fn shade(from: Color, to: Color, row: usize, rows: usize) -> Color {
    let (Color::Rgb { r: r0, g: g0, b: b0 }, Color::Rgb { r: r1, g: g1, b: b1 }) = (from, to)
    else {
        return to;
    };
    let t = if rows <= 1 {
        1.0
    } else {
        row as f64 / (rows - 1) as f64
    };
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Color::Rgb {
        r: mix(r0, r1),
        g: mix(g0, g1),
        b: mix(b0, b1),
    }
}

/// Prints the figlet title, version and tagline. Plain title if the font fails to load.
pub fn print_welcome() {
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("TG-UPLOADER").map(|f| f.to_string()))
        .unwrap_or_else(|| "TG-UPLOADER".to_string());
    let rows: Vec<&str> = art.lines().filter(|l| !l.trim().is_empty()).collect();
    let count = rows.len();
    paint_lines(
        rows.iter()
            .enumerate()
            .map(|(i, row)| (shade(TELEGRAM_BLUE, CYBER_GREEN, i, count), *row)),
    );

    let version = format!("v{}", env!("CARGO_PKG_VERSION"));
    paint_lines([
        (CYBER_GREEN, version.as_str()),
        (CYBER_GREEN, "Send any file to Telegram via your bot"),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_endpoints_and_fallback() {
        assert_eq!(shade(TELEGRAM_BLUE, CYBER_GREEN, 0, 5), TELEGRAM_BLUE);
        assert_eq!(shade(TELEGRAM_BLUE, CYBER_GREEN, 4, 5), CYBER_GREEN);
        assert_eq!(shade(TELEGRAM_BLUE, CYBER_GREEN, 0, 1), CYBER_GREEN);
        assert_eq!(shade(Color::Red, CYBER_GREEN, 2, 5), CYBER_GREEN);
    }
}
