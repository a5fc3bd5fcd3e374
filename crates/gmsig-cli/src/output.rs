use std::io::{self, Write};
use std::sync::OnceLock;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: OnceLock<bool> = OnceLock::new();

pub fn init(json: bool) {
    let _ = JSON_MODE.set(json);
}

pub fn is_json() -> bool {
    JSON_MODE.get().copied().unwrap_or(false)
}

/// A command result that knows how to render itself for humans.
pub trait Report: Serialize {
    fn ok(&self) -> bool;
    fn human(&self) -> String;

    /// Prefix the human form with a colored status mark.
    fn marked(&self) -> bool {
        true
    }
}

pub fn print<T: Report>(value: &T) -> anyhow::Result<()> {
    if is_json() {
        let s = serde_json::to_string_pretty(value)?;
        println!("{s}");
        return Ok(());
    }
    if value.marked() {
        status_line(value.ok(), &value.human())?;
    } else {
        println!("{}", value.human());
    }
    Ok(())
}

fn status_line(ok: bool, msg: &str) -> io::Result<()> {
    let mut out = stdout();
    let (mark, color) = if ok { ("✅", Color::Green) } else { ("❌", Color::Red) };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{mark} ")?;
    out.reset()?;
    writeln!(out, "{msg}")
}

/// Error reporting; JSON mode keeps stdout machine-readable.
pub fn error(err: &anyhow::Error) {
    if is_json() {
        let body = serde_json::json!({ "ok": false, "error": format!("{err:#}") });
        println!("{body:#}");
        return;
    }
    let mut out = StandardStream::stderr(ColorChoice::Auto);
    let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    let _ = write!(out, "error: ");
    let _ = out.reset();
    let _ = writeln!(out, "{err:#}");
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}
