//! Colored terminal output.

use anstyle::{AnsiColor, Color, Style};
use std::io::{self, IsTerminal, Write};

/// Writes styled status lines to the terminal.
///
/// Progress goes to stdout; warnings and errors go to stderr. Colors are
/// only used when stderr is a terminal and `NO_COLOR` is unset.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    color: bool,
}

fn style(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        let color = io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            verbose,
            quiet,
            color,
        }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            format!("{}{}{}", style.render(), text, style.render_reset())
        } else {
            text.to_string()
        }
    }

    /// Print a message only in verbose mode
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "{}", self.paint(style(AnsiColor::BrightBlack), message))
    }

    /// Print a progress line
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "{} {}", self.paint(style(AnsiColor::Cyan).bold(), "→"), message)
    }

    /// Print a success line
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "{} {}", self.paint(style(AnsiColor::Green).bold(), "✓"), message)
    }

    /// Print a warning
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(
            io::stderr().lock(),
            "{} {}",
            self.paint(style(AnsiColor::Yellow).bold(), "warning:"),
            message
        )
    }

    /// Print an error; shown even in quiet mode
    pub fn error(&self, title: &str, message: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}", self.paint(style(AnsiColor::Red).bold(), title))?;
        for line in message.lines() {
            writeln!(stderr, "  {}", line)?;
        }
        Ok(())
    }

    /// Print a section header
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "\n{}", self.paint(Style::new().bold().underline(), title))
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "  {}", message)
    }
}
