//! Styled terminal text
//!
//! Output is built as [`StyledText`]: an ordered list of segments, each a piece
//! of text with a [`StyleSet`]. The same value renders to plain text (for width
//! computation and non-TTY output) and to ANSI escapes, so markup never
//! leaks into width calculations.
//!
//! Logical roles ([`StyleRole`]) map names to `colored::Color` through a macro,
//! keeping one source of truth for the palette used by the status report and
//! by clap's help output.
//!
//! ```
//! use gitmeta::core::styles::{StyleRole, StyledText};
//! let mut text = StyledText::new();
//! text.push_plain("[ ").push_role("OK", StyleRole::Valid).push_plain(" ]");
//! assert_eq!(text.plain(), "[ OK ]");
//! assert_eq!(text.ansi(), "[ \x1b[92mOK\x1b[39m ]");
//! ```

use clap::builder::styling::{AnsiColor, Color as ClapColor, Style, Styles};
use colored::Color;
use std::fmt;
use unicode_width::UnicodeWidthStr;

// Each role with its foreground color, `None` for the terminal default
macro_rules! style {
    ( $( $variant:ident => $color:expr ),+ $(,)? ) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum StyleRole { $( $variant ),+ }

        impl StyleRole {
            pub fn color(self) -> Option<Color> {
                match self { $( StyleRole::$variant => $color ),+ }
            }

            pub fn style(self) -> StyleSet {
                StyleSet { color: self.color(), ..StyleSet::default() }
            }

            pub fn paint(self, text: &str, enabled: bool) -> String {
                StyledText::styled(text, self.style()).render(enabled)
            }
        }
    }
}

// Value => None (uncoloured)
style! {
    Header      => Some(Color::Yellow),
    Literal     => Some(Color::Cyan),
    Placeholder => Some(Color::Green),
    Valid       => Some(Color::BrightGreen),
    Invalid     => Some(Color::BrightRed),
    Error       => Some(Color::BrightRed),
    Value       => None,
}

/// Attributes applied to one segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleSet {
    pub color: Option<Color>,
    pub bold: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl StyleSet {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Opening and closing escape sequences, outermost attribute first
    fn escapes(&self) -> (String, String) {
        let mut open = String::new();
        let mut close = Vec::new();
        if self.bold {
            open.push_str("\x1b[1m");
            close.push("\x1b[22m".to_string());
        }
        if self.underline {
            open.push_str("\x1b[4m");
            close.push("\x1b[24m".to_string());
        }
        if self.reverse {
            open.push_str("\x1b[7m");
            close.push("\x1b[27m".to_string());
        }
        if let Some(color) = self.color {
            open.push_str(&format!("\x1b[{}m", foreground_code(color)));
            close.push("\x1b[39m".to_string());
        }
        close.reverse();
        (open, close.concat())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: StyleSet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    segments: Vec<Segment>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn styled(text: impl Into<String>, style: StyleSet) -> Self {
        let mut styled = Self::new();
        styled.push(text, style);
        styled
    }

    pub fn push(&mut self, text: impl Into<String>, style: StyleSet) -> &mut Self {
        let text = text.into();
        if !text.is_empty() {
            self.segments.push(Segment { text, style });
        }
        self
    }

    pub fn push_plain(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(text, StyleSet::plain())
    }

    pub fn push_role(&mut self, text: impl Into<String>, role: StyleRole) -> &mut Self {
        self.push(text, role.style())
    }

    pub fn append(&mut self, other: StyledText) -> &mut Self {
        self.segments.extend(other.segments);
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Text with every style stripped
    pub fn plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Text with ANSI escape sequences applied
    pub fn ansi(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            if segment.style.is_plain() {
                out.push_str(&segment.text);
            } else {
                let (open, close) = segment.style.escapes();
                out.push_str(&open);
                out.push_str(&segment.text);
                out.push_str(&close);
            }
        }
        out
    }

    pub fn render(&self, color: bool) -> String {
        if color {
            self.ansi()
        } else {
            self.plain()
        }
    }

    /// Visible width in terminal columns
    pub fn width(&self) -> usize {
        self.segments.iter().map(|s| s.text.width()).sum()
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plain())
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::styled(text, StyleSet::plain())
    }
}

// SGR foreground code. Truecolor is written as is, whatever the terminal
// advertises.
fn foreground_code(color: Color) -> String {
    match color {
        Color::TrueColor { r, g, b } => format!("38;2;{};{};{}", r, g, b),
        other => other.to_fg_str().into_owned(),
    }
}

// Truecolor has no clap equivalent
fn color_to_ansi(color: Color) -> Option<AnsiColor> {
    let ansi = match color {
        Color::Black => AnsiColor::Black,
        Color::Red => AnsiColor::Red,
        Color::Green => AnsiColor::Green,
        Color::Yellow => AnsiColor::Yellow,
        Color::Blue => AnsiColor::Blue,
        Color::Magenta => AnsiColor::Magenta,
        Color::Cyan => AnsiColor::Cyan,
        Color::White => AnsiColor::White,
        Color::BrightBlack => AnsiColor::BrightBlack,
        Color::BrightRed => AnsiColor::BrightRed,
        Color::BrightGreen => AnsiColor::BrightGreen,
        Color::BrightYellow => AnsiColor::BrightYellow,
        Color::BrightBlue => AnsiColor::BrightBlue,
        Color::BrightMagenta => AnsiColor::BrightMagenta,
        Color::BrightCyan => AnsiColor::BrightCyan,
        Color::BrightWhite => AnsiColor::BrightWhite,
        _ => return None,
    };
    Some(ansi)
}

impl StyleRole {
    /// The role as a clap help style. Headers are bold.
    fn clap_style(self) -> Style {
        let style = match self.color().and_then(color_to_ansi) {
            Some(color) => Style::new().fg_color(Some(ClapColor::Ansi(color))),
            None => Style::new(),
        };
        if self == StyleRole::Header {
            style.bold()
        } else {
            style
        }
    }
}

/// Help output styles built from the same roles as the status report
pub fn palette_to_clap(enabled: bool) -> Styles {
    if !enabled {
        return Styles::plain();
    }
    Styles::styled()
        .header(StyleRole::Header.clap_style())
        .usage(StyleRole::Header.clap_style())
        .literal(StyleRole::Literal.clap_style())
        .placeholder(StyleRole::Placeholder.clap_style())
        .valid(StyleRole::Valid.clap_style())
        .invalid(StyleRole::Invalid.clap_style())
        .error(StyleRole::Error.clap_style())
}
