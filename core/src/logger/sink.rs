use std::io::{self, Write};

use crossterm::style::{Color, Stylize};

/// Colour roles for group titles and annotation lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Muted,
    Header,
    Character,
    User,
    World,
    OtherCharacters,
    Plugins,
    ChatLog,
}

impl Tone {
    fn color(self) -> Option<Color> {
        let rgb = |r, g, b| Some(Color::Rgb { r, g, b });
        match self {
            Tone::Plain => None,
            Tone::Muted => rgb(0x99, 0x99, 0x99),
            Tone::Header => rgb(0x4c, 0xaf, 0x50),
            Tone::Character => rgb(0x21, 0x96, 0xf3),
            Tone::User => rgb(0xff, 0x98, 0x00),
            Tone::World => rgb(0x9c, 0x27, 0xb0),
            Tone::OtherCharacters => rgb(0xe9, 0x1e, 0x63),
            Tone::Plugins => rgb(0x00, 0xbc, 0xd4),
            Tone::ChatLog => rgb(0x79, 0x55, 0x48),
        }
    }
}

/// Grouped console output, like a browser devtools console.
pub trait ConsoleSink {
    fn group(&mut self, title: &str, tone: Tone) -> io::Result<()>;
    fn group_end(&mut self) -> io::Result<()>;
    fn line(&mut self, text: &str, tone: Tone) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes groups as indented blocks to any `io::Write`.
pub struct WriterSink<W: Write> {
    writer: W,
    depth: usize,
    indent: usize,
    ansi: bool,
}

impl WriterSink<io::Stdout> {
    pub fn stdout(ansi: bool, indent: usize) -> Self {
        Self::new(io::stdout(), ansi, indent)
    }
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, ansi: bool, indent: usize) -> Self {
        Self {
            writer,
            depth: 0,
            indent,
            ansi,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&self, text: &str, tone: Tone, bold: bool) -> String {
        if !self.ansi {
            return text.to_string();
        }
        let mut styled = text.stylize();
        if let Some(color) = tone.color() {
            styled = styled.with(color);
        }
        if bold {
            styled = styled.bold();
        }
        styled.to_string()
    }

    fn write_indented(&mut self, text: &str, tone: Tone, bold: bool) -> io::Result<()> {
        let pad = " ".repeat(self.depth * self.indent);
        for line in text.lines() {
            let painted = self.paint(line, tone, bold);
            writeln!(self.writer, "{pad}{painted}")?;
        }
        if text.is_empty() {
            writeln!(self.writer, "{pad}")?;
        }
        Ok(())
    }
}

impl<W: Write> ConsoleSink for WriterSink<W> {
    fn group(&mut self, title: &str, tone: Tone) -> io::Result<()> {
        self.write_indented(title, tone, true)?;
        self.depth += 1;
        Ok(())
    }

    fn group_end(&mut self) -> io::Result<()> {
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    fn line(&mut self, text: &str, tone: Tone) -> io::Result<()> {
        self.write_indented(text, tone, false)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
