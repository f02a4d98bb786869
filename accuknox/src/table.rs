//! Column aligned tables with status coloring.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use crossterm::style::{style, Color, Stylize};

use crate::styles::visible_width;

pub const DEFAULT_PADDING: usize = 2;

pub const NO_DATA: &str = "No Data";

/// Decorates a cell, or the whole header line.
pub type Formatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Printable width of a cell.
pub type WidthFn = fn(&str) -> usize;

fn color_formatter(color: Color) -> Formatter {
    Arc::new(move |s: &str| style(s).with(color).to_string())
}

/// Rendering options of a [Table].
#[derive(Clone)]
pub struct TableConfig {
    pub padding: usize,
    pub header: Option<Formatter>,
    pub allow: Option<Formatter>,
    pub deny: Option<Formatter>,
    pub audit: Option<Formatter>,
    pub width: WidthFn,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            header: None,
            allow: Some(color_formatter(Color::Green)),
            deny: Some(color_formatter(Color::Red)),
            audit: Some(color_formatter(Color::Yellow)),
            width: visible_width,
        }
    }
}

impl TableConfig {
    /// No formatter at all, for pipes and tests.
    pub fn plain() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            header: None,
            allow: None,
            deny: None,
            audit: None,
            width: visible_width,
        }
    }
}

impl fmt::Debug for TableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableConfig")
            .field("padding", &self.padding)
            .field("header", &self.header.is_some())
            .field("allow", &self.allow.is_some())
            .field("deny", &self.deny.is_some())
            .field("audit", &self.audit.is_some())
            .finish()
    }
}

/// Buffers rows and prints them aligned on the widest cell of each column.
#[derive(Debug)]
pub struct Table<W> {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
    config: TableConfig,
    out: W,
}

impl Table<io::Stdout> {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            widths: Vec::new(),
            config: TableConfig::default(),
            out: io::stdout(),
        }
    }
}

impl<W: Write> Table<W> {
    pub fn with_writer<V: Write>(self, out: V) -> Table<V> {
        Table {
            header: self.header,
            rows: self.rows,
            widths: self.widths,
            config: self.config,
            out,
        }
    }

    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    pub fn padding(mut self, padding: usize) -> Self {
        self.config.padding = padding;
        self
    }

    pub fn header_formatter(mut self, f: Formatter) -> Self {
        self.config.header = Some(f);
        self
    }

    pub fn allow_formatter(mut self, f: Formatter) -> Self {
        self.config.allow = Some(f);
        self
    }

    pub fn deny_formatter(mut self, f: Formatter) -> Self {
        self.config.deny = Some(f);
        self
    }

    pub fn audit_formatter(mut self, f: Formatter) -> Self {
        self.config.audit = Some(f);
        self
    }

    pub fn width_fn(mut self, width: WidthFn) -> Self {
        self.config.width = width;
        self
    }

    /// Appends a row, truncated or padded with empty cells to the header length.
    pub fn add_row<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let len = self.header.len();
        let mut row: Vec<String> = values.into_iter().take(len).map(Into::into).collect();
        row.resize(len, String::new());
        self.rows.push(row);
        self
    }

    /// Replaces all rows, dropping the cells past the header length.
    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) -> &mut Self {
        let len = self.header.len();
        self.rows = rows
            .into_iter()
            .map(|mut row| {
                row.truncate(len);
                row
            })
            .collect();
        self
    }

    #[inline]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    #[inline]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Column widths of the last print, padding included.
    #[inline]
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn compute_widths(&mut self) {
        let width = self.config.width;
        let padding = self.config.padding;

        self.widths = self
            .header
            .iter()
            .enumerate()
            .map(|(i, head)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| width(cell))
                    .fold(width(head), usize::max)
                    + padding
            })
            .collect();
    }

    fn status_formatter(&self, cell: &str) -> Option<&Formatter> {
        match cell {
            "ALLOW" => self.config.allow.as_ref(),
            "DENY" | "BLOCK" => self.config.deny.as_ref(),
            "AUDIT" => self.config.audit.as_ref(),
            _ => None,
        }
    }

    fn pad(&self, cell: &str, column: usize) -> String {
        let fill = self.widths[column].saturating_sub((self.config.width)(cell));
        format!("{cell}{:fill$}", "")
    }

    /// Prints the header then every row, or a `No Data` line when there is no row.
    pub fn print(&mut self) -> io::Result<()> {
        if self.rows.is_empty() {
            return writeln!(self.out, "{NO_DATA}");
        }

        self.compute_widths();

        let mut line = String::new();
        for (i, head) in self.header.iter().enumerate() {
            line.push_str(&self.pad(head, i));
        }
        if let Some(f) = &self.config.header {
            line = f(&line);
        }
        writeln!(self.out, "{line}")?;

        for row in &self.rows {
            let mut line = String::new();
            for i in 0..self.header.len() {
                let cell = row.get(i).map_or("", String::as_str);
                let cell = match self.status_formatter(cell) {
                    Some(f) => f(cell),
                    None => cell.to_string(),
                };
                line.push_str(&self.pad(&cell, i));
            }
            writeln!(self.out, "{line}")?;
        }

        self.out.flush()
    }
}
