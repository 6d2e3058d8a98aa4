//! Structured reading of summary text.
//!
//! Summaries arrive as lightweight markdown: a bold headline, a few bullet
//! points, an italic insight, sometimes a table. [`SummaryDocument::parse`]
//! turns that into presentational blocks. The raw text is never modified; the
//! document is derived from it on demand.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inline {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

impl Inline {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            italic: true,
            ..Self::default()
        }
    }

    fn same_style(&self, other: &Inline) -> bool {
        self.bold == other.bold && self.italic == other.italic && self.code == other.code
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// Unordered entry, shown as a checklist item.
    Check,
    /// Ordered entry with its number.
    Number(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A paragraph made only of bold text, or a level-1 heading.
    Title(Vec<Inline>),
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    ListItem {
        depth: usize,
        marker: ListMarker,
        content: Vec<Inline>,
    },
    /// A paragraph made only of emphasized text, or a block quote.
    Insight(Vec<Inline>),
    Table {
        header: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    CodeBlock(String),
    Paragraph(Vec<Inline>),
    Rule,
}

pub(crate) fn join_inlines(inlines: &[Inline]) -> String {
    inlines.iter().map(|inline| inline.text.as_str()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryDocument {
    pub blocks: Vec<Block>,
}

impl SummaryDocument {
    pub fn parse(text: &str) -> Self {
        let mut builder = Builder::default();
        for event in Parser::new_ext(text, Options::ENABLE_TABLES) {
            builder.handle(event);
        }
        builder.finish()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn title(&self) -> Option<String> {
        self.blocks.iter().find_map(|block| match block {
            Block::Title(content) => Some(join_inlines(content)),
            _ => None,
        })
    }
}

#[derive(Default)]
struct TableBuilder {
    header: Vec<Vec<Inline>>,
    rows: Vec<Vec<Vec<Inline>>>,
    row: Vec<Vec<Inline>>,
}

#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    inlines: Vec<Inline>,
    strong: usize,
    emphasis: usize,
    heading: Option<u8>,
    quote_depth: usize,
    /// Open lists; ordered lists carry the next number to hand out.
    lists: Vec<Option<u64>>,
    items: Vec<ListMarker>,
    code_block: Option<String>,
    table: Option<TableBuilder>,
}

impl Builder {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => match self.code_block.as_mut() {
                Some(code) => code.push_str(&text),
                None => self.push_text(&text, false),
            },
            Event::Code(text) => self.push_text(&text, true),
            Event::Html(text) | Event::InlineHtml(text) => self.push_text(&text, false),
            Event::SoftBreak => self.push_text(" ", false),
            Event::HardBreak => self.push_text("\n", false),
            Event::Rule => {
                self.flush_paragraph();
                self.blocks.push(Block::Rule);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => self.heading = Some(heading_level(level)),
            Tag::BlockQuote { .. } => {
                self.flush_open_item();
                self.quote_depth += 1;
            }
            Tag::List(start) => {
                self.flush_open_item();
                self.lists.push(start);
            }
            Tag::Item => {
                let marker = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let number = *next;
                        *next += 1;
                        ListMarker::Number(number)
                    }
                    _ => ListMarker::Check,
                };
                self.items.push(marker);
            }
            Tag::CodeBlock(_) => {
                self.flush_open_item();
                self.code_block = Some(String::new());
            }
            Tag::Table(_) => {
                self.flush_open_item();
                self.table = Some(TableBuilder::default());
            }
            Tag::Strong => self.strong += 1,
            Tag::Emphasis => self.emphasis += 1,
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.items.is_empty() {
                    self.flush_paragraph();
                } else if !self.inlines.is_empty() {
                    // Loose list items hold several paragraphs.
                    self.push_text(" ", false);
                }
            }
            TagEnd::Heading { .. } => {
                let level = self.heading.take().unwrap_or(1);
                let content = self.take_inlines();
                if !content.is_empty() {
                    self.blocks.push(if level == 1 {
                        Block::Title(content)
                    } else {
                        Block::Heading { level, content }
                    });
                }
            }
            TagEnd::BlockQuote { .. } => self.quote_depth = self.quote_depth.saturating_sub(1),
            TagEnd::HtmlBlock => {
                if self.items.is_empty() {
                    self.flush_paragraph();
                } else {
                    self.flush_item();
                }
            }
            TagEnd::List { .. } => {
                self.lists.pop();
            }
            TagEnd::Item => {
                self.flush_item();
                self.items.pop();
            }
            TagEnd::CodeBlock => {
                if let Some(code) = self.code_block.take() {
                    self.blocks
                        .push(Block::CodeBlock(code.trim_end_matches('\n').to_owned()));
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.header = std::mem::take(&mut table.row);
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::TableCell => {
                let cell = self.take_inlines();
                if let Some(table) = self.table.as_mut() {
                    table.row.push(cell);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.blocks.push(Block::Table {
                        header: table.header,
                        rows: table.rows,
                    });
                }
            }
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str, code: bool) {
        let inline = Inline {
            text: text.to_owned(),
            bold: self.strong > 0,
            italic: self.emphasis > 0,
            code,
        };
        match self.inlines.last_mut() {
            Some(last) if last.same_style(&inline) => last.text.push_str(text),
            _ => self.inlines.push(inline),
        }
    }

    fn take_inlines(&mut self) -> Vec<Inline> {
        let mut inlines = std::mem::take(&mut self.inlines);
        if let Some(last) = inlines.last_mut() {
            let trimmed = last.text.trim_end().len();
            last.text.truncate(trimmed);
        }
        inlines.retain(|inline| !inline.text.is_empty());
        inlines
    }

    fn flush_paragraph(&mut self) {
        let content = self.take_inlines();
        if content.is_empty() {
            return;
        }
        // Bold wins over italic, so a bold-italic line is still a headline.
        let block = if self.quote_depth > 0 {
            Block::Insight(content)
        } else if all_visible(&content, |inline| inline.bold) {
            Block::Title(content)
        } else if all_visible(&content, |inline| inline.italic) {
            Block::Insight(content)
        } else {
            Block::Paragraph(content)
        };
        self.blocks.push(block);
    }

    /// Text of an enclosing item precedes any block nested inside it.
    fn flush_open_item(&mut self) {
        if !self.items.is_empty() {
            self.flush_item();
        }
    }

    /// Quoted list items stay list items; the quote only styles paragraphs.
    fn flush_item(&mut self) {
        let content = self.take_inlines();
        if content.is_empty() {
            return;
        }
        let marker = self.items.last().copied().unwrap_or(ListMarker::Check);
        self.blocks.push(Block::ListItem {
            depth: self.lists.len().saturating_sub(1),
            marker,
            content,
        });
    }

    fn finish(mut self) -> SummaryDocument {
        self.flush_paragraph();
        SummaryDocument {
            blocks: self.blocks,
        }
    }
}

fn all_visible(content: &[Inline], predicate: impl Fn(&Inline) -> bool) -> bool {
    let mut visible = content
        .iter()
        .filter(|inline| !inline.text.trim().is_empty())
        .peekable();
    visible.peek().is_some() && visible.all(predicate)
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
