use digest_core::{AppViewModel, Block, Inline, ListMarker, Phase, RenderMode, SummaryDocument};
use ratatui::layout::{Alignment, Position};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{self, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::constants::*;
use super::layout::screen_layout;
use super::UiState;

pub fn draw(frame: &mut Frame, view: &AppViewModel, ui: &UiState) {
    let layout = screen_layout(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(APP_TITLE, TITLE_STYLE)))
            .alignment(Alignment::Center),
        layout.header,
    );

    let input_line = if view.url.is_empty() {
        Line::from(Span::styled(INPUT_PLACEHOLDER, MUTED_STYLE))
    } else {
        Line::raw(view.url.clone())
    };
    frame.render_widget(
        Paragraph::new(input_line)
            .block(widgets::Block::default().borders(Borders::ALL).title(" URL ")),
        layout.input,
    );
    let inner_width = layout.input.width.saturating_sub(2);
    let cursor_x = layout.input.x + 1 + (view.url.chars().count() as u16).min(inner_width);
    frame.set_cursor_position(Position::new(cursor_x, layout.input.y + 1));

    frame.render_widget(
        Paragraph::new(trigger_line(view)).alignment(Alignment::Center),
        layout.trigger,
    );

    match (&view.summary, &view.error_message) {
        (Some(_), _) => {
            let copy_label = if view.copy_acknowledged {
                Span::styled(COPY_DONE, CHECK_STYLE)
            } else {
                Span::styled(COPY_HINT, MUTED_STYLE)
            };
            let block = widgets::Block::default()
                .borders(Borders::ALL)
                .title(" Summary ")
                .title(Line::from(copy_label).right_aligned());
            frame.render_widget(
                Paragraph::new(Text::from(summary_lines(view)))
                    .wrap(Wrap { trim: false })
                    .scroll((ui.scroll, 0))
                    .block(block),
                layout.body,
            );
        }
        (None, Some(message)) => {
            let block = widgets::Block::default()
                .borders(Borders::ALL)
                .border_style(ERROR_STYLE)
                .title(Span::styled(" Error ", ERROR_STYLE));
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(message.clone(), ERROR_STYLE)))
                    .wrap(Wrap { trim: false })
                    .block(block),
                layout.body,
            );
        }
        (None, None) => {}
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(HELP_TEXT, MUTED_STYLE))),
        layout.help,
    );
}

fn trigger_line(view: &AppViewModel) -> Line<'static> {
    if view.phase == Phase::Pending {
        return Line::from(Span::styled(BUTTON_PENDING, PENDING_STYLE));
    }
    let style = if view.submit_enabled {
        BUTTON_STYLE
    } else {
        MUTED_STYLE
    };
    Line::from(Span::styled(BUTTON_SUMMARIZE, style))
}

/// Lines for the summary in the view's current render mode.
pub fn summary_lines(view: &AppViewModel) -> Vec<Line<'static>> {
    let Some(summary) = view.summary.as_deref() else {
        return Vec::new();
    };
    match view.render_mode {
        RenderMode::Plain => summary.lines().map(|line| Line::raw(line.to_owned())).collect(),
        RenderMode::Structured => structured_lines(&SummaryDocument::parse(summary)),
    }
}

pub fn structured_lines(doc: &SummaryDocument) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut previous: Option<&Block> = None;
    for block in &doc.blocks {
        let keeps_run = matches!(
            (previous, block),
            (Some(Block::ListItem { .. }), Block::ListItem { .. })
        );
        if previous.is_some() && !keeps_run {
            lines.push(Line::default());
        }
        lines.extend(block_lines(block));
        previous = Some(block);
    }
    lines
}

fn block_lines(block: &Block) -> Vec<Line<'static>> {
    match block {
        Block::Title(content) => inline_lines(Vec::new(), content, TITLE_STYLE),
        Block::Heading { content, .. } => inline_lines(Vec::new(), content, HEADING_STYLE),
        Block::ListItem {
            depth,
            marker,
            content,
        } => {
            let indent = Span::raw("  ".repeat(*depth));
            let marker = match marker {
                ListMarker::Check => Span::styled(CHECK_MARKER, CHECK_STYLE),
                ListMarker::Number(number) => Span::raw(format!("{number}. ")),
            };
            inline_lines(vec![indent, marker], content, Style::default())
        }
        Block::Insight(content) => inline_lines(
            vec![Span::styled(INSIGHT_BAR, INSIGHT_STYLE)],
            content,
            INSIGHT_STYLE,
        ),
        Block::Table { header, rows } => table_lines(header, rows),
        Block::CodeBlock(code) => code
            .lines()
            .map(|line| Line::from(Span::styled(format!("    {line}"), CODE_STYLE)))
            .collect(),
        Block::Paragraph(content) => inline_lines(Vec::new(), content, Style::default()),
        Block::Rule => vec![Line::from(Span::styled("─".repeat(RULE_WIDTH), MUTED_STYLE))],
    }
}

/// Lays out styled inlines after `prefix`, starting a new line at hard breaks.
fn inline_lines(prefix: Vec<Span<'static>>, content: &[Inline], base: Style) -> Vec<Line<'static>> {
    let indent: usize = prefix.iter().map(Span::width).sum();
    let mut lines = Vec::new();
    let mut spans = prefix;
    for inline in content {
        let style = inline_style(inline, base);
        for (index, piece) in inline.text.split('\n').enumerate() {
            if index > 0 {
                lines.push(Line::from(std::mem::take(&mut spans)));
                spans.push(Span::raw(" ".repeat(indent)));
            }
            if !piece.is_empty() {
                spans.push(Span::styled(piece.to_owned(), style));
            }
        }
    }
    lines.push(Line::from(spans));
    lines
}

fn inline_style(inline: &Inline, base: Style) -> Style {
    let mut style = base;
    if inline.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.code {
        style = style.patch(CODE_STYLE);
    }
    style
}

fn table_lines(header: &[Vec<Inline>], rows: &[Vec<Vec<Inline>>]) -> Vec<Line<'static>> {
    let cell_text = |cell: &Vec<Inline>| -> String { cell.iter().map(|i| i.text.as_str()).collect() };
    let header: Vec<String> = header.iter().map(cell_text).collect();
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(&header).chain(rows.iter()) {
        for (column, text) in row.iter().enumerate() {
            widths[column] = widths[column].max(Span::raw(text.as_str()).width());
        }
    }

    let format_row = |row: &[String], style: Style| -> Line<'static> {
        let mut spans = Vec::with_capacity(columns * 2);
        for (column, width) in widths.iter().enumerate() {
            if column > 0 {
                spans.push(Span::styled(" │ ", MUTED_STYLE));
            }
            let text = row.get(column).map(String::as_str).unwrap_or("");
            let padding = width.saturating_sub(Span::raw(text).width());
            spans.push(Span::styled(format!("{text}{}", " ".repeat(padding)), style));
        }
        Line::from(spans)
    };

    let mut lines = vec![format_row(&header, Style::default().add_modifier(Modifier::BOLD))];
    let separator = widths
        .iter()
        .map(|width| "─".repeat(*width))
        .collect::<Vec<_>>()
        .join("─┼─");
    lines.push(Line::from(Span::styled(separator, MUTED_STYLE)));
    lines.extend(rows.iter().map(|row| format_row(row, Style::default())));
    lines
}

/// Flattens rendered lines to text, for output that is not a terminal UI.
pub fn lines_to_string(lines: &[Line<'_>]) -> String {
    let mut out = String::new();
    for line in lines {
        for span in &line.spans {
            out.push_str(&span.content);
        }
        out.push('\n');
    }
    out
}
