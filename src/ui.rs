use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use typespeed::{display::DisplayUpdate, quote::WordStatus, SessionResult};
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.session.display();

        match view.result {
            Some(result) => render_results(&view, &result, area, buf),
            None => render_typing(&view, self.input.value(), area, buf),
        }
    }
}

fn word_style(status: WordStatus, typo: bool) -> Style {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    match status {
        WordStatus::Neutral => bold_style.add_modifier(Modifier::DIM),
        WordStatus::Active => bold_style
            .add_modifier(Modifier::UNDERLINED)
            .bg(if typo { Color::Red } else { Color::DarkGray }),
        WordStatus::Correct => bold_style.fg(Color::Green),
        WordStatus::Incorrect => bold_style.fg(Color::Red),
    }
}

fn render_typing(view: &DisplayUpdate, input: &str, area: Rect, buf: &mut Buffer) {
    let dim_bold_style = Style::default()
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let quote_width: usize = view.words.iter().map(|w| w.text.width() + 1).sum();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let quote_lines = (quote_width as f64 / max_chars_per_line as f64).ceil().max(1.0) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),           // timer
            Constraint::Length(1),           // padding
            Constraint::Length(quote_lines), // quote
            Constraint::Length(1),           // padding
            Constraint::Length(3),           // input
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(view.timer_text.clone(), dim_bold_style))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let mut spans = Vec::with_capacity(view.words.len() * 2);
    for (idx, word) in view.words.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            word.text.clone(),
            word_style(word.status, view.active_typo),
        ));
    }

    Paragraph::new(Line::from(spans))
        .alignment(if quote_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    // keep the cursor end of a long line visible
    let inner_width = chunks[5].width.saturating_sub(2) as usize;
    let scroll = input.width().saturating_sub(inner_width) as u16;
    Paragraph::new(input.to_owned())
        .block(Block::default().borders(Borders::ALL).title("type here"))
        .scroll((0, scroll))
        .render(chunks[5], buf);

    Paragraph::new(Span::styled("(tab) reset / (esc)ape", italic_style))
        .alignment(Alignment::Center)
        .render(chunks[7], buf);
}

fn render_results(view: &DisplayUpdate, result: &SessionResult, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // timer
            Constraint::Min(0),
            Constraint::Length(7), // results panel
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        view.timer_text.clone(),
        bold_style.add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    let lines = vec![
        Line::from(Span::styled(format!("{} WPM", result.wpm), bold_style)),
        Line::from(format!("keystrokes: {}", result.keystrokes)),
        Line::from(format!("accuracy: {:.2}%", result.accuracy)),
        Line::from(vec![
            Span::raw("correct words: "),
            Span::styled(result.correct_words.to_string(), bold_style.fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::raw("wrong words: "),
            Span::styled(result.wrong_words.to_string(), bold_style.fg(Color::Red)),
        ]),
    ];

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("result"))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(r)eset / (tab) reset / (esc)ape",
        italic_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);
}
