pub mod shell;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget, Wrap},
};
use itertools::Itertools;
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    catalog::Difficulty,
    session::{CharStatus, Phase},
};

const TITLE: &str = "Welcome to the Typer Zone";
const NOTE: &str = "Your accuracy and typing speed will be displayed at the end of the test.";
const PLACEHOLDER: &str = "Start typing...";
const HORIZONTAL_PADDING: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let typing = &self.typing;
        let session = typing.session();
        let completed = typing.phase() == Phase::Completed;

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let text_width = shell::panel_width(area)
            .saturating_sub(2 + 2 * HORIZONTAL_PADDING)
            .max(1);

        let note_text = format!("Note: {NOTE}");
        let selector_text = format!("Difficulty Level: {}", Difficulty::ALL.iter().join(" "));
        let status_texts = if completed {
            vec![
                format!("Typing speed: {} wpm", typing.speed_wpm()),
                format!("Accuracy: {}%", session.accuracy_percent),
            ]
        } else {
            vec![format!(
                "Time remaining: {} seconds",
                session.remaining_seconds
            )]
        };
        let legend_text = if completed {
            "(enter/r) restart test / (tab) difficulty / (esc)ape"
        } else {
            "(tab) difficulty / (esc)ape"
        };

        let spans = typing
            .classify()
            .into_iter()
            .map(|(c, status)| match status {
                CharStatus::Correct => Span::styled(c.to_string(), green_bold_style),
                // keep a wrong space visible
                CharStatus::Incorrect if c == ' ' => Span::styled("·", red_bold_style),
                CharStatus::Incorrect => Span::styled(c.to_string(), red_bold_style),
                CharStatus::Next => Span::styled(c.to_string(), underlined_dim_bold_style),
                CharStatus::Untyped => Span::styled(c.to_string(), dim_bold_style),
            })
            .collect::<Vec<Span>>();

        let sentence_text = spans.iter().map(|span| &*span.content).collect::<String>();

        let title_lines = wrapped_height(TITLE, text_width);
        let note_lines = wrapped_height(&note_text, text_width);
        let selector_lines = wrapped_height(&selector_text, text_width);
        let sentence_lines = wrapped_height(&sentence_text, text_width);
        let status_lines = status_texts
            .iter()
            .map(|t| wrapped_height(t, text_width))
            .sum::<u16>();
        let legend_lines = wrapped_height(legend_text, text_width);

        let rows = [
            Constraint::Length(title_lines),
            Constraint::Length(note_lines),
            Constraint::Length(1),
            Constraint::Length(selector_lines),
            Constraint::Length(1),
            Constraint::Length(sentence_lines),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(status_lines),
            Constraint::Length(1),
            Constraint::Length(legend_lines),
        ];
        let content_height = title_lines
            + note_lines
            + selector_lines
            + sentence_lines
            + status_lines
            + legend_lines
            // four spacer rows and the three-row input box
            + 7;

        // two rows for the panel border
        let panel_area = shell::render_shell(area, buf, content_height + 2);
        let panel = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(HORIZONTAL_PADDING));
        let inner = panel.inner(panel_area);
        panel.render(panel_area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let [title, note, _, selector, _, sentence, _, input, status, _, legend] =
            Layout::vertical(rows).areas(inner);

        Paragraph::new(Span::styled(TITLE, bold_style.fg(Color::Cyan)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(title, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("Note: ", bold_style),
            Span::styled(NOTE, italic_style),
        ]))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(note, buf);

        let mut selector_spans = vec![Span::raw("Difficulty Level:")];
        for difficulty in Difficulty::ALL {
            selector_spans.push(Span::raw(" "));
            let label = difficulty.to_string();
            selector_spans.push(if difficulty == typing.difficulty() {
                Span::styled(label, bold_style.add_modifier(Modifier::REVERSED))
            } else {
                Span::styled(label, dim_bold_style)
            });
        }
        Paragraph::new(Line::from(selector_spans))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(selector, buf);

        Paragraph::new(Line::from(spans))
            .alignment(if sentence_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false })
            .render(sentence, buf);

        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(if completed { dim_bold_style } else { bold_style });
        let input_line = if session.typed_input.is_empty() && !completed {
            Line::from(Span::styled(PLACEHOLDER, dim_bold_style.add_modifier(Modifier::ITALIC)))
        } else if completed {
            Line::from(Span::styled(session.typed_input.as_str(), dim_bold_style))
        } else {
            Line::from(vec![
                Span::raw(session.typed_input.as_str()),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ])
        };
        Paragraph::new(input_line)
            .block(input_block)
            .render(input, buf);

        let status_style = if completed { bold_style } else { dim_bold_style };
        let status_text = status_texts
            .into_iter()
            .map(|t| Line::from(Span::styled(t, status_style)))
            .collect::<Vec<Line>>();
        Paragraph::new(status_text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(status, buf);

        Paragraph::new(Span::styled(legend_text, italic_style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(legend, buf);
    }
}

/// Rows a greedy word wrap needs to show `text` in `width` columns.
/// Words wider than a row are split across rows.
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut lines = 1;
    let mut current = 0;

    for word in text.split_whitespace() {
        let w = word.width();
        if current > 0 && current + 1 + w <= width {
            current += 1 + w;
            continue;
        }
        if current > 0 {
            lines += 1;
        }
        current = w;
        while current > width {
            lines += 1;
            current -= width;
        }
    }

    lines
}
