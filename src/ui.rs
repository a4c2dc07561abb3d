use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    render::{render, CharState},
    session::Status,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

const LEGEND: &str = "(esc)clear (ctrl+r)next (f2)restart (ctrl+b)reset best (ctrl+c)quit";

pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds:.1}s")
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let board = &self.scoreboard;

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
        let flash_style = Style::default()
            .patch(bold_style)
            .fg(Color::Yellow)
            .add_modifier(Modifier::REVERSED);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let target_width = session.target().width();
        let prompt_occupied_lines = if target_width <= max_chars_per_line as usize {
            1
        } else {
            ((target_width as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),                     // status
                Constraint::Min(0),                        // padding
                Constraint::Length(prompt_occupied_lines), // sentence
                Constraint::Length(1),                     // padding
                Constraint::Length(3),                     // input box
                Constraint::Length(1),                     // readouts
                Constraint::Min(0),                        // padding
                Constraint::Length(1),                     // legend
            ])
            .split(area);

        let status_color = match session.status() {
            Status::Idle => Color::Gray,
            Status::Running => Color::Cyan,
            Status::Finished => Color::Green,
        };
        Paragraph::new(Line::from(vec![
            Span::styled("quickfox ", bold_style),
            Span::styled(
                session.status().to_string(),
                Style::default().fg(status_color).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let spans = render(session.target(), session.typed())
            .into_iter()
            .map(|glyph| match glyph.state {
                CharState::Correct => Span::styled(glyph.ch.to_string(), green_bold_style),
                CharState::Incorrect => Span::styled(
                    match glyph.ch {
                        ' ' => "·".to_owned(),
                        c => c.to_string(),
                    },
                    red_bold_style,
                ),
                CharState::Current => {
                    Span::styled(glyph.ch.to_string(), underlined_dim_bold_style)
                }
                CharState::Pending => Span::styled(glyph.ch.to_string(), dim_bold_style),
            })
            .collect::<Vec<Span>>();

        Paragraph::new(Line::from(spans))
            .alignment(if prompt_occupied_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        let input_title = match session.status() {
            Status::Finished => "done: (esc) retry / (ctrl+r) next",
            _ => "type here",
        };
        Paragraph::new(Span::raw(session.typed()))
            .block(Block::default().borders(Borders::ALL).title(input_title))
            .render(chunks[4], buf);

        let best_style = if board.is_flashing() {
            flash_style
        } else {
            bold_style
        };
        Paragraph::new(Line::from(vec![
            Span::styled(format!("time {}", format_seconds(board.seconds)), bold_style),
            Span::raw("   "),
            Span::styled(format!("wpm {}", board.wpm), bold_style),
            Span::raw("   "),
            Span::styled(format!("acc {}%", board.accuracy), bold_style),
            Span::raw("   "),
            Span::styled(format!("best {}", board.best), best_style),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

        Paragraph::new(Span::styled(LEGEND, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);
    }
}
