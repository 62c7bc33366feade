use ratatui::{prelude::*, widgets::Paragraph};

use crate::model::status_bar::StatusBar;

pub struct StatusBarWidget<'a> {
    status_bar: &'a StatusBar,
    hint: &'a str,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(status_bar: &'a StatusBar, hint: &'a str) -> Self {
        Self { status_bar, hint }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Min(0),
                Constraint::Length(1), // Hint line
                Constraint::Length(1), // Status message line
            ],
        )
        .split(area);

        let hint_span = Span::styled(self.hint, Style::default().fg(Color::Gray).italic());
        Paragraph::new(hint_span)
            .style(Style::default().bg(Color::Black))
            .render(layout[1], buf);

        let message = self.status_bar.message().clone().unwrap_or_default();
        Paragraph::new(message).render(layout[2], buf);
    }
}
