use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Spans,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Rect of the given percentage size centered inside `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn render_delete_confirmation<B: Backend>(frame: &mut Frame<B>, size: Rect, question: &str, detail: &str) {
    let popup_area = centered_rect(50, 20, size);

    let popup = Paragraph::new(vec![
        Spans::from(""),
        Spans::from(question.to_string()),
        Spans::from(""),
        Spans::from(detail.to_string()),
        Spans::from(""),
        Spans::from("<Y> Yes  <N> No"),
    ])
    .block(Block::default().title("Confirm Delete").borders(Borders::ALL))
    .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

pub fn render_error<B: Backend>(frame: &mut Frame<B>, size: Rect, error: &str) {
    let popup_area = centered_rect(60, 20, size);

    let error_msg = Paragraph::new(vec![
        Spans::from(""),
        Spans::from(error.to_string()),
        Spans::from(""),
        Spans::from("Press any key to continue"),
    ])
    .block(Block::default().title("Error").borders(Borders::ALL))
    .style(Style::default().fg(Color::Red));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(error_msg, popup_area);
}
