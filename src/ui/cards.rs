use crate::app::App;
use crate::board::{ActionStatus, Item};
use crate::task::TaskRunner;
use crate::util::{display_width, truncate_to_width};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one card: border, title, description, tags, created label, border.
pub(super) const CARD_HEIGHT: u16 = 6;

/// Braille spinner shown next to the title of a pending card.
pub(super) const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render the card list, scrolled so the selected card is visible.
pub fn render<R: TaskRunner>(f: &mut Frame, app: &App<R>, area: Rect) {
    let items = app.items();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Cards ({}) ", items.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if items.is_empty() {
        let empty = Paragraph::new("No cards. Press [a] to add one.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, inner);
        return;
    }
    if inner.height < CARD_HEIGHT || inner.width < 10 {
        return;
    }

    let visible = (inner.height / CARD_HEIGHT) as usize;
    let first = first_visible(app.selected, visible, items.len());

    for (slot, (index, item)) in items
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .enumerate()
    {
        let card_area = Rect {
            x: inner.x,
            y: inner.y + slot as u16 * CARD_HEIGHT,
            width: inner.width,
            height: CARD_HEIGHT,
        };
        render_card(
            f,
            item,
            app.status_of(item),
            index == app.selected,
            app.spinner_frame,
            card_area,
        );
    }
}

/// First card index to draw so that `selected` is inside a window of
/// `visible` cards.
fn first_visible(selected: usize, visible: usize, len: usize) -> usize {
    if visible == 0 || selected < visible {
        return 0;
    }
    (selected + 1 - visible).min(len.saturating_sub(visible))
}

fn render_card(
    f: &mut Frame,
    item: &Item,
    status: ActionStatus,
    selected: bool,
    spinner_frame: usize,
    area: Rect,
) {
    let text_width = area.width.saturating_sub(2) as usize;

    let border_style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut title_spans = Vec::with_capacity(3);
    let spinner_width = if status == ActionStatus::Pending { 2 } else { 0 };
    title_spans.push(Span::styled(
        truncate_to_width(&item.title, text_width.saturating_sub(spinner_width)).into_owned(),
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    ));
    if status == ActionStatus::Pending {
        title_spans.push(Span::raw(" "));
        title_spans.push(Span::styled(
            SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()],
            Style::default().fg(Color::Cyan),
        ));
    }

    let tag_style = Style::default().fg(Color::Cyan).bg(Color::Rgb(0x1f, 0x33, 0x33));
    let mut tag_spans = Vec::with_capacity(item.tags.len() * 2);
    let mut used = 0;
    for tag in &item.tags {
        let label = format!(" {} ", tag);
        let width = display_width(&label) + 1;
        if used + width > text_width {
            break;
        }
        used += width;
        tag_spans.push(Span::styled(label, tag_style));
        tag_spans.push(Span::raw(" "));
    }

    let lines = vec![
        Line::from(title_spans),
        Line::from(Span::styled(
            truncate_to_width(&item.description, text_width).into_owned(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(tag_spans),
        Line::from(Span::styled(
            item.created_label.clone(),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Right),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    f.render_widget(card, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visible_keeps_top_when_selection_fits() {
        assert_eq!(first_visible(0, 3, 10), 0);
        assert_eq!(first_visible(2, 3, 10), 0);
    }

    #[test]
    fn test_first_visible_scrolls_with_selection() {
        assert_eq!(first_visible(3, 3, 10), 1);
        assert_eq!(first_visible(9, 3, 10), 7);
    }

    #[test]
    fn test_first_visible_handles_tiny_window() {
        assert_eq!(first_visible(5, 0, 10), 0);
        assert_eq!(first_visible(5, 1, 10), 5);
    }
}
