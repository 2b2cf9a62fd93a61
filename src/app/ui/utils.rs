use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// notice_area returns the top-right corner of `area`, `percent_width` wide.
pub fn notice_area(area: Rect, percent_width: u16) -> Rect {
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_width)]).flex(Flex::End);
    let [area] = horizontal.areas(area);
    area
}
