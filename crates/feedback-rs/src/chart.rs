//! Rating chart drawn with ratatui into an off-screen buffer.
//!
//! The console menu is line based, so the chart is rendered once into a
//! `Buffer` and dumped as plain text instead of taking over the terminal.

use crate::render::percent;
use feedback_rs_store::RatingStats;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Widget};
use std::collections::BTreeMap;

const CHART_HEIGHT: u16 = 14;
const BAR_WIDTH: u16 = 5;
const BAR_GAP: u16 = 2;
/// Borders plus left padding.
const CHART_MARGIN: u16 = 4;

/// Bar chart of ratings as text, one line per buffer row.
pub fn rating_chart(distribution: &BTreeMap<u8, usize>) -> String {
    let bars: Vec<Bar<'_>> = distribution
        .iter()
        .map(|(rating, count)| {
            Bar::default()
                .label(Line::from(rating.to_string()))
                .value(*count as u64)
        })
        .collect();

    let buckets = u16::try_from(distribution.len()).unwrap_or(u16::MAX);
    let width = buckets
        .saturating_mul(BAR_WIDTH + BAR_GAP)
        .saturating_add(CHART_MARGIN)
        .max(30);
    let area = Rect::new(0, 0, width, CHART_HEIGHT);
    let mut buffer = Buffer::empty(area);
    BarChart::default()
        .block(Block::bordered().title("Rating Distribution"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .render(area, &mut buffer);
    buffer_to_text(&buffer)
}

fn buffer_to_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        let row: String = (area.left()..area.right())
            .map(|x| buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()))
            .collect();
        text.push_str(row.trim_end());
        text.push('\n');
    }
    text
}

/// Share of each rating, the slices of a pie chart.
pub fn rating_legend(distribution: &BTreeMap<u8, usize>) -> String {
    let total: usize = distribution.values().sum();
    distribution
        .iter()
        .map(|(rating, count)| {
            format!(
                "  Rating {rating}: {count} ({:.1}%)\n",
                percent(*count, total)
            )
        })
        .collect()
}

/// Average, extremes, and count of ratings.
pub fn rating_statistics(stats: &RatingStats) -> String {
    format!(
        "Average Rating: {:.2}\nHighest Rating: {}\nLowest Rating: {}\nTotal Ratings: {}\n",
        stats.average, stats.highest, stats.lowest, stats.total
    )
}
