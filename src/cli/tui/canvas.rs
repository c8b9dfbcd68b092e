//! Draws a resolved badge into a terminal buffer
//!
//! Percentages from the position style are mapped onto cells: the inset is
//! a share of the wrapped box, the translate a share of the marker box.

use std::str::FromStr;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::domain::{Horizontal, Overlap, PositionStyle, ResolvedBadge, Vertical};

/// Glyph drawn for the dot variant
const DOT: &str = "●";

/// What to draw and how big the wrapped box is
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub badge: &'a ResolvedBadge,
    pub overlap: Overlap,
    pub child: &'a str,
    pub child_width: u16,
    pub child_height: u16,
}

/// Centers a `width` x `height` box inside `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Width of `text` in cells, saturating at `u16::MAX`
pub fn cell_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

/// Places a `width` x `height` marker on `child`, clipped to `area`
pub fn marker_rect(
    area: Rect,
    child: Rect,
    position: &PositionStyle,
    width: u16,
    height: u16,
) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let inset = position.inset / 100.0;
    let (mw, mh) = (f32::from(width), f32::from(height));

    let left = match position.horizontal {
        Horizontal::Left => f32::from(child.left()) + inset * f32::from(child.width),
        Horizontal::Right => f32::from(child.right()) - inset * f32::from(child.width) - mw,
    };
    let top = match position.vertical {
        Vertical::Top => f32::from(child.top()) + inset * f32::from(child.height),
        Vertical::Bottom => f32::from(child.bottom()) - inset * f32::from(child.height) - mh,
    };

    let x = (left + position.translate_x / 100.0 * mw).round();
    let y = (top + position.translate_y / 100.0 * mh).round();

    let x = x.clamp(f32::from(area.left()), f32::from(area.right())) as u16;
    let y = y.clamp(f32::from(area.top()), f32::from(area.bottom())) as u16;

    Rect::new(x, y, width, height).intersection(area)
}

/// Marker label and size in cells
pub fn marker_label(badge: &ResolvedBadge) -> (String, u16) {
    match &badge.content.display {
        Some(text) => (format!(" {} ", text), cell_width(text).saturating_add(2)),
        None => (DOT.to_string(), 1),
    }
}

/// Parses a CSS color, expanding the `#rgb` shorthand
fn css_color(value: &str) -> Option<Color> {
    let value = value.trim();
    match value.strip_prefix('#') {
        Some(hex) if hex.len() == 3 => {
            let long: String = hex.chars().flat_map(|c| [c, c]).collect();
            Color::from_str(&format!("#{}", long)).ok()
        }
        _ => Color::from_str(value).ok(),
    }
}

/// Background and foreground from the marker's resolved style
fn marker_style(badge: &ResolvedBadge) -> Style {
    let css = badge.slots.badge.props.style();
    let lookup = |key: &str| {
        css.and_then(|style| style.get(key))
            .and_then(|v| v.as_str())
            .and_then(css_color)
    };

    let mut style = Style::default().add_modifier(Modifier::BOLD);
    style = style.bg(lookup("background-color").unwrap_or(Color::Gray));
    if let Some(fg) = lookup("color") {
        style = style.fg(fg);
    }
    style
}

/// Draws the wrapped box and, when visible, the marker
pub fn draw(buf: &mut Buffer, area: Rect, scene: &Scene<'_>) {
    let child = centered(area, scene.child_width, scene.child_height);
    let border = match scene.overlap {
        Overlap::Rectangular => BorderType::Plain,
        Overlap::Circular => BorderType::Rounded,
    };

    Paragraph::new(scene.child)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(border))
        .render(child, buf);

    if scene.badge.content.invisible {
        return;
    }

    let (label, width) = marker_label(scene.badge);
    let rect = marker_rect(area, child, &scene.badge.position, width, 1);
    if rect.is_empty() {
        return;
    }

    Paragraph::new(label)
        .style(marker_style(scene.badge))
        .render(rect, buf);
}

/// Renders the scene off-screen and returns its rows
pub fn to_lines(scene: &Scene<'_>, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    draw(&mut buf, area, scene);

    (0..height)
        .map(|y| {
            let row: String = (0..width).map(|x| buf[(x, y)].symbol()).collect();
            row.trim_end().to_string()
        })
        .collect()
}
