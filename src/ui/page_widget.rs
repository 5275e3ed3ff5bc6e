//! Custom Ratatui widget that paints the part of the page currently in the
//! viewport.
//!
//! The widget is a consumer of the presentation contract: it reads the
//! classes and inline styles the behaviors write (`scrolled`, `is-visible`,
//! `transition-delay`, the active link color) and never mutates the page.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, BorderType, Widget},
};

use pagefx::behavior::reveal::{parse_delay, DELAY_PROPERTY, REVEAL_GROUPS};
use pagefx::behavior::{ACTIVE_LINK_COLOR, SCROLLED_CLASS, VISIBLE_CLASS};
use pagefx::core::page::wrap_text;
use pagefx::{Document, Element, ElementId, Page};

use super::layout::clip_to_cells;
use super::theme::Theme;

/// Length of the fade after an element's stagger delay.
const FADE: Duration = Duration::from_millis(300);

/// How far along its reveal transition an element is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reveal {
    Hidden,
    Fading,
    Shown,
}

/// The page widget itself (created fresh each frame).
pub struct PageWidget<'a> {
    page: &'a Page,
    revealed_at: &'a HashMap<ElementId, Instant>,
    focused: Option<ElementId>,
    now: Instant,
}

impl<'a> PageWidget<'a> {
    pub fn new(page: &'a Page, revealed_at: &'a HashMap<ElementId, Instant>) -> Self {
        Self {
            page,
            revealed_at,
            focused: None,
            now: Instant::now(),
        }
    }

    pub fn focused(mut self, focused: Option<ElementId>) -> Self {
        self.focused = focused;
        self
    }

    fn reveal_progress(&self, id: ElementId, el: &Element) -> Reveal {
        if !el.has_class(VISIBLE_CLASS) {
            return Reveal::Hidden;
        }
        let Some(at) = self.revealed_at.get(&id) else {
            return Reveal::Shown;
        };
        let delay = el
            .style(DELAY_PROPERTY)
            .and_then(parse_delay)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .unwrap_or_default();
        let elapsed = self.now.saturating_duration_since(*at);
        if elapsed < delay {
            Reveal::Hidden
        } else if elapsed < delay + FADE {
            Reveal::Fading
        } else {
            Reveal::Shown
        }
    }

    /// Reveal state of the closest animated ancestor (self included).
    fn inherited_reveal(&self, doc: &Document, id: ElementId) -> Reveal {
        match doc.closest(id, is_animated) {
            Some(card) => self.reveal_progress(card, doc.get(card)),
            None => Reveal::Shown,
        }
    }

    fn render_flow(&self, area: Rect, buf: &mut Buffer) {
        let doc = self.page.document();
        let scroll_y = self.page.viewport().scroll_y();

        for id in doc.document_order() {
            let el = doc.get(id);
            if id == doc.body() || el.tag == "section" || el.tag == "header" {
                continue;
            }
            if doc.closest(id, |e| e.fixed).is_some() {
                continue;
            }
            let reveal = self.inherited_reveal(doc, id);
            if reveal == Reveal::Hidden {
                continue;
            }
            let Some((cells, skipped)) = clip_to_cells(area, &doc.client_rect(id, scroll_y)) else {
                continue;
            };

            if is_card(el) {
                let style = if reveal == Reveal::Fading {
                    Theme::fading_style()
                } else {
                    Theme::card_style()
                };
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(style)
                    .title(format!(" {} ", el.text))
                    .title_style(if reveal == Reveal::Fading { style } else { Theme::card_title_style() })
                    .render(cells, buf);
                continue;
            }

            match el.tag.as_str() {
                "h2" => draw_lines(buf, cells, skipped, &[el.text.clone()], Theme::heading_style()),
                "p" => {
                    let style = if reveal == Reveal::Fading {
                        Theme::fading_style()
                    } else {
                        Theme::text_style()
                    };
                    let lines = wrap_text(&el.text, usize::from(cells.width));
                    draw_lines(buf, cells, skipped, &lines, style);
                }
                "a" => {
                    let style = if self.focused == Some(id) {
                        Theme::button_style().patch(Theme::focused_style())
                    } else {
                        Theme::button_style()
                    };
                    Block::bordered()
                        .border_style(style)
                        .render(cells, buf);
                    let label_row = Rect::new(cells.x, cells.y + 1, cells.width, 1);
                    if cells.height > 2 {
                        draw_centered(buf, label_row, &el.text, style);
                    }
                }
                _ => {}
            }
        }
    }

    fn render_navbar(&self, area: Rect, buf: &mut Buffer) {
        let doc = self.page.document();
        let navbar = self.page.refs().navbar;
        let Some((bar, _)) = clip_to_cells(area, &doc.get(navbar).rect) else {
            return;
        };

        buf.set_style(bar, Theme::navbar_style());
        for y in bar.top()..bar.bottom() {
            for x in bar.left()..bar.right() {
                buf[(x, y)].set_symbol(" ");
            }
        }
        if doc.get(navbar).has_class(SCROLLED_CLASS) {
            let edge = bar.bottom().saturating_sub(1);
            for x in bar.left()..bar.right() {
                buf[(x, edge)]
                    .set_symbol("▁")
                    .set_style(Theme::navbar_shadow_style());
            }
        }

        for id in doc.document_order() {
            if id == navbar || doc.closest(id, |e| e.fixed) != Some(navbar) {
                continue;
            }
            let el = doc.get(id);
            let Some((cells, _)) = clip_to_cells(area, &el.rect) else {
                continue;
            };
            let row = Rect::new(cells.x, bar.y + bar.height.saturating_sub(1) / 2, cells.width, 1);
            if el.has_class("nav-brand") {
                draw_lines(buf, row, 0, &[el.text.clone()], Theme::brand_style());
            } else if el.tag == "a" {
                let mut style = if el.style("color") == Some(ACTIVE_LINK_COLOR) {
                    Theme::active_link_style()
                } else {
                    Theme::nav_link_style()
                };
                if self.focused == Some(id) {
                    style = style.patch(Theme::focused_style());
                }
                draw_centered(buf, row, &el.text, style);
            }
        }
    }
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_flow(area, buf);
        self.render_navbar(area, buf);
    }
}

/// Elements the reveal animator controls.
fn is_animated(el: &Element) -> bool {
    REVEAL_GROUPS.iter().any(|group| el.has_class(group))
}

fn is_card(el: &Element) -> bool {
    is_animated(el) || el.has_class("card")
}

fn draw_lines(buf: &mut Buffer, cells: Rect, skipped: u16, lines: &[String], style: Style) {
    let visible = lines.iter().skip(usize::from(skipped)).take(usize::from(cells.height));
    for (row, line) in visible.enumerate() {
        buf.set_stringn(cells.x, cells.y + row as u16, line, usize::from(cells.width), style);
    }
}

fn draw_centered(buf: &mut Buffer, row: Rect, text: &str, style: Style) {
    let len = text.chars().count() as u16;
    let x = row.x + row.width.saturating_sub(len) / 2;
    buf.set_stringn(x, row.y, text, usize::from(row.width), style);
}
