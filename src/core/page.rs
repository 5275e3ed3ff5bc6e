//! Page descriptions and their layout into a [`Document`].
//!
//! A page is a fixed navbar plus a vertical stack of sections.  Sections
//! carry a title, an optional paragraph, a row of call-to-action links and
//! a grid of items (cards, list entries).  Layout is a simple block flow
//! quantised to [`LINE_HEIGHT`] so a terminal can render it cell-exact.

use std::path::Path;

use serde::Deserialize;

use super::dom::{Document, Element, ElementId};
use super::geometry::Rect;
use crate::error::PageError;

/// Height of one text line in px.
pub const LINE_HEIGHT: f64 = 16.0;
/// Advance width of one character in px.
pub const CHAR_WIDTH: f64 = 8.0;

const SECTION_PADDING: f64 = 3.0 * LINE_HEIGHT;
const SIDE_PADDING: f64 = 4.0 * CHAR_WIDTH;
const TITLE_HEIGHT: f64 = 2.0 * LINE_HEIGHT;
const LINK_HEIGHT: f64 = 3.0 * LINE_HEIGHT;
const ITEM_HEIGHT: f64 = 6.0 * LINE_HEIGHT;
const ITEM_GAP: f64 = LINE_HEIGHT;
const BLOCK_GAP: f64 = LINE_HEIGHT;

// ───────────────────────────────────────── description ───────

/// Declarative page description, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageSpec {
    pub title: String,
    #[serde(default = "default_navbar_height")]
    pub navbar_height: f64,
    #[serde(default)]
    pub nav: Vec<LinkSpec>,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkSpec {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionSpec {
    /// `section` or `header`.
    #[serde(default = "default_section_tag")]
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
    /// Class given to every item, e.g. `skill-card`.
    #[serde(default = "default_item_class")]
    pub item_class: String,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    #[serde(default = "default_columns")]
    pub columns: usize,
    #[serde(default)]
    pub min_height: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemSpec {
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

fn default_navbar_height() -> f64 {
    4.0 * LINE_HEIGHT
}

fn default_section_tag() -> String {
    "section".into()
}

fn default_item_class() -> String {
    "card".into()
}

fn default_columns() -> usize {
    3
}

impl PageSpec {
    /// Parse a page description and check its geometry.
    pub fn from_toml(s: &str) -> Result<Self, PageError> {
        let spec: Self = toml::from_str(s)?;
        spec.validate()?;
        Ok(spec)
    }

    fn validate(&self) -> Result<(), PageError> {
        check_size("navbar_height", self.navbar_height)?;
        for (i, section) in self.sections.iter().enumerate() {
            check_size(&format!("sections[{i}].min_height"), section.min_height)?;
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, PageError> {
        let contents = std::fs::read_to_string(path).map_err(|source| PageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| PageError::InvalidPage {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Built-in single-page portfolio.
    pub fn portfolio() -> Self {
        let link = |label: &str, href: &str| LinkSpec {
            label: label.into(),
            href: href.into(),
        };
        let item = |title: &str, summary: &str| ItemSpec {
            title: title.into(),
            summary: summary.into(),
        };
        let section = |tag: &str, id: &str, title: &str, body: &str| SectionSpec {
            tag: tag.into(),
            id: Some(id.into()),
            title: title.into(),
            body: body.into(),
            links: Vec::new(),
            item_class: default_item_class(),
            items: Vec::new(),
            columns: default_columns(),
            min_height: 0.0,
        };

        let mut home = section(
            "header",
            "home",
            "Hi, I build fast and reliable software",
            "Systems programmer with a soft spot for tooling, terminals and tidy data pipelines.",
        );
        home.links = vec![link("View projects", "#projects"), link("Get in touch", "#contact")];
        home.min_height = 24.0 * LINE_HEIGHT;

        let mut skills = section("section", "skills", "Skills", "Things I reach for every day.");
        skills.item_class = "skill-card".into();
        skills.items = vec![
            item("Rust", "Services, CLIs and embedded work."),
            item("TypeScript", "Frontends and build tooling."),
            item("PostgreSQL", "Schema design and query tuning."),
            item("Linux", "Packaging, systemd, observability."),
            item("Networking", "HTTP, gRPC, custom wire formats."),
            item("Testing", "Property tests and fuzzing."),
        ];

        let mut projects = section("section", "projects", "Projects", "");
        projects.item_class = "project-card".into();
        projects.columns = 2;
        projects.items = vec![
            item("dir-walker", "A parallel directory scanner."),
            item("tiny-kv", "An embedded key-value store."),
            item("logtail", "Structured log follower for the terminal."),
            item("pagefx", "Scroll effects, previewed in a terminal."),
        ];

        let mut testimonials = section(
            "section",
            "testimonials",
            "Kind words",
            "\"Shipped on time and documented everything.\" A happy client",
        );
        testimonials.min_height = 12.0 * LINE_HEIGHT;

        let mut blog = section("section", "blog", "Writing", "");
        blog.item_class = "blog-item".into();
        blog.columns = 1;
        blog.items = vec![
            item("Zero-copy parsing in practice", "Borrowing all the way down."),
            item("Debouncing without tears", "Timers, cancellation and trailing edges."),
            item("A field guide to scroll events", "What fires, when, and how often."),
            item("Notes on arena allocation", "Indices instead of pointers."),
        ];

        let mut contact = section(
            "section",
            "contact",
            "Contact",
            "Happy to chat about contracts, open source or anything terminal related.",
        );
        contact.links = vec![link("Back to top", "#"), link("Resume", "#resume")];
        contact.min_height = 20.0 * LINE_HEIGHT;

        Self {
            title: "Jane Doe".into(),
            navbar_height: default_navbar_height(),
            nav: vec![
                link("Home", "#home"),
                link("Skills", "#skills"),
                link("Projects", "#projects"),
                link("Blog", "#blog"),
                link("Contact", "#contact"),
            ],
            sections: vec![home, skills, projects, testimonials, blog, contact],
        }
    }

    // ── layout ─────────────────────────────────────────────────

    /// Lay the page out for a viewport `width` px wide.
    pub fn layout(&self, width: f64) -> Document {
        let width = width.max(20.0 * CHAR_WIDTH);
        let mut doc = Document::new();
        let body = doc.body();

        self.layout_navbar(&mut doc, body, width);

        // Content starts below the fixed navbar.
        let mut y = self.navbar_height;
        for section in &self.sections {
            y = layout_section(&mut doc, body, section, y, width);
        }
        doc.get_mut(body).rect = Rect::new(0.0, 0.0, width, y);
        doc
    }

    fn layout_navbar(&self, doc: &mut Document, body: ElementId, width: f64) {
        let height = self.navbar_height;
        let navbar = doc.append(
            body,
            Element::new("nav")
                .with_class("navbar")
                .with_rect(Rect::new(0.0, 0.0, width, height))
                .fixed(),
        );
        let text_y = ((height - LINE_HEIGHT) / 2.0 / LINE_HEIGHT).floor() * LINE_HEIGHT;
        let brand_width = text_width(&self.title);
        doc.append(
            navbar,
            Element::new("span")
                .with_class("nav-brand")
                .with_text(&self.title)
                .with_rect(Rect::new(2.0 * CHAR_WIDTH, text_y, brand_width, LINE_HEIGHT)),
        );

        let menu_x = 2.0 * CHAR_WIDTH + brand_width + 4.0 * CHAR_WIDTH;
        let menu = doc.append(
            navbar,
            Element::new("ul")
                .with_class("nav-menu")
                .with_rect(Rect::new(menu_x, 0.0, (width - menu_x).max(0.0), height)),
        );
        let mut x = menu_x;
        for link in &self.nav {
            let link_width = text_width(&link.label) + 2.0 * CHAR_WIDTH;
            doc.append(
                menu,
                Element::new("a")
                    .with_href(&link.href)
                    .with_text(&link.label)
                    .with_rect(Rect::new(x, 0.0, link_width, height)),
            );
            x += link_width + CHAR_WIDTH;
        }
    }
}

fn layout_section(
    doc: &mut Document,
    body: ElementId,
    spec: &SectionSpec,
    top: f64,
    width: f64,
) -> f64 {
    let mut el = Element::new(&spec.tag).with_class("section");
    if let Some(id) = &spec.id {
        el = el.with_id(id);
    }
    let section = doc.append(body, el);

    let inner_width = (width - 2.0 * SIDE_PADDING).max(CHAR_WIDTH);
    let mut y = top + SECTION_PADDING;

    doc.append(
        section,
        Element::new("h2")
            .with_text(&spec.title)
            .with_rect(Rect::new(SIDE_PADDING, y, inner_width, LINE_HEIGHT)),
    );
    y += TITLE_HEIGHT;

    if !spec.body.is_empty() {
        let lines = wrap_text(&spec.body, chars_for(inner_width)).len() as f64;
        doc.append(
            section,
            Element::new("p")
                .with_text(&spec.body)
                .with_rect(Rect::new(SIDE_PADDING, y, inner_width, lines * LINE_HEIGHT)),
        );
        y += lines * LINE_HEIGHT + BLOCK_GAP;
    }

    if !spec.links.is_empty() {
        let mut x = SIDE_PADDING;
        for link in &spec.links {
            let link_width = text_width(&link.label) + 4.0 * CHAR_WIDTH;
            doc.append(
                section,
                Element::new("a")
                    .with_class("btn")
                    .with_href(&link.href)
                    .with_text(&link.label)
                    .with_rect(Rect::new(x, y, link_width, LINK_HEIGHT)),
            );
            x += link_width + 2.0 * CHAR_WIDTH;
        }
        y += LINK_HEIGHT + BLOCK_GAP;
    }

    if !spec.items.is_empty() {
        let columns = spec.columns.max(1);
        let gaps = (columns - 1) as f64 * 2.0 * CHAR_WIDTH;
        let item_width = ((inner_width - gaps) / columns as f64 / CHAR_WIDTH).floor() * CHAR_WIDTH;
        for (index, item) in spec.items.iter().enumerate() {
            let row = (index / columns) as f64;
            let col = (index % columns) as f64;
            let rect = Rect::new(
                SIDE_PADDING + col * (item_width + 2.0 * CHAR_WIDTH),
                y + row * (ITEM_HEIGHT + ITEM_GAP),
                item_width,
                ITEM_HEIGHT,
            );
            let card = doc.append(
                section,
                Element::new("div")
                    .with_class(&spec.item_class)
                    .with_text(&item.title)
                    .with_rect(rect),
            );
            if !item.summary.is_empty() {
                doc.append(
                    card,
                    Element::new("p").with_text(&item.summary).with_rect(Rect::new(
                        rect.x + CHAR_WIDTH,
                        rect.y + LINE_HEIGHT,
                        (rect.width - 2.0 * CHAR_WIDTH).max(0.0),
                        rect.height - 2.0 * LINE_HEIGHT,
                    )),
                );
            }
        }
        let rows = spec.items.len().div_ceil(columns) as f64;
        y += rows * (ITEM_HEIGHT + ITEM_GAP);
    }

    let bottom = (y + SECTION_PADDING).max(top + spec.min_height);
    doc.get_mut(section).rect = Rect::new(0.0, top, width, bottom - top);
    bottom
}

fn check_size(field: &str, value: f64) -> Result<(), PageError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PageError::InvalidGeometry {
            field: field.to_string(),
            value,
        })
    }
}

fn text_width(text: &str) -> f64 {
    text.chars().count() as f64 * CHAR_WIDTH
}

fn chars_for(width: f64) -> usize {
    ((width / CHAR_WIDTH).floor() as usize).max(1)
}

/// Greedy word wrap to at most `max_chars` per line.  Words longer than a
/// line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        if word.is_empty() {
            continue;
        }
        let needed = if line.is_empty() { word.len() } else { line.chars().count() + 1 + word.len() };
        if needed > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_exposes_expected_hooks() {
        let doc = PageSpec::portfolio().layout(960.0);
        assert_eq!(doc.by_class("navbar").len(), 1);
        assert_eq!(doc.by_class("skill-card").len(), 6);
        assert_eq!(doc.by_class("project-card").len(), 4);
        assert_eq!(doc.by_class("blog-item").len(), 4);
        assert!(doc.by_id("contact").is_some());
    }

    #[test]
    fn sections_stack_below_the_navbar() {
        let spec = PageSpec::portfolio();
        let doc = spec.layout(960.0);
        let home = doc.by_id("home").unwrap();
        let skills = doc.by_id("skills").unwrap();
        assert_eq!(doc.get(home).rect.top(), spec.navbar_height);
        assert_eq!(doc.get(skills).rect.top(), doc.get(home).rect.bottom());
        assert_eq!(doc.get(home).rect.height, 24.0 * LINE_HEIGHT);
    }

    #[test]
    fn items_flow_into_a_grid() {
        let doc = PageSpec::portfolio().layout(960.0);
        let cards = doc.by_class("skill-card");
        let first = doc.get(cards[0]).rect;
        let second = doc.get(cards[1]).rect;
        let fourth = doc.get(cards[3]).rect;
        assert_eq!(first.top(), second.top());
        assert!(second.left() > first.right());
        assert_eq!(fourth.left(), first.left());
        assert_eq!(fourth.top(), first.top() + ITEM_HEIGHT + ITEM_GAP);
    }

    #[test]
    fn parses_toml_with_defaults() {
        let spec = PageSpec::from_toml(
            r##"
title = "Demo"

[[nav]]
label = "About"
href = "#about"

[[sections]]
id = "about"
title = "About"
item_class = "skill-card"
items = [{ title = "One" }, { title = "Two", summary = "second" }]
"##,
        )
        .unwrap();

        assert_eq!(spec.navbar_height, 64.0);
        assert_eq!(spec.sections[0].tag, "section");
        assert_eq!(spec.sections[0].columns, 3);
        assert_eq!(spec.sections[0].items[1].summary, "second");
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(PageSpec::from_toml("title = ").is_err());
        assert!(PageSpec::from_toml("sections = []").is_err());
    }

    #[test]
    fn rejects_non_finite_geometry() {
        let err = PageSpec::from_toml("title = \"x\"\nnavbar_height = nan\n").unwrap_err();
        assert!(matches!(
            err,
            PageError::InvalidGeometry { ref field, .. } if field == "navbar_height"
        ));

        let err = PageSpec::from_toml(
            "title = \"x\"\n[[sections]]\ntitle = \"a\"\nmin_height = inf\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PageError::InvalidGeometry { ref field, .. } if field == "sections[0].min_height"
        ));

        assert!(PageSpec::from_toml("title = \"x\"\nnavbar_height = -4.0\n").is_err());
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(wrap_text("the quick brown fox", 9), vec!["the quick", "brown fox"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }
}
