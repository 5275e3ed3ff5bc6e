//! End-to-end behavior of the page runtime on the built-in portfolio.

use pagefx::behavior::reveal::{RevealState, DELAY_PROPERTY};
use pagefx::behavior::{LOADED_CLASS, VISIBLE_CLASS};
use pagefx::{Document, Element, ElementId, Page, PageError, PageSettings, PageSpec, ScrollBehavior, Viewport};

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 600.0;

fn portfolio_page() -> Page {
    let doc = PageSpec::portfolio().layout(WIDTH);
    let viewport = Viewport::new(WIDTH, HEIGHT, doc.scroll_height(), 0.3);
    Page::new(doc, viewport, PageSettings::default()).unwrap()
}

fn section(page: &Page, id: &str) -> ElementId {
    page.document().by_id(id).unwrap()
}

fn nav_link(page: &Page, href: &str) -> ElementId {
    let doc = page.document();
    page.refs()
        .nav_links
        .iter()
        .copied()
        .find(|&link| doc.get(link).href.as_deref() == Some(href))
        .unwrap()
}

fn anchor(page: &Page, href: &str) -> ElementId {
    let doc = page.document();
    page.refs()
        .anchors
        .iter()
        .copied()
        .find(|&a| doc.get(a).href.as_deref() == Some(href) && !page.refs().nav_links.contains(&a))
        .unwrap()
}

fn settle(page: &mut Page) {
    for _ in 0..500 {
        if !page.viewport().is_animating() {
            return;
        }
        page.tick();
    }
    panic!("smooth scroll never settled");
}

#[test]
fn navbar_flag_follows_threshold() {
    let mut page = portfolio_page();
    assert!(!page.navbar_scrolled());

    page.scroll_to(100.0, ScrollBehavior::Instant);
    assert!(!page.navbar_scrolled(), "exactly at the threshold is not past it");

    page.scroll_by(1.0);
    assert!(page.navbar_scrolled());

    page.scroll_to(0.0, ScrollBehavior::Instant);
    assert!(!page.navbar_scrolled());
}

#[test]
fn nav_link_scrolls_smoothly_below_navbar() {
    let mut page = portfolio_page();
    let projects_top = page.document().get(section(&page, "projects")).rect.top();
    let navbar_height = page.document().get(page.refs().navbar).rect.height;

    let click = page.click(nav_link(&page, "#projects")).unwrap();
    assert!(click.default_prevented);
    assert!(click.scroll.is_some());
    assert!(page.viewport().is_animating());
    assert_eq!(page.viewport().scroll_y(), 0.0);

    settle(&mut page);
    assert_eq!(page.viewport().scroll_y(), projects_top - navbar_height);
    assert!(page.navbar_scrolled());
}

#[test]
fn anchor_target_accounts_for_current_scroll() {
    let mut page = portfolio_page();
    page.scroll_to(300.0, ScrollBehavior::Instant);
    let skills_top = page.document().get(section(&page, "skills")).rect.top();
    let navbar_height = page.document().get(page.refs().navbar).rect.height;

    page.click(nav_link(&page, "#skills"));
    settle(&mut page);
    assert_eq!(page.viewport().scroll_y(), skills_top - navbar_height);
}

#[test]
fn placeholder_and_broken_links_are_swallowed() {
    let mut page = portfolio_page();
    page.scroll_to(250.0, ScrollBehavior::Instant);

    for href in ["#", "#resume"] {
        let click = page.click(anchor(&page, href)).unwrap();
        assert!(click.default_prevented, "{href}");
        assert!(click.scroll.is_none(), "{href}");
        assert!(!page.viewport().is_animating());
        assert_eq!(page.viewport().scroll_y(), 250.0);
    }
}

#[test]
fn clicks_outside_anchors_are_ignored() {
    let mut page = portfolio_page();
    let heading = page
        .document()
        .select(|el| el.tag == "h2")
        .first()
        .copied()
        .unwrap();
    assert!(page.click(heading).is_none());
}

#[test]
fn reveal_waits_for_ready() {
    let mut page = portfolio_page();
    page.scroll_to(page.viewport().max_scroll(), ScrollBehavior::Instant);
    assert!(page.document().by_class(VISIBLE_CLASS).is_empty());

    page.ready();
    // Blog items are in view at the bottom of the page.
    let blog = page.document().by_class("blog-item");
    assert!(blog.iter().any(|&id| page.reveal().is_revealed(id)));
}

#[test]
fn reveal_staggers_within_each_group() {
    let mut page = portfolio_page();
    page.ready();
    let doc = page.document();

    for group in ["skill-card", "project-card", "blog-item"] {
        let delays: Vec<_> = doc
            .by_class(group)
            .into_iter()
            .map(|id| doc.get(id).style(DELAY_PROPERTY).unwrap().to_string())
            .collect();
        assert_eq!(delays[0], "0s", "{group}");
        assert_eq!(delays[1], "0.1s", "{group}");
        assert_eq!(delays[3], "0.3s", "{group}");
    }
}

#[test]
fn reveal_is_one_shot_and_respects_bottom_margin() {
    let mut page = portfolio_page();
    page.ready();

    let cards = page.document().by_class("skill-card");
    let first_row_top = page.document().get(cards[0]).rect.top();
    // The reveal root ends 100px above the viewport bottom.  Let 40px of the
    // first row into it.
    page.scroll_to(first_row_top - (HEIGHT - 100.0) + 40.0, ScrollBehavior::Instant);

    let revealed: Vec<_> = cards.iter().map(|&id| page.reveal().is_revealed(id)).collect();
    assert_eq!(revealed, [true, true, true, false, false, false]);
    for &id in &cards[..3] {
        assert!(page.document().get(id).has_class(VISIBLE_CLASS));
        assert!(!page.reveal().is_observing(id));
    }
    assert_eq!(page.reveal().state(cards[3]), Some(RevealState::Pending));

    // Scrolling away again does not hide anything.
    page.scroll_to(0.0, ScrollBehavior::Instant);
    for &id in &cards[..3] {
        assert!(page.document().get(id).has_class(VISIBLE_CLASS));
        assert_eq!(page.reveal().state(id), Some(RevealState::Revealed));
    }
}

#[test]
fn last_qualifying_section_wins() {
    let mut page = portfolio_page();
    // Hero and skills both qualify on the first pass.  Skills comes later.
    assert_eq!(page.active_link(), Some(nav_link(&page, "#skills")));

    page.scroll_to(page.viewport().max_scroll(), ScrollBehavior::Instant);
    assert_eq!(page.active_link(), Some(nav_link(&page, "#contact")));

    let colored = page
        .refs()
        .nav_links
        .iter()
        .filter(|&&link| page.document().get(link).style("color").is_some())
        .count();
    assert_eq!(colored, 1);
}

#[test]
fn section_without_nav_link_clears_highlight() {
    let mut page = portfolio_page();
    let testimonials = page.document().get(section(&page, "testimonials")).rect;
    let blog_top = page.document().get(section(&page, "blog")).rect.top();

    // Show 60% of the testimonials with the blog still below the fold.
    let scroll = testimonials.top() + 0.6 * testimonials.height - HEIGHT;
    assert!(scroll + HEIGHT < blog_top);
    page.scroll_to(scroll, ScrollBehavior::Instant);

    assert_eq!(page.active_link(), None);
}

#[test]
fn leaving_a_section_keeps_highlight() {
    let mut page = portfolio_page();
    page.scroll_to(page.viewport().max_scroll(), ScrollBehavior::Instant);
    let contact = nav_link(&page, "#contact");
    assert_eq!(page.active_link(), Some(contact));

    // Contact drops to 25% visible.  The blog was already satisfied and
    // the testimonials stay out of view.
    let rect = page.document().get(section(&page, "contact")).rect;
    page.scroll_to(rect.top() + 0.25 * rect.height - HEIGHT, ScrollBehavior::Instant);
    assert_eq!(page.active_link(), Some(contact));
}

#[test]
fn load_flags_body_once() {
    let mut page = portfolio_page();
    assert!(!page.lifecycle().loaded);
    page.load();
    page.load();
    let body = page.document().get(page.refs().body);
    assert!(body.has_class(LOADED_CLASS));
    assert_eq!(body.classes.iter().filter(|c| *c == LOADED_CLASS).count(), 1);
}

#[test]
fn resize_keeps_scroll_in_range() {
    let mut page = portfolio_page();
    let max = page.viewport().max_scroll();
    page.scroll_to(max, ScrollBehavior::Instant);

    page.resize(WIDTH, HEIGHT + 200.0, None);
    assert_eq!(page.viewport().scroll_y(), max - 200.0);
    assert_eq!(page.active_link(), Some(nav_link(&page, "#contact")));
}

#[test]
fn relayout_to_a_new_width_is_adopted() {
    let spec = PageSpec::portfolio();
    let mut page = portfolio_page();
    let narrow = spec.layout(480.0);
    let skills = section(&page, "skills");

    page.resize(480.0, HEIGHT, Some(&narrow));
    assert_eq!(page.document().get(skills).rect.width, 480.0);
    assert_eq!(page.viewport().width(), 480.0);
}

#[test]
fn missing_navbar_is_an_error() {
    let mut doc = Document::new();
    let body = doc.body();
    doc.append(body, Element::new("section").with_id("about"));
    let viewport = Viewport::new(WIDTH, HEIGHT, doc.scroll_height(), 0.3);

    let result = Page::new(doc, viewport, PageSettings::default());
    assert!(matches!(result, Err(PageError::MissingNavbar)));
}

#[test]
fn toml_page_without_menu_still_runs() {
    let spec = PageSpec::from_toml(
        r##"
title = "Minimal"

[[sections]]
id = "about"
title = "About"
body = "Just one section."
links = [{ label = "Top", href = "#" }]
"##,
    )
    .unwrap();
    let doc = spec.layout(WIDTH);
    let viewport = Viewport::new(WIDTH, HEIGHT, doc.scroll_height(), 0.3);
    let mut page = Page::new(doc, viewport, PageSettings::default()).unwrap();

    assert!(page.refs().nav_links.is_empty());
    assert_eq!(page.refs().sections.len(), 1);
    assert_eq!(page.active_link(), None);

    let top = page.refs().anchors[0];
    let click = page.click(top).unwrap();
    assert!(click.scroll.is_none());
}

#[test]
fn page_file_with_nan_navbar_is_rejected() {
    let result = PageSpec::from_toml(
        r##"
title = "Broken"
navbar_height = nan

[[nav]]
label = "About"
href = "#about"

[[sections]]
id = "about"
title = "About"
"##,
    );
    assert!(matches!(result, Err(PageError::InvalidGeometry { .. })));
}
