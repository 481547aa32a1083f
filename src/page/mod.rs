//! Server-rendered pages
//!
//! Handles `/{lang}/...`: the patients redirect, page rendering through the
//! localized layout, and the bare `/` entry point.

mod image;
mod layout;

pub use image::resolve_image_url;
pub use layout::{page_href, LayoutContext, NavLink, Page, SiteText};

use askama::Template;
use chrono::Datelike;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::config::AppState;
use crate::http;
use crate::locale::Locale;
use crate::logger;
use crate::store::{Event, Slide};

/// Slide prepared for markup; empty strings mean "absent"
pub struct SlideView {
    pub image: String,
    pub title: String,
    pub caption: String,
    pub link: String,
}

impl SlideView {
    fn new(slide: Slide, root_path: Option<&str>) -> Self {
        Self {
            image: resolve_image_url(root_path, &slide.image),
            title: slide.title.unwrap_or_default(),
            caption: slide.caption.unwrap_or_default(),
            link: slide.link.unwrap_or_default(),
        }
    }
}

/// Event prepared for markup; empty strings mean "absent"
pub struct EventView {
    pub title: String,
    pub date: String,
    pub location: String,
    pub description: String,
    pub image: String,
}

impl EventView {
    fn new(event: Event, root_path: Option<&str>) -> Self {
        Self {
            image: event
                .image
                .map(|src| resolve_image_url(root_path, &src))
                .unwrap_or_default(),
            title: event.title,
            date: event.date,
            location: event.location.unwrap_or_default(),
            description: event.description.unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    layout: &'a LayoutContext,
    text: SiteText,
    home_href: String,
    nav: Vec<NavLink>,
    switcher: NavLink,
    slides: Vec<SlideView>,
    events: Vec<EventView>,
    year: i32,
}

/// Target of the patients redirect, keeping the literal locale segment
///
/// Only ASCII letters, digits, `-` and `_` are echoed into `Location`;
/// anything else (a `\` would let browsers read `/\host` as `//host`) has
/// no target.
pub fn patients_redirect_target(segment: &str) -> Option<String> {
    let plain = !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    plain.then(|| format!("/{segment}/insurance"))
}

/// Page route handler
pub async fn handle_page(path: &str, state: &AppState) -> Response<Full<Bytes>> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return http::build_redirect_response(&page_href(Locale::default(), Page::Home));
    }

    let (segment, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));

    if rest == "patients" {
        return match patients_redirect_target(segment) {
            Some(target) => http::build_redirect_response(&target),
            None => http::build_404_response(),
        };
    }

    let Some(page) = Page::from_slug(rest) else {
        return http::build_404_response();
    };

    let layout = LayoutContext::resolve(segment, page);
    render(&layout, state).await
}

async fn render(layout: &LayoutContext, state: &AppState) -> Response<Full<Bytes>> {
    let root_path = state.config.site.root_path.as_deref();

    let slides = if layout.page.shows_slider() {
        state
            .slide_service()
            .get_all()
            .await
            .into_iter()
            .map(|slide| SlideView::new(slide, root_path))
            .collect()
    } else {
        Vec::new()
    };

    let events = if layout.page.shows_events() {
        state
            .event_service()
            .get_all()
            .await
            .into_iter()
            .map(|event| EventView::new(event, root_path))
            .collect()
    } else {
        Vec::new()
    };

    let template = PageTemplate {
        layout,
        text: layout.text(),
        home_href: page_href(layout.locale, Page::Home),
        nav: layout.navigation(),
        switcher: layout.language_switch(),
        slides,
        events,
        year: chrono::Local::now().year(),
    };

    match template.render() {
        Ok(html) => http::build_html_response(StatusCode::OK, html),
        Err(e) => {
            logger::log_error(&format!("Failed to render page {:?}: {e}", layout.page));
            http::build_html_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "<h1>500 Internal Server Error</h1>".to_string(),
            )
        }
    }
}
