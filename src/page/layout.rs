//! Localized layout
//!
//! A [`LayoutContext`] is resolved once per page request and handed to
//! every template fragment (document attributes, header, navigation,
//! language switcher, footer). Fragments read locale and direction from it
//! and never resolve them again.

use crate::locale::{Direction, Locale};

/// Site pages reachable under `/{lang}/...`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    Services,
    Doctors,
    Insurance,
    Events,
    Contact,
}

impl Page {
    /// Navigation order
    pub const ALL: [Self; 7] = [
        Self::Home,
        Self::About,
        Self::Services,
        Self::Doctors,
        Self::Insurance,
        Self::Events,
        Self::Contact,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.slug() == slug)
    }

    /// Path below the locale segment; empty for the home page
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Home => "",
            Self::About => "about",
            Self::Services => "services",
            Self::Doctors => "doctors",
            Self::Insurance => "insurance",
            Self::Events => "events",
            Self::Contact => "contact",
        }
    }

    pub const fn title(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Home, Locale::En) => "Home",
            (Self::Home, Locale::Ar) => "الرئيسية",
            (Self::About, Locale::En) => "About Us",
            (Self::About, Locale::Ar) => "من نحن",
            (Self::Services, Locale::En) => "Our Services",
            (Self::Services, Locale::Ar) => "خدماتنا",
            (Self::Doctors, Locale::En) => "Our Doctors",
            (Self::Doctors, Locale::Ar) => "أطباؤنا",
            (Self::Insurance, Locale::En) => "Insurance",
            (Self::Insurance, Locale::Ar) => "التأمين",
            (Self::Events, Locale::En) => "Events",
            (Self::Events, Locale::Ar) => "الفعاليات",
            (Self::Contact, Locale::En) => "Contact Us",
            (Self::Contact, Locale::Ar) => "اتصل بنا",
        }
    }

    pub const fn shows_slider(self) -> bool {
        matches!(self, Self::Home)
    }

    pub const fn shows_events(self) -> bool {
        matches!(self, Self::Home | Self::Events)
    }
}

/// Locale-dependent strings shared by the layout fragments
pub struct SiteText {
    pub site_name: &'static str,
    pub events_heading: &'static str,
    pub rights: &'static str,
}

impl SiteText {
    pub const fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self {
                site_name: "City Hospital",
                events_heading: "Upcoming Events",
                rights: "All rights reserved.",
            },
            Locale::Ar => Self {
                site_name: "مستشفى المدينة",
                events_heading: "الفعاليات القادمة",
                rights: "جميع الحقوق محفوظة.",
            },
        }
    }
}

/// One navigation entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: &'static str,
    pub active: bool,
}

/// Per-request layout state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutContext {
    pub locale: Locale,
    pub direction: Direction,
    pub page: Page,
}

impl LayoutContext {
    /// Resolve locale and direction from the raw path segment
    pub fn resolve(segment: &str, page: Page) -> Self {
        let locale = Locale::resolve(segment);
        Self {
            locale,
            direction: locale.direction(),
            page,
        }
    }

    pub const fn lang(&self) -> &'static str {
        self.locale.as_str()
    }

    pub const fn dir(&self) -> &'static str {
        self.direction.as_str()
    }

    pub const fn title(&self) -> &'static str {
        self.page.title(self.locale)
    }

    pub const fn text(&self) -> SiteText {
        SiteText::for_locale(self.locale)
    }

    pub fn navigation(&self) -> Vec<NavLink> {
        Page::ALL
            .into_iter()
            .map(|page| NavLink {
                href: page_href(self.locale, page),
                label: page.title(self.locale),
                active: page == self.page,
            })
            .collect()
    }

    /// Same page in the other locale
    pub fn language_switch(&self) -> NavLink {
        let other = self.locale.other();
        NavLink {
            href: page_href(other, self.page),
            label: other.native_name(),
            active: false,
        }
    }
}

/// Canonical path of a page in a locale
pub fn page_href(locale: Locale, page: Page) -> String {
    match page.slug() {
        "" => format!("/{locale}"),
        slug => format!("/{locale}/{slug}"),
    }
}
