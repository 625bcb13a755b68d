//! Cart sidebar visibility.
//!
//! Decides whether the auxiliary cart summary panel is rendered next to a
//! page, from the current route, the viewport class and the cart size.

/// Narrowest viewport treated as desktop. Widths of 768px and below are mobile.
pub const DEFAULT_DESKTOP_MIN_WIDTH: u32 = 769;

/// Locales the storefront routes under, as in `/fr/cart`.
pub const DEFAULT_LOCALES: [&str; 3] = ["en-US", "ar", "fr"];

/// Routes whose page, and any page beneath it, never shows the sidebar.
const EXCLUDED_ROUTES: [&str; 7] = [
    "cart", "checkout", "sign-in", "sign-up", "order", "account", "admin",
];

/// Viewport width class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    Mobile,
    Desktop,
}

impl Viewport {
    /// Classify a viewport width in CSS pixels.
    pub fn from_width(width: u32, desktop_min_width: u32) -> Self {
        if width >= desktop_min_width {
            Self::Desktop
        } else {
            Self::Mobile
        }
    }
}

/// Sidebar visibility rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRules {
    locales: Vec<String>,
    desktop_min_width: u32,
}

impl Default for SidebarRules {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALES, DEFAULT_DESKTOP_MIN_WIDTH)
    }
}

impl SidebarRules {
    /// Create rules for the given locale prefixes and desktop breakpoint.
    pub fn new(locales: impl IntoIterator<Item = impl Into<String>>, desktop_min_width: u32) -> Self {
        Self {
            locales: locales.into_iter().map(Into::into).collect(),
            desktop_min_width,
        }
    }

    /// Classify a viewport width against these rules' breakpoint.
    pub fn viewport(&self, width: u32) -> Viewport {
        Viewport::from_width(width, self.desktop_min_width)
    }

    /// Should the cart sidebar be shown on `path`?
    pub fn should_show(&self, path: &str, viewport: Viewport, item_count: usize) -> bool {
        item_count > 0 && viewport == Viewport::Desktop && !self.is_excluded(path)
    }

    /// Check if the route, ignoring any locale prefix, never shows the sidebar.
    pub fn is_excluded(&self, path: &str) -> bool {
        let mut segments = self.route_segments(path);

        match segments.next() {
            None => true,
            Some(first) => EXCLUDED_ROUTES.contains(&first),
        }
    }

    fn route_segments<'p>(&self, path: &'p str) -> impl Iterator<Item = &'p str> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        let mut segments = path.split('/').filter(|segment| !segment.is_empty()).peekable();

        let locale_prefixed = segments
            .peek()
            .is_some_and(|first| self.is_locale(first));

        if locale_prefixed {
            segments.next();
        }

        segments
    }

    fn is_locale(&self, segment: &str) -> bool {
        self.locales
            .iter()
            .any(|locale| locale.eq_ignore_ascii_case(segment))
    }
}

/// Applies the default rules: a cart with items, on desktop, away from the
/// home, cart, checkout, sign-in/up, order, account and admin pages.
pub fn should_show_cart_sidebar(path: &str, viewport: Viewport, item_count: usize) -> bool {
    SidebarRules::default().should_show(path, viewport, item_count)
}
