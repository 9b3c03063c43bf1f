use crate::catalog::{ChapterCatalog, ChapterRecord};
use crate::constants::{
    DEFAULT_ZOOM, FIRST_PAGE, LAST_PAGE, MAX_ZOOM, MIN_ZOOM, QUICK_SELECT_SPAN, ZOOM_STEP,
};
use tracing::debug;

/// Width class of the surface the viewer is drawn on. Supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    Wide,
    Narrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Landing,
    Reading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    current_page: u32,
    zoom_factor: f64,
    panel_visible: bool,
    landing_shown: bool,
}

impl NavigationState {
    fn new() -> Self {
        Self {
            current_page: FIRST_PAGE,
            zoom_factor: DEFAULT_ZOOM,
            panel_visible: false,
            landing_shown: true,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn landing_shown(&self) -> bool {
        self.landing_shown
    }

    pub fn mode(&self) -> ViewMode {
        if self.landing_shown {
            ViewMode::Landing
        } else {
            ViewMode::Reading
        }
    }
}

/// Receives the new state after every mutation that changed it.
pub trait NavigationObserver {
    fn on_change(&mut self, state: &NavigationState);
}

impl<F> NavigationObserver for F
where
    F: FnMut(&NavigationState),
{
    fn on_change(&mut self, state: &NavigationState) {
        self(state)
    }
}

/// Owns the navigation state and is its only mutator. Out-of-range requests
/// are ignored or clamped; nothing here returns an error.
pub struct PageNavigator {
    catalog: ChapterCatalog,
    state: NavigationState,
    observers: Vec<Box<dyn NavigationObserver>>,
}

impl std::fmt::Debug for PageNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageNavigator")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for PageNavigator {
    fn default() -> Self {
        Self::new(ChapterCatalog::new())
    }
}

impl PageNavigator {
    pub fn new(catalog: ChapterCatalog) -> Self {
        Self {
            catalog,
            state: NavigationState::new(),
            observers: Vec::new(),
        }
    }

    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: NavigationObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn catalog(&self) -> &ChapterCatalog {
        &self.catalog
    }

    pub fn current_page(&self) -> u32 {
        self.state.current_page
    }

    pub fn zoom_factor(&self) -> f64 {
        self.state.zoom_factor
    }

    pub fn panel_visible(&self) -> bool {
        self.state.panel_visible
    }

    pub fn landing_shown(&self) -> bool {
        self.state.landing_shown
    }

    pub fn is_reading(&self) -> bool {
        self.state.mode() == ViewMode::Reading
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.state.zoom_factor * 100.0).round() as u32
    }

    pub fn current_chapter(&self) -> Option<&'static ChapterRecord> {
        self.catalog.find_chapter_for_page(self.state.current_page)
    }

    pub fn go_to_page(&mut self, requested: i64, viewport: Viewport) {
        if requested < i64::from(FIRST_PAGE) || requested > i64::from(LAST_PAGE) {
            debug!("Ignoring out-of-range page request: {}", requested);
            return;
        }

        self.mutate(|state| {
            state.current_page = requested as u32;
            state.landing_shown = false;
            state.zoom_factor = DEFAULT_ZOOM;
            if viewport == Viewport::Narrow {
                state.panel_visible = false;
            }
        });
    }

    /// Page-number entry. Only the leading integer counts; no number (or 0)
    /// means page 1.
    pub fn go_to_page_input(&mut self, input: &str, viewport: Viewport) {
        let requested = match leading_integer(input) {
            Some(0) | None => i64::from(FIRST_PAGE),
            Some(page) => page,
        };
        self.go_to_page(requested, viewport);
    }

    pub fn step_page(&mut self, delta: i64, viewport: Viewport) {
        let requested = i64::from(self.state.current_page).saturating_add(delta);
        self.go_to_page(requested, viewport);
    }

    pub fn next_page(&mut self, viewport: Viewport) {
        self.step_page(1, viewport);
    }

    pub fn previous_page(&mut self, viewport: Viewport) {
        self.step_page(-1, viewport);
    }

    pub fn can_step(&self, delta: i64) -> bool {
        let target = i64::from(self.state.current_page).saturating_add(delta);
        (i64::from(FIRST_PAGE)..=i64::from(LAST_PAGE)).contains(&target)
    }

    pub fn set_zoom(&mut self, requested: f64) {
        if requested.is_nan() {
            return;
        }
        let zoom = requested.clamp(MIN_ZOOM, MAX_ZOOM);
        self.mutate(|state| state.zoom_factor = zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.state.zoom_factor + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.state.zoom_factor - ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.set_zoom(DEFAULT_ZOOM);
    }

    pub fn show_landing(&mut self) {
        self.mutate(|state| state.landing_shown = true);
    }

    pub fn toggle_panel(&mut self) {
        self.mutate(|state| state.panel_visible = !state.panel_visible);
    }

    pub fn close_panel(&mut self) {
        self.mutate(|state| state.panel_visible = false);
    }

    /// Resize rule: the panel is shown on wide viewports and hidden on narrow ones.
    pub fn apply_viewport(&mut self, viewport: Viewport) {
        self.mutate(|state| state.panel_visible = viewport == Viewport::Wide);
    }

    /// Up to 25 page numbers centred on the current page, clipped to the booklet.
    pub fn quick_select_pages(&self) -> Vec<u32> {
        let half = i64::from(QUICK_SELECT_SPAN / 2);
        let current = i64::from(self.state.current_page);
        (current - half..=current + half)
            .filter(|page| (i64::from(FIRST_PAGE)..=i64::from(LAST_PAGE)).contains(page))
            .map(|page| page as u32)
            .collect()
    }

    fn mutate<F>(&mut self, apply: F)
    where
        F: FnOnce(&mut NavigationState),
    {
        let before = self.state.clone();
        apply(&mut self.state);
        if self.state == before {
            return;
        }

        debug!(
            "Navigation state changed: page {} zoom {} panel {} landing {}",
            self.state.current_page,
            self.state.zoom_factor,
            self.state.panel_visible,
            self.state.landing_shown
        );
        for observer in self.observers.iter_mut() {
            observer.on_change(&self.state);
        }
    }
}

fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}
