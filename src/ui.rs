use crate::assets::{AssetLayout, FULL_DOWNLOAD_NAME, page_download_name};
use crate::catalog::{ChapterRecord, Part};
use crate::constants::{
    CONTENTS_PAGE, COVER_PAGE, FOOTER_HEIGHT, HEADER_HEIGHT, LAST_PAGE,
    MAX_SIDEBAR_TITLE_GRAPHEMES, NARROW_VIEWPORT_COLUMNS, SIDEBAR_WIDTH,
};
use crate::error::{TextError, UiError};
use crate::navigator::{NavigationState, PageNavigator, Viewport};
use crate::text::PageTextStore;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};
use std::{cell::Cell, io, rc::Rc};
use tracing::{debug, info, warn};
use unicode_segmentation::UnicodeSegmentation;

pub fn viewport_for(columns: u16) -> Viewport {
    if columns < NARROW_VIEWPORT_COLUMNS {
        Viewport::Narrow
    } else {
        Viewport::Wide
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEntry {
    Cover,
    Contents,
    Chapter(&'static ChapterRecord),
}

impl SidebarEntry {
    fn target_page(self) -> u32 {
        match self {
            SidebarEntry::Cover => COVER_PAGE,
            SidebarEntry::Contents => CONTENTS_PAGE,
            SidebarEntry::Chapter(chapter) => chapter.start_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    PageEntry { buffer: String },
}

pub struct App {
    navigator: PageNavigator,
    assets: AssetLayout,
    texts: Option<PageTextStore>,
    text_error: Option<String>,
    sidebar: Vec<SidebarEntry>,
    sidebar_index: usize,
    input_mode: InputMode,
    text_scroll: u16,
    status: Option<String>,
    viewport: Viewport,
    needs_render: Rc<Cell<bool>>,
}

impl App {
    /// `texts` is the outcome of loading the page text; a failed load stays
    /// visible in the viewer instead of looking like pages without text.
    pub fn new(assets: AssetLayout, texts: Result<PageTextStore, TextError>) -> Self {
        let mut navigator = PageNavigator::default();
        let needs_render = Rc::new(Cell::new(true));
        let flag = Rc::clone(&needs_render);
        navigator.subscribe(move |_: &NavigationState| flag.set(true));

        let catalog = *navigator.catalog();
        let mut sidebar = vec![SidebarEntry::Cover, SidebarEntry::Contents];
        for part in [Part::Chemistry, Part::Physics] {
            sidebar.extend(
                catalog
                    .chapters_by_part(part)
                    .into_iter()
                    .map(SidebarEntry::Chapter),
            );
        }

        let (texts, text_error) = match texts {
            Ok(store) => (Some(store), None),
            Err(err) => {
                warn!("Page text unavailable: {}", err);
                (None, Some(err.to_string()))
            }
        };
        let status = text_error
            .as_ref()
            .map(|err| format!("Échec du chargement du texte: {}", err));

        Self {
            navigator,
            assets,
            texts,
            text_error,
            sidebar,
            sidebar_index: 0,
            input_mode: InputMode::Normal,
            text_scroll: 0,
            status,
            viewport: Viewport::Wide,
            needs_render,
        }
    }

    pub fn navigator(&self) -> &PageNavigator {
        &self.navigator
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn text_error(&self) -> Option<&str> {
        self.text_error.as_deref()
    }

    pub fn sidebar_selection(&self) -> SidebarEntry {
        self.sidebar[self.sidebar_index]
    }

    pub fn text_scroll(&self) -> u16 {
        self.text_scroll
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render.get()
    }

    pub fn run(&mut self) -> Result<(), UiError> {
        let mut terminal = Self::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        Self::cleanup_terminal(&mut terminal)?;
        result
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), UiError> {
        let size = terminal.size()?;
        self.resize(size.width);

        loop {
            if self.needs_render.replace(false) {
                terminal.draw(|f| self.render(f))?;
            }

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if !self.handle_key(key) {
                        break;
                    }
                }
                Event::Resize(columns, _) => self.resize(columns),
                _ => {}
            }
        }

        info!("Viewer closed on page {}", self.navigator.current_page());
        Ok(())
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, UiError> {
        enable_raw_mode()?;
        release_on_failure(Self::enter_alternate_screen(), || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            disable_raw_mode()
        })
    }

    fn enter_alternate_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>, UiError> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Ok(Terminal::new(backend)?)
    }

    fn cleanup_terminal(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<(), UiError> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Applies the panel resize rule for a terminal `columns` wide.
    pub fn resize(&mut self, columns: u16) {
        self.viewport = viewport_for(columns);
        self.navigator.apply_viewport(self.viewport);
        self.request_render();
    }

    /// Returns `false` when the viewer should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let page_before = self.navigator.current_page();

        let keep_running = match self.input_mode {
            InputMode::PageEntry { .. } => {
                self.handle_page_entry_key(key);
                true
            }
            InputMode::Normal => self.handle_normal_key(key),
        };

        if self.navigator.current_page() != page_before {
            self.text_scroll = 0;
            self.status = None;
        }
        keep_running
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        let viewport = self.viewport;
        match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Right | KeyCode::Char('l') => self.navigator.next_page(viewport),
            KeyCode::Left | KeyCode::Char('h') => self.navigator.previous_page(viewport),
            KeyCode::Char('+') | KeyCode::Char('=') => self.navigator.zoom_in(),
            KeyCode::Char('-') => self.navigator.zoom_out(),
            KeyCode::Char('0') => self.navigator.reset_zoom(),
            KeyCode::Char('m') => self.navigator.toggle_panel(),
            KeyCode::Char('w') => self.navigator.show_landing(),
            KeyCode::Char('c') => self.navigator.go_to_page(i64::from(COVER_PAGE), viewport),
            KeyCode::Char('s') => self.navigator.go_to_page(i64::from(CONTENTS_PAGE), viewport),
            KeyCode::Char(':') => {
                self.input_mode = InputMode::PageEntry {
                    buffer: String::new(),
                };
                self.request_render();
            }
            KeyCode::Char('d') => self.show_page_pdf(),
            KeyCode::Char('D') => self.show_full_pdf(),
            KeyCode::Down => self.move_sidebar_cursor(1),
            KeyCode::Up => self.move_sidebar_cursor(-1),
            KeyCode::Enter => {
                if self.navigator.panel_visible() {
                    self.select_sidebar_entry();
                } else if self.navigator.landing_shown() {
                    self.navigator.go_to_page(i64::from(COVER_PAGE), viewport);
                }
            }
            KeyCode::Char('j') => self.scroll_text(1),
            KeyCode::Char('k') => self.scroll_text(-1),
            KeyCode::Home => {
                self.text_scroll = 0;
                self.request_render();
            }
            _ => {}
        }
        true
    }

    fn handle_page_entry_key(&mut self, key: KeyEvent) {
        let InputMode::PageEntry { buffer } = &mut self.input_mode else {
            return;
        };

        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                let input = std::mem::take(buffer);
                self.input_mode = InputMode::Normal;
                debug!("Page entry submitted: {:?}", input);
                self.navigator.go_to_page_input(&input, self.viewport);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() && buffer.len() < 3 => buffer.push(c),
            _ => {}
        }
        self.request_render();
    }

    fn move_sidebar_cursor(&mut self, delta: isize) {
        if !self.navigator.panel_visible() {
            return;
        }
        let last = self.sidebar.len().saturating_sub(1);
        self.sidebar_index = self.sidebar_index.saturating_add_signed(delta).min(last);
        self.request_render();
    }

    fn select_sidebar_entry(&mut self) {
        let entry = self.sidebar[self.sidebar_index];
        if let SidebarEntry::Chapter(chapter) = entry {
            debug!("Opening chapter {} from the panel", chapter.id);
        }
        self.navigator
            .go_to_page(i64::from(entry.target_page()), self.viewport);
    }

    fn scroll_text(&mut self, delta: i32) {
        let line_count = self
            .current_text()
            .map(|text| text.lines().count())
            .unwrap_or(0);
        let max_scroll = u16::try_from(line_count.saturating_sub(1)).unwrap_or(u16::MAX);
        let next = (i32::from(self.text_scroll) + delta).clamp(0, i32::from(max_scroll));
        self.text_scroll = next as u16;
        self.request_render();
    }

    fn show_page_pdf(&mut self) {
        if !self.navigator.is_reading() {
            return;
        }
        let page = self.navigator.current_page();
        self.status = Some(match self.assets.resolve_page_pdf(page) {
            Ok(path) => format!("PDF: {} ({})", path.display(), page_download_name(page)),
            Err(err) => err.to_string(),
        });
        self.request_render();
    }

    fn show_full_pdf(&mut self) {
        self.status = Some(match self.assets.resolve_full_pdf() {
            Ok(path) => format!("PDF complet: {} ({})", path.display(), FULL_DOWNLOAD_NAME),
            Err(err) => err.to_string(),
        });
        self.request_render();
    }

    fn current_text(&self) -> Option<&str> {
        self.texts
            .as_ref()?
            .text_for_page(self.navigator.current_page())
    }

    fn request_render(&self) {
        self.needs_render.set(true);
    }

    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);

        let main_area = if self.navigator.panel_visible() {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .split(chunks[1]);
            self.render_sidebar(f, body[0]);
            body[1]
        } else {
            chunks[1]
        };

        if self.navigator.landing_shown() {
            Self::render_landing(f, main_area);
        } else {
            self.render_reading(f, main_area);
        }

        self.render_footer(f, chunks[2]);

        if let InputMode::PageEntry { buffer } = &self.input_mode {
            Self::render_page_entry(f, buffer);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let title_line = Line::from(vec![
            Span::styled(
                "Sciences Physiques",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   P. {}", self.navigator.current_page()),
                Style::default().fg(Color::LightBlue),
            ),
        ]);
        let subtitle = Line::from(Span::styled(
            "Fascicule Numérique",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));

        let header = Paragraph::new(vec![title_line, subtitle])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Cyan))
                    .padding(Padding::horizontal(1)),
            )
            .alignment(Alignment::Left);
        f.render_widget(header, area);
    }

    fn render_sidebar(&self, f: &mut Frame, area: Rect) {
        let current_id = self.navigator.current_chapter().map(|ch| ch.id);
        let reading = self.navigator.is_reading();

        let mut lines = vec![
            Line::from(Span::styled(
                "M. Doro Cissé",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Prof. Sciences Physiques, Lycée de Thiaroye",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                format!("PDF complet: {}", self.assets.full_pdf().display()),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Self::section_heading("Navigation Rapide", Color::White),
        ];

        let mut cursor_line = 0;
        let mut last_part = None;
        for (index, entry) in self.sidebar.iter().enumerate() {
            if let SidebarEntry::Chapter(chapter) = entry {
                if last_part != Some(chapter.part) {
                    last_part = Some(chapter.part);
                    lines.push(Line::from(""));
                    lines.push(Self::section_heading(chapter.part.label(), part_color(chapter.part)));
                }
            }

            let text = match entry {
                SidebarEntry::Cover => "  Couverture".to_string(),
                SidebarEntry::Contents => "  Sommaire".to_string(),
                SidebarEntry::Chapter(chapter) => {
                    format!("{:>4} {}", chapter.number, truncate_title(chapter.title))
                }
            };

            let mut style = match entry {
                SidebarEntry::Chapter(chapter)
                    if reading && current_id == Some(chapter.id) =>
                {
                    Style::default()
                        .fg(part_color(chapter.part))
                        .add_modifier(Modifier::BOLD)
                }
                _ => Style::default().fg(Color::Gray),
            };
            if index == self.sidebar_index {
                cursor_line = lines.len();
                style = style.add_modifier(Modifier::REVERSED);
            }
            lines.push(Line::from(Span::styled(text, style)));
        }

        let visible = usize::from(area.height.saturating_sub(2));
        let offset = (cursor_line + 1).saturating_sub(visible);
        let offset = u16::try_from(offset).unwrap_or(u16::MAX);

        let sidebar = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Blue))
                    .title("│ Chapitres ")
                    .padding(Padding::horizontal(1)),
            )
            .scroll((offset, 0));
        f.render_widget(sidebar, area);
    }

    fn section_heading(text: &str, color: Color) -> Line<'static> {
        Line::from(Span::styled(
            text.to_uppercase(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    }

    fn render_landing(f: &mut Frame, area: Rect) {
        let accent = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(Color::Gray);
        let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("Fascicule de Sciences Physiques", accent)),
            Line::from(""),
            Line::from(Span::styled(
                "Bienvenue sur votre espace d'apprentissage",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Un outil pédagogique numérique interactif conçu pour accompagner",
                muted,
            )),
            Line::from(Span::styled(
                "les élèves et enseignants dans l'étude des Sciences Physiques.",
                muted,
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} pages · Chimie et Physique · PDF par page", LAST_PAGE),
                muted,
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Entrée", key),
                Span::raw(" Commencer la lecture    "),
                Span::styled("s", key),
                Span::raw(" Voir le sommaire"),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Conception & Réalisation: M. Doro Cissé",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let landing = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(landing, area);
    }

    fn render_reading(&self, f: &mut Frame, area: Rect) {
        let page = self.navigator.current_page();
        let chapter = self.navigator.current_chapter();

        let card_area = match chapter {
            Some(chapter) => {
                let parts = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(0)])
                    .split(area);
                Self::render_chapter_banner(f, parts[0], chapter);
                parts[1]
            }
            None => area,
        };

        let label = Style::default().fg(Color::DarkGray);
        let image_line = match self.assets.resolve_page_image(page) {
            Ok(path) => Line::from(vec![
                Span::styled("Image: ", label),
                Span::raw(path.display().to_string()),
            ]),
            Err(err) => Line::from(Span::styled(err.to_string(), Style::default().fg(Color::Red))),
        };

        let pdf_line = match self.assets.resolve_page_pdf(page) {
            Ok(path) => Line::from(vec![
                Span::styled("PDF:   ", label),
                Span::raw(path.display().to_string()),
            ]),
            Err(err) => Line::from(Span::styled(err.to_string(), Style::default().fg(Color::Red))),
        };

        let mut lines = vec![image_line, pdf_line, Line::from("")];

        match (self.current_text(), &self.text_error) {
            (Some(text), _) => lines.extend(
                text.lines()
                    .skip(usize::from(self.text_scroll))
                    .map(|line| Line::from(line.to_string())),
            ),
            (None, Some(err)) => lines.push(Line::from(Span::styled(
                format!("Texte indisponible: échec du chargement ({})", err),
                Style::default().fg(Color::Red),
            ))),
            (None, None) => lines.push(Line::from(Span::styled(
                "Aucun texte disponible pour cette page.",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))),
        }

        let title = format!(
            "│ Page {} du Fascicule │ {}% ",
            page,
            self.navigator.zoom_percent()
        );
        let card = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Blue))
                    .title(title)
                    .title_style(
                        Style::default()
                            .fg(Color::LightBlue)
                            .add_modifier(Modifier::BOLD),
                    )
                    .padding(Padding::new(2, 1, 0, 0)),
            )
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false });
        f.render_widget(card, card_area);
    }

    fn render_chapter_banner(f: &mut Frame, area: Rect, chapter: &ChapterRecord) {
        let color = part_color(chapter.part);
        let banner = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("Chapitre {} ", chapter.number),
                Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                chapter.title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  (pages {}–{})", chapter.start_page, chapter.end_page),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::LEFT)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(color))
                .padding(Padding::new(1, 0, 1, 0)),
        );
        f.render_widget(banner, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let footer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2)])
            .split(area);

        let current = self.navigator.current_page();
        let mut strip = Vec::new();
        strip.push(Span::styled(
            "◀ ",
            Self::enabled_style(self.navigator.can_step(-1)),
        ));
        for page in self.navigator.quick_select_pages() {
            let style = if page == current {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            strip.push(Span::styled(format!("{}", page), style));
            strip.push(Span::raw(" "));
        }
        strip.push(Span::styled(
            "▶",
            Self::enabled_style(self.navigator.can_step(1)),
        ));

        let strip = Paragraph::new(Line::from(strip))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .alignment(Alignment::Center);
        f.render_widget(strip, footer_chunks[0]);

        let help = match &self.status {
            Some(message) => Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(vec![
                Span::styled(" q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled(":quitter ", Style::default().fg(Color::DarkGray)),
                Span::styled("←→", Style::default().fg(Color::Green)),
                Span::styled(":page ", Style::default().fg(Color::DarkGray)),
                Span::styled("+-", Style::default().fg(Color::Yellow)),
                Span::styled(":zoom ", Style::default().fg(Color::DarkGray)),
                Span::styled(":", Style::default().fg(Color::Magenta)),
                Span::styled(":aller à ", Style::default().fg(Color::DarkGray)),
                Span::styled("m", Style::default().fg(Color::Blue)),
                Span::styled(":chapitres ", Style::default().fg(Color::DarkGray)),
                Span::styled("d", Style::default().fg(Color::Cyan)),
                Span::styled(":pdf ", Style::default().fg(Color::DarkGray)),
                Span::styled("w", Style::default().fg(Color::Cyan)),
                Span::styled(":accueil", Style::default().fg(Color::DarkGray)),
            ]),
        };
        let footer = Paragraph::new(help)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .alignment(Alignment::Center);
        f.render_widget(footer, footer_chunks[1]);
    }

    fn enabled_style(enabled: bool) -> Style {
        if enabled {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn render_page_entry(f: &mut Frame, buffer: &str) {
        let area = f.area();
        let popup_width = 34u16.min(area.width);
        let popup_height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.width.saturating_sub(popup_width) / 2,
            y: area.height.saturating_sub(popup_height) / 2,
            width: popup_width,
            height: popup_height,
        };

        f.render_widget(Clear, popup_area);
        let input = Paragraph::new(format!("Aller à la page: {}█", buffer)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Yellow))
                .title(format!("1–{}", LAST_PAGE)),
        );
        f.render_widget(input, popup_area);
    }
}

/// Runs `release` when terminal setup failed part way, so raw mode never
/// outlives a viewer that did not start.
fn release_on_failure<T, F>(result: Result<T, UiError>, release: F) -> Result<T, UiError>
where
    F: FnOnce() -> io::Result<()>,
{
    if result.is_err() {
        release()?;
    }
    result
}

fn part_color(part: Part) -> Color {
    match part {
        Part::Chemistry => Color::Green,
        Part::Physics => Color::Blue,
    }
}

fn truncate_title(title: &str) -> String {
    let graphemes: Vec<&str> = title.graphemes(true).collect();
    if graphemes.len() > MAX_SIDEBAR_TITLE_GRAPHEMES {
        let kept: String = graphemes[..MAX_SIDEBAR_TITLE_GRAPHEMES - 1].concat();
        format!("{}…", kept)
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_runs_when_setup_fails() {
        let mut released = false;
        let result: Result<(), UiError> = release_on_failure(
            Err(UiError::from(io::Error::other("alternate screen refused"))),
            || {
                released = true;
                Ok(())
            },
        );

        assert!(released);
        assert!(result.unwrap_err().to_string().contains("alternate screen refused"));
    }

    #[test]
    fn test_release_skipped_when_setup_succeeds() {
        let mut released = false;
        let result = release_on_failure(Ok(7), || {
            released = true;
            Ok(())
        });

        assert!(!released);
        assert_eq!(result.unwrap(), 7);
    }
}
