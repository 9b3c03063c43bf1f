use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fascicule::ui::{InputMode, SidebarEntry, viewport_for};
use fascicule::{App, AssetLayout, PageText, PageTextStore, Viewport};
use std::fs;
use ratatui::{Terminal, backend::TestBackend};
use tempfile::TempDir;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn create_test_app() -> (TempDir, App) {
    let temp_dir = TempDir::new().unwrap();
    let texts = PageTextStore::from_pages(vec![
        PageText {
            page: 11,
            text: "Exercice 1\nLe tableau périodique\nExercice 2\nNumero atomique".to_string(),
        },
        PageText {
            page: 12,
            text: "Exercice 3".to_string(),
        },
    ]);
    let app = App::new(AssetLayout::new(temp_dir.path()), Ok(texts));
    (temp_dir, app)
}

fn render_to_string(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut out = String::new();
    for row in buffer.content.chunks(usize::from(buffer.area.width)) {
        for cell in row {
            out.push_str(cell.symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn test_app_initialization() {
    let (_temp_dir, app) = create_test_app();

    assert_eq!(app.navigator().current_page(), 1);
    assert!(app.navigator().landing_shown());
    assert_eq!(app.input_mode(), &InputMode::Normal);
    assert_eq!(app.sidebar_selection(), SidebarEntry::Cover);
    assert!(app.needs_render());
}

#[test]
fn test_viewport_breakpoint() {
    assert_eq!(viewport_for(80), Viewport::Narrow);
    assert_eq!(viewport_for(99), Viewport::Narrow);
    assert_eq!(viewport_for(100), Viewport::Wide);
    assert_eq!(viewport_for(200), Viewport::Wide);
}

#[test]
fn test_resize_applies_panel_rule() {
    let (_temp_dir, mut app) = create_test_app();

    app.resize(160);
    assert!(app.navigator().panel_visible());
    app.resize(80);
    assert!(!app.navigator().panel_visible());
    assert_eq!(app.viewport(), Viewport::Narrow);
}

#[test]
fn test_page_keys() {
    let (_temp_dir, mut app) = create_test_app();

    app.handle_key(key(KeyCode::Right));
    assert_eq!(app.navigator().current_page(), 2);
    assert!(app.navigator().is_reading());

    app.handle_key(key(KeyCode::Char('l')));
    app.handle_key(key(KeyCode::Char('h')));
    app.handle_key(key(KeyCode::Left));
    assert_eq!(app.navigator().current_page(), 1);

    app.handle_key(key(KeyCode::Left));
    assert_eq!(app.navigator().current_page(), 1);
}

#[test]
fn test_zoom_keys() {
    let (_temp_dir, mut app) = create_test_app();

    app.handle_key(key(KeyCode::Char('+')));
    app.handle_key(key(KeyCode::Char('+')));
    assert_eq!(app.navigator().zoom_percent(), 150);
    app.handle_key(key(KeyCode::Char('-')));
    assert_eq!(app.navigator().zoom_percent(), 125);
    app.handle_key(key(KeyCode::Char('0')));
    assert_eq!(app.navigator().zoom_percent(), 100);
}

#[test]
fn test_page_entry() {
    let (_temp_dir, mut app) = create_test_app();

    app.handle_key(key(KeyCode::Char(':')));
    app.handle_key(key(KeyCode::Char('4')));
    app.handle_key(key(KeyCode::Char('x')));
    app.handle_key(key(KeyCode::Char('5')));
    assert_eq!(
        app.input_mode(),
        &InputMode::PageEntry {
            buffer: "45".to_string()
        }
    );
    // 'q' is not a quit key while typing
    assert!(app.handle_key(key(KeyCode::Char('q'))));

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.input_mode(), &InputMode::Normal);
    assert_eq!(app.navigator().current_page(), 45);
}

#[test]
fn test_page_entry_cancel() {
    let (_temp_dir, mut app) = create_test_app();

    app.handle_key(key(KeyCode::Char(':')));
    app.handle_key(key(KeyCode::Char('9')));
    app.handle_key(key(KeyCode::Esc));

    assert_eq!(app.input_mode(), &InputMode::Normal);
    assert!(app.navigator().landing_shown());
}

#[test]
fn test_sidebar_selection_opens_chapter() {
    let (_temp_dir, mut app) = create_test_app();
    app.resize(160);

    // Cover, Contents, C1, C2
    for _ in 0..3 {
        app.handle_key(key(KeyCode::Down));
    }
    match app.sidebar_selection() {
        SidebarEntry::Chapter(chapter) => assert_eq!(chapter.id, "c2"),
        other => panic!("Expected chapter c2, got: {:?}", other),
    }

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.navigator().current_page(), 11);
    assert_eq!(app.navigator().current_chapter().unwrap().id, "c2");
    assert!(app.navigator().panel_visible());
}

#[test]
fn test_sidebar_selection_collapses_on_narrow_terminal() {
    let (_temp_dir, mut app) = create_test_app();
    app.resize(80);
    app.handle_key(key(KeyCode::Char('m')));
    assert!(app.navigator().panel_visible());

    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.navigator().current_page(), 2);
    assert!(!app.navigator().panel_visible());
}

#[test]
fn test_enter_on_landing_starts_reading() {
    let (_temp_dir, mut app) = create_test_app();
    app.resize(80);

    app.handle_key(key(KeyCode::Enter));
    assert!(app.navigator().is_reading());
    assert_eq!(app.navigator().current_page(), 1);

    app.handle_key(key(KeyCode::Char('w')));
    assert!(app.navigator().landing_shown());
}

#[test]
fn test_quit_key() {
    let (_temp_dir, mut app) = create_test_app();
    assert!(app.handle_key(key(KeyCode::Char('j'))));
    assert!(!app.handle_key(key(KeyCode::Char('q'))));
}

#[test]
fn test_text_scroll_resets_on_page_change() {
    let (_temp_dir, mut app) = create_test_app();
    app.resize(80);
    app.handle_key(key(KeyCode::Char(':')));
    app.handle_key(key(KeyCode::Char('1')));
    app.handle_key(key(KeyCode::Char('1')));
    app.handle_key(key(KeyCode::Enter));

    for _ in 0..10 {
        app.handle_key(key(KeyCode::Char('j')));
    }
    assert_eq!(app.text_scroll(), 3);
    app.handle_key(key(KeyCode::Char('k')));
    assert_eq!(app.text_scroll(), 2);

    app.handle_key(key(KeyCode::Right));
    assert_eq!(app.text_scroll(), 0);
}

#[test]
fn test_missing_pdf_reported_in_status() {
    let (_temp_dir, mut app) = create_test_app();
    app.handle_key(key(KeyCode::Char('s')));
    app.handle_key(key(KeyCode::Char('d')));

    let status = app.status().expect("status message");
    assert!(status.contains("Asset not found"));
    assert!(status.contains("page_2.pdf"));

    app.handle_key(key(KeyCode::Right));
    assert!(app.status().is_none());
}

#[test]
fn test_render_landing() {
    let (_temp_dir, app) = create_test_app();
    let screen = render_to_string(&app, 120, 40);

    assert!(screen.contains("Sciences Physiques"));
    assert!(screen.contains("Bienvenue sur votre espace d'apprentissage"));
    assert!(screen.contains("Commencer la lecture"));
}

#[test]
fn test_render_reading_view() {
    let (_temp_dir, mut app) = create_test_app();
    app.resize(140);
    for c in [':', '1', '1'] {
        app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::Char('+')));

    let screen = render_to_string(&app, 140, 40);
    assert!(screen.contains("Page 11 du Fascicule"));
    assert!(screen.contains("125%"));
    assert!(screen.contains("Chapitre C2"));
    assert!(screen.contains("Le tableau périodique"));
    assert!(screen.contains("page_11.png"));
    assert!(screen.contains("CHIMIE"));
    assert!(screen.contains("PHYSIQUE"));
}

#[test]
fn test_render_page_without_chapter() {
    let (_temp_dir, mut app) = create_test_app();
    app.resize(80);
    app.handle_key(key(KeyCode::Char('c')));

    let screen = render_to_string(&app, 80, 30);
    assert!(screen.contains("Page 1 du Fascicule"));
    assert!(!screen.contains("Chapitre C"));
    assert!(screen.contains("Aucun texte disponible"));
}

#[test]
fn test_failed_text_load_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let layout = AssetLayout::new(temp_dir.path());
    let text_file = layout.text_file();
    fs::create_dir_all(text_file.parent().unwrap()).unwrap();
    fs::write(&text_file, r#"[{"page": 1, "text": "#).unwrap();

    let mut app = App::new(layout.clone(), PageTextStore::load(&text_file));
    assert!(app.text_error().is_some());
    assert!(app.status().unwrap().contains("Échec du chargement du texte"));

    app.resize(80);
    app.handle_key(key(KeyCode::Char('c')));
    let screen = render_to_string(&app, 80, 30);
    assert!(screen.contains("Texte indisponible"));
    assert!(!screen.contains("Aucun texte disponible"));

    // a page change clears the status line but not the failure in the page card
    app.handle_key(key(KeyCode::Right));
    assert!(app.status().is_none());
    let screen = render_to_string(&app, 80, 30);
    assert!(screen.contains("Texte indisponible"));
}

#[test]
fn test_missing_page_pdf_shown_in_page_card() {
    let (temp_dir, mut app) = create_test_app();
    fs::create_dir_all(temp_dir.path().join("fascicule_images")).unwrap();
    fs::write(temp_dir.path().join("fascicule_images/page_11.png"), b"png").unwrap();

    app.resize(140);
    for c in [':', '1', '1'] {
        app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Enter));

    let screen = render_to_string(&app, 140, 40);
    assert!(screen.contains("Asset not found"));
    assert!(screen.contains("page_11.pdf"));

    fs::create_dir_all(temp_dir.path().join("fascicule_pdfs")).unwrap();
    fs::write(temp_dir.path().join("fascicule_pdfs/page_11.pdf"), b"pdf").unwrap();
    let screen = render_to_string(&app, 140, 40);
    assert!(!screen.contains("Asset not found"));
    assert!(screen.contains("PDF:"));
}
