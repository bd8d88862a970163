use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::mpsc;

use swipedeck_core::{AppConfig, Deck};
use swipedeck_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler, ImageLoadResult},
    images::download_image,
    input::{handle_key_event, Action},
    keymap::Keymap,
    load_theme,
    widgets::{
        CardStackWidget, FooterWidget, HeaderWidget, PaginationWidget, PopupWidget,
        StatusBarWidget, CURRENT_USER_AVATAR_URL, GROUP_ICON_URL, PROFILE_AVATAR_URL,
    },
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Load the deck before touching the terminal: an unusable deck (empty,
    // malformed file) must fail fast with a plain error message
    let deck = match config.deck_path() {
        Some(path) => Deck::from_path(&path)?,
        None => Deck::builtin(),
    };

    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(config.clone(), theme, deck)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle("Swipedeck")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create event handler with animation FPS support
    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    // Disk-backed image cache under the configured data_dir
    let data_dir = Some(config.data_dir());
    app.init_image_cache(data_dir.as_ref());

    // Channel for async image loading results
    let (img_tx, mut img_rx) = mpsc::unbounded_channel::<ImageLoadResult>();

    // Checked at the END of each iteration to pick the NEXT iteration's
    // tick rate, so animations get frames right after a swipe starts
    let mut needs_fast_update = false;
    let mut last_frame = Instant::now();

    // Main loop
    loop {
        // Process any completed image loads (non-blocking)
        while let Ok(result) = img_rx.try_recv() {
            handle_image_result(&mut app, result);
        }

        // Kick off loads for visible cards and the shell avatars
        if app.config.ui.image_preview {
            request_images(&mut app, &img_tx);
        }

        // Advance engine and dot springs by the measured frame delta
        let now = Instant::now();
        let dt = now.duration_since(last_frame);
        last_frame = now;
        app.advance(dt);

        // Draw UI
        terminal.draw(|frame| {
            let size = frame.area();
            app.viewport_height = size.height;

            // Full-bleed background behind the card stack
            frame.render_widget(
                Block::default().style(Style::default().bg(app.theme.bg0)),
                size,
            );

            // Main layout: content + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);
            let content = main_layout[0];

            // Card stack is the background layer; pagination overlays its
            // right edge; header and footer always sit on top
            CardStackWidget::render(frame, content, &mut app);
            PaginationWidget::render(frame, content, &app);

            if content.height > HeaderWidget::HEIGHT {
                let header_area =
                    Rect::new(content.x, content.y, content.width, HeaderWidget::HEIGHT);
                HeaderWidget::render(frame, header_area, &mut app);
            }
            if content.height > HeaderWidget::HEIGHT + FooterWidget::HEIGHT {
                let footer_area = Rect::new(
                    content.x,
                    content.y + content.height - FooterWidget::HEIGHT,
                    content.width,
                    FooterWidget::HEIGHT,
                );
                FooterWidget::render(frame, footer_area, &mut app);
            }

            StatusBarWidget::render(frame, main_layout[1], &app);

            if app.mode == Mode::Help {
                PopupWidget::render_help(frame, &app.config.keymap, &app.theme);
            }
        })?;

        // Handle events (use faster tick rate during animations)
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app, &keymap);
                    handle_action(&mut app, action);
                }
                AppEvent::Mouse(mouse) => {
                    app.on_mouse(mouse, Instant::now());
                }
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        // Update fast update flag for next iteration
        needs_fast_update = app.needs_fast_update() || app.engine.is_dragging();

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

/// Apply a key action to the app
fn handle_action(app: &mut App, action: Action) {
    // A pending 'g' only survives into the immediately following key
    app.pending_key = None;

    match action {
        Action::Quit => app.should_quit = true,
        Action::NextCard => app.next_card(),
        Action::PrevCard => app.prev_card(),
        Action::FirstCard => app.first_card(),
        Action::LastCard => app.last_card(),
        Action::PendingG => app.pending_key = Some('g'),
        Action::ToggleLooping => app.toggle_looping(),
        Action::ToggleHelp => app.toggle_help(),
        Action::ExitMode => app.exit_mode(),
        Action::None => {}
    }
}

/// Queue downloads for every image the current frame could need: the active
/// card, its neighbors in the stack, and the fixed shell avatars
fn request_images(app: &mut App, tx: &mpsc::UnboundedSender<ImageLoadResult>) {
    let n = app.deck.len() as i64;
    let current = app.engine.current_index() as i64;

    let mut urls: Vec<String> = Vec::new();
    for step in -1..=2i64 {
        let index = (current + step).rem_euclid(n) as usize;
        if let Some(card) = app.deck.get(index) {
            urls.push(card.image_url.clone());
        }
    }
    urls.push(PROFILE_AVATAR_URL.to_string());
    urls.push(GROUP_ICON_URL.to_string());
    urls.push(CURRENT_USER_AVATAR_URL.to_string());

    for url in urls {
        if app.images.is_ready(&url) || app.images.is_loading(&url) || app.images.is_failed(&url)
        {
            continue;
        }
        // Disk cache hit avoids the network entirely
        if app.images.try_load_from_disk(&url) {
            continue;
        }
        app.images.start_loading(&url);
        spawn_image_load(url, tx.clone());
    }
}

/// Spawn an async task to download and decode one image
fn spawn_image_load(url: String, tx: mpsc::UnboundedSender<ImageLoadResult>) {
    tokio::spawn(async move {
        match download_image(&url).await {
            Ok((bytes, image)) => {
                let _ = tx.send(ImageLoadResult::Success { url, image, bytes });
            }
            Err(error) => {
                tracing::debug!("image load failed for {}: {}", url, error);
                let _ = tx.send(ImageLoadResult::Failure { url, error });
            }
        }
    });
}

/// Handle completed image load result
fn handle_image_result(app: &mut App, result: ImageLoadResult) {
    match result {
        ImageLoadResult::Success { url, image, bytes } => {
            if !bytes.is_empty() {
                app.images.save_to_disk(&url, &bytes);
            }
            app.images.set_loaded(&url, image);
        }
        ImageLoadResult::Failure { url, error } => {
            app.images.set_failed(&url, error);
        }
    }
}
