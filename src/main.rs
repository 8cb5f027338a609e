//! Forge entrypoint: terminal setup and the synchronous editor loop.

use forge::backend::{
    ChatGenerator, CredentialPrompt, CredentialStore, FileKeyStore, SubprocessRunner,
};
use forge::input::Event;
use forge::render::{Renderer, Screen};
use forge::session::{Notice, Session};
use forge::terminal::{Terminal, TerminalPrompt};
use forge::{Dispatcher, EditorConfig, Outcome};

fn main() {
    forge::logging::init();
    let config = EditorConfig::default();

    let terminal = match Terminal::new() {
        Ok(terminal) => terminal,
        Err(e) => {
            eprintln!("forge: cannot initialize terminal: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(terminal, &config) {
        // Terminal state is restored by the guard's Drop before this prints.
        eprintln!("forge: {e}");
        std::process::exit(1);
    }
}

fn run(mut terminal: Terminal, config: &EditorConfig) -> forge::Result<()> {
    let width = terminal.width() as usize;
    let height = terminal.height() as usize;
    let mut screen = Screen::new(width, height);
    let renderer = Renderer::new(config.gutter_width);

    // Bottom row is the command/status bar.
    let mut session = Session::new(width, height.saturating_sub(1));

    let generator = ChatGenerator::new(&config.endpoint, &config.model);
    let runner = SubprocessRunner::new(&config.interpreter);
    let keystore = FileKeyStore::new(&config.credential_path);

    show_notice(&mut terminal, &renderer, &mut screen, &mut session, &welcome_notice())?;

    // Credential bootstrap: ask once up front so the first compile doesn't
    // stall on a prompt. The dispatcher re-prompts if the key goes missing.
    if keystore.load().is_none() {
        let mut prompt = TerminalPrompt::new(&mut terminal, &renderer, &mut screen);
        if let Some(key) = prompt.ask("Enter API key: ")? {
            if !key.trim().is_empty() {
                keystore.save(key.trim())?;
            }
        }
    }

    // Explicit initial pass: reconcile and render before any input arrives,
    // so the frame is visible from the first moment.
    session.reconcile();
    renderer.draw(&session, &mut screen);
    terminal.present(&screen)?;

    loop {
        match terminal.read_event()? {
            Event::Resize { width, height } => {
                let (width, height) = (width as usize, height as usize);
                screen.resize(width, height);
                session.resize(width, height.saturating_sub(1));
            }
            Event::Paste(text) => session.handle_paste(&text),
            Event::Key(key) => {
                if let Some(command) = session.handle_key(key) {
                    let mut prompt = TerminalPrompt::new(&mut terminal, &renderer, &mut screen);
                    let mut dispatcher = Dispatcher::new(
                        &generator,
                        &runner,
                        &keystore,
                        &mut prompt,
                        config.run_timeout,
                    );
                    match dispatcher.dispatch(&mut session, &command) {
                        Outcome::Continue => {}
                        Outcome::Notices(notices) => {
                            for notice in &notices {
                                show_notice(&mut terminal, &renderer, &mut screen, &mut session, notice)?;
                            }
                        }
                        Outcome::Exit => return Ok(()),
                    }
                }
            }
        }
        renderer.draw(&session, &mut screen);
        terminal.present(&screen)?;
    }
}

/// Display a full-screen notice and block until it is dismissed.
fn show_notice(
    terminal: &mut Terminal,
    renderer: &Renderer,
    screen: &mut Screen,
    session: &mut Session,
    notice: &Notice,
) -> forge::Result<()> {
    loop {
        renderer.draw_notice(notice, screen);
        terminal.present(screen)?;
        match terminal.read_event()? {
            Event::Key(key) => match notice.dismiss {
                None => return Ok(()),
                Some(c) if key.code == forge::KeyCode::Char(c) => return Ok(()),
                Some(_) => {}
            },
            Event::Resize { width, height } => {
                let (width, height) = (width as usize, height as usize);
                screen.resize(width, height);
                // Keep the editor viewport in step so the first frame after
                // the notice is dismissed is laid out for the new size.
                session.resize(width, height.saturating_sub(1));
            }
            Event::Paste(_) => {}
        }
    }
}

fn welcome_notice() -> Notice {
    Notice::new(
        "Welcome to forge",
        vec![
            "Edit a YAML spec in the buffer, then press ';' to enter a command.".to_string(),
            String::new(),
            ";compile turns the spec into code, ;run executes it, ;help lists the rest.".to_string(),
        ],
        "Press any key to start the editor.",
    )
}
