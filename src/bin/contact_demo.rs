//! Interactive runner for the contact form.
//!
//! Keys: Tab / Shift-Tab move focus, typing edits the focused field, Space
//! toggles checkboxes, arrows cycle selects, Enter submits, Ctrl+R resets,
//! Ctrl+C quits.

use std::error::Error;
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{cursor, execute};

use spark_forms::pages::contact::ContactPage;
use spark_forms::pages::EditKey;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut page = ContactPage::new()?;

    enable_raw_mode()?;
    let outcome = run(&mut page);
    disable_raw_mode()?;
    outcome
}

fn run(page: &mut ContactPage) -> Result<(), Box<dyn Error>> {
    let mut out = stdout();

    loop {
        page.tick(Instant::now());

        execute!(out, cursor::MoveTo(0, 0), Clear(ClearType::All))?;
        for line in page.render() {
            out.write_all(line.as_bytes())?;
            out.write_all(b"\r\n")?;
        }
        out.write_all(b"\r\nTab: focus | Enter: submit | Ctrl+R: reset | Ctrl+C: quit\r\n")?;
        out.flush()?;

        if !poll(Duration::from_millis(16))? {
            continue;
        }
        let Event::Key(key) = read()? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => page.reset(),
            (KeyCode::Tab, _) => page.focus_next(),
            (KeyCode::BackTab, _) => page.focus_previous(),
            (KeyCode::Enter, _) => {
                page.submit();
            }
            (KeyCode::Backspace, _) => page.handle_key(EditKey::Backspace)?,
            (KeyCode::Up, _) => page.handle_key(EditKey::Up)?,
            (KeyCode::Down, _) => page.handle_key(EditKey::Down)?,
            (KeyCode::Left, _) => page.handle_key(EditKey::Left)?,
            (KeyCode::Right, _) => page.handle_key(EditKey::Right)?,
            (KeyCode::Char(' '), _) => page.handle_key(EditKey::Space)?,
            (KeyCode::Char(c), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
                page.handle_key(EditKey::Char(c))?
            }
            _ => {}
        }
    }

    Ok(())
}
