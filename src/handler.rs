use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, InputMode};
use crate::topic::Topic;
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => {
            app.tick_animation();
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('q') => app.should_quit = true,

        // Start editing the draft
        KeyCode::Char('i') | KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
            // Cursor at end of existing text
            app.cursor_end();
        }

        // Send the draft as-is
        KeyCode::Enter => app.submit_draft(),

        // Topic chips by number, in on-screen order
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as u8 - b'1') as usize;
            if let Some(&topic) = Topic::all().get(idx) {
                app.pick_topic(topic);
            }
        }

        // Transcript scrolling
        KeyCode::Char('j') | KeyCode::Down => {
            app.chat_scroll = app.chat_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.chat_scroll = app.chat_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => {
            app.chat_scroll = 0;
        }
        KeyCode::Char('G') => {
            app.scroll_chat_to_bottom();
        }

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        // Sending keeps the input focused so a follow-up can be typed right away
        KeyCode::Enter => app.submit_draft(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete_char(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    match mouse.kind {
        // Clicking a chip sends the draft with that topic attached
        MouseEventKind::Down(MouseButton::Left) => {
            let hit = app
                .chip_areas
                .iter()
                .find(|(_, rect)| point_in_rect(x, y, *rect))
                .map(|(topic, _)| *topic);
            if let Some(topic) = hit {
                app.pick_topic(topic);
            }
        }

        MouseEventKind::ScrollDown => {
            let in_chat = app.chat_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
            if in_chat {
                app.chat_scroll = app.chat_scroll.saturating_add(3);
            }
        }
        MouseEventKind::ScrollUp => {
            let in_chat = app.chat_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
            if in_chat {
                app.chat_scroll = app.chat_scroll.saturating_sub(3);
            }
        }

        _ => {}
    }
}
