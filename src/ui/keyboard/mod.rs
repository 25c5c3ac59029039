//! Keyboard-Shortcuts für den Viewport.
//!
//! Verarbeitet Tastenereignisse des Hosts und mappt sie auf `AppIntent`s.

use crate::app::AppIntent;
use serde::{Deserialize, Serialize};


/// Vom Editor ausgewertete Tasten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Z,
    Y,
    C,
    V,
    Delete,
    Escape,
    /// Ctrl bzw. Cmd (plattformabhängige Modifier-Taste)
    Mod,
    Shift,
}

/// Einzelnes Tastenereignis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    /// `true` beim Drücken, `false` beim Loslassen
    #[serde(default = "pressed_default")]
    pub pressed: bool,
    /// Mod-Taste war beim Ereignis gedrückt
    #[serde(default)]
    pub command: bool,
}

fn pressed_default() -> bool {
    true
}

/// Verarbeitet ein Tastenereignis und gibt AppIntents zurück.
///
/// Modifier erzeugen Intents beim Drücken und Loslassen, alle anderen
/// Tasten nur beim Drücken.
pub fn collect_keyboard_intents(event: &KeyEvent) -> Vec<AppIntent> {
    let mut events = Vec::new();

    match event.key {
        Key::Mod => events.push(AppIntent::CtrlChanged {
            down: event.pressed,
        }),
        Key::Shift => events.push(AppIntent::ShiftChanged {
            down: event.pressed,
        }),
        _ if !event.pressed => {}
        Key::Z if event.command => events.push(AppIntent::UndoRequested),
        Key::Y if event.command => events.push(AppIntent::RedoRequested),
        Key::C if event.command => events.push(AppIntent::CopyRequested),
        Key::V if event.command => events.push(AppIntent::PasteRequested),
        Key::Delete => events.push(AppIntent::DeleteRequested),
        Key::Escape => events.push(AppIntent::EscapePressed),
        _ => {}
    }

    events
}
