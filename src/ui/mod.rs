//! Eingabe-Schicht: übersetzt Host-Ereignisse (Zeiger, Tasten) in `AppIntent`s.
//!
//! Keyboard-Shortcuts und Zeiger-Logik sind in eigene Module aufgeteilt.

pub mod input;
pub mod keyboard;

pub use input::{InputEvent, InputState, PointerButton};
pub use keyboard::{collect_keyboard_intents, Key, KeyEvent};
