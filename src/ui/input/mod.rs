//! Viewport-Input-Handling: Zeiger- und Tastenereignisse → AppIntent.
//!
//! Der Host (Renderer) meldet Positionen im Grafikraum. Alle Intents tragen
//! Modellraum-Koordinaten; die Umrechnung passiert hier und nur hier.

use super::keyboard::{collect_keyboard_intents, KeyEvent};
use crate::app::{AppIntent, EditorTool};
use crate::core::{graphic_to_model, ObjectId};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Maustaste eines Klicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
}

/// Ereignis des Hosts, wie es auch in Skripten steht (eine JSON-Zeile je Ereignis).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    /// Klick auf den Boden; `hit` ist das getroffene Objekt (Boden = keins)
    Click {
        #[serde(default)]
        button: PointerButton,
        pos: [f64; 3],
        #[serde(default)]
        hit: Option<ObjectId>,
    },
    /// Zeigerbewegung
    PointerMove {
        pos: [f64; 3],
        #[serde(default)]
        hit: Option<ObjectId>,
    },
    /// Ziehen an einem Objekt, `delta` seit dem letzten Frame
    Drag { hit: ObjectId, delta: [f64; 3] },
    /// Ziehen beendet
    DragEnd,
    /// Taste gedrückt oder losgelassen
    Key(KeyEvent),
    /// Werkzeug-Schaltfläche
    Tool { tool: EditorTool },
}

/// Verwaltet den Input-Zustand für das Viewport.
#[derive(Debug, Default)]
pub struct InputState {
    /// Letzte Zeigerposition im Modellraum
    last_pointer: DVec3,
    dragging: bool,
}

impl InputState {
    /// Erstellt einen neuen, leeren Input-Zustand.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_pointer(&self) -> DVec3 {
        self.last_pointer
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Übersetzt ein Host-Ereignis in AppIntents.
    pub fn collect_intents(&mut self, event: &InputEvent) -> Vec<AppIntent> {
        let mut events = Vec::new();

        match event {
            InputEvent::Click { button, pos, hit } => {
                let pos = to_model(*pos);
                self.last_pointer = pos;
                let hovered = *hit;
                events.push(match button {
                    PointerButton::Primary => AppIntent::ViewportClicked { pos, hovered },
                    PointerButton::Secondary => AppIntent::ViewportRightClicked { pos, hovered },
                });
            }
            InputEvent::PointerMove { pos, hit } => {
                let pos = to_model(*pos);
                self.last_pointer = pos;
                events.push(AppIntent::PointerMoved { pos, hovered: *hit });
            }
            InputEvent::Drag { hit, delta } => {
                self.dragging = true;
                events.push(AppIntent::ObjectDragged {
                    id: *hit,
                    delta: to_model(*delta),
                });
            }
            InputEvent::DragEnd => {
                if std::mem::take(&mut self.dragging) {
                    events.push(AppIntent::ObjectDragEnded);
                }
            }
            InputEvent::Key(key) => events.extend(collect_keyboard_intents(key)),
            InputEvent::Tool { tool } => events.push(AppIntent::ToolSelected { tool: *tool }),
        }

        events
    }
}

/// Grafikraum → Modellraum (gilt für Punkte und Verschiebungen).
fn to_model(v: [f64; 3]) -> DVec3 {
    graphic_to_model(DVec3::from_array(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::keyboard::Key;

    #[test]
    fn test_click_converts_graphic_to_model_space() {
        let mut input = InputState::new();
        let intents = input.collect_intents(&InputEvent::Click {
            button: PointerButton::Primary,
            pos: [1.0, 0.0, -2.0],
            hit: None,
        });

        assert_eq!(
            intents,
            vec![AppIntent::ViewportClicked {
                pos: DVec3::new(1.0, 2.0, 0.0),
                hovered: None
            }]
        );
        assert_eq!(input.last_pointer(), DVec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_secondary_click_maps_to_right_click() {
        let mut input = InputState::new();
        let id = ObjectId::new();
        let intents = input.collect_intents(&InputEvent::Click {
            button: PointerButton::Secondary,
            pos: [0.0, 0.0, 0.0],
            hit: Some(id),
        });

        assert!(matches!(
            intents.as_slice(),
            [AppIntent::ViewportRightClicked { hovered: Some(h), .. }] if *h == id
        ));
    }

    #[test]
    fn test_drag_end_without_drag_is_ignored() {
        let mut input = InputState::new();
        assert!(input.collect_intents(&InputEvent::DragEnd).is_empty());

        let id = ObjectId::new();
        input.collect_intents(&InputEvent::Drag {
            hit: id,
            delta: [0.0, 0.0, -1.0],
        });
        assert!(input.is_dragging());
        assert_eq!(
            input.collect_intents(&InputEvent::DragEnd),
            vec![AppIntent::ObjectDragEnded]
        );
        assert!(!input.is_dragging());
    }

    #[test]
    fn test_script_line_parses() {
        let line = r#"{"event":"click","pos":[3.0,0.0,-4.0]}"#;
        let event: InputEvent = serde_json::from_str(line).expect("gültige Skriptzeile");
        assert_eq!(
            event,
            InputEvent::Click {
                button: PointerButton::Primary,
                pos: [3.0, 0.0, -4.0],
                hit: None
            }
        );

        let key: InputEvent =
            serde_json::from_str(r#"{"event":"key","key":"z","command":true}"#).expect("Taste");
        assert_eq!(
            key,
            InputEvent::Key(KeyEvent {
                key: Key::Z,
                pressed: true,
                command: true
            })
        );
    }
}
