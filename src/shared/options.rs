//! Zentrale Konfiguration für den FLX-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Datei ───────────────────────────────────────────────────────────

/// Dateiname für neue, noch ungespeicherte Dokumente.
pub const DEFAULT_FILENAME: &str = "defaultNew.flx";

// ── Wand ────────────────────────────────────────────────────────────

/// Standard-Wandstärke in Metern.
pub const WALL_WIDTH: f64 = 1.0;
/// Standard-Wandhöhe in Metern.
pub const WALL_HEIGHT: f64 = 5.0;

// ── Tür ─────────────────────────────────────────────────────────────

/// Standard-Türbreite (Tiefe in der Wand).
pub const DOOR_WIDTH: f64 = 1.0;
/// Standard-Türhöhe.
pub const DOOR_HEIGHT: f64 = 4.0;
/// Standard-Türlänge entlang der Wand.
pub const DOOR_LENGTH: f64 = 2.0;

// ── Bemaßung / Decke ────────────────────────────────────────────────

/// Seitlicher Versatz der Bemaßungslinie.
pub const DIMENSION_OFFSET: f64 = 5.0;
/// Standard-Deckenstärke.
pub const SLAB_THICKNESS: f64 = 0.3;

// ── Vorschau ────────────────────────────────────────────────────────

/// Zweiter Punkt der ersten Vorschau relativ zum Klickpunkt.
pub const PREVIEW_OFFSET: [f64; 3] = [1.0, 1.0, 0.0];
/// Zweiter Punkt einer Ketten-Vorschau (Wand) relativ zum Klickpunkt.
pub const CHAIN_PREVIEW_OFFSET: [f64; 3] = [0.1, 0.1, 0.0];

// ── Zwischenablage ──────────────────────────────────────────────────

/// Versatz eingefügter Kopien (nie Null, sonst liegen Kopien deckungsgleich).
pub const PASTE_OFFSET: [f64; 3] = [5.0, 5.0, 0.0];

// ── Protokoll ───────────────────────────────────────────────────────

/// Maximale Anzahl Einträge im Command-Log.
pub const COMMAND_LOG_CAPACITY: usize = 1000;

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `flx_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Datei / Verbindung ──────────────────────────────────────
    /// Dateiname für neue Dokumente
    pub default_filename: String,
    /// WebSocket-Endpunkt des Kernel-Servers (z.B. `ws://127.0.0.1:8080/ws`)
    #[serde(default)]
    pub server_url: Option<String>,

    // ── Werkzeuge ───────────────────────────────────────────────
    pub wall_width: f64,
    pub wall_height: f64,
    pub door_width: f64,
    pub door_height: f64,
    pub door_length: f64,
    pub dimension_offset: f64,
    #[serde(default = "default_slab_thickness")]
    pub slab_thickness: f64,
    /// Zweiter Vorschaupunkt beim Start eines Werkzeugs
    pub preview_offset: [f64; 3],
    /// Zweiter Vorschaupunkt beim Fortsetzen einer Wandkette
    pub chain_preview_offset: [f64; 3],

    // ── Zwischenablage ──────────────────────────────────────────
    /// Versatz für eingefügte Kopien
    pub paste_offset: [f64; 3],

    // ── Protokoll ───────────────────────────────────────────────
    #[serde(default = "default_command_log_capacity")]
    pub command_log_capacity: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            default_filename: DEFAULT_FILENAME.to_string(),
            server_url: None,

            wall_width: WALL_WIDTH,
            wall_height: WALL_HEIGHT,
            door_width: DOOR_WIDTH,
            door_height: DOOR_HEIGHT,
            door_length: DOOR_LENGTH,
            dimension_offset: DIMENSION_OFFSET,
            slab_thickness: SLAB_THICKNESS,
            preview_offset: PREVIEW_OFFSET,
            chain_preview_offset: CHAIN_PREVIEW_OFFSET,

            paste_offset: PASTE_OFFSET,

            command_log_capacity: COMMAND_LOG_CAPACITY,
        }
    }
}

/// Serde-Default für `slab_thickness` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_slab_thickness() -> f64 {
    SLAB_THICKNESS
}

fn default_command_log_capacity() -> usize {
    COMMAND_LOG_CAPACITY
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("flx-editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("flx_editor.toml")
    }

    /// Versatz für eingefügte Kopien als Vektor. Ein Null-Versatz fällt auf den Standard zurück.
    pub fn paste_delta(&self) -> glam::DVec3 {
        let delta = glam::DVec3::from_array(self.paste_offset);
        if delta.length_squared() <= f64::EPSILON {
            glam::DVec3::from_array(PASTE_OFFSET)
        } else {
            delta
        }
    }
}
