//! FLX-Editor (headless).
//!
//! Verbindet sich mit dem Kernel-Server und spielt ein Eingabe-Skript ab:
//! eine JSON-Zeile je Host-Ereignis (`InputEvent`). Am Ende wird eine
//! kurze Zusammenfassung der Szene ausgegeben.
//!
//! Aufruf: `flx-editor <skript.jsonl> [ws://server/ws]`

use anyhow::Context;
use flx_editor::app::handlers::properties::selection_label;
use flx_editor::ui::{InputEvent, InputState};
use flx_editor::{
    AppIntent, EditorController, EditorOptions, EditorState, SceneGraph, Session, UserId,
};
use std::io::BufRead;
use std::time::Duration;

/// Ruhige Runden ohne Kernel-Nachricht, bevor die Zusammenfassung folgt.
const SETTLE_ROUNDS: u32 = 5;
const SETTLE_INTERVAL: Duration = Duration::from_millis(20);

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("FLX-Editor v{} startet...", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let script_path = args
        .next()
        .context("Kein Skript angegeben. Aufruf: flx-editor <skript.jsonl> [server-url]")?;

    // Optionen aus TOML laden (oder Standardwerte)
    let config_path = EditorOptions::config_path();
    let mut options = EditorOptions::load_from_file(&config_path);
    if let Some(url) = args.next() {
        options.server_url = Some(url);
    }

    let mut runner = ScriptRunner::connect(options)?;
    runner.run_file(std::path::Path::new(&script_path))?;
    runner.settle();
    runner.print_summary();

    Ok(())
}

/// Spielt Eingabe-Skripte gegen eine Session ab.
struct ScriptRunner {
    state: EditorState,
    controller: EditorController,
    input: InputState,
}

impl ScriptRunner {
    fn connect(options: EditorOptions) -> anyhow::Result<Self> {
        let server_url = options
            .server_url
            .clone()
            .context("Keine server_url konfiguriert (flx_editor.toml oder zweites Argument)")?;

        let session = Session::connect(&server_url, Box::new(SceneGraph::new()), UserId::new())
            .with_context(|| format!("Kernel-Server {} nicht erreichbar", server_url))?;

        let mut runner = Self {
            state: EditorState::new(session, options),
            controller: EditorController::new(),
            input: InputState::new(),
        };
        runner.process_intents(vec![AppIntent::NewFileRequested { file: None }]);
        Ok(runner)
    }

    fn run_file(&mut self, path: &std::path::Path) -> anyhow::Result<()> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Skript {} nicht lesbar", path.display()))?;

        for (index, line) in std::io::BufReader::new(file).lines().enumerate() {
            let line = line.context("Skript konnte nicht gelesen werden")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let event: InputEvent = match serde_json::from_str(line) {
                Ok(event) => event,
                Err(e) => {
                    log::warn!("Zeile {} übersprungen: {}", index + 1, e);
                    continue;
                }
            };

            let intents = self.input.collect_intents(&event);
            self.process_intents(intents);

            if self.state.should_exit {
                log::info!("Beenden angefordert in Zeile {}", index + 1);
                break;
            }
        }

        Ok(())
    }

    fn process_intents(&mut self, intents: Vec<AppIntent>) {
        for intent in intents {
            if let Err(e) = self
                .controller
                .handle_intent_blocking(&mut self.state, intent)
            {
                log::error!("Event handling failed: {:#}", e);
            }
        }
    }

    /// Übernimmt Nachrichten, die der Server nach dem letzten Ereignis noch schickt.
    fn settle(&mut self) {
        let mut quiet = 0;
        while quiet < SETTLE_ROUNDS {
            if self.controller.apply_updates(&mut self.state) == 0 {
                quiet += 1;
                std::thread::sleep(SETTLE_INTERVAL);
            } else {
                quiet = 0;
            }
        }
    }

    fn print_summary(&self) {
        let file = self
            .state
            .session
            .file()
            .unwrap_or_else(|| "(keine Datei)".to_string());
        println!("Datei:      {}", file);
        println!("Objekte:    {}", self.state.object_count());
        println!(
            "Selektion:  {}",
            selection_label(&self.state).unwrap_or_else(|| "-".to_string())
        );
        println!("Commands:   {}", self.state.command_log.len());
    }
}
