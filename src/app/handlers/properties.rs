//! Handler und Abfragen für das Eigenschaften-Panel.

use crate::app::EditorState;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Setzt eine Eigenschaft auf allen selektierten Objekten in einem Undo-Event.
pub fn set_property(state: &mut EditorState, prop: &str, value: Value) -> anyhow::Result<()> {
    let ids = state.selection.ids();
    if ids.is_empty() {
        log::debug!("Eigenschaft {}: keine Selektion", prop);
        return Ok(());
    }
    let mut data = Map::new();
    data.insert(prop.to_string(), value);
    let data = Value::Object(data);

    let session = &state.session;
    let event = session.begin_undo_event("prop set")?;
    if let [id] = ids.as_slice() {
        let _ = session.set_object_data(event, *id, data);
    } else {
        let datas = ids.iter().map(|id| (*id, data.clone())).collect();
        let _ = session.set_objects_datas(event, datas);
    }
    session.end_undo_event(event)?;
    log::debug!("Eigenschaft {} auf {} Objekte gesetzt", prop, ids.len());
    Ok(())
}

/// Gemeinsame Eigenschaften der Selektion.
///
/// `None`, wenn sich die Werte zwischen den Objekten unterscheiden. Geometrie
/// (`First`/`Second`) und der Typ gehören nicht dazu.
pub fn selection_properties(state: &EditorState) -> BTreeMap<String, Option<Value>> {
    let mut props: BTreeMap<String, Option<Value>> = BTreeMap::new();
    for id in &state.selection.selected {
        let Some(obj) = state.session.get_mesh(*id) else {
            continue;
        };
        let Some(Value::Object(meta)) = obj.metadata() else {
            continue;
        };
        for (key, value) in meta {
            if matches!(key.as_str(), "type" | "First" | "Second") {
                continue;
            }
            props
                .entry(key.clone())
                .and_modify(|known| {
                    if known.as_ref() != Some(value) {
                        *known = None;
                    }
                })
                .or_insert_with(|| Some(value.clone()));
        }
    }
    props
}

/// Überschrift für das Eigenschaften-Panel: `Wall`, `3 Walls` oder `3 Objects`.
pub fn selection_label(state: &EditorState) -> Option<String> {
    let count = state.selection.len();
    let mut types = state.selection.selected.iter().map(|id| {
        state
            .session
            .get_mesh(*id)
            .and_then(|obj| obj.object_type().map(str::to_string))
    });
    let first = types.next()?;
    let all_same = types.all(|t| t == first);

    Some(match (all_same, first) {
        (true, Some(kind)) if count == 1 => kind,
        (true, Some(kind)) => format!("{} {}s", count, kind),
        _ => format!("{} Objects", count),
    })
}
