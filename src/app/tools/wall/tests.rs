use super::super::{EditTool, ToolSettings};
use super::WallTool;
use crate::app::test_support::{fake_session, flush};
use crate::core::{DataObject, Point3d, UndoEventId, Wall};
use crate::transport::KernelCall;
use futures::executor::block_on;
use glam::DVec3;

fn tool() -> WallTool {
    WallTool::new(&ToolSettings::default())
}

#[test]
fn test_first_click_only_renders_preview() {
    let (session, kernel) = fake_session();
    let mut tool = tool();

    block_on(tool.on_mouse_down(&session, DVec3::new(2.0, 3.0, 7.0), None)).expect("Klick");

    assert!(tool.has_preview());
    assert!(kernel.borrow().calls.is_empty());
    let preview = tool.preview().unwrap();
    assert_eq!(preview.first, DVec3::new(2.0, 3.0, 0.0));
    assert_eq!(preview.second, DVec3::new(3.0, 4.0, 0.0));
    let rendered = session.get_mesh(preview.id()).expect("Vorschau gerendert");
    assert!(rendered.temporary);
}

#[test]
fn test_wall_chain_commits_and_auto_joins() {
    let (session, kernel) = fake_session();
    let mut tool = tool();
    let p0 = DVec3::ZERO;
    let p1 = DVec3::new(10.0, 0.0, 0.0);
    let p2 = DVec3::new(10.0, 10.0, 0.0);

    block_on(tool.on_mouse_down(&session, p0, None)).expect("Klick 1");
    let first_id = tool.preview().unwrap().id();

    block_on(tool.on_mouse_down(&session, p1, None)).expect("Klick 2");
    assert_eq!(kernel.borrow().names(), vec!["begin_undo_event", "add_object"]);
    assert_eq!(tool.last_id(), Some(first_id));
    match &kernel.borrow().calls[1] {
        KernelCall::AddObject { object, .. } => {
            assert_eq!(object.obj["first_pt"]["geom"]["pt"]["x"], 0.0);
            assert_eq!(object.obj["second_pt"]["geom"]["pt"]["x"], 10.0);
        }
        other => panic!("add_object erwartet, erhalten: {:?}", other),
    }

    let second_id = tool.preview().unwrap().id();
    assert_ne!(second_id, first_id);

    block_on(tool.on_mouse_down(&session, p2, None)).expect("Klick 3");
    let k = kernel.borrow();
    assert_eq!(
        k.names(),
        vec!["begin_undo_event", "add_object", "add_object", "join_at_points"]
    );
    match &k.calls[3] {
        KernelCall::JoinAtPoints { id_1, id_2, pt, .. } => {
            assert_eq!(*id_1, first_id);
            assert_eq!(*id_2, second_id);
            assert_eq!(*pt, Point3d::new(10.0, 0.0, 0.0));
        }
        other => panic!("join_at_points erwartet, erhalten: {:?}", other),
    }
    // Alle Segmente im selben Event
    let events: Vec<UndoEventId> = k.calls.iter().filter_map(KernelCall::event).collect();
    assert!(events.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_commit_on_foreign_wall_joins_second_point() {
    let (session, kernel) = fake_session();

    // Fremde Wand direkt anlegen und bestätigen lassen
    let event = session.begin_undo_event("Setup").expect("begin");
    let foreign = Wall::new(DVec3::new(5.0, -5.0, 0.0), DVec3::new(5.0, 5.0, 0.0), 1.0, 5.0);
    let _ = session.create_obj(event, &foreign);
    session.end_undo_event(event).expect("end");
    flush(&session, &kernel);
    kernel.borrow_mut().calls.clear();
    let hovered = session.get_mesh(foreign.id()).expect("fremde Wand gerendert");
    assert!(!hovered.temporary);

    let mut tool = tool();
    block_on(tool.on_mouse_down(&session, DVec3::ZERO, None)).expect("Klick 1");
    let affordance =
        block_on(tool.on_mouse_move(&session, DVec3::new(5.0, 0.0, 0.0), Some(&hovered)))
            .expect("Bewegung");
    assert!(affordance);

    block_on(tool.on_mouse_down(&session, DVec3::new(5.0, 0.0, 0.0), Some(&hovered)))
        .expect("Klick 2");
    let k = kernel.borrow();
    assert_eq!(k.names(), vec!["begin_undo_event", "add_object", "join_at_points"]);
    match &k.calls[2] {
        KernelCall::JoinAtPoints { id_2, pt, .. } => {
            assert_eq!(*id_2, foreign.id());
            assert_eq!(*pt, Point3d::new(5.0, 0.0, 0.0));
        }
        other => panic!("join_at_points erwartet, erhalten: {:?}", other),
    }
}

#[test]
fn test_own_segments_are_not_attachable() {
    let (session, kernel) = fake_session();
    let mut tool = tool();

    block_on(tool.on_mouse_down(&session, DVec3::ZERO, None)).expect("Klick 1");
    let preview = session.get_mesh(tool.preview().unwrap().id()).expect("Vorschau");
    assert!(!block_on(tool.on_mouse_move(&session, DVec3::X, Some(&preview))).expect("Bewegung"));

    block_on(tool.on_mouse_down(&session, DVec3::new(4.0, 0.0, 0.0), None)).expect("Klick 2");
    flush(&session, &kernel);
    let last = session.get_mesh(tool.last_id().unwrap()).expect("letztes Segment");
    assert!(last.is_type("Wall"));
    assert!(!block_on(tool.on_mouse_move(&session, DVec3::X, Some(&last))).expect("Bewegung"));
}

#[test]
fn test_finish_commits_and_ends_event_once() {
    let (session, kernel) = fake_session();
    let mut tool = tool();

    block_on(tool.on_mouse_down(&session, DVec3::ZERO, None)).expect("Klick");
    block_on(tool.finish(&session, DVec3::new(3.0, 0.0, 0.0), None)).expect("finish");

    assert!(!tool.has_preview());
    let k = kernel.borrow();
    assert_eq!(k.names(), vec!["begin_undo_event", "add_object", "end_undo_event"]);
    drop(k);

    // Zweites finish ohne Vorschau: keine weiteren Aufrufe
    block_on(tool.finish(&session, DVec3::ZERO, None)).expect("finish");
    assert_eq!(kernel.borrow().count("end_undo_event"), 1);
}

#[test]
fn test_cancel_discards_event_and_preview() {
    let (session, kernel) = fake_session();
    let mut tool = tool();

    block_on(tool.on_mouse_down(&session, DVec3::ZERO, None)).expect("Klick 1");
    block_on(tool.on_mouse_down(&session, DVec3::X * 4.0, None)).expect("Klick 2");
    let preview_id = tool.preview().unwrap().id();

    tool.cancel(&session).expect("cancel");
    assert!(session.get_mesh(preview_id).is_none());
    assert_eq!(kernel.borrow().count("cancel_event"), 1);
    assert_eq!(kernel.borrow().count("end_undo_event"), 0);

    // Abbrechen ohne offenes Event sendet nichts
    tool.cancel(&session).expect("cancel");
    assert_eq!(kernel.borrow().count("cancel_event"), 1);
}
