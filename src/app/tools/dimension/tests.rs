use super::super::{EditTool, ToolSettings};
use super::DimensionTool;
use crate::app::test_support::{fake_session, flush, FakeState};
use crate::app::Session;
use crate::core::{DataObject, Point3d, Wall};
use crate::render::RenderedObject;
use crate::transport::KernelCall;
use futures::executor::block_on;
use glam::DVec3;
use std::cell::RefCell;
use std::rc::Rc;

fn committed_wall(session: &Session, kernel: &Rc<RefCell<FakeState>>) -> RenderedObject {
    let event = session.begin_undo_event("Setup").expect("begin");
    let wall = Wall::new(DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0), 1.0, 5.0);
    let _ = session.create_obj(event, &wall);
    session.end_undo_event(event).expect("end");
    flush(session, kernel);
    kernel.borrow_mut().calls.clear();
    session.get_mesh(wall.id()).expect("Wand gerendert")
}

#[test]
fn test_first_point_snaps_to_closest_point_of_referable_object() {
    let (session, kernel) = fake_session();
    let wall = committed_wall(&session, &kernel);
    kernel.borrow_mut().referable = true;
    kernel.borrow_mut().closest = Some(DVec3::new(2.0, 0.0, 0.0));
    let mut tool = DimensionTool::new(&ToolSettings::default());

    let click = DVec3::new(2.3, 0.4, 0.0);
    block_on(session.drive(tool.on_mouse_down(&session, click, Some(&wall)))).expect("Klick");

    let dim = tool.preview().expect("Vorschau vorhanden");
    assert_eq!(dim.first, DVec3::new(2.0, 0.0, 0.0));
    assert_eq!(dim.second, DVec3::new(3.0, 0.0, 0.0));
    assert!(session.get_mesh(dim.id()).is_some_and(|o| o.temporary));
    assert_eq!(kernel.borrow().names(), vec!["can_refer_to", "get_closest_point"]);
    match &kernel.borrow().calls[1] {
        KernelCall::GetClosestPoint { id, pt, .. } => {
            assert_eq!(*id, wall.id);
            assert_eq!(*pt, Point3d::new(2.3, 0.4, 0.0));
        }
        other => panic!("get_closest_point erwartet, erhalten: {:?}", other),
    };
}

#[test]
fn test_non_referable_object_keeps_click_point() {
    let (session, kernel) = fake_session();
    let wall = committed_wall(&session, &kernel);
    let mut tool = DimensionTool::new(&ToolSettings::default());

    let click = DVec3::new(4.0, 1.0, 0.0);
    block_on(session.drive(tool.on_mouse_down(&session, click, Some(&wall)))).expect("Klick");

    assert_eq!(tool.preview().expect("Vorschau").first, click);
    assert_eq!(kernel.borrow().names(), vec!["can_refer_to"]);
}

#[test]
fn test_commit_creates_new_dimension_and_chains() {
    let (session, kernel) = fake_session();
    let wall = committed_wall(&session, &kernel);
    kernel.borrow_mut().referable = true;
    kernel.borrow_mut().closest = Some(DVec3::new(1.0, 0.0, 0.0));
    let mut tool = DimensionTool::new(&ToolSettings::default());

    block_on(session.drive(tool.on_mouse_down(&session, DVec3::new(1.0, 0.2, 0.0), Some(&wall))))
        .expect("Klick 1");
    let preview_id = tool.preview().expect("Vorschau").id();
    kernel.borrow_mut().calls.clear();

    let second = DVec3::new(1.0, 6.0, 0.0);
    block_on(session.drive(tool.on_mouse_down(&session, second, None))).expect("Klick 2");

    assert!(session.get_mesh(preview_id).is_none());
    let k = kernel.borrow();
    assert_eq!(k.names(), vec!["begin_undo_event", "add_object", "snap_to_point"]);
    let created = match &k.calls[1] {
        KernelCall::AddObject { object, .. } => object.obj["id"].clone(),
        other => panic!("add_object erwartet, erhalten: {:?}", other),
    };
    assert_ne!(created, serde_json::json!(preview_id));
    match &k.calls[2] {
        KernelCall::SnapToPoint { snap_to_id, pt, .. } => {
            assert_eq!(*snap_to_id, wall.id);
            assert_eq!(*pt, Point3d::new(1.0, 0.0, 0.0));
        }
        other => panic!("snap_to_point erwartet, erhalten: {:?}", other),
    }

    // Kette: neue Vorschau beginnt am Klickpunkt
    let next = tool.preview().expect("neue Vorschau");
    assert_eq!(next.first, second);
}

#[test]
fn test_finish_ends_single_event() {
    let (session, kernel) = fake_session();
    let mut tool = DimensionTool::new(&ToolSettings::default());

    block_on(session.drive(tool.on_mouse_down(&session, DVec3::ZERO, None))).expect("Klick 1");
    block_on(session.drive(tool.on_mouse_down(&session, DVec3::X * 3.0, None))).expect("Klick 2");
    block_on(session.drive(tool.finish(&session, DVec3::new(3.0, 3.0, 0.0), None))).expect("finish");

    assert!(!tool.has_preview());
    let k = kernel.borrow();
    assert_eq!(k.count("begin_undo_event"), 1);
    assert_eq!(k.count("add_object"), 2);
    assert_eq!(k.count("end_undo_event"), 1);
    assert_eq!(k.names().last(), Some(&"end_undo_event"));
}

#[test]
fn test_mouse_move_reports_referable_target() {
    let (session, kernel) = fake_session();
    let wall = committed_wall(&session, &kernel);
    let mut tool = DimensionTool::new(&ToolSettings::default());

    let hit = block_on(session.drive(tool.on_mouse_move(&session, DVec3::ZERO, Some(&wall))))
        .expect("Bewegung");
    assert!(!hit);

    kernel.borrow_mut().referable = true;
    let hit = block_on(session.drive(tool.on_mouse_move(&session, DVec3::ZERO, Some(&wall))))
        .expect("Bewegung");
    assert!(hit);
}

#[test]
fn test_cancel_discards_preview_and_event() {
    let (session, kernel) = fake_session();
    let mut tool = DimensionTool::new(&ToolSettings::default());

    block_on(session.drive(tool.on_mouse_down(&session, DVec3::ZERO, None))).expect("Klick 1");
    block_on(session.drive(tool.on_mouse_down(&session, DVec3::Y, None))).expect("Klick 2");
    let preview_id = tool.preview().expect("Vorschau").id();

    tool.cancel(&session).expect("cancel");
    assert!(session.get_mesh(preview_id).is_none());
    assert_eq!(kernel.borrow().count("cancel_event"), 1);
    assert_eq!(kernel.borrow().count("end_undo_event"), 0);
}
