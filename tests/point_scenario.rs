// End-to-end walk through the public surface: a registered `Point` class
// with defaulted, validated attributes and a `changed` signal.

use slotted::{
    callback, register_class, signal, unregister_class, value, value_as, CallArgs, Class, Object,
    PlainMember, SlottedError,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn point_class(name: &str) -> Rc<Class> {
    Rc::new(
        Class::new(
            name,
            vec![
                ("x".into(), Rc::new(PlainMember::typed(0, 0i32)) as _),
                ("y".into(), Rc::new(PlainMember::typed(1, 0i32)) as _),
            ],
        )
        .unwrap(),
    )
}

#[test]
fn point_lifecycle() {
    let p = Object::new(point_class("Point"));
    let changed = signal("changed");

    // Defaults come back lazily.
    assert_eq!(value_as::<i32>(&p.get_attr("x").unwrap()), Some(&0));
    assert_eq!(value_as::<i32>(&p.get_attr("y").unwrap()), Some(&0));

    // Subscribe a logger.
    let log = Rc::new(RefCell::new(Vec::new()));
    let log_in = log.clone();
    let logger = callback(move |args: &CallArgs| {
        log_in.borrow_mut().push(args.len());
        Ok(())
    });
    p.connect(&changed, logger.clone());

    // Write, read back, notify.
    p.set_attr("x", value(5i32)).unwrap();
    assert_eq!(value_as::<i32>(&p.get_attr("x").unwrap()), Some(&5));

    p.emit(&changed, &CallArgs::new()).unwrap();
    assert_eq!(*log.borrow(), vec![0]);

    // After disconnecting the logger, emits go nowhere.
    p.disconnect_callback(&changed, &logger);
    p.emit(&changed, &CallArgs::new()).unwrap();
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn point_rejects_mistyped_writes() {
    let p = Object::new(point_class("Point"));

    let err = p.set_attr("x", value("five")).unwrap_err();
    assert!(matches!(err, SlottedError::Validation { .. }));

    // The failed write changed nothing.
    assert_eq!(value_as::<i32>(&p.get_attr("x").unwrap()), Some(&0));
}

#[test]
fn registry_backed_construction() {
    register_class(point_class("point_scenario::Point"));

    let p = Object::instantiate("point_scenario::Point").unwrap();
    assert_eq!(p.class().name(), "point_scenario::Point");
    assert_eq!(p.class().member_count(), 2);

    let names: Vec<&str> = p.members().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert!(p.get_member("x").is_some());
    assert!(p.get_member("z").is_none());

    assert!(matches!(
        Object::instantiate("point_scenario::Nope").unwrap_err(),
        SlottedError::UnregisteredClass(_)
    ));

    unregister_class("point_scenario::Point");
}

#[test]
fn construction_with_initial_values() {
    let p = Object::with_values(
        point_class("Point"),
        vec![("x".to_string(), value(1i32)), ("y".to_string(), value(2i32))],
    )
    .unwrap();
    assert_eq!(value_as::<i32>(&p.get_attr("x").unwrap()), Some(&1));
    assert_eq!(value_as::<i32>(&p.get_attr("y").unwrap()), Some(&2));

    // A mistyped initial value aborts construction.
    assert!(Object::with_values(
        point_class("Point"),
        vec![("y".to_string(), value(1.5f64))],
    )
    .is_err());
}

#[test]
fn emit_forwards_positional_and_named_arguments() {
    let p = Object::new(point_class("Point"));
    let moved = signal("moved");

    let seen = Rc::new(Cell::new((0i32, 0i32, false)));
    let seen_in = seen.clone();
    p.connect(
        &moved,
        callback(move |args| {
            let dx = value_as::<i32>(args.get(0).unwrap()).copied().unwrap();
            let dy = value_as::<i32>(args.get(1).unwrap()).copied().unwrap();
            let animated = args.named("animated").is_some();
            seen_in.set((dx, dy, animated));
            Ok(())
        }),
    );

    let args = CallArgs::positional(vec![value(3i32), value(-4i32)]).with_named("animated", value(true));
    p.emit(&moved, &args).unwrap();

    assert_eq!(seen.get(), (3, -4, true));
}

#[test]
fn clearing_an_attribute_restores_its_default() {
    let p = Object::new(point_class("Point"));

    p.set_attr("x", value(9i32)).unwrap();
    p.clear_attr("x").unwrap();
    assert_eq!(value_as::<i32>(&p.get_attr("x").unwrap()), Some(&0));
}
