use std::collections::HashMap;
use std::rc::Rc;
use vb6::mach::{BasicObject, Fault, FaultKind, Recovery, Runtime, Val};

#[test]
fn test_unhandled_fault_surfaces() {
    let mut rt = Runtime::new();
    let recovery = rt.handle_fault(Fault::new(FaultKind::DivisionByZero), Some(12));
    assert_eq!(recovery, None);
    assert_eq!(rt.err().number(), 11);
    assert_eq!(rt.err().description(), "Division by zero");
    assert_eq!(rt.err().line(), Some(12));
}

#[test]
fn test_on_error_goto_traps() {
    let mut rt = Runtime::new();
    rt.handler().on_error_goto("ErrHandler");
    let recovery = rt.handle_fault(Fault::new(FaultKind::TypeMismatch), Some(3));
    assert_eq!(recovery, Some(Recovery::Goto(Rc::from("ErrHandler"))));
    assert_eq!(rt.err().number(), 13);
}

#[test]
fn test_resume_next_suppresses() {
    let mut rt = Runtime::new();
    rt.handler().on_error_resume_next();
    for _ in 0..3 {
        let recovery = rt.handle_fault(Fault::new(FaultKind::Overflow), None);
        assert_eq!(recovery, Some(Recovery::ResumeNext));
    }
    assert_eq!(rt.err().number(), 6);
}

#[test]
fn test_on_error_goto_zero_disables() {
    let mut rt = Runtime::new();
    rt.handler().on_error_resume_next();
    rt.handler().on_error_goto_zero();
    let recovery = rt.handle_fault(Fault::new(FaultKind::Overflow), None);
    assert_eq!(recovery, None);
}

#[test]
fn test_fault_inside_handler_escalates() {
    let mut rt = Runtime::new();
    rt.handler().on_error_goto("Outer");
    rt.handler().enter_scope().unwrap();
    rt.handler().on_error_goto("Inner");
    assert_eq!(
        rt.handle_fault(Fault::new(FaultKind::DivisionByZero), Some(5)),
        Some(Recovery::Goto(Rc::from("Inner")))
    );
    // Still handling the first fault, so the next one goes outward.
    assert_eq!(
        rt.handle_fault(Fault::new(FaultKind::DivisionByZero), Some(6)),
        Some(Recovery::Goto(Rc::from("Outer")))
    );
}

#[test]
fn test_resume_rearms_and_clears_err() {
    let mut rt = Runtime::new();
    rt.handler().on_error_goto("Fix");
    rt.handle_fault(Fault::new(FaultKind::TypeMismatch), Some(1));
    assert_eq!(rt.err().number(), 13);
    rt.resume();
    assert_eq!(rt.err().number(), 0);
    assert_eq!(
        rt.handle_fault(Fault::new(FaultKind::TypeMismatch), Some(2)),
        Some(Recovery::Goto(Rc::from("Fix")))
    );
}

#[test]
fn test_exiting_scope_drops_handler() {
    let mut rt = Runtime::new();
    rt.handler().enter_scope().unwrap();
    rt.handler().on_error_resume_next();
    rt.handler().exit_scope().unwrap();
    assert_eq!(rt.handle_fault(Fault::new(FaultKind::Overflow), None), None);
}

#[test]
fn test_gosub_return_through_runtime() {
    let mut rt = Runtime::new();
    let mut locals: HashMap<Rc<str>, Val> = HashMap::new();
    locals.insert(Rc::from("COUNT"), Val::Integer(1));
    rt.gosub().gosub("PrintHeader", 100, &locals).unwrap();
    rt.gosub().gosub("PrintLine", 200, &locals).unwrap();
    assert_eq!(rt.gosub().depth(), 2);
    assert_eq!(rt.gosub().r#return().unwrap(), 201);
    assert_eq!(rt.gosub().r#return().unwrap(), 101);
    let error = rt.gosub().r#return().unwrap_err();
    assert_eq!(error.code(), 3);
    assert_eq!(error.to_string(), "Return without GoSub");
}

#[test]
fn test_with_member_access() {
    let mut rt = Runtime::new();
    let form = BasicObject::new()
        .with_member("Caption", Val::String(Rc::from("Main")))
        .into_ref();
    rt.with_stack().enter(Val::Object(form)).unwrap();
    assert_eq!(
        rt.with_stack().get("Caption").unwrap(),
        Val::String(Rc::from("Main"))
    );
    rt.with_stack()
        .set("Caption", Val::String(Rc::from("Renamed")))
        .unwrap();
    assert_eq!(
        rt.with_stack().get("caption").unwrap(),
        Val::String(Rc::from("Renamed"))
    );
    rt.with_stack().exit().unwrap();
}

#[test]
fn test_with_on_nothing_is_91() {
    let mut rt = Runtime::new();
    let error = rt.with_stack().enter(Val::Empty).unwrap_err();
    assert_eq!(error.code(), 91);
    assert_eq!(
        error.to_string(),
        "Object variable or With block variable not set"
    );
}

#[test]
fn test_member_fault_is_trappable() {
    let mut rt = Runtime::new();
    rt.handler().on_error_resume_next();
    let obj = BasicObject::new().into_ref();
    rt.with_stack().enter(Val::Object(obj)).unwrap();
    let fault = rt.with_stack().get("Missing").unwrap_err();
    assert_eq!(fault.number(), 438);
    let recovery = rt.handle_fault(fault, Some(40));
    assert_eq!(recovery, Some(Recovery::ResumeNext));
    assert_eq!(rt.err().number(), 438);
    assert_eq!(rt.err().line(), Some(40));
}

#[test]
fn test_dot_access_outside_with_is_91() {
    let mut rt = Runtime::new();
    let fault = rt.with_stack().get("Anything").unwrap_err();
    assert_eq!(fault.number(), 91);
    assert_eq!(rt.handle_fault(fault, None), None);
    assert_eq!(rt.err().number(), 91);
}
