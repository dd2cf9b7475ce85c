//! Tests for events a model class declares on top of the baseline.


use bookend_model::prelude::*;
use test_utils::{EventLog, model_class};

const ARTICLE_EVENTS: &[&str] = &["publishing", "published", "archiving"];

/// Fires the custom publish sequence a publishing workflow would run.
fn publish<C: ModelClass>(model: &mut Model<C>, store: &MemoryStore) -> Result<(), ModelError> {
    model.fire_event("publishing", true)?;
    model.set("status", "published");
    model.save(store)?;
    model.fire_event("published", true)?;
    Ok(())
}

fn archive<C: ModelClass>(model: &mut Model<C>, store: &MemoryStore) -> Result<(), ModelError> {
    model.fire_event("archiving", true)?;
    model.set("status", "archived");
    model.save(store)?;
    Ok(())
}

fn listener<C: ModelClass>(log: &EventLog, label: &str) -> Vec<Argument<Model<C>>> {
    vec![Argument::listener(log.recorder::<C>(label))]
}

#[test]
fn declared_events_are_observable_on_construction() {
    model_class!(Declared, events: ARTICLE_EVENTS);

    let model = Model::<Declared>::new();

    for name in [
        "publishing",
        "beforePublishing",
        "afterPublishing",
        "published",
        "beforePublished",
        "afterPublished",
        "archiving",
        "beforeArchiving",
        "afterArchiving",
    ] {
        assert!(model.observable_events().contains(name), "{name} not observable");
    }
}

#[test]
fn declared_events_get_before_and_after_phases() {
    model_class!(Publishable, events: ARTICLE_EVENTS);
    let hooks = EventLog::new();
    let native = EventLog::new();
    for method in ["beforePublishing", "afterPublishing", "beforePublished", "afterPublished"] {
        Model::<Publishable>::call_static(method, listener::<Publishable>(&hooks, method)).unwrap();
    }
    Model::<Publishable>::listen("publishing", native.recorder::<Publishable>("publishing"));
    Model::<Publishable>::listen("published", native.recorder::<Publishable>("published"));
    let store = MemoryStore::new();

    let mut model = Model::<Publishable>::create(&store, [("name", "Test Post")]).unwrap();
    publish(&mut model, &store).unwrap();

    assert_eq!(
        hooks.entries(),
        ["beforePublishing", "afterPublishing", "beforePublished", "afterPublished"]
    );
    assert_eq!(native.entries(), ["publishing", "published"]);
    assert_eq!(model.get_str("status"), Some("published"));
}

#[test]
fn custom_event_phases_run_in_order() {
    model_class!(Ordered, events: ARTICLE_EVENTS);
    let log = EventLog::new();
    Model::<Ordered>::call_static("beforePublishing", listener::<Ordered>(&log, "beforePublishing"))
        .unwrap();
    Model::<Ordered>::call_static("publishing", listener::<Ordered>(&log, "publishing")).unwrap();
    Model::<Ordered>::call_static("afterPublishing", listener::<Ordered>(&log, "afterPublishing"))
        .unwrap();
    let store = MemoryStore::new();
    let mut model = Model::<Ordered>::create(&store, [("name", "Test Post")]).unwrap();
    log.clear();

    let verdict = model.fire_event("publishing", true).unwrap();

    assert_eq!(verdict, Verdict::Proceed);
    assert_eq!(log.entries(), ["beforePublishing", "publishing", "afterPublishing"]);
}

#[test]
fn before_hook_can_veto_custom_event() {
    model_class!(Vetoed, events: ARTICLE_EVENTS);
    let log = EventLog::new();
    Model::<Vetoed>::register_hook(Phase::Before, "publishing", log.vetoer::<Vetoed>("beforePublishing"));
    Model::<Vetoed>::listen("publishing", log.recorder::<Vetoed>("publishing"));
    Model::<Vetoed>::register_hook(Phase::After, "publishing", log.recorder::<Vetoed>("afterPublishing"));
    let store = MemoryStore::new();
    let mut model = Model::<Vetoed>::create(&store, [("name", "Test Post")]).unwrap();

    let verdict = model.fire_event("publishing", true).unwrap();

    assert_eq!(verdict, Verdict::Stop);
    assert_eq!(log.entries(), ["beforePublishing"]);
}

#[test]
fn each_declared_event_has_its_own_phases() {
    model_class!(Archivable, events: ARTICLE_EVENTS);
    let log = EventLog::new();
    for method in ["beforeArchiving", "afterArchiving", "beforePublishing", "afterPublishing"] {
        Model::<Archivable>::call_static(method, listener::<Archivable>(&log, method)).unwrap();
    }
    Model::<Archivable>::listen("archiving", log.recorder::<Archivable>("archiving"));
    let store = MemoryStore::new();
    let mut model = Model::<Archivable>::create(&store, [("name", "Test Post")]).unwrap();
    log.clear();

    archive(&mut model, &store).unwrap();

    assert_eq!(log.entries(), ["beforeArchiving", "archiving", "afterArchiving"]);
    assert_eq!(model.get_str("status"), Some("archived"));
}

#[test]
fn before_hook_can_modify_attributes_on_custom_event() {
    model_class!(Renaming, events: ARTICLE_EVENTS);
    Model::<Renaming>::register_hook(Phase::Before, "publishing", |model: &mut Model<Renaming>| {
        model.set("name", "Modified during beforePublishing");
    });
    let store = MemoryStore::new();
    let mut model = Model::<Renaming>::create(&store, [("name", "Original Name")]).unwrap();

    model.fire_event("publishing", true).unwrap();

    assert_eq!(model.get_str("name"), Some("Modified during beforePublishing"));
}

#[test]
fn custom_and_standard_events_mix() {
    model_class!(Mixed, events: ARTICLE_EVENTS);
    let log = EventLog::new();
    Model::<Mixed>::before_saving(log.recorder::<Mixed>("beforeSaving"));
    Model::<Mixed>::register_hook(Phase::Before, "publishing", log.recorder::<Mixed>("beforePublishing"));
    Model::<Mixed>::after_saved(log.recorder::<Mixed>("afterSaved"));
    Model::<Mixed>::register_hook(Phase::After, "published", log.recorder::<Mixed>("afterPublished"));
    let store = MemoryStore::new();
    let mut model = Model::<Mixed>::create(&store, [("name", "Test Post")]).unwrap();
    log.clear();

    publish(&mut model, &store).unwrap();

    assert_eq!(
        log.entries(),
        ["beforePublishing", "beforeSaving", "afterSaved", "afterPublished"]
    );
}

#[test]
fn hook_method_rejects_non_callable_argument() {
    model_class!(Invalid, events: ARTICLE_EVENTS);

    let err = Model::<Invalid>::call_static(
        "beforeInvalidEvent",
        vec![Argument::Value("not-callable".into())],
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Method beforeInvalidEvent expects a single callable parameter."
    );
}

#[test]
fn hook_methods_only_fire_for_observable_events() {
    model_class!(CamelCase, events: ARTICLE_EVENTS);
    let log = EventLog::new();
    for method in ["beforePublishing", "beforePublished", "beforeArchiving"] {
        Model::<CamelCase>::call_static(method, listener::<CamelCase>(&log, method)).unwrap();
    }
    let mut model = Model::<CamelCase>::new();

    model.fire_event("publishing", true).unwrap();
    model.fire_event("archiving", true).unwrap();

    assert_eq!(log.entries(), ["beforePublishing", "beforeArchiving"]);
}

#[test]
fn unknown_methods_fall_back_to_host() {
    model_class!(Fallback, events: ARTICLE_EVENTS);

    let err = Model::<Fallback>::call_static("nonExistentMethod", Vec::new()).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Call to undefined method Fallback::nonExistentMethod()"
    );
}
