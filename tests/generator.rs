use phaser::{
    Action, ActionTransformer, Config, Generator, InitialStateBuilder, Phase, PhaserError, Rule,
    State, TransitionTableBuilder, TransitionTree, TypeSuffixes,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn object(value: Value) -> State {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

fn rule(name: &str) -> Rule {
    Rule::with_config(name, &Config::default()).expect("Failed to build rule")
}

fn set(state: &State, pairs: &[(&str, Value)]) -> State {
    let mut next = state.clone();
    for (key, value) in pairs {
        next.insert(key.to_string(), value.clone());
    }
    next
}

#[test_log::test]
fn test_single_rule_default_lifecycle() {
    let reducer = Generator::new([rule("GET_ALL")])
        .generate()
        .expect("Failed to generate reducer");

    let initial = reducer.reduce(None, &Action::default());
    assert_eq!(
        initial,
        object(json!({ "isGetAllPending": false, "getAllData": null, "getAllError": null }))
    );

    let pending = reducer.reduce(Some(&initial), &Action::new("GET_ALL_PENDING"));
    assert_eq!(
        pending,
        object(json!({ "isGetAllPending": true, "getAllData": null, "getAllError": null }))
    );

    let fulfilled = reducer.reduce(
        Some(&initial),
        &Action::new("GET_ALL_FULFILLED").with("data", json!("x")),
    );
    assert_eq!(
        fulfilled,
        object(json!({ "isGetAllPending": false, "getAllData": "x", "getAllError": null }))
    );

    let rejected = reducer.reduce(
        Some(&pending),
        &Action::new("GET_ALL_REJECTED").with("error", json!("error")),
    );
    assert_eq!(
        rejected,
        object(json!({ "isGetAllPending": false, "getAllData": null, "getAllError": "error" }))
    );
}

#[test_log::test]
fn test_phase_transitions_are_idempotent() {
    let reducer = Generator::new([rule("GET_ALL")]).generate().unwrap();
    let initial = reducer.initial_state().clone();

    let actions = [
        Action::new("GET_ALL_PENDING"),
        Action::new("GET_ALL_FULFILLED").with("data", json!({ "items": [1, 2] })),
        Action::new("GET_ALL_REJECTED").with("error", json!("boom")),
    ];
    for action in &actions {
        let once = reducer.reduce(Some(&initial), action);
        let twice = reducer.reduce(Some(&once), action);
        assert_eq!(once, twice, "{:?} is not idempotent", action.action_type());
    }
}

#[test_log::test]
fn test_two_rules_do_not_interfere() {
    let reducer = Generator::new([rule("GET_ALL"), rule("POST")]).generate().unwrap();
    let initial = reducer.reduce(None, &Action::default());
    assert_eq!(
        initial,
        object(json!({
            "isGetAllPending": false, "getAllData": null, "getAllError": null,
            "isPostPending": false, "postData": null, "postError": null,
        }))
    );

    let get_all = reducer.reduce(
        Some(&initial),
        &Action::new("GET_ALL_FULFILLED").with("data", json!("data")),
    );
    let posting = reducer.reduce(Some(&get_all), &Action::new("POST_PENDING"));
    for field in ["isGetAllPending", "getAllData", "getAllError"] {
        assert_eq!(posting[field], get_all[field], "POST_PENDING touched {}", field);
    }
    assert_eq!(posting["isPostPending"], json!(true));

    // Each rule behaves as its standalone reducer on its own fields.
    let standalone = Generator::new([rule("POST")]).generate().unwrap();
    let alone = standalone.reduce(None, &Action::new("POST_PENDING"));
    for (key, value) in &alone {
        assert_eq!(&posting[key.as_str()], value);
    }
}

#[test_log::test]
fn test_unknown_actions_are_no_ops() {
    let reducer = Generator::new([rule("GET_ALL"), rule("POST")]).generate().unwrap();
    let state = reducer.reduce(None, &Action::new("POST_PENDING"));
    assert_eq!(reducer.reduce(Some(&state), &Action::new("DELETE_PENDING")), state);
    assert_eq!(reducer.reduce(Some(&state), &Action::new("GET_ALL")), state);
    assert_eq!(reducer.reduce(Some(&state), &Action::default()), state);
}

#[test_log::test]
fn test_override_initial_state_and_reducer_builders() {
    let get_all = rule("GET_ALL")
        .override_initial_state(InitialStateBuilder::new(|_| {
            Ok(object(json!({ "allPending": false, "allData": null })))
        }))
        .override_reducer(TransitionTableBuilder::new(|op, _, _| {
            Ok(TransitionTree::new().with_branch(
                op,
                TransitionTree::new()
                    .with_leaf("PENDING", |state, _| set(state, &[("allPending", json!(true))]))
                    .with_leaf("DATA", |state, action| {
                        set(
                            state,
                            &[("allData", action.data().clone()), ("allPending", json!(false))],
                        )
                    }),
            ))
        }))
        .unwrap();

    let reducer = Generator::new([rule("POST"), get_all]).generate().unwrap();
    let initial = reducer.reduce(None, &Action::default());
    assert_eq!(
        initial,
        object(json!({
            "isPostPending": false, "postData": null, "postError": null,
            "allPending": false, "allData": null,
        }))
    );

    let s1 = reducer.reduce(Some(&initial), &Action::new("GET_ALL_PENDING"));
    let s2 = reducer.reduce(Some(&s1), &Action::new("POST_PENDING"));
    let s3 = reducer.reduce(Some(&s2), &Action::new("GET_ALL_DATA").with("data", json!("data")));
    assert_eq!(
        s3,
        object(json!({
            "isPostPending": true, "postData": null, "postError": null,
            "allPending": false, "allData": "data",
        }))
    );
    assert!(!reducer.handles("GET_ALL_FULFILLED"));
}

#[test_log::test]
fn test_single_event_rules_with_plain_values() {
    let open = rule("OPEN")
        .override_initial_state(object(json!({ "isOpen": false })))
        .override_reducer(
            TransitionTree::new().with_leaf("OPEN", |state, _| set(state, &[("isOpen", json!(true))])),
        )
        .unwrap();
    let close = rule("CLOSE")
        .override_initial_state(State::new())
        .override_reducer(
            TransitionTree::new()
                .with_leaf("CLOSE", |state, _| set(state, &[("isOpen", json!(false))])),
        )
        .unwrap();

    let reducer = Generator::new([open, close, rule("POST")]).generate().unwrap();
    let initial = reducer.reduce(None, &Action::default());
    assert_eq!(
        initial,
        object(json!({ "isOpen": false, "isPostPending": false, "postData": null, "postError": null }))
    );

    let opened = reducer.reduce(Some(&initial), &Action::new("OPEN"));
    assert_eq!(opened["isOpen"], json!(true));
    let closed = reducer.reduce(Some(&opened), &Action::new("CLOSE"));
    assert_eq!(closed, initial);
    let posted = reducer.reduce(Some(&closed), &Action::new("POST_FULFILLED").with("data", json!("data")));
    assert_eq!(
        posted,
        object(json!({ "isOpen": false, "isPostPending": false, "postData": "data", "postError": null }))
    );
}

#[test_log::test]
fn test_action_transformer_applies_to_one_rule_only() {
    let unwrap_payload = ActionTransformer::new(|action| {
        let payload_data = action.get("payload").get("data").cloned();
        match payload_data {
            Some(data) => Action::new(action.action_type().unwrap_or_default()).with("data", data),
            None => action.clone(),
        }
    });
    let get_all = rule("GET_ALL").override_action_transformer(unwrap_payload);
    let reducer = Generator::new([rule("POST"), get_all]).generate().unwrap();

    let initial = reducer.reduce(None, &Action::default());
    let pending = reducer.reduce(Some(&initial), &Action::new("GET_ALL_PENDING"));
    assert_eq!(pending["isGetAllPending"], json!(true));

    let action = |t: &str| Action::new(t).with("payload", json!({ "data": "data" }));
    let state = reducer.reduce(Some(&pending), &action("GET_ALL_FULFILLED"));
    assert_eq!(state["getAllData"], json!("data"));
    assert_eq!(state["isGetAllPending"], json!(false));

    // POST has the identity transformer and sees no `data`.
    let state = reducer.reduce(Some(&state), &action("POST_FULFILLED"));
    assert_eq!(state["postData"], Value::Null);
}

#[test_log::test]
fn test_action_transformer_reaches_nested_custom_trees() {
    let tagged = rule("SYNC")
        .override_initial_state(State::new())
        .override_reducer(TransitionTree::new().with_branch(
            "SYNC",
            TransitionTree::new().with_branch(
                "REMOTE",
                TransitionTree::new()
                    .with_leaf("DONE", |state, action| set(state, &[("seen", action.get("tag").clone())])),
            ),
        ))
        .unwrap()
        .override_action_transformer(ActionTransformer::new(|action| {
            action.clone().with("tag", json!("transformed"))
        }));

    let reducer = Generator::new([tagged]).generate().unwrap();
    let state = reducer.reduce(None, &Action::new("SYNC_REMOTE_DONE"));
    assert_eq!(state["seen"], json!("transformed"));
}

#[test_log::test]
fn test_later_rule_replaces_colliding_operation() {
    let custom = rule("GET_ALL")
        .override_initial_state(State::new())
        .override_reducer(
            TransitionTree::new().with_branch(
                "GET_ALL",
                TransitionTree::new().with_leaf("PENDING", |state, _| set(state, &[("custom", json!(true))])),
            ),
        )
        .unwrap();

    let reducer = Generator::new([rule("GET_ALL"), custom]).generate().unwrap();
    assert_eq!(reducer.dispatch_keys().collect::<Vec<_>>(), vec!["GET_ALL_PENDING"]);
    let state = reducer.reduce(None, &Action::new("GET_ALL_PENDING"));
    assert_eq!(state["custom"], json!(true));
    assert_eq!(state["isGetAllPending"], json!(false));
}

#[test_log::test]
fn test_custom_suffixes_from_explicit_config() {
    let config = Config::from_json_str(
        r#"{"type_suffixes": {"PENDING": "LOADING", "FULFILLED": "DONE", "REJECTED": "ERROR"}}"#,
    )
    .unwrap();
    let reducer = Generator::new([config.rule("GET_ALL").unwrap()]).generate().unwrap();
    assert_eq!(
        reducer.dispatch_keys().collect::<Vec<_>>(),
        vec!["GET_ALL_LOADING", "GET_ALL_DONE", "GET_ALL_ERROR"]
    );
    let state = reducer.reduce(None, &Action::new("GET_ALL_DONE").with("data", json!(3)));
    assert_eq!(state["getAllData"], json!(3));
    assert_eq!(reducer.reduce(None, &Action::new("GET_ALL_FULFILLED")), *reducer.initial_state());
}

#[test_log::test]
fn test_shared_suffix_label_fails_generation() {
    let config = Config {
        suffixes: TypeSuffixes {
            pending: "X".to_string(),
            fulfilled: "X".to_string(),
            ..TypeSuffixes::default()
        },
        ..Config::default()
    };
    let err = Generator::new([config.rule("GET_ALL").unwrap()])
        .generate()
        .unwrap_err();
    assert!(matches!(
        err,
        PhaserError::DuplicateSuffix {
            first: Phase::Pending,
            second: Phase::Fulfilled,
            ..
        }
    ));
}

#[test_log::test]
fn test_reducer_is_shareable_across_threads() {
    let reducer = Generator::new([rule("GET_ALL"), rule("POST")]).generate().unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let reducer = reducer.clone();
                scope.spawn(move || {
                    let action = Action::new("GET_ALL_FULFILLED").with("data", json!(i));
                    reducer.reduce(None, &action)
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let state = handle.join().expect("reducer thread panicked");
            assert_eq!(state["getAllData"], json!(i));
        }
    });
}

#[test_log::test]
fn test_regenerating_after_config_change_differs() {
    let mut config = Config::default();
    let generator = Generator::new([config.rule("GET_ALL").unwrap()]);
    let first = generator.generate().unwrap();

    config.override_initial_state_builder(InitialStateBuilder::constant(State::new()));
    let rebuilt = Generator::new([config.rule("GET_ALL").unwrap()]).generate().unwrap();

    assert_eq!(first.initial_state().len(), 3);
    assert!(rebuilt.initial_state().is_empty());
    // The first generator still holds the old snapshot.
    assert_eq!(generator.generate().unwrap().initial_state(), first.initial_state());
}
