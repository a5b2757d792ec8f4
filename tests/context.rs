use std::{cell::Cell, rc::Rc, time::Duration};

use floem_breakpoints::{
    create_effect, install, use_breakpoint, AppContext, Breakpoint, BreakpointError,
    BreakpointState, HeadlessViewport, ManualScheduler, PartialOptions, SignalGet, Thresholds,
};

fn install_into(app: &AppContext, viewport: &HeadlessViewport, options: Option<PartialOptions>) {
    install(
        app,
        Rc::new(viewport.clone()),
        Rc::new(ManualScheduler::new()),
        options,
    )
    .unwrap();
}

#[test]
fn accessor_without_install_fails() {
    let err = use_breakpoint().unwrap_err();
    assert!(matches!(err, BreakpointError::MissingDisplay));
    assert_eq!(err.to_string(), "Could not find display injection");

    let app = AppContext::new();
    let err = app.enter(use_breakpoint).unwrap_err();
    assert!(matches!(err, BreakpointError::MissingDisplay));
    assert!(matches!(app.display(), Err(BreakpointError::MissingDisplay)));
}

#[test]
fn accessor_after_install_returns_state() {
    let app = AppContext::new();
    let viewport = HeadlessViewport::new(1200.0, 800.0);
    install_into(&app, &viewport, None);

    let state = app.enter(use_breakpoint).unwrap().get();
    assert_eq!(state.name, Breakpoint::Xl);
    assert_eq!(
        state,
        BreakpointState::compute(1200.0, 800.0, &Thresholds::default())
    );
}

#[test]
fn accessor_outside_enter_fails_even_when_installed() {
    let app = AppContext::new();
    install_into(&app, &HeadlessViewport::new(1200.0, 800.0), None);

    assert!(app.breakpoints().is_ok());
    assert!(matches!(use_breakpoint(), Err(BreakpointError::MissingDisplay)));
}

#[test]
fn state_from_context_follows_resizes() {
    let app = AppContext::new();
    let viewport = HeadlessViewport::new(1200.0, 800.0);
    install_into(&app, &viewport, None);

    let state = app.breakpoints().unwrap();
    viewport.resize(700.0, 800.0);
    assert_eq!(state.get().name, Breakpoint::Sm);
    assert!(state.get().sm_and_down);
}

#[test]
fn second_install_is_rejected() {
    let app = AppContext::new();
    let first = HeadlessViewport::new(1200.0, 800.0);
    install_into(&app, &first, None);

    let second = HeadlessViewport::new(400.0, 800.0);
    let err = install(
        &app,
        Rc::new(second.clone()),
        Rc::new(ManualScheduler::new()),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, BreakpointError::AlreadyInstalled));
    assert_eq!(second.listener_count(), 0);
    assert_eq!(app.display().unwrap().breakpoint(), Breakpoint::Xl);
}

#[test]
fn separate_contexts_are_independent() {
    let wide = AppContext::new();
    let narrow = AppContext::new();
    install_into(&wide, &HeadlessViewport::new(2000.0, 800.0), None);
    install_into(&narrow, &HeadlessViewport::new(320.0, 640.0), None);

    assert_eq!(
        wide.enter(use_breakpoint).unwrap().get().name,
        Breakpoint::Xxxl
    );
    assert_eq!(
        narrow.enter(use_breakpoint).unwrap().get().name,
        Breakpoint::Xs
    );
}

#[test]
fn install_merges_partial_options() {
    let app = AppContext::new();
    install_into(
        &app,
        &HeadlessViewport::new(1000.0, 800.0),
        Some(PartialOptions::default().delay(Duration::from_millis(300))),
    );

    let options = *app.display().unwrap().options();
    assert_eq!(options.delay, Duration::from_millis(300));
    assert_eq!(options.thresholds, Thresholds::default());
}

#[test]
fn install_rejects_unordered_thresholds() {
    let app = AppContext::new();
    let thresholds = Thresholds {
        sm: 800.0,
        md: 700.0,
        ..Thresholds::default()
    };
    let err = install(
        &app,
        Rc::new(HeadlessViewport::new(1000.0, 800.0)),
        Rc::new(ManualScheduler::new()),
        Some(PartialOptions::default().thresholds(thresholds)),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        BreakpointError::UnorderedThresholds {
            lower: Breakpoint::Sm,
            upper: Breakpoint::Md,
            ..
        }
    ));
    assert!(!app.contains::<floem_breakpoints::Display>());
}

#[test]
fn install_inside_an_effect_does_not_subscribe_it() {
    let app = AppContext::new();
    let viewport = HeadlessViewport::new(1000.0, 800.0);
    let runs = Rc::new(Cell::new(0));

    create_effect({
        let (app, viewport, runs) = (app.clone(), viewport.clone(), runs.clone());
        move |_| {
            runs.set(runs.get() + 1);
            if !app.contains::<floem_breakpoints::Display>() {
                install_into(&app, &viewport, None);
            }
        }
    });
    assert_eq!(runs.get(), 1);

    viewport.resize(400.0, 800.0);
    assert_eq!(app.display().unwrap().breakpoint(), Breakpoint::Xs);
    assert_eq!(runs.get(), 1);
}
