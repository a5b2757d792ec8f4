use std::{cell::RefCell, rc::Rc, time::Duration};

use floem_breakpoints::{
    create_effect, Breakpoint, BreakpointOptions, BreakpointState, Display, HeadlessViewport,
    ManualScheduler, SignalGet, SignalWith, Thresholds,
};

fn display(width: f64, height: f64) -> (HeadlessViewport, ManualScheduler, Display) {
    display_with(width, height, BreakpointOptions::default())
}

fn display_with(
    width: f64,
    height: f64,
    options: BreakpointOptions,
) -> (HeadlessViewport, ManualScheduler, Display) {
    let viewport = HeadlessViewport::new(width, height);
    let scheduler = ManualScheduler::new();
    let display = Display::new(
        Rc::new(viewport.clone()),
        Rc::new(scheduler.clone()),
        options,
    );
    (viewport, scheduler, display)
}

#[test]
fn initial_state_matches_viewport() {
    let (viewport, _, display) = display(500.0, 900.0);
    let state = display.get();

    assert_eq!(state.name, Breakpoint::Xs);
    assert!(state.xs);
    assert_eq!(state.width, 500.0);
    assert_eq!(state.height, 900.0);
    assert!(state.sm_and_down);
    assert_eq!(viewport.listener_count(), 1);
}

#[test]
fn resize_recomputes_every_field() {
    let (viewport, _, display) = display(500.0, 900.0);

    viewport.resize(1904.0, 1000.0);
    assert_eq!(
        display.get(),
        BreakpointState::compute(1904.0, 1000.0, &Thresholds::default())
    );
    assert_eq!(display.breakpoint(), Breakpoint::Xxxl);
    assert_eq!(display.width().get(), 1904.0);
    assert_eq!(display.height().get(), 1000.0);
}

#[test]
fn samples_max_of_client_and_inner() {
    let (viewport, _, display) = display(1000.0, 800.0);

    // A vertical scrollbar narrows the document root but not the window.
    viewport.set_client_size(983.0, 800.0);
    viewport.set_inner_size(1000.0, 780.0);
    viewport.dispatch_resize();

    let state = display.get();
    assert_eq!(state.width, 1000.0);
    assert_eq!(state.height, 800.0);
}

#[test]
fn trailing_update_lands_after_delay() {
    let (viewport, scheduler, display) = display(500.0, 900.0);

    viewport.resize(800.0, 900.0);
    assert_eq!(display.breakpoint(), Breakpoint::Md);

    // Inside the window: coalesced.
    scheduler.advance(Duration::from_millis(20));
    viewport.resize(1000.0, 900.0);
    scheduler.advance(Duration::from_millis(20));
    viewport.resize(1300.0, 900.0);
    assert_eq!(display.breakpoint(), Breakpoint::Md);

    scheduler.advance(Duration::from_millis(110));
    assert_eq!(display.breakpoint(), Breakpoint::Xl);
    assert_eq!(display.get().width, 1300.0);
}

#[test]
fn burst_within_one_window_recomputes_at_most_twice() {
    let (viewport, scheduler, display) = display(500.0, 900.0);
    let seen = Rc::new(RefCell::new(Vec::new()));

    create_effect({
        let state = display.state();
        let seen = seen.clone();
        move |_| seen.borrow_mut().push(state.with(|state| state.width))
    });
    seen.borrow_mut().clear();

    for step in 1..=20 {
        viewport.resize(500.0 + step as f64 * 10.0, 900.0);
        scheduler.advance(Duration::from_millis(5));
    }
    scheduler.advance(Duration::from_millis(200));

    assert_eq!(*seen.borrow(), [510.0, 700.0]);
}

#[test]
fn spaced_resizes_each_recompute() {
    let (viewport, scheduler, display) = display(500.0, 900.0);
    let names = Rc::new(RefCell::new(Vec::new()));

    create_effect({
        let state = display.state();
        let names = names.clone();
        move |_| names.borrow_mut().push(state.get().name)
    });

    for width in [600.0, 800.0, 1000.0] {
        viewport.resize(width, 900.0);
        scheduler.advance(Duration::from_millis(200));
    }

    assert_eq!(
        *names.borrow(),
        [Breakpoint::Xs, Breakpoint::Sm, Breakpoint::Md, Breakpoint::Lg]
    );
}

#[test]
fn observers_only_see_whole_viewport_samples() {
    let (viewport, scheduler, display) = display(800.0, 600.0);
    let thresholds = display.options().thresholds;
    let seen = Rc::new(RefCell::new(Vec::new()));

    create_effect({
        let state = display.state();
        let seen = seen.clone();
        move |_| {
            let state = state.get();
            assert_eq!(
                state,
                BreakpointState::compute(state.width, state.height, &thresholds)
            );
            seen.borrow_mut().push((state.width, state.height));
        }
    });

    viewport.resize(1920.0, 1080.0);
    assert_eq!(*seen.borrow(), [(800.0, 600.0), (1920.0, 1080.0)]);

    // Trailing update inside the throttle window.
    viewport.resize(1000.0, 700.0);
    viewport.resize(300.0, 400.0);
    scheduler.advance(Duration::from_millis(200));
    assert_eq!(
        *seen.borrow(),
        [(800.0, 600.0), (1920.0, 1080.0), (300.0, 400.0)]
    );
}

#[test]
fn height_only_change_keeps_tier() {
    let (viewport, scheduler, display) = display(1000.0, 600.0);

    scheduler.advance(Duration::from_millis(500));
    viewport.resize(1000.0, 300.0);

    let state = display.get();
    assert_eq!(state.name, Breakpoint::Lg);
    assert_eq!(state.height, 300.0);
}

#[test]
fn unchanged_size_does_not_rerun_derivation() {
    let (viewport, _, display) = display(1000.0, 600.0);
    let runs = Rc::new(RefCell::new(0));

    create_effect({
        let state = display.state();
        let runs = runs.clone();
        move |_| {
            state.track();
            *runs.borrow_mut() += 1;
        }
    });

    viewport.resize(1000.0, 600.0);
    assert_eq!(*runs.borrow(), 1);
}

#[test]
fn manual_on_resize_feeds_the_throttle() {
    let (viewport, _, display) = display(1000.0, 600.0);

    viewport.set_client_size(400.0, 600.0);
    viewport.set_inner_size(400.0, 600.0);
    display.on_resize();

    assert_eq!(display.breakpoint(), Breakpoint::Xs);
}

#[test]
fn custom_thresholds_and_delay() {
    let options = BreakpointOptions {
        delay: Duration::from_millis(300),
        thresholds: Thresholds {
            sm: 100.0,
            md: 200.0,
            lg: 300.0,
            xl: 400.0,
            xxl: 500.0,
            xxxl: 600.0,
        },
    };
    let (viewport, scheduler, display) = display_with(250.0, 100.0, options);
    assert_eq!(display.breakpoint(), Breakpoint::Md);

    viewport.resize(450.0, 100.0);
    assert_eq!(display.breakpoint(), Breakpoint::Xl);

    scheduler.advance(Duration::from_millis(200));
    viewport.resize(650.0, 100.0);
    assert_eq!(display.breakpoint(), Breakpoint::Xl);

    scheduler.advance(Duration::from_millis(100));
    assert_eq!(display.breakpoint(), Breakpoint::Xxxl);
}
