//! Integration tests for the full prompt flow.

use std::cell::RefCell;
use std::rc::Rc;

use ratekeeper_core::conditions::{EnoughSignificantEvents, NotDeclinedToRateAnyVersion};
use ratekeeper_core::{
    MemoryStore, PromptEngine, PromptOutcome, PromptResponse, RatePromptPresenter,
    RatingCondition, RequestPromptPresenter, StaticAppVersionProvider,
};

/// Request presenter that always answers with a fixed response and counts
/// how often it was shown.
#[derive(Clone)]
struct ScriptedRequestPresenter {
    response: Option<PromptResponse>,
    presentations: Rc<RefCell<usize>>,
}

impl ScriptedRequestPresenter {
    fn new(response: Option<PromptResponse>) -> Self {
        Self {
            response,
            presentations: Rc::new(RefCell::new(0)),
        }
    }

    fn presentations(&self) -> usize {
        *self.presentations.borrow()
    }
}

impl RequestPromptPresenter for ScriptedRequestPresenter {
    fn present(&mut self) -> Option<PromptResponse> {
        *self.presentations.borrow_mut() += 1;
        self.response
    }
}

#[derive(Clone)]
struct CountingRatePresenter(Rc<RefCell<usize>>);

impl CountingRatePresenter {
    fn new() -> Self {
        Self(Rc::new(RefCell::new(0)))
    }

    fn presentations(&self) -> usize {
        *self.0.borrow()
    }
}

impl RatePromptPresenter for CountingRatePresenter {
    fn present(&mut self) {
        *self.0.borrow_mut() += 1;
    }
}

fn engine(
    conditions: Vec<Box<dyn RatingCondition>>,
    request: ScriptedRequestPresenter,
    rate: CountingRatePresenter,
) -> PromptEngine {
    PromptEngine::builder()
        .store(MemoryStore::new())
        .version_provider(StaticAppVersionProvider::new("1.4.0"))
        .request_presenter(request)
        .rate_presenter(rate)
        .conditions(conditions)
        .build()
        .expect("all dependencies supplied")
}

#[test]
fn fifth_significant_event_triggers_the_prompt_exactly_once() {
    let request = ScriptedRequestPresenter::new(Some(PromptResponse::AgreedToRate));
    let rate = CountingRatePresenter::new();
    let mut engine = engine(
        vec![Box::new(EnoughSignificantEvents::new(5))],
        request.clone(),
        rate.clone(),
    );

    for expected in 1..=4u64 {
        assert_eq!(engine.record_significant_event(true), None);
        assert_eq!(engine.ledger().significant_event_count, expected);
        assert_eq!(request.presentations(), 0);
    }

    let outcome = engine.record_significant_event(true);
    assert_eq!(outcome, Some(PromptOutcome::Rated));
    assert_eq!(engine.ledger().significant_event_count, 5);
    assert_eq!(request.presentations(), 1);
    assert_eq!(rate.presentations(), 1);
}

#[test]
fn declining_backs_the_prompt_off() {
    let request = ScriptedRequestPresenter::new(Some(PromptResponse::Declined));
    let rate = CountingRatePresenter::new();
    let mut engine = engine(
        vec![
            Box::new(EnoughSignificantEvents::new(1)),
            Box::new(NotDeclinedToRateAnyVersion::new(30, 2)),
        ],
        request.clone(),
        rate.clone(),
    );

    // First eligible event prompts; the user declines.
    assert_eq!(
        engine.record_significant_event(true),
        Some(PromptOutcome::Declined)
    );
    assert_eq!(engine.ledger().declined_actions.len(), 1);

    // The fresh decline blocks every following trigger.
    for _ in 0..5 {
        assert_eq!(engine.record_significant_event(true), None);
    }
    assert_eq!(request.presentations(), 1);
    assert_eq!(rate.presentations(), 0);
}

#[test]
fn suppressed_events_still_count_toward_the_threshold() {
    let request = ScriptedRequestPresenter::new(Some(PromptResponse::AgreedToRate));
    let rate = CountingRatePresenter::new();
    let mut engine = engine(
        vec![Box::new(EnoughSignificantEvents::new(3))],
        request.clone(),
        rate,
    );

    engine.record_significant_event(false);
    engine.record_significant_event(false);
    engine.record_significant_event(false);
    assert_eq!(engine.ledger().significant_event_count, 3);
    assert_eq!(request.presentations(), 0);

    // The next allowed trigger fires with the threshold already met.
    assert_eq!(
        engine.record_significant_event(true),
        Some(PromptOutcome::Rated)
    );
    assert_eq!(request.presentations(), 1);
}

#[test]
fn rated_action_carries_the_active_app_version() {
    let request = ScriptedRequestPresenter::new(Some(PromptResponse::AgreedToRate));
    let rate = CountingRatePresenter::new();
    let mut engine = engine(Vec::new(), request, rate);

    engine.record_significant_event(true);

    let ledger = engine.ledger();
    assert_eq!(ledger.rated_actions.len(), 1);
    assert_eq!(ledger.rated_actions[0].app_version, "1.4.0");
}
