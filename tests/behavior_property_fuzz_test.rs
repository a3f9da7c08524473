use booking_ui::{ALERT_DISMISS_DELAY_MS, Harness};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseResult};

const BEHAVIOR_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/behavior_property_fuzz_test.txt";
const DEFAULT_BEHAVIOR_PROPTEST_CASES: u32 = 128;

const BOOKING_LIST_HTML: &str = r#"
    <div class="alert alert-success">Booking updated successfully.</div>
    <div class="alert alert-info">You have upcoming bookings.</div>
    <div class="alert">Kitchen closes at 22:00.</div>
    <section id="bookings">
        <button data-edit-booking="12">Edit 12</button>
        <form id="edit-form-12" class="d-none"><input value="4"></form>
        <button data-edit-booking="34">Edit 34</button>
        <form id="edit-form-34" style="display: none;"><input value="2"></form>
        <button data-edit-booking="56">Edit 56</button>
        <form id="edit-form-56" class="d-none"><input value="8"></form>
    </section>
    "#;

const FORM_SELECTORS: [&str; 3] = ["#edit-form-12", "#edit-form-34", "#edit-form-56"];
const BOOKING_IDS: [&str; 4] = ["12", "34", "56", "99"];

#[derive(Clone, Debug)]
enum PageAction {
    ToggleBooking { booking: usize, confirm: bool },
    AdvanceTime(i64),
}

fn behavior_proptest_cases() -> u32 {
    std::env::var("BOOKING_UI_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_BEHAVIOR_PROPTEST_CASES)
}

fn page_action_strategy() -> BoxedStrategy<PageAction> {
    prop_oneof![
        4 => (0..BOOKING_IDS.len(), any::<bool>())
            .prop_map(|(booking, confirm)| PageAction::ToggleBooking { booking, confirm }),
        3 => (0i64..=2_000).prop_map(PageAction::AdvanceTime),
        1 => Just(PageAction::AdvanceTime(ALERT_DISMISS_DELAY_MS)),
    ]
    .boxed()
}

fn page_action_sequence_strategy() -> BoxedStrategy<Vec<PageAction>> {
    vec(page_action_strategy(), 1..=24).boxed()
}

fn run_action(harness: &mut Harness, action: &PageAction) -> booking_ui::Result<()> {
    match action {
        PageAction::ToggleBooking { booking, confirm } => {
            harness.push_confirm_response(*confirm);
            harness.show_edit_form(BOOKING_IDS[*booking])
        }
        PageAction::AdvanceTime(delta_ms) => harness.advance_time(*delta_ms),
    }
}

fn visible_form_count(harness: &Harness) -> booking_ui::Result<usize> {
    let mut count = 0usize;
    for selector in FORM_SELECTORS {
        if harness.is_visible(selector)? {
            count += 1;
        }
    }
    Ok(count)
}

fn check_alert_presence(harness: &Harness, step: usize) -> TestCaseResult {
    let expired = harness.now_ms() >= ALERT_DISMISS_DELAY_MS;
    for selector in [".alert-success", ".alert-info"] {
        let present = harness.assert_exists(selector).is_ok();
        prop_assert_eq!(
            present,
            !expired,
            "dismissible alert {} in wrong state at step {}, now_ms={}",
            selector,
            step,
            harness.now_ms()
        );
    }
    Ok(())
}

fn assert_behavior_sequence_is_stable(actions: &[PageAction]) -> TestCaseResult {
    let mut harness = Harness::from_html(BOOKING_LIST_HTML)
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;

    for (step, action) in actions.iter().enumerate() {
        let outcome = run_action(&mut harness, action);
        prop_assert!(
            outcome.is_ok(),
            "action returned error at step {}: {:?}, error={:?}, actions={:?}",
            step,
            action,
            outcome.err(),
            actions
        );

        let visible = visible_form_count(&harness)
            .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;
        prop_assert!(
            visible <= 1,
            "more than one edit form visible after step {}: {:?}, actions={:?}",
            step,
            action,
            actions
        );

        check_alert_presence(&harness, step)?;
    }

    harness
        .flush()
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;
    prop_assert!(
        harness.assert_absent(".alert-success").is_ok(),
        "success alert survived flush, actions={actions:?}"
    );
    prop_assert!(
        harness.assert_absent(".alert-info").is_ok(),
        "info alert survived flush, actions={actions:?}"
    );
    prop_assert!(
        harness.assert_exists(".alert").is_ok(),
        "plain alert was dismissed, actions={actions:?}"
    );

    let visible = visible_form_count(&harness)
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;
    prop_assert!(visible <= 1, "invariant broken after flush, actions={actions:?}");

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: behavior_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(BEHAVIOR_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn booking_page_actions_keep_invariants(actions in page_action_sequence_strategy()) {
        assert_behavior_sequence_is_stable(&actions)?;
    }
}
