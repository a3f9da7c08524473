use booking_ui::{
    ALERT_DISMISS_DELAY_MS, CONFIRM_EDIT_MESSAGE, Error, Harness, Result,
};

const BOOKING_PAGE: &str = r#"
    <!DOCTYPE html>
    <html>
    <head><title>Book My Table</title></head>
    <body>
        <div class="alert alert-success">Booking updated successfully.</div>
        <div class="alert alert-info">You have 2 upcoming bookings.</div>
        <div class="alert alert-danger">Could not update booking.</div>
        <section id="bookings">
            <article class="booking-card">
                <h2>Booking 12</h2>
                <button id="edit-12" data-edit-booking="12">Edit</button>
                <form id="edit-form-12" class="d-none" method="post">
                    <input id="date-12" name="date" value="2026-08-14">
                    <input id="guests-12" name="guests" value="4">
                    <textarea id="notes-12" name="notes">window seat</textarea>
                </form>
            </article>
            <article class="booking-card">
                <h2>Booking 34</h2>
                <button id="edit-34" data-edit-booking="34">Edit</button>
                <form id="edit-form-34" style="display: none;" method="post">
                    <input id="date-34" name="date" value="2026-08-20">
                    <input id="guests-34" name="guests" value="2">
                </form>
            </article>
        </section>
    </body>
    </html>
    "#;

#[test]
fn confirmed_toggle_shows_only_the_requested_form() -> Result<()> {
    let mut harness = Harness::from_html(BOOKING_PAGE)?;
    harness.push_confirm_response(true);

    harness.show_edit_form("12")?;

    harness.assert_visible("#edit-form-12")?;
    harness.assert_hidden("#edit-form-34")?;
    Ok(())
}

#[test]
fn declined_confirmation_changes_no_visibility() -> Result<()> {
    let mut harness = Harness::from_html(BOOKING_PAGE)?;
    harness.push_confirm_response(true);
    harness.show_edit_form("12")?;

    harness.push_confirm_response(false);
    harness.show_edit_form("34")?;

    harness.assert_visible("#edit-form-12")?;
    harness.assert_hidden("#edit-form-34")?;
    assert_eq!(harness.take_confirm_prompts().len(), 2);
    Ok(())
}

#[test]
fn missing_form_hides_everything_without_error() -> Result<()> {
    let mut harness = Harness::from_html(BOOKING_PAGE)?;
    harness.push_confirm_response(true);
    harness.show_edit_form("12")?;

    harness.push_confirm_response(true);
    harness.show_edit_form("99")?;

    harness.assert_hidden("#edit-form-12")?;
    harness.assert_hidden("#edit-form-34")?;
    Ok(())
}

#[test]
fn toggling_the_same_booking_twice_is_idempotent() -> Result<()> {
    let mut harness = Harness::from_html(BOOKING_PAGE)?;
    harness.set_default_confirm_response(true);

    harness.show_edit_form("12")?;
    let first = harness.dump_dom("#edit-form-12")?;

    harness.show_edit_form("12")?;
    let second = harness.dump_dom("#edit-form-12")?;

    assert_eq!(first, second);
    harness.assert_visible("#edit-form-12")?;
    harness.assert_hidden("#edit-form-34")?;
    Ok(())
}

#[test]
fn switching_bookings_moves_visibility() -> Result<()> {
    let mut harness = Harness::from_html(BOOKING_PAGE)?;
    harness.set_default_confirm_response(true);

    harness.show_edit_form("12")?;
    harness.show_edit_form("34")?;

    harness.assert_hidden("#edit-form-12")?;
    harness.assert_visible("#edit-form-34")?;
    Ok(())
}

#[test]
fn revealing_strips_the_hidden_class_marker() -> Result<()> {
    let mut harness = Harness::from_html(BOOKING_PAGE)?;
    harness.push_confirm_response(true);
    harness.show_edit_form("12")?;

    let dump = harness.dump_dom("#edit-form-12")?;
    assert!(
        !dump.contains("d-none"),
        "hidden class should be removed: {dump}"
    );
    assert!(dump.contains("display: block"), "form not revealed: {dump}");
    Ok(())
}

#[test]
fn edit_trigger_click_drives_the_confirmation_flow() -> Result<()> {
    let mut harness = Harness::from_html(BOOKING_PAGE)?;

    // Default answer declines, so the first click changes nothing.
    harness.click("#edit-12")?;
    harness.assert_hidden("#edit-form-12")?;

    harness.push_confirm_response(true);
    harness.click("#edit-12")?;
    harness.assert_visible("#edit-form-12")?;

    let prompts = harness.take_confirm_prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts.iter().all(|p| p == CONFIRM_EDIT_MESSAGE));
    Ok(())
}

#[test]
fn success_and_info_alerts_close_after_the_delay() -> Result<()> {
    let mut harness = Harness::from_html(BOOKING_PAGE)?;

    harness.advance_time(ALERT_DISMISS_DELAY_MS - 1)?;
    harness.assert_exists(".alert-success")?;
    harness.assert_exists(".alert-info")?;

    harness.advance_time(1)?;
    harness.assert_absent(".alert-success")?;
    harness.assert_absent(".alert-info")?;
    harness.assert_exists(".alert-danger")?;

    harness.advance_time(60_000)?;
    harness.assert_exists(".alert-danger")?;
    Ok(())
}

#[test]
fn unmarked_alerts_are_never_scheduled() -> Result<()> {
    let html = r#"
        <div class="alert">House wine is half price on Tuesdays.</div>
        "#;
    let mut harness = Harness::from_html(html)?;
    assert!(harness.pending_timers().is_empty());
    harness.flush()?;
    harness.assert_exists(".alert")?;
    Ok(())
}

#[test]
fn example_scenario_runs_end_to_end() -> Result<()> {
    let html = r#"
        <div class="alert alert-success">Saved.</div>
        <form id="edit-form-12" style="display: none;"></form>
        <form id="edit-form-34" style="display: none;"></form>
        "#;
    let mut harness = Harness::from_html(html)?;

    harness.push_confirm_response(true);
    harness.show_edit_form("12")?;
    harness.assert_visible("#edit-form-12")?;
    harness.assert_hidden("#edit-form-34")?;

    harness.advance_time(ALERT_DISMISS_DELAY_MS)?;
    harness.assert_absent(".alert-success")?;
    harness.assert_visible("#edit-form-12")?;
    harness.assert_hidden("#edit-form-34")?;
    Ok(())
}

#[test]
fn user_dismissal_before_the_timer_is_not_an_error() -> Result<()> {
    let mut harness = Harness::from_html(BOOKING_PAGE)?;

    harness.dismiss_alert(".alert-success")?;
    harness.assert_absent(".alert-success")?;

    // The scheduled close for the removed alert fires as a no-op.
    harness.advance_time(ALERT_DISMISS_DELAY_MS)?;
    harness.assert_absent(".alert-success")?;
    harness.assert_absent(".alert-info")?;
    harness.assert_exists(".alert-danger")?;
    Ok(())
}

#[test]
fn alert_timers_fire_independently() -> Result<()> {
    let html = r#"
        <div id="first" class="alert alert-success">one</div>
        <div id="second" class="alert alert-info">two</div>
        "#;
    let mut harness = Harness::from_html(html)?;
    let timers = harness.pending_timers();
    assert_eq!(timers.len(), 2);
    assert_eq!(timers[0].due_at, ALERT_DISMISS_DELAY_MS);
    assert_eq!(timers[1].due_at, ALERT_DISMISS_DELAY_MS);

    harness.advance_time_to(ALERT_DISMISS_DELAY_MS)?;
    harness.assert_absent("#first")?;
    harness.assert_absent("#second")?;
    assert_eq!(harness.now_ms(), ALERT_DISMISS_DELAY_MS);
    Ok(())
}

#[test]
fn revealed_form_inputs_are_drivable() -> Result<()> {
    let mut harness = Harness::from_html(BOOKING_PAGE)?;
    harness.push_confirm_response(true);
    harness.show_edit_form("12")?;

    harness.type_text("#guests-12", "6")?;
    harness.type_text("#notes-12", "birthday cake")?;

    harness.assert_value("#guests-12", "6")?;
    harness.assert_value("#notes-12", "birthday cake")?;
    harness.assert_value("#date-12", "2026-08-14")?;
    Ok(())
}

#[test]
fn clicking_an_unknown_selector_reports_the_selector() -> Result<()> {
    let mut harness = Harness::from_html(BOOKING_PAGE)?;
    match harness.click("#edit-99") {
        Err(Error::SelectorNotFound(selector)) => {
            assert_eq!(selector, "#edit-99");
        }
        other => panic!("expected selector not found, got {other:?}"),
    }
    Ok(())
}
