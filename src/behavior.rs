use crate::dom::NodeId;
use crate::{Error, Harness, Result};

pub const EDIT_FORM_ID_PREFIX: &str = "edit-form-";
pub const CONFIRM_EDIT_MESSAGE: &str = "Are you sure you want to edit this booking?";
pub const EDIT_TRIGGER_ATTR: &str = "data-edit-booking";
pub const HIDDEN_CLASS: &str = "d-none";

pub const ALERT_CLASS: &str = "alert";
pub const ALERT_SUCCESS_CLASS: &str = "alert-success";
pub const ALERT_INFO_CLASS: &str = "alert-info";
pub const ALERT_DISMISS_DELAY_MS: i64 = 3_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerTask {
    CloseAlert(NodeId),
}

impl Harness {
    pub fn show_edit_form(&mut self, booking_id: &str) -> Result<()> {
        if !self.confirm(CONFIRM_EDIT_MESSAGE) {
            return Ok(());
        }

        let all_forms = self
            .dom
            .query_selector_all(&format!("[id^={EDIT_FORM_ID_PREFIX}]"))?;
        for form in all_forms {
            self.dom.style_set(form, "display", "none")?;
        }

        let form_id = format!("{EDIT_FORM_ID_PREFIX}{booking_id}");
        match self.dom.by_id(&form_id) {
            Some(form) => {
                self.dom.class_remove(form, HIDDEN_CLASS)?;
                self.dom.style_set(form, "display", "block")?;
                self.trace_event_line(format!("[form] show id={form_id}"));
            }
            None => {
                self.trace_event_line(format!("[form] missing id={form_id}"));
            }
        }

        Ok(())
    }

    pub(crate) fn schedule_alert_dismissals(&mut self) -> Result<()> {
        let alerts = self.dom.query_selector_all(&format!(".{ALERT_CLASS}"))?;
        for alert in alerts {
            if self.dom.class_contains(alert, ALERT_SUCCESS_CLASS)?
                || self.dom.class_contains(alert, ALERT_INFO_CLASS)?
            {
                self.schedule_timeout(TimerTask::CloseAlert(alert), ALERT_DISMISS_DELAY_MS);
            }
        }
        Ok(())
    }

    pub fn dismiss_alert(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if !self.dom.class_contains(target, ALERT_CLASS)? {
            let actual = self
                .dom
                .tag_name(target)
                .unwrap_or("non-element")
                .to_ascii_lowercase();
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: format!("element with {ALERT_CLASS} class"),
                actual,
            });
        }
        self.close_alert(target)
    }

    pub(crate) fn close_alert(&mut self, alert: NodeId) -> Result<()> {
        if !self.dom.is_valid_node(alert) || !self.dom.is_connected(alert) {
            self.trace_event_line("[alert] close skipped, already removed".into());
            return Ok(());
        }
        let label = self.trace_node_label(alert);
        self.dom.remove_node(alert)?;
        self.trace_event_line(format!("[alert] close {label}"));
        Ok(())
    }

    pub(crate) fn edit_trigger_booking(&self, target: NodeId) -> Option<String> {
        self.dom.attr(target, EDIT_TRIGGER_ATTR)
    }
}
