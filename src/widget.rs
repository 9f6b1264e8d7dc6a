// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt::Display;

use tracing::{debug, error};

/// Runs the initialisation of one page widget.
///
/// A failing widget is logged and skipped, so the remaining independent widgets of the page still
/// get initialised. There are no retries.
pub fn guarded<T, E, I>(widget: &str, init: I) -> Option<T>
where
    E: Display,
    I: FnOnce() -> Result<T, E>,
{
    match init() {
        Ok(value) => {
            debug!(widget, "initialised widget");
            Some(value)
        }
        Err(err) => {
            error!(widget, "error in {widget} init: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::guarded;

    #[test]
    fn returns_value_of_successful_init() {
        assert_eq!(guarded("datatable", || Ok::<_, String>(3)), Some(3));
    }

    #[test]
    fn failing_widget_does_not_stop_others() {
        let mut initialised = Vec::new();

        for name in ["popover", "datatable", "datetimepicker"] {
            let result = guarded(name, || {
                if name == "datatable" {
                    return Err(format!("{name} plugin missing"));
                }
                Ok(name)
            });

            if let Some(name) = result {
                initialised.push(name);
            }
        }

        assert_eq!(initialised, vec!["popover", "datetimepicker"]);
    }
}
