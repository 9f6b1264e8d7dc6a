// SPDX-License-Identifier: AGPL-3.0-or-later

use rstest::rstest;

use crate::config::StrategyKind;
use crate::controller::{FormController, FormElements};
use crate::field::{ChoiceField, Field};
use crate::mode::{ArgumentKind, ArgumentMode, ModeError};
use crate::strategy::{DisableExchange, NameExchange};
use crate::table::PermissionArgumentTable;
use crate::test_utils::{FakeField, FakeSection, FakeSelect};

use super::fixtures::{build_form, form, table, TestController, TestForm};

#[rstest]
fn starts_without_argument_and_reason(form: TestForm) {
    assert_eq!(form.controller.mode(), &ArgumentMode::Unselected);
    assert!(!form.argument_section.is_visible());
    assert!(!form.reason_section.is_visible());
    assert_eq!(form.submitted_arguments(), 0);
}

#[rstest]
fn follows_permission_selection(mut form: TestForm) {
    form.select_permission(0, "edit");
    assert_eq!(form.controller.eligible(), Some(ArgumentKind::Text));
    assert!(form.argument_section.is_visible());
    assert!(form.reason_section.is_visible());
    assert!(form.text.submits_argument() && form.text.is_visible());
    assert!(!form.select.submits_argument() && !form.select.is_visible());

    form.select_permission(0, "view");
    assert_eq!(form.controller.eligible(), Some(ArgumentKind::Select));
    assert_eq!(form.select.options(), vec!["prod", "staging"]);
    assert!(form.select.submits_argument() && form.select.is_visible());
    assert!(form.text.is_disabled() && !form.text.is_visible());

    form.select_permission(0, "");
    assert_eq!(form.controller.eligible(), None);
    assert!(!form.argument_section.is_visible());
    assert!(!form.reason_section.is_visible());
    assert_eq!(form.submitted_arguments(), 0);
}

#[rstest]
fn rebuilds_dropdown_without_stale_options(mut form: TestForm) {
    form.select_permission(0, "audit");
    assert_eq!(form.select.options(), vec!["us-east", "eu-west", "ap-south"]);

    form.select_permission(0, "edit");
    form.select_permission(0, "deploy");
    assert_eq!(form.select.options(), vec!["prod"]);

    form.select_permission(0, "view");
    assert_eq!(form.select.options(), vec!["prod", "staging"]);
    assert_eq!(form.select.value(), "prod");
}

#[rstest]
fn keeps_selected_argument_while_offered(mut form: TestForm) {
    form.select_permission(0, "view");
    form.select.set_value("staging");

    // Re-selecting the same permission rebuilds the dropdown but keeps the choice
    form.select_permission(0, "view");
    assert_eq!(form.select.value(), "staging");

    form.select_permission(0, "deploy");
    assert_eq!(form.select.value(), "prod");
}

#[rstest]
fn clears_stale_text_when_entering_wildcard_mode(mut form: TestForm) {
    form.select_permission(0, "edit");
    form.text.set_value("team-a");

    // Switching between wildcard permissions keeps what was typed
    form.select_permission(0, "create");
    assert_eq!(form.text.value(), "team-a");

    form.select_permission(0, "view");
    form.select_permission(0, "create");
    assert_eq!(form.text.value(), "");
}

#[rstest]
fn unknown_permission_leaves_fields_untouched(table: PermissionArgumentTable) {
    // Page offers a permission its table has no entry for
    let selector = FakeSelect::with_options("permission_name", &["", "view", "delete"]);
    let select = FakeSelect::named("argument");
    let section = FakeSection::default();

    let mut controller = FormController::new(
        table,
        FormElements {
            permission: vec![selector.clone()],
            group: None,
            text: FakeField::named("argument"),
            select: select.clone(),
            reason: Vec::new(),
            argument_sections: vec![section.clone()],
            reason_sections: Vec::new(),
        },
        Box::new(DisableExchange),
    );

    controller.permission_changed("view").unwrap();

    let result = controller.permission_changed("delete");
    assert_eq!(result, Err(ModeError::UnknownPermission("delete".into())));

    assert_eq!(
        controller.mode(),
        &ArgumentMode::Enumerated(vec!["prod".into(), "staging".into()])
    );
    assert_eq!(select.options(), vec!["prod", "staging"]);
    assert!(select.submits_argument());
    assert!(section.is_visible());
}

#[rstest]
fn synchronises_duplicated_fields(table: PermissionArgumentTable) {
    let mut form = build_form(table, StrategyKind::Disable, 2, None);

    form.select_permission(1, "deploy");
    assert_eq!(form.permission[0].value(), "deploy");
    assert_eq!(form.controller.permission(), "deploy");
    assert_eq!(form.select.options(), vec!["prod"]);

    form.reason[1].set_value("on call this week");
    form.controller.reason_changed("on call this week");
    assert_eq!(form.reason[0].value(), "on call this week");
}

#[rstest]
fn name_exchange_hands_argument_name_to_one_field(table: PermissionArgumentTable) {
    let mut form = build_form(table, StrategyKind::Rename, 1, None);

    form.select_permission(0, "edit");
    assert_eq!(form.text.name(), "argument");
    assert_eq!(form.select.name(), "ignore");
    assert!(form.text.is_required() && !form.select.is_required());

    form.select_permission(0, "audit");
    assert_eq!(form.text.name(), "ignore");
    assert_eq!(form.select.name(), "argument");
    assert!(!form.text.is_required() && form.select.is_required());
    assert!(!form.text.is_disabled() && !form.select.is_disabled());
}

#[rstest]
fn locks_single_option_selectors(table: PermissionArgumentTable) {
    let groups: &[&str] = &["team-sre"];
    let mut form = build_form(table, StrategyKind::Disable, 1, Some(groups));

    // Group selector was fixed by the page, the permission selector offers every permission
    let group = form.group.clone().unwrap();
    assert!(group.is_disabled());
    assert!(!form.permission[0].is_disabled());
    assert_eq!(form.controller.locked_count(), 1);

    form.select_permission(0, "view");
    form.controller.before_submit();
    assert!(!group.is_disabled());

    // The ineligible argument field stays out of the submission
    assert!(form.text.is_disabled());
    assert_eq!(form.submitted_arguments(), 1);
}

fn prefilled_form(
    table: PermissionArgumentTable,
    permission: &str,
    argument: &str,
) -> (TestController, FakeSelect, FakeField, FakeSelect) {
    let selector = FakeSelect::with_options("permission_name", &[permission]);
    let text = FakeField::named("argument");
    text.set_value(argument);
    let select = FakeSelect::named("argument");

    let controller = FormController::new(
        table,
        FormElements {
            permission: vec![selector.clone()],
            group: None,
            text: text.clone(),
            select: select.clone(),
            reason: vec![FakeField::named("reason")],
            argument_sections: vec![FakeSection::default()],
            reason_sections: vec![FakeSection::default()],
        },
        Box::new(DisableExchange),
    );

    (controller, selector, text, select)
}

#[rstest]
fn priming_keeps_prefilled_text(table: PermissionArgumentTable) {
    let (controller, selector, text, _) = prefilled_form(table, "edit", "team-a");

    assert_eq!(controller.mode(), &ArgumentMode::Wildcard);
    assert_eq!(text.value(), "team-a");
    assert!(text.submits_argument());

    assert!(selector.is_disabled());
    controller.before_submit();
    assert!(!selector.is_disabled());
    assert_eq!(selector.value(), "edit");
}

#[rstest]
fn priming_selects_prefilled_argument(table: PermissionArgumentTable) {
    let (controller, _, _, select) = prefilled_form(table, "audit", "eu-west");

    assert_eq!(controller.eligible(), Some(ArgumentKind::Select));
    assert_eq!(select.value(), "eu-west");
}

#[rstest]
fn priming_ignores_argument_not_offered(table: PermissionArgumentTable) {
    let (_, _, _, select) = prefilled_form(table, "audit", "mars");
    assert_eq!(select.value(), "us-east");
}

#[rstest]
fn reuses_page_supplied_dropdown(table: PermissionArgumentTable) {
    let selector = FakeSelect::with_options("permission_name", &["", "view"]);
    let select = FakeSelect::with_options("argument", &[""]);

    let mut controller: TestController = FormController::new(
        table,
        FormElements {
            permission: vec![selector.clone()],
            group: None,
            text: FakeField::named("argument"),
            select: select.clone(),
            reason: Vec::new(),
            argument_sections: Vec::new(),
            reason_sections: Vec::new(),
        },
        Box::new(NameExchange::default()),
    );

    // A dropdown offering one option is not a selector the page fixed
    assert_eq!(controller.locked_count(), 0);
    assert!(!select.is_disabled());

    selector.set_value("view");
    controller.permission_changed("view").unwrap();
    assert_eq!(select.options(), vec!["prod", "staging"]);
}

#[rstest]
fn reports_state(mut form: TestForm) {
    form.select_permission(0, "view");
    let state = form.controller.state();

    assert_eq!(state.permission, "view");
    assert_eq!(state.mode, "enumerated");
    assert_eq!(state.eligible, Some(ArgumentKind::Select));
    assert_eq!(state.options, vec!["prod", "staging"]);
    assert_eq!(state.locked, 0);
}
