use flowfilter::query::FilterTerm;
use flowfilter::ui::form::{
    decode_build_query, decode_select_agents, encode_selected_agents, filter_field,
    leading_condition_field, trailing_condition_field, FormResponse, ASSIGN_TO_AGENTS_FIELD,
    CANCEL_BUTTON, DESCRIPTION_FIELD, NAME_FIELD, NEXT_FILTER_FIELD, SELECTED_AGENTS_FIELD,
    UPDATE_BUTTON,
};
use flowfilter::wizard::{FormButton, QueryEdit};

#[test]
fn ui_form_module_uses_indexed_field_keys() {
    assert_eq!(leading_condition_field(0), "leadingCondition0");
    assert_eq!(filter_field(3), "filter3");
    assert_eq!(trailing_condition_field(12), "trailingCondition12");
}

#[test]
fn ui_form_module_decodes_next_filter_change_as_single_edit() {
    let mut form = FormResponse::new();
    form.set(NAME_FIELD, "Test")
        .set(DESCRIPTION_FIELD, "Desc")
        .set_checked(ASSIGN_TO_AGENTS_FIELD, true)
        .set(NEXT_FILTER_FIELD, "F2")
        .set(&leading_condition_field(0), "")
        .set(&filter_field(0), "F1")
        .mark_changed(NEXT_FILTER_FIELD);

    let response = decode_build_query(&form, 1);

    assert_eq!(response.name, "Test");
    assert_eq!(response.description, "Desc");
    assert!(response.assign_to_agents);
    assert_eq!(response.edit, QueryEdit::NextFilter("F2".to_string()));
    assert_eq!(response.button, None);
}

#[test]
fn ui_form_module_decodes_term_rows_and_reads_missing_fields_as_empty() {
    let mut form = FormResponse::new();
    form.set(&leading_condition_field(0), "(")
        .set(&filter_field(0), "F1")
        .set(&leading_condition_field(1), "AND")
        .set(&filter_field(1), "F2")
        .set(&trailing_condition_field(1), ")")
        .mark_changed(&trailing_condition_field(1))
        .press(UPDATE_BUTTON);

    let response = decode_build_query(&form, 2);

    assert_eq!(
        response.edit,
        QueryEdit::Terms(vec![
            FilterTerm::new("(", "F1", ""),
            FilterTerm::new("AND", "F2", ")"),
        ])
    );
    assert_eq!(response.name, "");
    assert!(!response.assign_to_agents);
    assert_eq!(response.button, Some(FormButton::Update));
}

#[test]
fn ui_form_module_cancel_wins_over_update() {
    let mut form = FormResponse::new();
    form.press(UPDATE_BUTTON).press(CANCEL_BUTTON);
    assert_eq!(decode_build_query(&form, 0).button, Some(FormButton::Cancel));
}

#[test]
fn ui_form_module_splits_selected_agents() {
    let mut form = FormResponse::new();
    form.set(SELECTED_AGENTS_FIELD, "10.0.0.1; 10.0.0.2;;")
        .press(UPDATE_BUTTON);

    let response = decode_select_agents(&form);
    assert_eq!(response.selected, vec!["10.0.0.1", "10.0.0.2"]);
    assert_eq!(response.button, Some(FormButton::Update));

    assert_eq!(encode_selected_agents(["a", "b"]), "a;b");
    assert!(decode_select_agents(&FormResponse::new()).selected.is_empty());
}

#[test]
fn ui_form_module_checkbox_values_are_case_insensitive() {
    let mut form = FormResponse::new();
    form.set(ASSIGN_TO_AGENTS_FIELD, "true");
    assert!(form.get_checked(ASSIGN_TO_AGENTS_FIELD));
    form.set_checked(ASSIGN_TO_AGENTS_FIELD, false);
    assert_eq!(form.get_string(ASSIGN_TO_AGENTS_FIELD), "False");
    assert!(!form.was_on_change(ASSIGN_TO_AGENTS_FIELD));
}
