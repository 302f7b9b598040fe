use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flowfilter::catalog::{agent_display_label, CatalogSnapshot};
use flowfilter::query::FilterTerm;
use flowfilter::ui::form::{decode_build_query, decode_select_agents, NEXT_FILTER_FIELD};
use flowfilter::ui::navigation::{
    clamp_selection, form_action_from_key, parse_scripted_keys, BuildQueryControl,
    BuildQueryEditor, EditorEvent, FormAction, SelectAgentsControl, SelectAgentsEditor,
};
use flowfilter::wizard::{
    project_build_query_view, project_select_agents_view, BuildQueryView, FormButton, QueryEdit,
    WizardSession,
};
use std::collections::BTreeMap;

fn key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn catalog() -> CatalogSnapshot {
    CatalogSnapshot::new(
        ["F1", "F2"],
        BTreeMap::from([
            ("10.0.0.1".to_string(), agent_display_label("10.0.0.1", "edge")),
            ("10.0.0.2".to_string(), agent_display_label("10.0.0.2", "core")),
        ]),
    )
}

fn view_with(terms: &[&str]) -> BuildQueryView {
    let catalog = catalog();
    let mut session = WizardSession::new();
    session.query.name = "Test".to_string();
    session.query.description = "Desc".to_string();
    for name in terms {
        session.query.add_term(name, &catalog).expect("add term");
    }
    project_build_query_view(&session, &catalog)
}

fn submitted(event: EditorEvent) -> flowfilter::ui::FormResponse {
    match event {
        EditorEvent::Submit(form) => form,
        other => panic!("expected submit, got {other:?}"),
    }
}

#[test]
fn ui_navigation_module_maps_keys_by_editing_mode() {
    assert_eq!(
        form_action_from_key(false, key_event(KeyCode::Esc)),
        Some(FormAction::Cancel)
    );
    assert_eq!(
        form_action_from_key(true, key_event(KeyCode::Esc)),
        Some(FormAction::Activate)
    );
    assert_eq!(
        form_action_from_key(true, key_event(KeyCode::Char('x'))),
        Some(FormAction::Input('x'))
    );
    assert_eq!(
        form_action_from_key(false, key_event(KeyCode::Char(' '))),
        Some(FormAction::Activate)
    );
    assert_eq!(
        form_action_from_key(
            true,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ),
        Some(FormAction::Detach)
    );
}

#[test]
fn ui_navigation_module_parses_scripted_keys() {
    let keys = parse_scripted_keys("down, type:ab ,enter,ctrl-c").expect("parse keys");
    assert_eq!(keys.len(), 5);
    assert_eq!(keys[1], key_event(KeyCode::Char('a')));
    assert_eq!(keys[4].modifiers, KeyModifiers::CONTROL);

    let err = parse_scripted_keys("down,jump").expect_err("unknown token");
    assert!(err.contains("`jump`"));
}

#[test]
fn ui_navigation_module_empty_catalog_offers_only_cancel() {
    let catalog = CatalogSnapshot::default();
    let view = project_build_query_view(&WizardSession::new(), &catalog);
    let editor = BuildQueryEditor::new(&view, None);

    assert_eq!(
        editor.controls(),
        &[
            BuildQueryControl::Name,
            BuildQueryControl::Description,
            BuildQueryControl::Cancel
        ]
    );
    assert!(!editor.has_filters());
}

#[test]
fn ui_navigation_module_omits_closing_control_without_open_group() {
    let editor = BuildQueryEditor::new(&view_with(&["F1"]), None);
    assert!(!editor
        .controls()
        .contains(&BuildQueryControl::Trailing(0)));
    assert_eq!(editor.form().get_string("trailingCondition0"), "");
}

#[test]
fn ui_navigation_module_operator_change_submits_term_list() {
    let view = view_with(&["F1"]);
    let mut editor = BuildQueryEditor::new(&view, Some(BuildQueryControl::Leading(0)));

    let form = submitted(editor.apply(FormAction::NextOption));
    assert!(form.was_on_change("leadingCondition0"));

    let response = decode_build_query(&form, view.rows.len());
    assert_eq!(
        response.edit,
        QueryEdit::Terms(vec![FilterTerm::new("NOT", "F1", "")])
    );
    assert_eq!(response.name, "Test");
    assert_eq!(response.button, None);
}

#[test]
fn ui_navigation_module_filter_rename_is_buffered_until_submit() {
    let view = view_with(&["F1"]);
    let mut editor = BuildQueryEditor::new(&view, Some(BuildQueryControl::Filter(0)));

    assert_eq!(editor.apply(FormAction::NextOption), EditorEvent::Continue);
    assert_eq!(editor.expression_preview(), "F2");

    let form = submitted(editor.apply(FormAction::Cancel));
    let response = decode_build_query(&form, 1);
    assert_eq!(response.button, Some(FormButton::Cancel));
    assert_eq!(response.edit, QueryEdit::Terms(vec![FilterTerm::bare("F2")]));
}

#[test]
fn ui_navigation_module_next_filter_pick_submits_selected_option() {
    let view = view_with(&[]);
    let mut editor = BuildQueryEditor::new(&view, Some(BuildQueryControl::NextFilter));

    editor.apply(FormAction::NextOption);
    editor.apply(FormAction::NextOption);
    let form = submitted(editor.apply(FormAction::Activate));

    assert!(form.was_on_change(NEXT_FILTER_FIELD));
    assert_eq!(
        decode_build_query(&form, 0).edit,
        QueryEdit::NextFilter("F1".to_string())
    );
}

#[test]
fn ui_navigation_module_edits_name_text_in_place() {
    let view = view_with(&[]);
    let mut editor = BuildQueryEditor::new(&view, None);

    editor.apply(FormAction::Activate);
    assert!(editor.is_editing_text());
    editor.apply(FormAction::Input('s'));
    editor.apply(FormAction::Input('x'));
    editor.apply(FormAction::Backspace);
    assert_eq!(editor.rows()[0].value.as_deref(), Some("Tests_"));
    editor.apply(FormAction::Activate);
    assert!(!editor.is_editing_text());

    assert_eq!(editor.form().get_string("name"), "Tests");
}

#[test]
fn ui_navigation_module_toggles_agents_and_submits_selection() {
    let catalog = catalog();
    let view = project_select_agents_view(&WizardSession::new(), &catalog);
    let mut editor = SelectAgentsEditor::new(&view);

    assert_eq!(
        editor.controls(),
        &[
            SelectAgentsControl::Agent(0),
            SelectAgentsControl::Agent(1),
            SelectAgentsControl::Update,
            SelectAgentsControl::Cancel,
        ]
    );
    editor.apply(FormAction::MoveNext);
    editor.apply(FormAction::Activate);
    editor.apply(FormAction::MoveNext);

    let response = decode_select_agents(&submitted(editor.apply(FormAction::Activate)));
    assert_eq!(response.selected, vec!["10.0.0.2"]);
    assert_eq!(response.button, Some(FormButton::Update));
}

#[test]
fn ui_navigation_module_clamps_selection() {
    assert_eq!(clamp_selection(9, 3), 2);
    assert_eq!(clamp_selection(1, 0), 0);
}
