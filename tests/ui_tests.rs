use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use stacknav::parser::decode;
use stacknav::ui::{filter, Mode, StackItem, ViewModel};

const DUMP: &str = "goroutine 1 [running]:\nmain.foo()\nmain.go:10\n\n\
                    goroutine 2 [chan receive]:\nmain.bar()\nmain.go:20\n\n\
                    goroutine 3 [select]:\nmain.foo()\nmain.go:10\n\n";

fn press(model: &mut ViewModel, code: KeyCode) {
    model.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_query(model: &mut ViewModel, query: &str) {
    for c in query.chars() {
        press(model, KeyCode::Char(c));
    }
}

fn model() -> ViewModel {
    let result = decode(DUMP.as_bytes()).unwrap();
    ViewModel::new("dump.txt", &result, 10)
}

#[test]
fn test_items_follow_grouped_order() {
    let model = model();

    assert_eq!(model.items().len(), 2);
    assert_eq!(
        model.items()[0],
        StackItem {
            title: "goroutine [1 3] [running select] [0s]".to_string(),
            description: "main.foo\nmain.go:10\n\n".to_string(),
        }
    );
    assert_eq!(model.selected(), Some(0));
}

#[test]
fn test_filter_over_item_values() {
    let model = model();
    let values: Vec<String> = model.items().iter().map(StackItem::filter_value).collect();

    let ranks = filter("main.bar", &values);

    assert_eq!(ranks.len(), 1);
    assert_eq!(ranks[0].index, 1);
    let start = "goroutine [2] [chan receive] [0s] ".chars().count();
    assert_eq!(ranks[0].matched, (start..start + 8).collect::<Vec<_>>());
}

#[test]
fn test_filter_mode_narrows_list() {
    let mut model = model();

    press(&mut model, KeyCode::Char('/'));
    assert_eq!(model.mode(), Mode::Filtering);

    type_query(&mut model, "bar");
    assert_eq!(model.query(), "bar");
    assert_eq!(model.visible().len(), 1);
    assert_eq!(model.selected_item().unwrap().title, "goroutine [2] [chan receive] [0s]");

    press(&mut model, KeyCode::Enter);
    assert_eq!(model.mode(), Mode::Browsing);
    assert_eq!(model.visible().len(), 1);

    // Esc in browse mode drops the filter before quitting
    press(&mut model, KeyCode::Esc);
    assert_eq!(model.visible().len(), 2);
    assert!(!model.should_quit());

    press(&mut model, KeyCode::Esc);
    assert!(model.should_quit());
}

#[test]
fn test_filter_without_matches() {
    let mut model = model();

    press(&mut model, KeyCode::Char('/'));
    type_query(&mut model, "nothing here");

    assert!(model.visible().is_empty());
    assert_eq!(model.selected(), None);
    assert!(model.selected_item().is_none());

    press(&mut model, KeyCode::Esc);
    assert_eq!(model.visible().len(), 2);
}

#[test]
fn test_navigation_is_clamped() {
    let mut model = model();

    press(&mut model, KeyCode::Up);
    assert_eq!(model.selected(), Some(0));

    press(&mut model, KeyCode::Down);
    press(&mut model, KeyCode::Down);
    assert_eq!(model.selected(), Some(1));

    press(&mut model, KeyCode::Home);
    assert_eq!(model.selected(), Some(0));

    press(&mut model, KeyCode::End);
    assert_eq!(model.selected(), Some(1));
}

#[test]
fn test_detail_height_bounds() {
    let result = decode(DUMP.as_bytes()).unwrap();
    let mut model = ViewModel::new("dump.txt", &result, 3);

    press(&mut model, KeyCode::Char('+'));
    assert_eq!(model.detail_height(), 4);

    for _ in 0..10 {
        press(&mut model, KeyCode::Char('-'));
    }
    assert_eq!(model.detail_height(), 2);
}

#[test]
fn test_ctrl_c_quits_while_filtering() {
    let mut model = model();

    press(&mut model, KeyCode::Char('/'));
    model.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

    assert!(model.should_quit());
}

#[test]
fn test_q_is_typed_while_filtering() {
    let mut model = model();

    press(&mut model, KeyCode::Char('/'));
    press(&mut model, KeyCode::Char('q'));

    assert!(!model.should_quit());
    assert_eq!(model.query(), "q");
}
