use super::*;

fn task(id: u64, title: &str) -> Task {
    Task {
        id: TaskId::from(id),
        title: title.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_new_selects_first_task() {
    let list = TaskList::new(vec![task(1, "Laundry"), task(2, "Dishes")]);
    assert_eq!(list.len(), 2);
    assert_eq!(list.selected().map(|t| t.title.as_str()), Some("Laundry"));
}

#[test]
fn test_empty_list_has_no_selection() {
    let mut list = TaskList::new(vec![]);
    assert!(list.is_empty());
    list.next();
    list.previous();
    assert!(list.selected().is_none());
}

#[test]
fn test_next_and_previous_stop_at_edges() {
    let mut list = TaskList::new(vec![task(1, "a"), task(2, "b")]);
    list.previous();
    assert_eq!(list.selected().map(|t| t.id.as_str()), Some("1"));

    list.next();
    list.next();
    assert_eq!(list.selected().map(|t| t.id.as_str()), Some("2"));
}

#[test]
fn test_reload_keeps_selected_task() {
    let mut list = TaskList::new(vec![task(1, "a"), task(2, "b"), task(3, "c")]);
    list.next();
    assert_eq!(list.selected().map(|t| t.id.as_str()), Some("2"));

    list.set_tasks(vec![task(5, "e"), task(2, "b"), task(1, "a")]);
    assert_eq!(list.selected().map(|t| t.id.as_str()), Some("2"));
}

#[test]
fn test_reload_clamps_when_selected_task_is_gone() {
    let mut list = TaskList::new(vec![task(1, "a"), task(2, "b"), task(3, "c")]);
    list.next();
    list.next();

    list.set_tasks(vec![task(1, "a")]);
    assert_eq!(list.selected().map(|t| t.id.as_str()), Some("1"));

    list.set_tasks(vec![]);
    assert!(list.selected().is_none());

    list.set_tasks(vec![task(4, "d")]);
    assert_eq!(list.selected().map(|t| t.id.as_str()), Some("4"));
}
