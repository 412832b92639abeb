//! Scripted sessions through the console menu.

use feedback_rs::Menu;
use feedback_rs::store::FeedbackStore;
use feedback_rs_test_utils::{TempStore, temp_store};
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Cursor;

const FAREWELL: &str = "Thank you for using the Student Feedback Management System!";

fn run(store: FeedbackStore, script: &str) -> (FeedbackStore, String) {
    run_bytes(store, script.as_bytes())
}

fn run_bytes(store: FeedbackStore, script: &[u8]) -> (FeedbackStore, String) {
    colored::control::set_override(false);
    let mut menu = Menu::new(store, Cursor::new(script.to_vec()), Vec::new());
    menu.run().expect("menu run");
    let (store, output) = menu.into_parts();
    (store, String::from_utf8(output).expect("utf8 output"))
}

fn seeded() -> TempStore {
    let mut fixture = temp_store();
    fixture
        .store
        .add("Alice", "CS101", 5, "Great course!")
        .expect("add");
    fixture
        .store
        .add("Bob", "MATH200", 2, "The lectures were boring.")
        .expect("add");
    fixture
        .store
        .add("Carol", "CS102", 4, "Helpful labs and clear slides.")
        .expect("add");
    fixture
}

#[test]
fn add_then_display_all() {
    let TempStore { dir: _dir, path, store } = temp_store();
    let (store, output) = run(store, "1\nAlice\nCS101\nGreat course!\n5\n4\n7\n");

    assert_eq!(store.list().len(), 1);
    assert!(output.contains("New Feedback Entry Added:"));
    assert!(output.contains("All Feedback Entries:"));
    assert!(output.contains("positive"));
    assert!(output.ends_with(&format!("{FAREWELL}\n")));
    let contents = fs::read_to_string(path).expect("read");
    assert!(contents.starts_with("1|Alice|CS101|5|Great course!|positive|"));
}

#[test]
fn invalid_choice_returns_to_menu() {
    let TempStore { dir: _dir, store, .. } = temp_store();
    let (_, output) = run(store, "9\nabc\n7\n");
    assert_eq!(output.matches("Invalid choice! Please try again.").count(), 2);
    assert_eq!(output.matches("1. Add Feedback").count(), 3);
}

#[test]
fn end_of_input_exits() {
    let TempStore { dir: _dir, store, .. } = temp_store();
    let (_, output) = run(store, "");
    assert!(output.contains(FAREWELL));

    let TempStore { dir: _dir, path, store } = temp_store();
    let (store, output) = run(store, "1\nAlice\n");
    assert!(output.contains(FAREWELL));
    assert!(store.list().is_empty());
    assert!(!path.exists());
}

#[test]
fn empty_store_views_say_so() {
    let TempStore { dir: _dir, store, .. } = temp_store();
    let (_, output) = run(store, "3\n4\n5\n6\n7\n");
    assert_eq!(output.matches("No feedback entries found!").count(), 4);
}

#[test]
fn bad_ratings_are_reported_and_nothing_is_saved() {
    let TempStore { dir: _dir, path, store } = temp_store();
    let (store, output) = run(
        store,
        "1\nAlice\nCS101\nok\nfive\n1\nAlice\nCS101\nok\n9\n7\n",
    );
    assert!(output.contains("Error: rating must be a number between 1 and 5"));
    assert!(output.contains("Error: rating must be between 1 and 5"));
    assert!(store.list().is_empty());
    assert!(!path.exists());
}

#[test]
fn deleting_unknown_id_keeps_records() {
    let TempStore { dir: _dir, store, .. } = seeded();
    let (store, output) = run(store, "2\n1\n999\n7\n");
    assert!(output.contains("Error: no feedback entry with id 999"));
    assert_eq!(store.list().len(), 3);
}

#[test]
fn delete_by_id_and_by_name() {
    let TempStore { dir: _dir, path, store } = seeded();
    let (store, output) = run(store, "2\n1\n2\n2\n2\nalice\n2\n3\n7\n");
    assert!(output.contains("Feedback 2 deleted."));
    assert!(output.contains("Deleted 1 feedback entry for student 'alice'."));
    assert!(output.contains("Invalid choice! Please try again."));
    let ids: Vec<u32> = store.list().iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![3]);
    assert_eq!(fs::read_to_string(path).expect("read").lines().count(), 1);
}

#[test]
fn search_sub_menu() {
    let TempStore { dir: _dir, store, .. } = seeded();
    let (_, output) = run(store, "3\n1\nphysics\n3\n4\nnegative\n3\n2\n3\n3\n3\n4\n3\n4\nangry\n7\n");

    assert!(output.contains("No matching feedback found."));
    assert_eq!(output.matches("Search Results:").count(), 3);
    assert!(output.contains("Bob"));
    assert!(output.contains("Carol"));
    assert!(output.contains("Error: unknown sentiment"));
}

#[test]
fn chart_and_summary_views() {
    let TempStore { dir: _dir, store, .. } = seeded();
    let (_, output) = run(store, "5\n6\n7\n");

    assert!(output.contains("Sentiment Analysis Summary:"));
    assert!(output.contains("Emotion Distribution:"));
    assert!(output.contains("Total Entries: 3"));
    assert!(output.contains("Rating Distribution"));
    assert!(output.contains("Rating 5: 1 (33.3%)"));
    assert!(output.contains("Rating 1: 0 (0.0%)"));
    assert!(output.contains("Average Rating: 3.67"));
    assert!(output.contains("Highest Rating: 5"));
    assert!(output.contains("Lowest Rating: 2"));
}

#[test]
fn undecodable_input_is_reported_and_prompt_repeats() {
    let TempStore { dir: _dir, store, .. } = temp_store();
    let (store, output) = run_bytes(store, b"1\nJos\xe9\nJose\nCS101\nGood\n4\n\xff\n7\n");

    assert_eq!(output.matches("Error: input is not valid UTF-8").count(), 2);
    assert_eq!(output.matches("Enter Student Name: ").count(), 2);
    assert!(output.contains(FAREWELL));
    let names: Vec<&str> = store
        .list()
        .iter()
        .map(|record| record.student_name.as_str())
        .collect();
    assert_eq!(names, vec!["Jose"]);
}
