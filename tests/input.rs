use flappy_web::input::{Input, Key};

#[test]
fn dom_key_names_map_to_keys() {
    assert_eq!(Key::from_dom(" "), Some(Key::Space));
    assert_eq!(Key::from_dom("ArrowUp"), Some(Key::ArrowUp));
    assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::ArrowLeft));
    assert_eq!(Key::from_dom("ArrowRight"), Some(Key::ArrowRight));
    assert_eq!(Key::from_dom("ArrowDown"), None);
    assert_eq!(Key::from_dom("a"), None);
    assert_eq!(Key::from_dom("Enter"), None);
}

#[test]
fn only_space_and_up_jump() {
    assert!(Key::Space.is_jump());
    assert!(Key::ArrowUp.is_jump());
    assert!(!Key::ArrowLeft.is_jump());
    assert!(!Key::ArrowRight.is_jump());
}

#[test]
fn press_and_release_track_held_keys() {
    let mut input = Input::new();
    assert!(!input.jump_held());
    assert_eq!(input.horizontal(), 0.0);

    input.press(Key::ArrowUp);
    assert!(input.jump_held());
    input.press(Key::Space);
    input.release(Key::ArrowUp);
    assert!(input.jump_held());
    input.release(Key::Space);
    assert!(!input.jump_held());

    input.press(Key::ArrowLeft);
    assert_eq!(input.horizontal(), -1.0);
    input.press(Key::ArrowRight);
    assert_eq!(input.horizontal(), 1.0);
    input.release(Key::ArrowRight);
    assert_eq!(input.horizontal(), -1.0);
}

#[test]
fn release_all_clears_everything() {
    let mut input = Input::new();
    input.press(Key::Space);
    input.press(Key::ArrowRight);
    input.release_all();
    assert_eq!(input, Input::default());
    assert!(!input.is_held(Key::Space));
}
