#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Document, HtmlElement, KeyboardEvent, KeyboardEventInit, PageTransitionEvent,
    PageTransitionEventInit,
};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window()
        .expect("no window")
        .document()
        .expect("no document")
}

fn press(kind: &str, key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict(kind, &init).expect("key event");
    web_sys::window()
        .expect("no window")
        .dispatch_event(&event)
        .expect("dispatch");
}

fn host(id: &str) -> HtmlElement {
    let document = document();
    let host = document
        .create_element("div")
        .expect("create host")
        .dyn_into::<HtmlElement>()
        .expect("host element");
    host.set_id(id);
    document
        .body()
        .expect("no body")
        .append_child(&host)
        .expect("append host");
    host
}

#[wasm_bindgen_test]
async fn mount_builds_the_stage_in_idle_state() {
    let host = host("mount-test");
    let mut handle = flappy_web::mount("mount-test".to_string())
        .await
        .expect("mount");

    assert_eq!(handle.status(), "idle");
    assert_eq!(handle.score(), 0);

    let field = host
        .query_selector(".game-box")
        .expect("query")
        .expect("field");
    assert!(field.query_selector("img.player").expect("query").is_some());
    assert!(field.query_selector("img.pipe").expect("query").is_none());

    let status = document()
        .document_element()
        .and_then(|el| el.get_attribute("data-render-status"));
    assert_eq!(status.as_deref(), Some("idle"));

    handle.destroy();
    host.remove();
}

#[wasm_bindgen_test]
async fn destroy_removes_the_stage() {
    let host = host("destroy-test");
    let mut handle = flappy_web::mount("destroy-test".to_string())
        .await
        .expect("mount");
    assert!(host.query_selector(".game-wrapper").expect("query").is_some());

    handle.destroy();
    assert!(host.query_selector(".game-wrapper").expect("query").is_none());

    // Second destroy is a no-op.
    handle.destroy();
    host.remove();
}

#[wasm_bindgen_test]
async fn mount_into_missing_root_fails() {
    let result = flappy_web::mount("no-such-root".to_string()).await;
    assert!(result.is_err());
}

#[wasm_bindgen_test]
async fn jump_key_starts_the_run_and_other_keys_do_not() {
    let host = host("keydown-test");
    let mut handle = flappy_web::mount("keydown-test".to_string())
        .await
        .expect("mount");

    press("keydown", "ArrowLeft");
    press("keyup", "ArrowLeft");
    press("keydown", "a");
    assert_eq!(handle.status(), "idle");

    press("keydown", " ");
    press("keyup", " ");
    assert_eq!(handle.status(), "running");
    assert_eq!(handle.score(), 0);

    press("keydown", "ArrowUp");
    press("keyup", "ArrowUp");
    assert_eq!(handle.status(), "running");

    handle.destroy();
    host.remove();
}

#[wasm_bindgen_test]
async fn keys_after_destroy_change_nothing() {
    let host = host("teardown-keys-test");
    let mut handle = flappy_web::mount("teardown-keys-test".to_string())
        .await
        .expect("mount");

    handle.destroy();
    press("keydown", " ");
    press("keyup", " ");
    assert_eq!(handle.status(), "idle");

    host.remove();
}

#[wasm_bindgen_test]
async fn restart_button_starts_a_run() {
    let host = host("restart-test");
    let mut handle = flappy_web::mount("restart-test".to_string())
        .await
        .expect("mount");

    let button = host
        .query_selector(".game-wrapper button")
        .expect("query")
        .expect("restart button")
        .dyn_into::<HtmlElement>()
        .expect("button element");
    button.click();
    assert_eq!(handle.status(), "running");

    handle.destroy();
    button.click();
    assert_eq!(handle.status(), "running");

    host.remove();
}

#[wasm_bindgen_test]
fn pagehide_into_cache_keeps_the_game() {
    let init = PageTransitionEventInit::new();
    init.set_persisted(true);
    let cached = PageTransitionEvent::new_with_event_init_dict("pagehide", &init).expect("event");
    assert!(!flappy_web::leaves_page(&cached));

    let init = PageTransitionEventInit::new();
    init.set_persisted(false);
    let leaving = PageTransitionEvent::new_with_event_init_dict("pagehide", &init).expect("event");
    assert!(flappy_web::leaves_page(&leaving));
}
