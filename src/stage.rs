use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CssStyleDeclaration, Document, Element, HtmlButtonElement, HtmlDivElement, HtmlElement,
    HtmlImageElement, Node,
};

use crate::game::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sprites::SpriteSheet;
use crate::view::{
    self, Frame, GAME_OVER_TITLE, Overlay, Placement, RESTART_LABEL, START_PROMPT,
};

struct PipeNodes {
    top: HtmlImageElement,
    bottom: HtmlImageElement,
}

/// DOM nodes of the mounted game. Only ever touched from the frame driver.
pub struct Stage {
    document: Document,
    wrapper: HtmlDivElement,
    field: HtmlDivElement,
    player: HtmlImageElement,
    pipes: Vec<PipeNodes>,
    score: HtmlDivElement,
    start_overlay: HtmlDivElement,
    game_over_overlay: HtmlDivElement,
    final_score: HtmlElement,
    restart: HtmlButtonElement,
    diagnostics: Option<HtmlElement>,
    sprites: SpriteSheet,
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Unexpected element type for <{}>", tag)))
}

fn set_styles(style: &CssStyleDeclaration, props: &[(&str, &str)]) {
    for (name, value) in props {
        let _ = style.set_property(name, value);
    }
}

fn place(element: &HtmlElement, placement: &Placement) {
    let style = element.style();
    let _ = style.set_property("left", &format!("{}px", placement.left));
    let _ = style.set_property("top", &format!("{}px", placement.top));
    let _ = style.set_property("width", &format!("{}px", placement.width));
    let _ = style.set_property("height", &format!("{}px", placement.height));
}

fn set_hidden(element: &HtmlElement, hidden: bool) {
    if hidden {
        let _ = element.set_attribute("hidden", "");
    } else {
        let _ = element.remove_attribute("hidden");
    }
}

fn overlay_div(document: &Document) -> Result<HtmlDivElement, JsValue> {
    let overlay: HtmlDivElement = create(document, "div")?;
    overlay.set_class_name("overlay");
    set_styles(
        &overlay.style(),
        &[
            ("position", "absolute"),
            ("inset", "0"),
            ("display", "flex"),
            ("flex-direction", "column"),
            ("align-items", "center"),
            ("justify-content", "center"),
            ("background", "rgba(0, 0, 0, 0.35)"),
            ("color", "#ffffff"),
            ("font", "bold 20px sans-serif"),
        ],
    );
    Ok(overlay)
}

fn sprite_img(
    document: &Document,
    src: &str,
    class: &str,
    alt: &str,
) -> Result<HtmlImageElement, JsValue> {
    let img: HtmlImageElement = create(document, "img")?;
    img.set_src(src);
    img.set_alt(alt);
    img.set_class_name(class);
    img.set_draggable(false);
    let _ = img.style().set_property("position", "absolute");
    Ok(img)
}

impl Stage {
    pub fn build(
        document: &Document,
        host: &Element,
        sprites: SpriteSheet,
        diagnostics: bool,
    ) -> Result<Stage, JsValue> {
        let wrapper: HtmlDivElement = create(document, "div")?;
        wrapper.set_class_name("game-wrapper");

        let heading: HtmlElement = create(document, "h2")?;
        heading.set_text_content(Some("Flappy Bird"));
        wrapper.append_child(&heading)?;

        let field: HtmlDivElement = create(document, "div")?;
        field.set_class_name("game-box");
        let width = format!("{}px", FIELD_WIDTH);
        let height = format!("{}px", FIELD_HEIGHT);
        set_styles(
            &field.style(),
            &[
                ("position", "relative"),
                ("overflow", "hidden"),
                ("width", width.as_str()),
                ("height", height.as_str()),
                ("background", "linear-gradient(#46b4c8, #bee8f5)"),
            ],
        );
        wrapper.append_child(&field)?;

        let player = sprite_img(document, &sprites.player, "player", "bird")?;
        field.append_child(&player)?;

        let score: HtmlDivElement = create(document, "div")?;
        score.set_class_name("score");
        set_styles(
            &score.style(),
            &[
                ("position", "absolute"),
                ("top", "8px"),
                ("left", "12px"),
                ("color", "#ffffff"),
                ("font", "bold 22px sans-serif"),
                ("text-shadow", "1px 1px 0 #1e1e1e"),
            ],
        );
        field.append_child(&score)?;

        let start_overlay = overlay_div(document)?;
        start_overlay.set_text_content(Some(START_PROMPT));
        field.append_child(&start_overlay)?;

        let game_over_overlay = overlay_div(document)?;
        let title: HtmlElement = create(document, "h3")?;
        title.set_text_content(Some(GAME_OVER_TITLE));
        let final_score: HtmlElement = create(document, "p")?;
        let restart: HtmlButtonElement = create(document, "button")?;
        restart.set_type("button");
        restart.set_text_content(Some(RESTART_LABEL));
        game_over_overlay.append_child(&title)?;
        game_over_overlay.append_child(&final_score)?;
        game_over_overlay.append_child(&restart)?;
        set_hidden(&game_over_overlay, true);
        field.append_child(&game_over_overlay)?;

        let diagnostics = if diagnostics {
            let panel: HtmlElement = create(document, "pre")?;
            panel.set_class_name("diagnostics");
            set_styles(&panel.style(), &[("font", "12px monospace"), ("margin", "8px 0")]);
            wrapper.append_child(&panel)?;
            Some(panel)
        } else {
            None
        };

        host.append_child(&wrapper)?;

        Ok(Stage {
            document: document.clone(),
            wrapper,
            field,
            player,
            pipes: Vec::new(),
            score,
            start_overlay,
            game_over_overlay,
            final_score,
            restart,
            diagnostics,
            sprites,
        })
    }

    pub fn restart_button(&self) -> &HtmlButtonElement {
        &self.restart
    }

    /// Grows or shrinks the pipe pool to `count` pairs.
    fn sync_pipe_nodes(&mut self, count: usize) -> Result<(), JsValue> {
        while self.pipes.len() > count {
            if let Some(nodes) = self.pipes.pop() {
                nodes.top.remove();
                nodes.bottom.remove();
            }
        }

        while self.pipes.len() < count {
            let top = sprite_img(&self.document, &self.sprites.pipe_top, "pipe", "top-pipe")?;
            let bottom =
                sprite_img(&self.document, &self.sprites.pipe_bottom, "pipe", "bottom-pipe")?;
            // Pipes sit under the score and overlays.
            let anchor: &Node = self.score.as_ref();
            self.field.insert_before(&top, Some(anchor))?;
            self.field.insert_before(&bottom, Some(anchor))?;
            self.pipes.push(PipeNodes { top, bottom });
        }

        Ok(())
    }

    pub fn apply(&mut self, frame: &Frame) -> Result<(), JsValue> {
        place(&self.player, &frame.player);

        self.sync_pipe_nodes(frame.pipes.len())?;
        for (nodes, pipe) in self.pipes.iter().zip(&frame.pipes) {
            place(&nodes.top, &pipe.top);
            place(&nodes.bottom, &pipe.bottom);
        }

        self.score.set_text_content(Some(&view::score_label(frame.score)));

        match frame.overlay {
            Overlay::None => {
                set_hidden(&self.start_overlay, true);
                set_hidden(&self.game_over_overlay, true);
            }
            Overlay::StartPrompt => {
                set_hidden(&self.start_overlay, false);
                set_hidden(&self.game_over_overlay, true);
            }
            Overlay::GameOver { score } => {
                self.final_score
                    .set_text_content(Some(&view::final_score_label(score)));
                set_hidden(&self.start_overlay, true);
                set_hidden(&self.game_over_overlay, false);
            }
        }

        Ok(())
    }

    pub fn show_diagnostics(&self, lines: &[String]) {
        if let Some(panel) = &self.diagnostics {
            panel.set_text_content(Some(&lines.join("\n")));
        }
    }

    pub fn remove(&mut self) {
        self.pipes.clear();
        self.wrapper.remove();
    }
}
