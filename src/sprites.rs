use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

const PIPE_SPRITE_W: u32 = 70;
const PIPE_SPRITE_H: u32 = 320;
const BIRD_SPRITE: u32 = 40;

const PIPE_DARK: &str = "#3c6414";
const PIPE_MID: &str = "#64aa28";
const PIPE_LIGHT: &str = "#91d73e";
const BIRD_BODY: &str = "#f5c842";
const BIRD_HI: &str = "#ffe164";
const BIRD_WING: &str = "#d7a523";
const BIRD_EYE: &str = "#ffffff";
const BIRD_PUPIL: &str = "#141414";
const BIRD_BEAK: &str = "#e14b23";

/// Data URLs for the three static images, decoded once at startup.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    pub player: String,
    pub pipe_top: String,
    pub pipe_bottom: String,
}

fn sprite_canvas(
    document: &Document,
    width: u32,
    height: u32,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D canvas unavailable for sprites"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    context.set_image_smoothing_enabled(false);

    Ok((canvas, context))
}

fn paint_bird(document: &Document) -> Result<String, JsValue> {
    let (canvas, ctx) = sprite_canvas(document, BIRD_SPRITE, BIRD_SPRITE)?;

    ctx.set_fill_style_str(BIRD_BODY);
    ctx.fill_rect(4.0, 8.0, 30.0, 26.0);
    ctx.fill_rect(8.0, 4.0, 22.0, 34.0);

    ctx.set_fill_style_str(BIRD_HI);
    ctx.fill_rect(8.0, 6.0, 18.0, 4.0);

    ctx.set_fill_style_str(BIRD_WING);
    ctx.fill_rect(2.0, 18.0, 14.0, 8.0);

    ctx.set_fill_style_str(BIRD_EYE);
    ctx.fill_rect(22.0, 8.0, 10.0, 10.0);
    ctx.set_fill_style_str(BIRD_PUPIL);
    ctx.fill_rect(28.0, 11.0, 3.0, 4.0);

    ctx.set_fill_style_str(BIRD_BEAK);
    ctx.fill_rect(30.0, 20.0, 10.0, 7.0);

    canvas.to_data_url_with_type("image/png")
}

/// Shaded pipe body with a cap on the end that faces the gap.
fn paint_pipe(document: &Document, cap_at_bottom: bool) -> Result<String, JsValue> {
    let (canvas, ctx) = sprite_canvas(document, PIPE_SPRITE_W, PIPE_SPRITE_H)?;
    let w = PIPE_SPRITE_W as f64;
    let h = PIPE_SPRITE_H as f64;
    let cap_h = 24.0;

    ctx.set_fill_style_str(PIPE_MID);
    ctx.fill_rect(4.0, 0.0, w - 8.0, h);
    ctx.set_fill_style_str(PIPE_LIGHT);
    ctx.fill_rect(14.0, 0.0, 10.0, h);
    ctx.set_fill_style_str(PIPE_DARK);
    ctx.fill_rect(w - 14.0, 0.0, 10.0, h);

    let cap_y = if cap_at_bottom { h - cap_h } else { 0.0 };
    ctx.set_fill_style_str(PIPE_DARK);
    ctx.fill_rect(0.0, cap_y, w, cap_h);
    ctx.set_fill_style_str(PIPE_MID);
    ctx.fill_rect(2.0, cap_y + 2.0, w - 4.0, cap_h - 4.0);
    ctx.set_fill_style_str(PIPE_LIGHT);
    ctx.fill_rect(12.0, cap_y + 2.0, 10.0, cap_h - 4.0);

    canvas.to_data_url_with_type("image/png")
}

async fn decode(url: &str) -> Result<(), JsValue> {
    let image = HtmlImageElement::new()?;
    image.set_src(url);
    JsFuture::from(image.decode()).await?;
    Ok(())
}

pub async fn load_sheet(document: &Document) -> Result<SpriteSheet, JsValue> {
    let sheet = SpriteSheet {
        player: paint_bird(document)?,
        pipe_top: paint_pipe(document, true)?,
        pipe_bottom: paint_pipe(document, false)?,
    };

    decode(&sheet.player).await?;
    decode(&sheet.pipe_top).await?;
    decode(&sheet.pipe_bottom).await?;

    Ok(sheet)
}
