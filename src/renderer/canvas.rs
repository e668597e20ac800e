//! Canvas 2D backend

use anyhow::{Result, anyhow};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{DrawCommand, Text, TextAlign, TextBaseline};
use crate::assets::AssetSource;
use crate::sim::Rect;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|err| anyhow!("getContext failed: {:?}", err))?
            .ok_or_else(|| anyhow!("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("Context is not a CanvasRenderingContext2d"))?;
        Ok(Self { ctx })
    }

    /// Replay a frame. A failed command is skipped; the rest still draw.
    pub fn render<A>(&self, frame: &[DrawCommand], assets: &A)
    where
        A: AssetSource<Image = HtmlImageElement>,
    {
        for command in frame {
            self.ctx.save();
            if let Err(err) = self.draw(command, assets) {
                log::debug!("Draw command failed: {:?}", err);
            }
            self.ctx.restore();
        }
    }

    fn draw<A>(&self, command: &DrawCommand, assets: &A) -> Result<(), JsValue>
    where
        A: AssetSource<Image = HtmlImageElement>,
    {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Gradient { rect, top, bottom } => {
                let gradient = ctx.create_linear_gradient(
                    rect.left() as f64,
                    rect.top() as f64,
                    rect.left() as f64,
                    rect.bottom() as f64,
                );
                gradient.add_color_stop(0.0, top)?;
                gradient.add_color_stop(1.0, bottom)?;
                ctx.set_fill_style_canvas_gradient(&gradient);
                fill_rect(ctx, rect);
            }
            DrawCommand::Image {
                key,
                rect,
                rotation,
                alpha,
            } => {
                let Some(img) = assets.image(*key) else {
                    return Ok(());
                };
                let center = rect.center();
                ctx.set_global_alpha(*alpha as f64);
                ctx.translate(center.x as f64, center.y as f64)?;
                ctx.rotate(*rotation as f64)?;
                ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    -(rect.size.x as f64) * 0.5,
                    -(rect.size.y as f64) * 0.5,
                    rect.size.x as f64,
                    rect.size.y as f64,
                )?;
            }
            DrawCommand::FillRect { rect, color } => {
                ctx.set_fill_style_str(color);
                fill_rect(ctx, rect);
            }
            DrawCommand::StrokeRect { rect, color, width } => {
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width as f64);
                ctx.stroke_rect(
                    rect.left() as f64,
                    rect.top() as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }
            DrawCommand::Polygon {
                points,
                fill,
                stroke,
                line_width,
                alpha,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    return Ok(());
                };
                ctx.set_global_alpha(*alpha as f64);
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.close_path();
                ctx.set_fill_style_str(fill);
                ctx.fill();
                ctx.set_stroke_style_str(stroke);
                ctx.set_line_width(*line_width as f64);
                ctx.stroke();
            }
            DrawCommand::Text(text) => draw_text(ctx, text)?,
        }
        Ok(())
    }
}

fn fill_rect(ctx: &CanvasRenderingContext2d, rect: &Rect) {
    ctx.fill_rect(
        rect.left() as f64,
        rect.top() as f64,
        rect.size.x as f64,
        rect.size.y as f64,
    );
}

fn draw_text(ctx: &CanvasRenderingContext2d, text: &Text) -> Result<(), JsValue> {
    ctx.set_global_alpha(text.alpha.clamp(0.0, 1.0) as f64);
    ctx.set_fill_style_str(text.color);
    ctx.set_font(&text.font());
    ctx.set_text_align(match text.align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
    });
    ctx.set_text_baseline(match text.baseline {
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Middle => "middle",
    });
    ctx.fill_text(&text.content, text.pos.x as f64, text.pos.y as f64)
}
