use std::cell::{Cell, RefCell};
use std::rc::Rc;

use evocell_game::{PointerInput, Scene, SceneNode, Tint};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, PointerEvent};
use yew::prelude::*;

use crate::dom;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub width: u32,
    pub height: u32,
    /// Pulled once per frame to get the scene to draw.
    pub scene: Callback<(), Scene>,
    pub on_pointer: Callback<PointerInput>,
    pub on_tick: Callback<f64>,
    /// Whether a mini-game is running; drives the frame loop.
    pub active: bool,
}

const fn tint_color(tint: Tint) -> &'static str {
    match tint {
        Tint::Neutral => "#9db4c0",
        Tint::Good => "#7fc97f",
        Tint::Bad => "#e36b6b",
        Tint::Accent => "#5ad1b3",
        Tint::Muted => "#51606e",
    }
}

fn surface_position(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    let scale_x = f64::from(canvas.width()) / rect.width().max(1.0);
    let scale_y = f64::from(canvas.height()) / rect.height().max(1.0);
    let x = (f64::from(event.client_x()) - rect.left()) * scale_x;
    let y = (f64::from(event.client_y()) - rect.top()) * scale_y;
    (x as f32, y as f32)
}

fn draw_scene(canvas: &HtmlCanvasElement, scene: &Scene) {
    let Some(raw) = canvas.get_context("2d").ok().flatten() else {
        return;
    };
    let Ok(ctx) = raw.dyn_into::<CanvasRenderingContext2d>() else {
        return;
    };
    ctx.set_fill_style_str("#0b1520");
    ctx.fill_rect(
        0.0,
        0.0,
        f64::from(canvas.width()),
        f64::from(canvas.height()),
    );
    ctx.set_font("13px sans-serif");
    ctx.set_text_align("center");
    for node in &scene.nodes {
        match node {
            SceneNode::Rect { x, y, w, h, tint } => {
                ctx.set_fill_style_str(tint_color(*tint));
                ctx.fill_rect(f64::from(*x), f64::from(*y), f64::from(*w), f64::from(*h));
            }
            SceneNode::Circle { x, y, r, tint } => {
                ctx.set_fill_style_str(tint_color(*tint));
                ctx.begin_path();
                let _ = ctx.arc(
                    f64::from(*x),
                    f64::from(*y),
                    f64::from(*r),
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.fill();
            }
            SceneNode::Label { x, y, text } => {
                ctx.set_fill_style_str("#e8f1f5");
                let _ = ctx.fill_text(text, f64::from(*x), f64::from(*y));
            }
            SceneNode::Gauge { x, y, w, h, fraction } => {
                ctx.set_fill_style_str(tint_color(Tint::Muted));
                ctx.fill_rect(f64::from(*x), f64::from(*y), f64::from(*w), f64::from(*h));
                ctx.set_fill_style_str(tint_color(Tint::Accent));
                let fill = f64::from(*w) * f64::from(fraction.clamp(0.0, 1.0));
                ctx.fill_rect(f64::from(*x), f64::from(*y), fill, f64::from(*h));
            }
        }
    }
}

#[function_component(Stage)]
pub fn stage(p: &Props) -> Html {
    let canvas_ref = use_node_ref();

    let pointer_handler = |wrap: fn(f32, f32) -> PointerInput| {
        let canvas_ref = canvas_ref.clone();
        let on_pointer = p.on_pointer.clone();
        Callback::from(move |event: PointerEvent| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                let (x, y) = surface_position(&canvas, &event);
                on_pointer.emit(wrap(x, y));
            }
        })
    };
    let onpointerdown = pointer_handler(|x, y| PointerInput::Down { x, y });
    let onpointermove = pointer_handler(|x, y| PointerInput::Move { x, y });
    let onpointerup = pointer_handler(|x, y| PointerInput::Up { x, y });
    let onclick = {
        let canvas_ref = canvas_ref.clone();
        let on_pointer = p.on_pointer.clone();
        Callback::from(move |event: MouseEvent| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                let (x, y) = surface_position(&canvas, &event);
                on_pointer.emit(PointerInput::Click { x, y });
            }
        })
    };

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(
            (p.active, p.scene.clone(), p.on_tick.clone()),
            move |(active, scene, on_tick)| {
                let raf_handle: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
                let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
                    Rc::new(RefCell::new(None));
                if *active {
                    let last = Rc::new(Cell::new(None::<f64>));
                    let scene = scene.clone();
                    let on_tick = on_tick.clone();
                    let raf_inner = raf_handle.clone();
                    let frame_inner = frame.clone();
                    *frame.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
                        let dt = last
                            .get()
                            .map_or(16.7, |prev| (timestamp - prev).clamp(0.0, 100.0));
                        last.set(Some(timestamp));
                        on_tick.emit(dt);
                        if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                            draw_scene(&canvas, &scene.emit(()));
                        }
                        if let Some(callback) = frame_inner.borrow().as_ref() {
                            if let Ok(handle) = dom::request_animation_frame(callback) {
                                raf_inner.replace(Some(handle));
                            }
                        }
                    }));
                    if let Some(callback) = frame.borrow().as_ref() {
                        if let Ok(handle) = dom::request_animation_frame(callback) {
                            raf_handle.replace(Some(handle));
                        }
                    }
                }
                move || {
                    if let Some(handle) = raf_handle.borrow_mut().take() {
                        dom::cancel_animation_frame(handle);
                    }
                    frame.borrow_mut().take();
                }
            },
        );
    }

    html! {
        <canvas
            ref={canvas_ref}
            class="game-canvas"
            width={p.width.to_string()}
            height={p.height.to_string()}
            {onpointerdown}
            {onpointermove}
            {onpointerup}
            {onclick}
        />
    }
}
