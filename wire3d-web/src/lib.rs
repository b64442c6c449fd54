/// wire3d web - draws the wireframe scene onto an HTML canvas
///
/// The canvas 2D context is the line-drawing backend; scene parameters are
/// set from JavaScript through the exported setters.
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wire3d_core::{
    Color, FramePipeline, FrameSettings, LineSink, Palette, Scene, SceneEdit, Segment, Vector3,
};

/// CSS colour string for a `0xRRGGBBAA` colour.
pub fn css_color(color: Color) -> String {
    let [r, g, b, a] = color.0.to_be_bytes();
    format!("rgba({r}, {g}, {b}, {:.3})", a as f32 / 255.0)
}

/// Strokes each segment straight onto a 2D context
struct ContextSink<'a> {
    context: &'a CanvasRenderingContext2d,
    current: Option<Color>,
}

impl LineSink for ContextSink<'_> {
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        if self.current != Some(color) {
            self.context.set_stroke_style_str(&css_color(color));
            self.current = Some(color);
        }
        self.context.begin_path();
        self.context.move_to(x0 as f64, y0 as f64);
        self.context.line_to(x1 as f64, y1 as f64);
        self.context.stroke();
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    scene: Scene,
    pipeline: FramePipeline,
    palette: Palette,
    context: Option<CanvasRenderingContext2d>,
    colliding: bool,
}

#[wasm_bindgen]
impl WebRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> WebRenderer {
        WebRenderer {
            scene: Scene::default(),
            pipeline: FramePipeline::new(FrameSettings::new(width.max(1), height.max(1))),
            palette: Palette {
                grid_axis: Color(0x404040FF),
                ..Palette::default()
            },
            context: None,
            colliding: false,
        }
    }

    /// Attach to the canvas with the given element id and match its size.
    pub fn init(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("'{canvas_id}' is not a canvas")))?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        self.resize(canvas.width(), canvas.height());
        self.context = Some(context);
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let settings = FrameSettings {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
            ..*self.pipeline.settings()
        };
        self.pipeline = FramePipeline::new(settings);
    }

    /// Render a frame
    pub fn render(&mut self) -> Result<(), JsValue> {
        let context = self
            .context
            .clone()
            .ok_or_else(|| JsValue::from_str("renderer not initialised, call init() first"))?;
        let settings = self.pipeline.settings();
        context.set_fill_style_str("black");
        context.fill_rect(0.0, 0.0, settings.width as f64, settings.height as f64);

        let mut sink = ContextSink {
            context: &context,
            current: None,
        };
        let (state, _) = self
            .pipeline
            .frame(&mut self.scene, &self.palette, &mut sink)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.colliding = state.colliding;
        Ok(())
    }

    /// Frame as flat `[x0, y0, x1, y1, rgba, ...]`, colour bits stored as i32.
    pub fn segments(&mut self) -> Result<Vec<i32>, JsValue> {
        let segments = self.collect().map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(segments
            .iter()
            .flat_map(|s| [s.x0, s.y0, s.x1, s.y1, s.color.0 as i32])
            .collect())
    }

    pub fn set_camera(&mut self, tx: f32, ty: f32, tz: f32, rx: f32, ry: f32, rz: f32) {
        self.scene.camera.translate = Vector3::new(tx, ty, tz);
        self.scene.camera.rotate = Vector3::new(rx, ry, rz);
    }

    pub fn set_sphere(&mut self, cx: f32, cy: f32, cz: f32, radius: f32) {
        self.scene.sphere.center = Vector3::new(cx, cy, cz);
        self.scene.sphere.radius = radius;
    }

    /// The normal is normalized when the next frame is prepared.
    pub fn set_plane(&mut self, nx: f32, ny: f32, nz: f32, distance: f32) {
        self.scene.plane.normal = Vector3::new(nx, ny, nz);
        self.scene.plane.distance = distance;
    }

    /// Turn the camera by delta angles (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.scene.apply(SceneEdit::CameraRotate(Vector3::new(dx, dy, dz)));
    }

    pub fn colliding(&self) -> bool {
        self.colliding
    }
}

impl WebRenderer {
    fn collect(&mut self) -> wire3d_core::MathResult<Vec<Segment>> {
        let mut segments = Vec::new();
        let (state, stats) = self
            .pipeline
            .frame(&mut self.scene, &self.palette, &mut segments)?;
        self.colliding = state.colliding;
        log::debug!("collected {} segments", stats.total());
        Ok(segments)
    }
}
