// src/scanner/web_camera.rs
//
// Câmera traseira via getUserMedia. O <video> e o <canvas> ficam fora do
// DOM: o egui mostra a pré-visualização a partir dos quadros lidos.

use super::{Frame, FrameSource};
use crate::error::ScanError;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream, MediaStreamConstraints,
    MediaStreamTrack,
};

const HAVE_ENOUGH_DATA: u16 = 4;

enum CameraState {
    Idle,
    Opening,
    Streaming(MediaStream),
    Failed(String),
    Released,
}

pub struct WebCamera {
    state: Rc<RefCell<CameraState>>,
    video: Option<HtmlVideoElement>,
    canvas: Option<HtmlCanvasElement>,
}

impl WebCamera {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(CameraState::Idle)),
            video: None,
            canvas: None,
        }
    }
}

impl Default for WebCamera {
    fn default() -> Self {
        Self::new()
    }
}

fn js_err(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

impl FrameSource for WebCamera {
    fn open(&mut self) -> Result<(), ScanError> {
        let unavailable = |msg: String| ScanError::CameraUnavailable(msg);
        let window = web_sys::window().ok_or_else(|| unavailable("no window".into()))?;
        let document = window.document().ok_or_else(|| unavailable("no document".into()))?;

        let video: HtmlVideoElement = document
            .create_element("video")
            .map_err(|e| unavailable(js_err(e)))?
            .dyn_into()
            .map_err(|_| unavailable("video element".into()))?;
        video.set_attribute("playsinline", "true").ok();
        video.set_muted(true);

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| unavailable(js_err(e)))?
            .dyn_into()
            .map_err(|_| unavailable("canvas element".into()))?;

        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| unavailable(js_err(e)))?;

        let video_constraints = js_sys::Object::new();
        js_sys::Reflect::set(&video_constraints, &"facingMode".into(), &"environment".into())
            .map_err(|e| unavailable(js_err(e)))?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&video_constraints);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| unavailable(js_err(e)))?;

        *self.state.borrow_mut() = CameraState::Opening;
        let state = Rc::clone(&self.state);
        let target = video.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(value) => {
                    let Ok(stream) = value.dyn_into::<MediaStream>() else {
                        *state.borrow_mut() = CameraState::Failed("not a MediaStream".into());
                        return;
                    };
                    // cancelado enquanto a permissão estava pendente
                    if matches!(*state.borrow(), CameraState::Released) {
                        stop_tracks(&stream);
                        return;
                    }
                    target.set_src_object(Some(&stream));
                    if let Err(err) = target.play() {
                        log::warn!("video.play() failed: {}", js_err(err));
                    }
                    log::info!("camera stream acquired");
                    *state.borrow_mut() = CameraState::Streaming(stream);
                }
                Err(err) => {
                    let msg = js_err(err);
                    log::error!("Error accessing camera: {msg}");
                    if !matches!(*state.borrow(), CameraState::Released) {
                        *state.borrow_mut() = CameraState::Failed(msg);
                    }
                }
            }
        });

        self.video = Some(video);
        self.canvas = Some(canvas);
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, ScanError> {
        match &*self.state.borrow() {
            CameraState::Failed(msg) => return Err(ScanError::CameraUnavailable(msg.clone())),
            CameraState::Streaming(_) => {}
            _ => return Ok(None),
        }
        let (Some(video), Some(canvas)) = (&self.video, &self.canvas) else {
            return Ok(None);
        };
        if video.ready_state() < HAVE_ENOUGH_DATA {
            return Ok(None);
        }

        let (w, h) = (video.video_width(), video.video_height());
        if w == 0 || h == 0 {
            return Ok(None);
        }
        canvas.set_width(w);
        canvas.set_height(h);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| ScanError::Frame(js_err(e)))?
            .ok_or_else(|| ScanError::Frame("no 2d context".into()))?
            .dyn_into()
            .map_err(|_| ScanError::Frame("2d context".into()))?;
        ctx.draw_image_with_html_video_element_and_dw_and_dh(video, 0.0, 0.0, w as f64, h as f64)
            .map_err(|e| ScanError::Frame(js_err(e)))?;
        let data = ctx
            .get_image_data(0.0, 0.0, w as f64, h as f64)
            .map_err(|e| ScanError::Frame(js_err(e)))?;

        Ok(Some(Frame {
            width: w as usize,
            height: h as usize,
            rgba: data.data().0,
        }))
    }

    fn release(&mut self) {
        let previous = std::mem::replace(&mut *self.state.borrow_mut(), CameraState::Released);
        if let CameraState::Streaming(stream) = previous {
            stop_tracks(&stream);
        }
        if let Some(video) = self.video.take() {
            video.set_src_object(None);
        }
        self.canvas = None;
    }
}
