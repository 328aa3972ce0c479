//! SDL2 presentation of the 1-bit framebuffer, plus keyboard and mouse input.
//!
//! The framebuffer is expanded to ARGB8888 into a streaming texture of the
//! framebuffer's size, and SDL stretches it by an integer factor.

use std::time::Duration;

use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

use crate::render::FrameBuffer;

pub const FPS: u64 = 30;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

/// Keys with a meaning beyond camera movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Select the span-buffer rasterizer.
    Num1,
    /// Select the z-buffer rasterizer.
    Num2,
    /// Toggle backface culling.
    C,
    /// Pause or resume the model spin.
    P,
}

impl Key {
    fn from_keycode(keycode: Keycode) -> Option<Self> {
        match keycode {
            Keycode::Num1 => Some(Key::Num1),
            Keycode::Num2 => Some(Key::Num2),
            Keycode::C => Some(Key::C),
            Keycode::P => Some(Key::P),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    KeyPressed(Key),
}

/// Held movement keys and the mouse position while the left button is down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// `Some` only while dragging.
    pub mouse_position: Option<(i32, i32)>,
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to hold the frame rate and returns the seconds
    /// elapsed since the previous call.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> f32 {
        let target = FRAME_TARGET_TIME as u64;
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time.saturating_sub(self.previous_frame_time);

        if delta_time < target {
            std::thread::sleep(Duration::from_millis(target - delta_time));
            current_time = window.timer().ticks64();
            delta_time = current_time.saturating_sub(self.previous_frame_time);
        }

        self.previous_frame_time = current_time;
        delta_time as f32 / 1000.0
    }
}

pub struct Window {
    // Declared before `_texture_creator` so it is dropped first.
    texture: Texture<'static>,
    _texture_creator: Box<TextureCreator<WindowContext>>,
    canvas: Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
    argb: Vec<u32>,
    bytes: Vec<u8>,
}

impl Window {
    /// Opens a window showing a `width` x `height` framebuffer at `scale` x magnification.
    pub fn new(title: &str, width: u32, height: u32, scale: u32) -> Result<Self, String> {
        let scale = scale.max(1);
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width * scale, height * scale)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture is dropped before texture_creator by struct field order.
        let texture_creator_ref: &'static TextureCreator<WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        let pixels = width as usize * height as usize;
        Ok(Self {
            texture,
            _texture_creator: texture_creator,
            canvas,
            event_pump,
            timer_subsystem,
            width,
            height,
            argb: vec![0; pixels],
            bytes: Vec::with_capacity(pixels * 4),
        })
    }

    /// Drains pending events. Escape and closing the window both report `Quit`.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => events.push(WindowEvent::Quit),
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = Key::from_keycode(keycode) {
                        events.push(WindowEvent::KeyPressed(key));
                    }
                }
                _ => {}
            }
        }
        events
    }

    /// Current held-key and mouse-drag state.
    pub fn input_state(&self) -> InputState {
        let keys = self.event_pump.keyboard_state();
        let mouse = self.event_pump.mouse_state();
        InputState {
            forward: keys.is_scancode_pressed(Scancode::W),
            back: keys.is_scancode_pressed(Scancode::S),
            left: keys.is_scancode_pressed(Scancode::A),
            right: keys.is_scancode_pressed(Scancode::D),
            up: keys.is_scancode_pressed(Scancode::Space),
            down: keys.is_scancode_pressed(Scancode::LShift),
            mouse_position: mouse
                .is_mouse_button_pressed(MouseButton::Left)
                .then(|| (mouse.x(), mouse.y())),
        }
    }

    pub fn present(&mut self, buffer: &FrameBuffer) -> Result<(), String> {
        if (buffer.width(), buffer.height()) != (self.width, self.height) {
            return Err(format!(
                "framebuffer is {}x{}, window expects {}x{}",
                buffer.width(),
                buffer.height(),
                self.width,
                self.height
            ));
        }
        buffer.to_argb(&mut self.argb);
        self.bytes.clear();
        self.bytes
            .extend(self.argb.iter().flat_map(|pixel| pixel.to_ne_bytes()));

        self.texture
            .update(None, &self.bytes, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&self.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), String> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| e.to_string())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
