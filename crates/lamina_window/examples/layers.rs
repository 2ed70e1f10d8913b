//! Layered Window Demo
//!
//! Drives a window over the CPU raster backend with a scripted event
//! sequence and writes the presented frame to `layers.png`.
//!
//! Features demonstrated:
//! - A content layer below an overlay menu that intercepts clicks
//! - UI state broadcasts reaching every layer
//! - Coalesced invalidation and repaint
//! - Backend loss and re-attach without re-registering layers
//!
//! Run with: RUST_LOG=debug cargo run -p lamina_window --example layers

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use lamina_raster::RasterWindowContext;
use lamina_window::prelude::*;

/// Checkerboard that counts clicks reaching it
struct Content {
    tile: f32,
    clicks: u32,
    dark: bool,
}

impl Layer for Content {
    fn on_mouse(&mut self, _x: i32, _y: i32, state: InputState, _modifiers: Modifiers) -> bool {
        if state.is_down() {
            self.clicks += 1;
        }
        true
    }

    fn on_ui_state_changed(&mut self, name: &str, value: &str) {
        if name == "theme" {
            self.dark = value == "dark";
        }
    }

    fn on_resize(&mut self, width: i32, height: i32) {
        self.tile = (width.min(height) as f32 / 8.0).max(1.0);
    }

    fn on_paint(&mut self, canvas: &mut dyn Canvas) {
        let (even, odd) = if self.dark {
            (Color::from_hex(0x202028), Color::from_hex(0x303040))
        } else {
            (Color::from_hex(0xE0E0E0), Color::WHITE)
        };
        canvas.clear(even);

        let size = canvas.size();
        let cols = (size.width / self.tile).ceil() as i32;
        let rows = (size.height / self.tile).ceil() as i32;
        for row in 0..rows {
            for col in 0..cols {
                if (row + col) % 2 == 1 {
                    canvas.fill_rect_xywh(
                        col as f32 * self.tile,
                        row as f32 * self.tile,
                        self.tile,
                        self.tile,
                        odd,
                    );
                }
            }
        }
    }
}

/// Menu overlay that swallows clicks inside its bounds
struct Menu {
    bounds: Rect,
    open: bool,
}

impl Layer for Menu {
    fn on_mouse(&mut self, x: i32, y: i32, state: InputState, _modifiers: Modifiers) -> bool {
        let inside = self.bounds.contains(lamina_core::Point::new(x as f32, y as f32));
        if self.open && inside && state.is_down() {
            self.open = false;
            return true;
        }
        false
    }

    fn on_key(&mut self, key: Key, state: InputState, _modifiers: Modifiers) -> bool {
        if key == Key::Escape && state.is_down() && self.open {
            self.open = false;
            return true;
        }
        false
    }

    fn on_paint(&mut self, canvas: &mut dyn Canvas) {
        if !self.open {
            return;
        }
        canvas.translate(self.bounds.x(), self.bounds.y());
        canvas.fill_rect_xywh(0.0, 0.0, self.bounds.width(), self.bounds.height(), Color::BLUE);
        canvas.fill_rect_xywh(4.0, 4.0, self.bounds.width() - 8.0, 12.0, Color::WHITE.with_alpha(0.6));
        canvas.restore();
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let repaints = Rc::new(Cell::new(0u32));
    let scheduled = repaints.clone();
    let mut window = Window::new().with_repaint_request(move || scheduled.set(scheduled.get() + 1));

    let content = Rc::new(RefCell::new(Content {
        tile: 32.0,
        clicks: 0,
        dark: false,
    }));
    let menu = Rc::new(RefCell::new(Menu {
        bounds: Rect::new(16.0, 16.0, 96.0, 64.0),
        open: true,
    }));
    window.add_layer(&content);
    window.add_layer(&menu);

    window.set_requested_display_params(DisplayParams::default().size(256, 192), false);
    window.attach(RasterWindowContext::new)?;
    window.on_backend_created();
    window.on_resize(256, 192);

    // Click inside the open menu: the menu closes and content never sees it
    window.on_mouse(20, 20, InputState::Down, Modifiers::default());
    // Second click falls through to content
    window.on_mouse(20, 20, InputState::Down, Modifiers::default());
    window.on_ui_state_changed("theme", "dark");

    window.inval();
    window.inval();
    window.on_paint();

    // Simulate context loss: the frame is skipped and the host re-attaches
    if let Some(raster) = window.context_mut::<RasterWindowContext>() {
        raster.mark_lost(true);
    }
    window.inval();
    window.on_paint();

    window.detach();
    window.attach(RasterWindowContext::new)?;
    window.on_backend_created();
    window.inval();
    window.on_paint();

    let raster = window
        .context::<RasterWindowContext>()
        .ok_or_else(|| anyhow::anyhow!("raster backend not attached"))?;
    raster.front_buffer().save("layers.png")?;

    tracing::info!(
        clicks = content.borrow().clicks,
        menu_open = menu.borrow().open,
        repaints = repaints.get(),
        frames = raster.frames_presented(),
        "wrote layers.png"
    );
    Ok(())
}
