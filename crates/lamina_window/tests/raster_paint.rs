//! Window painting over the raster backend

use std::cell::RefCell;
use std::rc::Rc;

use lamina_core::{Canvas, Color};
use lamina_platform::{DisplayParams, WindowContext};
use lamina_raster::RasterWindowContext;
use lamina_window::{Layer, Window};

struct Fill {
    color: Color,
    rect: Option<(f32, f32, f32, f32)>,
    painted: u32,
}

impl Fill {
    fn full(color: Color) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            color,
            rect: None,
            painted: 0,
        }))
    }

    fn partial(color: Color, rect: (f32, f32, f32, f32)) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            color,
            rect: Some(rect),
            painted: 0,
        }))
    }
}

impl Layer for Fill {
    fn on_paint(&mut self, canvas: &mut dyn Canvas) {
        self.painted += 1;
        match self.rect {
            Some((x, y, w, h)) => canvas.fill_rect_xywh(x, y, w, h, self.color),
            None => canvas.fill_all(self.color),
        }
    }
}

fn raster_window(width: u32, height: u32) -> Window {
    let mut window = Window::new();
    window.set_requested_display_params(DisplayParams::default().size(width, height), false);
    window.attach(RasterWindowContext::new).unwrap();
    window
}

fn raster(window: &Window) -> &RasterWindowContext {
    window.context::<RasterWindowContext>().unwrap()
}

#[test]
fn test_later_layer_paints_over_earlier() {
    let mut window = raster_window(16, 8);
    let a = Fill::partial(Color::RED, (0.0, 0.0, 4.0, 4.0));
    let b = Fill::full(Color::GREEN);
    window.add_layer(&a);
    window.add_layer(&b);

    window.on_paint();

    let context = raster(&window);
    let image = context.front_buffer();
    assert!(image.pixels().all(|p| p.0 == [0, 255, 0, 255]));
    assert_eq!(a.borrow().painted, 1);
    assert_eq!(b.borrow().painted, 1);
    assert_eq!(context.frames_presented(), 1);
    assert_eq!(context.flush_count(), 1);
}

#[test]
fn test_earlier_layer_shows_through_partial_overlay() {
    let mut window = raster_window(8, 8);
    let a = Fill::full(Color::RED);
    let b = Fill::partial(Color::BLUE, (0.0, 0.0, 2.0, 2.0));
    window.add_layer(&a);
    window.add_layer(&b);

    window.on_paint();

    let context = raster(&window);
    assert_eq!(context.pixel(1, 1), Some(Color::BLUE));
    assert_eq!(context.pixel(5, 5), Some(Color::RED));
}

#[test]
fn test_lost_backend_skips_frame_until_recovered() {
    let mut window = raster_window(4, 4);
    let a = Fill::full(Color::WHITE);
    window.add_layer(&a);

    window
        .context_mut::<RasterWindowContext>()
        .unwrap()
        .mark_lost(true);
    window.inval();
    window.on_paint();

    assert!(!window.is_invalidated());
    assert_eq!(a.borrow().painted, 0);
    assert_eq!(raster(&window).frames_presented(), 0);

    window
        .context_mut::<RasterWindowContext>()
        .unwrap()
        .mark_lost(false);
    window.inval();
    window.on_paint();

    assert_eq!(a.borrow().painted, 1);
    assert_eq!(raster(&window).pixel(3, 3), Some(Color::WHITE));
}

#[test]
fn test_resize_and_display_params_reach_raster_backend() {
    let mut window = raster_window(4, 4);
    window.on_resize(10, 6);
    assert_eq!((window.width(), window.height()), (10, 6));

    window.set_requested_display_params(DisplayParams::default().size(12, 12).msaa(4), true);
    assert_eq!((window.width(), window.height()), (12, 12));
    assert_eq!(window.sample_count(), 4);
    assert_eq!(raster(&window).display_params().msaa_sample_count, 4);
}

#[derive(Default)]
struct SizeWatcher {
    seen: Vec<(i32, i32)>,
}

impl Layer for SizeWatcher {
    fn on_resize(&mut self, width: i32, height: i32) {
        self.seen.push((width, height));
    }
}

#[test]
fn test_layers_see_size_the_backend_kept() {
    let mut window = raster_window(16, 16);
    let watcher = Rc::new(RefCell::new(SizeWatcher::default()));
    window.add_layer(&watcher);

    window.on_resize(0, 16);
    window.on_resize(20, 12);

    assert_eq!(watcher.borrow().seen, vec![(16, 16), (20, 12)]);
    assert_eq!((window.width(), window.height()), (20, 12));
}

#[test]
fn test_reattach_keeps_layers_and_params() {
    let mut window = raster_window(6, 6);
    let a = Fill::full(Color::BLUE);
    window.add_layer(&a);

    window.detach();
    assert_eq!(window.stencil_bits(), -1);

    window.attach(RasterWindowContext::new).unwrap();
    assert_eq!((window.width(), window.height()), (6, 6));

    window.on_paint();
    assert_eq!(raster(&window).pixel(0, 0), Some(Color::BLUE));
}
