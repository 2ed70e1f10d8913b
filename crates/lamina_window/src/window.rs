//! Window: layered event dispatch and paint orchestration
//!
//! A [`Window`] owns at most one backend [`WindowContext`] and an ordered
//! stack of non-owning layer references.
//!
//! - Input events visit layers topmost-first (reverse registration order) and
//!   stop at the first layer that consumes them.
//! - Broadcasts (`on_backend_created`, `on_ui_state_changed`, `on_resize`)
//!   visit every layer in registration order.
//! - Paint lets every layer draw onto the same canvas in registration order,
//!   then flushes and presents once.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use lamina_platform::{
    DisplayParams, Event, InputState, Key, Modifiers, Result, TouchId, WindowContext,
};

use crate::layer::Layer;

type LayerRef = Weak<RefCell<dyn Layer>>;

/// Layers still alive, in registration order
fn live_layers(
    layers: &[LayerRef],
) -> impl DoubleEndedIterator<Item = Rc<RefCell<dyn Layer>>> + '_ {
    layers.iter().filter_map(Weak::upgrade)
}

fn same_layer<L: Layer + 'static>(weak: &LayerRef, layer: &Rc<RefCell<L>>) -> bool {
    weak.as_ptr() as *const () == Rc::as_ptr(layer) as *const ()
}

/// Layered window shell over a backend context
///
/// Single-threaded: layers are shared with the embedding application as
/// `Rc<RefCell<_>>`, so a window never leaves the thread that owns its
/// rendering context. Layers must not call back into the window from inside
/// a callback.
pub struct Window {
    context: Option<Box<dyn WindowContext>>,
    layers: Vec<LayerRef>,
    requested_display_params: DisplayParams,
    invalidated: bool,
    repaint_request: Option<Box<dyn FnMut()>>,
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

impl Window {
    /// Create a window with no backend and no layers
    pub fn new() -> Self {
        Self {
            context: None,
            layers: Vec::new(),
            requested_display_params: DisplayParams::default(),
            invalidated: false,
            repaint_request: None,
        }
    }

    /// Set the host callback that schedules a repaint
    pub fn with_repaint_request(mut self, request: impl FnMut() + 'static) -> Self {
        self.set_repaint_request(request);
        self
    }

    /// Replace the host callback that schedules a repaint
    pub fn set_repaint_request(&mut self, request: impl FnMut() + 'static) {
        self.repaint_request = Some(Box::new(request));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Backend lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Attach a new backend context built from the requested display params
    ///
    /// Any existing context is destroyed before `create` runs. Layers are not
    /// notified here; the host calls [`Window::on_backend_created`] once the
    /// backend is ready.
    pub fn attach<C, F>(&mut self, create: F) -> Result<()>
    where
        C: WindowContext + 'static,
        F: FnOnce(&DisplayParams) -> Result<C>,
    {
        self.detach();

        let context = create(&self.requested_display_params)?;
        tracing::debug!(
            width = context.width(),
            height = context.height(),
            samples = context.sample_count(),
            "backend context attached"
        );
        self.context = Some(Box::new(context));
        Ok(())
    }

    /// Destroy the backend context, keeping layers and requested params
    pub fn detach(&mut self) {
        if self.context.take().is_some() {
            tracing::debug!("backend context detached");
        }
    }

    /// Whether a backend context is attached
    pub fn is_attached(&self) -> bool {
        self.context.is_some()
    }

    /// The attached backend as its concrete type
    pub fn context<C: WindowContext + 'static>(&self) -> Option<&C> {
        self.context.as_ref()?.as_any().downcast_ref::<C>()
    }

    /// The attached backend as its concrete type, mutably
    pub fn context_mut<C: WindowContext + 'static>(&mut self) -> Option<&mut C> {
        self.context.as_mut()?.as_any_mut().downcast_mut::<C>()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layer stack
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a layer on top of the stack
    ///
    /// The window keeps a weak reference; dropping the last `Rc` removes the
    /// layer from dispatch.
    pub fn add_layer<L: Layer + 'static>(&mut self, layer: &Rc<RefCell<L>>) {
        self.prune_layers();
        let layer: Rc<RefCell<dyn Layer>> = layer.clone();
        self.layers.push(Rc::downgrade(&layer));
    }

    /// Unregister a layer, returning whether it was registered
    pub fn remove_layer<L: Layer + 'static>(&mut self, layer: &Rc<RefCell<L>>) -> bool {
        self.prune_layers();
        let before = self.layers.len();
        self.layers.retain(|weak| !same_layer(weak, layer));
        self.layers.len() != before
    }

    /// Number of registered layers that are still alive
    pub fn layer_count(&self) -> usize {
        self.layers.iter().filter(|weak| weak.strong_count() > 0).count()
    }

    fn prune_layers(&mut self) {
        self.layers.retain(|weak| weak.strong_count() > 0);
    }

    /// Offer an input event to layers topmost-first until one consumes it
    fn dispatch_input(&self, kind: &str, mut handler: impl FnMut(&mut dyn Layer) -> bool) -> bool {
        for (depth, layer) in live_layers(&self.layers).rev().enumerate() {
            if handler(&mut *layer.borrow_mut()) {
                tracing::trace!(kind, depth, "input consumed");
                return true;
            }
        }
        false
    }

    /// Notify every layer in registration order
    fn broadcast(&self, mut handler: impl FnMut(&mut dyn Layer)) {
        for layer in live_layers(&self.layers) {
            handler(&mut *layer.borrow_mut());
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────

    /// Offer a text character to layers, topmost first
    pub fn on_char(&mut self, c: char, modifiers: Modifiers) -> bool {
        self.dispatch_input("char", |layer| layer.on_char(c, modifiers))
    }

    /// Offer a key event to layers, topmost first
    pub fn on_key(&mut self, key: Key, state: InputState, modifiers: Modifiers) -> bool {
        self.dispatch_input("key", |layer| layer.on_key(key, state, modifiers))
    }

    /// Offer a pointer event to layers, topmost first
    pub fn on_mouse(&mut self, x: i32, y: i32, state: InputState, modifiers: Modifiers) -> bool {
        self.dispatch_input("mouse", |layer| layer.on_mouse(x, y, state, modifiers))
    }

    /// Offer a wheel delta to layers, topmost first
    pub fn on_mouse_wheel(&mut self, delta: f32, modifiers: Modifiers) -> bool {
        self.dispatch_input("wheel", |layer| layer.on_mouse_wheel(delta, modifiers))
    }

    /// Offer a touch event to layers, topmost first
    pub fn on_touch(&mut self, owner: TouchId, state: InputState, x: f32, y: f32) -> bool {
        self.dispatch_input("touch", |layer| layer.on_touch(owner, state, x, y))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Broadcasts
    // ─────────────────────────────────────────────────────────────────────────

    /// Tell every layer a backend context is ready
    pub fn on_backend_created(&mut self) {
        self.broadcast(|layer| layer.on_backend_created());
    }

    /// Forward a named UI state change to every layer
    pub fn on_ui_state_changed(&mut self, name: &str, value: &str) {
        self.broadcast(|layer| layer.on_ui_state_changed(name, value));
    }

    /// Resize the backend and notify layers; no-op without a backend
    ///
    /// Layers receive the size the backend settled on, which differs from the
    /// requested one when the backend rejects it.
    pub fn on_resize(&mut self, width: i32, height: i32) {
        let Some(context) = self.context.as_mut() else {
            return;
        };
        context.resize(width, height);
        let (width, height) = (context.width(), context.height());
        tracing::debug!(width, height, "backend resized");

        self.broadcast(|layer| layer.on_resize(width, height));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Paint
    // ─────────────────────────────────────────────────────────────────────────

    /// Render one frame
    ///
    /// Clears the invalidation flag before anything else, so a paint issued
    /// without a backend (or with a lost surface) still services the pending
    /// request; the host re-invalidates once the backend recovers.
    pub fn on_paint(&mut self) {
        self.mark_inval_processed();

        let Some(context) = self.context.as_mut() else {
            return;
        };
        let Some(surface) = context.backbuffer_surface() else {
            tracing::warn!("no backbuffer surface available, skipping frame");
            return;
        };

        {
            let canvas = surface.canvas();
            for layer in live_layers(&self.layers) {
                layer.borrow_mut().on_paint(canvas);
            }
        }

        surface.flush();
        context.swap_buffers();
    }

    /// Request a repaint; repeated requests before the next paint coalesce
    pub fn inval(&mut self) {
        if self.invalidated {
            return;
        }
        self.invalidated = true;
        if let Some(request) = self.repaint_request.as_mut() {
            request();
        }
    }

    /// Mark the pending repaint request as serviced
    pub fn mark_inval_processed(&mut self) {
        self.invalidated = false;
    }

    /// Whether a repaint has been requested but not yet serviced
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Display params and backend queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Store display params and apply them to the attached backend, if any
    ///
    /// Without a backend the params take effect on the next [`Window::attach`].
    /// Backends reconfigure in place, so `_allow_reattach` is accepted for
    /// host compatibility only.
    pub fn set_requested_display_params(&mut self, params: DisplayParams, _allow_reattach: bool) {
        self.requested_display_params = params;
        if let Some(context) = self.context.as_mut() {
            context.set_display_params(&self.requested_display_params);
        }
    }

    pub fn requested_display_params(&self) -> &DisplayParams {
        &self.requested_display_params
    }

    /// Backend width, 0 without a backend
    pub fn width(&self) -> i32 {
        self.context.as_ref().map_or(0, |c| c.width())
    }

    /// Backend height, 0 without a backend
    pub fn height(&self) -> i32 {
        self.context.as_ref().map_or(0, |c| c.height())
    }

    /// Backend MSAA sample count, -1 without a backend
    pub fn sample_count(&self) -> i32 {
        self.context.as_ref().map_or(-1, |c| c.sample_count())
    }

    /// Backend stencil depth, -1 without a backend
    pub fn stencil_bits(&self) -> i32 {
        self.context.as_ref().map_or(-1, |c| c.stencil_bits())
    }

    /// Backend GPU context handle, `None` without a backend or on CPU backends
    pub fn gpu_context(&self) -> Option<&dyn Any> {
        self.context.as_ref().and_then(|c| c.gpu_context())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event routing
    // ─────────────────────────────────────────────────────────────────────────

    /// Route a host event to the matching operation
    ///
    /// Returns whether an input event was consumed; non-input events always
    /// return `false`.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Char { c, modifiers } => self.on_char(c, modifiers),
            Event::Key {
                key,
                state,
                modifiers,
            } => self.on_key(key, state, modifiers),
            Event::Mouse {
                x,
                y,
                state,
                modifiers,
            } => self.on_mouse(x, y, state, modifiers),
            Event::MouseWheel { delta, modifiers } => self.on_mouse_wheel(delta, modifiers),
            Event::Touch { owner, state, x, y } => self.on_touch(owner, state, x, y),
            Event::UiStateChanged { name, value } => {
                self.on_ui_state_changed(&name, &value);
                false
            }
            Event::Resized { width, height } => {
                self.on_resize(width, height);
                false
            }
            Event::BackendCreated => {
                self.on_backend_created();
                false
            }
            Event::Paint => {
                self.on_paint();
                false
            }
        }
    }
}
