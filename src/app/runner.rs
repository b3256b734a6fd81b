//! Main application handler for the key demo

use std::sync::Arc;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use super::logger::KeyLogger;
use super::window::window_attributes_from_config;
use crate::config::AppConfig;
use crate::input::{KeyCollector, KeyDispatcher, WinitHost};

/// Demo host: one window, one dispatcher
pub struct App {
    config: AppConfig,
    window: Option<Window>,
    host: Arc<WinitHost>,
    collector: KeyCollector,
}

impl App {
    /// Creates the demo application with the provided configuration
    pub fn new(config: AppConfig) -> Self {
        info!(profile = %config.profile, "Starting key demo");
        info!(override_escape = config.keys.override_escape, "Key configuration");

        let host = Arc::new(WinitHost::new());
        let dispatcher = Arc::new(KeyDispatcher::with_codes(host.clone(), config.keys.codes));
        dispatcher.set_override_escape(config.keys.override_escape);
        dispatcher.add_listener(Arc::new(KeyLogger));

        Self {
            config,
            window: None,
            host,
            collector: KeyCollector::new(dispatcher),
        }
    }

    /// Creates the demo application with configuration loaded from environment
    pub fn from_env() -> Self {
        let config = AppConfig::load_from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using default configuration");
            AppConfig::builtin("release")
        });
        Self::new(config)
    }

    /// The dispatcher fed by this application's window
    pub fn dispatcher(&self) -> &Arc<KeyDispatcher> {
        self.collector.dispatcher()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(window_attributes_from_config(&self.config.window)) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    window.width = size.width,
                    window.height = size.height,
                    "Window created successfully"
                );
                self.window = Some(window);
            }
            Err(e) => {
                error!(error = %e, "Failed to create window");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Feed events to the collector FIRST so state is current for the
        // default handling below
        self.collector.handle_window_event(&event);
        let suppressed = self.host.take_suppressed();

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state.is_pressed()
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                if suppressed {
                    info!("Escape overridden, staying open");
                } else {
                    info!("Escape pressed, exiting");
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}
