use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use armchair::{Camera, ChairPass, ChairState, Cube, GpuContext, Joint, joint_adjustment};

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    pass: Option<ChairPass>,
    cube: Option<Cube>,
    camera: Camera,
    state: ChairState,
}

impl Default for App {
    fn default() -> Self {
        Self {
            window: None,
            gpu: None,
            pass: None,
            cube: None,
            camera: Camera::new(),
            state: ChairState::new(),
        }
    }
}

impl App {
    fn handle_key(&mut self, event: &KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }

        if let PhysicalKey::Code(key) = event.physical_key
            && let Some(adjust) = joint_adjustment(key)
        {
            match adjust.joint {
                Joint::Backrest => self.state.adjust_backrest(adjust.delta),
                Joint::Arm => self.state.adjust_arm(adjust.delta),
            }
            log::debug!(
                "backrest {:.0} deg, arm {:.0} deg",
                self.state.backrest_angle,
                self.state.arm_angle
            );
        }

        // Clamp and redraw on every key press, matched or not.
        self.state.clamp();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("Armchair")
            .with_inner_size(winit::dpi::LogicalSize::new(800, 600));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(error) => {
                log::error!("failed to create window: {error}");
                event_loop.exit();
                return;
            }
        };

        let gpu = match GpuContext::new(window.clone()) {
            Ok(gpu) => gpu,
            Err(error) => {
                log::error!("failed to acquire rendering context: {error}");
                event_loop.exit();
                return;
            }
        };

        let pass = match ChairPass::new(&gpu) {
            Ok(pass) => pass,
            Err(error) => {
                log::error!("failed to initialize render pass: {error}");
                event_loop.exit();
                return;
            }
        };

        self.cube = Some(Cube::new(&gpu));
        self.gpu = Some(gpu);
        self.pass = Some(pass);
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(&event);
            }
            WindowEvent::RedrawRequested => {
                if let (Some(gpu), Some(pass), Some(cube)) =
                    (&self.gpu, &mut self.pass, &self.cube)
                {
                    pass.render(gpu, cube, &self.camera, &self.state);
                }
            }
            _ => (),
        }
    }
}

fn main() {
    env_logger::init();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(error) => {
            log::error!("failed to create event loop: {error}");
            return;
        }
    };
    // Redraws are driven by key presses, so block until the next event.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::default();
    if let Err(error) = event_loop.run_app(&mut app) {
        log::error!("event loop terminated: {error}");
    }
}
