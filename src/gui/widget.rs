use druid::widget::prelude::*;
use druid::{Code, Widget};

use crate::gui::convert_image;
use crate::viewport::Command;
use crate::ExplorerWorker;

pub struct ExplorerWidget {
    worker: ExplorerWorker,
    width: usize,
    height: usize,
}

impl ExplorerWidget {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            worker: ExplorerWorker::new(width, height),
            width,
            height,
        }
    }

    fn resize(&mut self, size: Size) -> bool {
        let width = f64::round(size.width) as usize;
        let height = f64::round(size.height) as usize;
        if self.width == width && self.height == height {
            false
        } else {
            self.worker.resize(width, height);
            self.width = width;
            self.height = height;
            true
        }
    }

    fn key_command(code: Code) -> Option<Command> {
        use Code::*;
        match code {
            ArrowLeft => Some(Command::PanLeft),
            ArrowRight => Some(Command::PanRight),
            ArrowUp => Some(Command::PanUp),
            ArrowDown => Some(Command::PanDown),
            KeyI => Some(Command::ZoomIn),
            KeyO => Some(Command::ZoomOut),
            Equal => Some(Command::MoreDetail),
            Backspace => Some(Command::LessDetail),
            Space => Some(Command::Reset),
            _ => None,
        }
    }
}

impl Widget<()> for ExplorerWidget {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, _data: &mut (), _env: &Env) {
        if self.worker.has_frame() {
            ctx.request_paint();
        }
        match event {
            Event::KeyDown(key_event) => {
                if let Some(command) = Self::key_command(key_event.code) {
                    self.worker.command(command);
                }
            }
            Event::MouseMove(_) => {
                if !ctx.is_focused() {
                    ctx.request_focus();
                }
            }
            Event::Wheel(mouse) => {
                if mouse.wheel_delta.y < 0.0 {
                    self.worker.command(Command::ZoomIn);
                } else if mouse.wheel_delta.y > 0.0 {
                    self.worker.command(Command::ZoomOut);
                }
            }
            _ => (),
        }
    }

    fn lifecycle(&mut self, ctx: &mut LifeCycleCtx, event: &LifeCycle, _data: &(), _env: &Env) {
        match event {
            LifeCycle::WidgetAdded => {
                ctx.register_for_focus();
            }
            LifeCycle::Size(size) => {
                self.resize(*size);
            }
            _ => (),
        }
    }

    fn update(&mut self, _ctx: &mut UpdateCtx, _old_data: &(), _new_data: &(), _env: &Env) {}

    fn layout(
        &mut self,
        _ctx: &mut LayoutCtx,
        bc: &BoxConstraints,
        _data: &(),
        _env: &Env,
    ) -> Size {
        bc.max()
    }

    fn paint(&mut self, ctx: &mut PaintCtx, _: &(), _env: &Env) {
        let size = ctx.size();
        if !self.resize(size) {
            if let Some(frame) = self.worker.next_frame() {
                let image_buf = convert_image(frame);
                let ctx_image = image_buf.to_image(ctx.render_ctx);
                ctx.draw_image(
                    &ctx_image,
                    size.to_rect(),
                    druid::piet::InterpolationMode::NearestNeighbor,
                );
            }
        }
    }
}
