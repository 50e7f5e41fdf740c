//! Drives widgets through `egui::Context::run` without a window.

use eframe::egui;

pub struct Driver {
    pub ctx: egui::Context,
    frame: u32,
}

impl Driver {
    pub fn new() -> Self {
        Self {
            ctx: egui::Context::default(),
            frame: 0,
        }
    }

    /// Runs one frame with `events` as that frame's input.
    pub fn frame(&mut self, events: Vec<egui::Event>, mut draw: impl FnMut(&egui::Context)) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(800.0, 800.0),
            )),
            time: Some(f64::from(self.frame) / 60.0),
            events,
            ..Default::default()
        };
        self.frame += 1;
        let _ = self.ctx.run(input, |ctx| draw(ctx));
    }

    /// Keyboard focus lands on `id` from the next frame on.
    pub fn focus(&self, id: egui::Id) {
        self.ctx.memory_mut(|mem| mem.request_focus(id));
    }
}

pub fn key_press(key: egui::Key) -> egui::Event {
    egui::Event::Key {
        key,
        physical_key: None,
        pressed: true,
        repeat: false,
        modifiers: egui::Modifiers::NONE,
    }
}

pub fn typed(text: &str) -> egui::Event {
    egui::Event::Text(text.to_string())
}

/// Press and release events for a primary click at `pos`, one frame each.
pub fn click_at(pos: egui::Pos2) -> [Vec<egui::Event>; 3] {
    let button = |pressed| egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: egui::Modifiers::NONE,
    };
    [
        vec![egui::Event::PointerMoved(pos)],
        vec![button(true)],
        vec![button(false)],
    ]
}
