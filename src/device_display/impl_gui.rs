use crate::device_display::interface::{
    check_rotation, rotated_rows, write_into, DeviceDisplay, DisplayBuffer, CHARS_PER_LINE, LINES,
};
use eframe::egui;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct Panel {
    display_buffer: DisplayBuffer,
    backlight_on: bool,
    rotation: u8,
}

/// The egui window that paints the panel. It has to run on the main thread,
/// so it is handed out separately from the device and driven by `show`.
pub struct DisplayWindow {
    panel: Arc<Mutex<Panel>>,
    finished: Arc<AtomicBool>,
}

impl DisplayWindow {
    /// Set this once the control loop is done to close the window.
    pub fn finished(&self) -> Arc<AtomicBool> {
        self.finished.clone()
    }

    fn should_close(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Blocks until the window is closed by the user or through `finished`.
    pub fn show(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([400.0, 200.0])
                .with_resizable(false),
            ..Default::default()
        };

        eframe::run_native("LCD Display", options, Box::new(move |_cc| Box::new(self)))
            .map_err(|e| e.to_string().into())
    }
}

impl eframe::App for DisplayWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.should_close() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let panel = match self.panel.lock() {
            Ok(panel) => panel.clone(),
            Err(_) => return,
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            let border_color = egui::Color32::from_rgb(100, 100, 100);
            let bg_color = if panel.backlight_on {
                egui::Color32::from_rgb(200, 255, 200)
            } else {
                egui::Color32::from_rgb(50, 50, 50)
            };

            let rect = ui.available_rect_before_wrap();
            ui.painter().rect_filled(rect, 0.0, bg_color);
            ui.painter()
                .rect_stroke(rect, 0.0, egui::Stroke::new(2.0, border_color));

            if !panel.backlight_on {
                return;
            }

            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                for row in rotated_rows(&panel.display_buffer, panel.rotation) {
                    ui.label(
                        egui::RichText::new(row)
                            .monospace()
                            .color(egui::Color32::BLACK)
                            .size(20.0),
                    );
                }
            });
        });

        ctx.request_repaint();
    }
}

/// Desktop window standing in for the LCD.
pub struct DeviceDisplayGui {
    panel: Arc<Mutex<Panel>>,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            panel: Arc::new(Mutex::new(Panel {
                display_buffer: [[' '; CHARS_PER_LINE]; LINES],
                backlight_on: true,
                rotation: 0,
            })),
        }
    }

    pub fn window(&self) -> DisplayWindow {
        DisplayWindow {
            panel: self.panel.clone(),
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    fn with_panel<R>(
        &self,
        f: impl FnOnce(&mut Panel) -> Result<R, Box<dyn Error + Send + Sync>>,
    ) -> Result<R, Box<dyn Error + Send + Sync>> {
        let mut panel = self.panel.lock().map_err(|_| "display panel lock poisoned")?;
        f(&mut panel)
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_panel(|panel| {
            panel.backlight_on = true;
            Ok(())
        })
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_panel(|panel| {
            panel.display_buffer = [[' '; CHARS_PER_LINE]; LINES];
            Ok(())
        })
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_panel(|panel| write_into(&mut panel.display_buffer, line, text))
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_panel(|panel| {
            panel.backlight_on = on;
            Ok(())
        })
    }

    fn set_rotation(&mut self, rotation: u8) -> Result<(), Box<dyn Error + Send + Sync>> {
        check_rotation(rotation)?;
        self.with_panel(|panel| {
            panel.rotation = rotation;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_paints_what_the_device_writes() {
        let mut display = DeviceDisplayGui::new();
        let window = display.window();

        display.init().unwrap();
        display.write_line(0, "0.90 mouse").unwrap();
        display.set_rotation(2).unwrap();

        let panel = window.panel.lock().unwrap();
        let top: String = panel.display_buffer[0].iter().collect();
        assert_eq!(top.trim_end(), "0.90 mouse");
        assert_eq!(panel.rotation, 2);
        assert!(panel.backlight_on);
    }

    #[test]
    fn test_window_closes_once_finished() {
        let display = DeviceDisplayGui::new();
        let window = display.window();
        assert!(!window.should_close());

        window.finished().store(true, Ordering::SeqCst);

        assert!(window.should_close());
    }
}
