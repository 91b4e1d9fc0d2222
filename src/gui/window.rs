use crate::config::Config;
use crate::gui::toasts;
use crate::image_predictor::core::{Event, Model};
use crate::image_predictor::render::view;
use crate::library::logger::interface::Logger;
use crate::notifier::impl_toast::NotifierToast;
use crate::uploaded_image::{RequestId, UploadedImage};
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

// Largest side of the preview texture.
const PREVIEW_TEXTURE_SIZE: u32 = 1024;

pub struct PredictorWindow {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    model: Arc<Mutex<Model>>,
    event_sender: Sender<Event>,
    toasts: NotifierToast,
    path_input: String,
    texture: Option<(RequestId, egui::TextureHandle)>,
}

impl PredictorWindow {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        model: Arc<Mutex<Model>>,
        event_sender: Sender<Event>,
        toasts: NotifierToast,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("window"),
            model,
            event_sender,
            toasts,
            path_input: String::new(),
            texture: None,
        }
    }

    fn choose(&self, path: PathBuf) {
        if path.as_os_str().is_empty() {
            return;
        }
        if self.event_sender.send(Event::ImageChosen { path }).is_err() {
            let _ = self.logger.error("Controller stopped, upload ignored");
        }
    }

    fn handle_dropped_files(&self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });

        if let Some(path) = dropped {
            self.choose(path);
        }
    }

    fn draw_file_input(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Image file:");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.path_input)
                    .hint_text("/path/to/cat.jpg")
                    .desired_width(320.0),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            if ui.button("Classify").clicked() || submitted {
                self.choose(PathBuf::from(self.path_input.trim()));
            }
        });
        ui.label(egui::RichText::new("or drop an image onto the window").weak());
    }

    fn texture_for(&mut self, ctx: &egui::Context, image: &UploadedImage) -> egui::TextureHandle {
        if let Some((id, texture)) = &self.texture {
            if *id == image.id {
                return texture.clone();
            }
        }

        let rgba = image
            .image()
            .thumbnail(PREVIEW_TEXTURE_SIZE, PREVIEW_TEXTURE_SIZE)
            .to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
        let texture = ctx.load_texture(
            format!("uploaded-{}", image.id),
            color_image,
            egui::TextureOptions::LINEAR,
        );

        self.texture = Some((image.id, texture.clone()));
        texture
    }
}

impl eframe::App for PredictorWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        let model = self
            .model
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let view = view(&model);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.heading(egui::RichText::new(view.title).size(32.0).strong());
                    ui.label(egui::RichText::new(&view.backend).weak());
                    ui.add_space(16.0);

                    self.draw_file_input(ui);
                    ui.add_space(16.0);

                    if let Some(image) = &view.image {
                        let texture = self.texture_for(ctx, image);
                        ui.add(egui::Image::new(&texture).max_width(384.0).rounding(4.0));
                        ui.add_space(16.0);
                    }

                    if view.show_loader {
                        ui.add(egui::Spinner::new().size(32.0));
                    } else if !view.prediction_lines.is_empty() {
                        ui.label(egui::RichText::new("Predictions:").size(22.0).strong());
                        ui.add_space(8.0);
                        for line in &view.prediction_lines {
                            ui.label(line);
                        }
                    } else {
                        ui.label(egui::RichText::new(&view.status).weak());
                    }
                });
            });
        });

        toasts::show(ctx, &self.toasts.visible(Instant::now()));

        ctx.request_repaint_after(self.config.repaint_interval);
    }
}

pub fn run(window: PredictorWindow) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Image Predictor")
            .with_inner_size([720.0, 820.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Image Predictor",
        options,
        Box::new(|_cc| Box::new(window)),
    )
    .map_err(|e| e.to_string().into())
}
