mod helpers;
pub mod layout;
pub mod picker;
pub mod views;

use crate::app::TrilhasApp;
use crate::model::Page;
use eframe::{App, Frame};
use egui::Context;
use layout::{bottom_panel, top_panel};
use picker::PickPurpose;
use std::time::Duration;

impl App for TrilhasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.clock = Duration::from_secs_f64(ctx.input(|i| i.time).max(0.0));

        // Imagens que chegaram: arrastadas ou vindas do seletor do navegador
        if let Some(bytes) = picker::dropped_file(ctx) {
            let purpose = if self.scan_view.is_some() {
                PickPurpose::QrImage
            } else {
                PickPurpose::StampPhoto
            };
            self.receive_image(purpose, &bytes);
        }
        #[cfg(target_arch = "wasm32")]
        if let Some((purpose, bytes)) = picker::take_picked(ctx) {
            self.receive_image(purpose, &bytes);
        }

        // Uma leitura de QR por quadro enquanto a câmera estiver aberta
        if self.poll_scan() {
            ctx.request_repaint();
        }
        if let Some(wait) = self.tick_quiz() {
            ctx.request_repaint_after(wait);
        }

        bottom_panel(ctx);

        if self.show_welcome {
            views::welcome::ui_welcome(self, ctx);
        } else {
            top_panel(self, ctx);
            if self.navigator.park().is_some() {
                views::park_detail::ui_park_detail(self, ctx);
            } else {
                match self.page() {
                    Page::Parks => views::parks::ui_parks(self, ctx),
                    Page::Badges => views::badges::ui_badges(self, ctx),
                    Page::Profile => views::profile::ui_profile(self, ctx),
                }
            }
        }

        // Sobreposições
        views::scanner::ui_scanner(self, ctx);
        views::badge_modal::ui_badge_modal(self, ctx);
        views::alert::ui_alert(self, ctx);
    }
}

impl TrilhasApp {
    fn receive_image(&mut self, purpose: PickPurpose, bytes: &[u8]) {
        match purpose {
            PickPurpose::QrImage if self.scan_view.is_some() => self.scan_image(bytes),
            PickPurpose::StampPhoto if self.stamper.is_some() => self.stamp_photo(bytes),
            _ => log::debug!("ignoring image with no open target"),
        }
    }
}
