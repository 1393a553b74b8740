use crate::TrilhasApp;
use crate::quiz::OptionFeedback;
use crate::ui::helpers::EMERALD;
use egui::{Button, Color32, RichText, Ui};

pub fn ui_quiz(app: &mut TrilhasApp, ui: &mut Ui) {
    let Some(quiz) = app.park_view.as_ref().and_then(|v| v.quiz.as_ref()) else {
        ui.label("Nenhum quiz disponível para este parque.");
        return;
    };

    let mut chosen: Option<String> = None;
    let mut restart = false;

    if quiz.is_finished() {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Quiz Finalizado!").heading().strong());
            ui.add_space(8.0);
            ui.label("Sua pontuação final é:");
            ui.label(
                RichText::new(format!("{} / {}", quiz.score(), quiz.len()))
                    .size(48.0)
                    .strong()
                    .color(EMERALD),
            );
            ui.add_space(8.0);
            restart = ui.button("Jogar Novamente").clicked();
        });
    } else if let Some(question) = quiz.current_question() {
        let index = match quiz.state() {
            crate::quiz::QuizState::InProgress { index, .. } => index,
            crate::quiz::QuizState::Finished { .. } => quiz.len(),
        };
        ui.label(RichText::new("Quiz das Trilhas").heading().strong());
        ui.label(RichText::new(format!("Pergunta {} de {}", index + 1, quiz.len())).weak());
        ui.add_space(4.0);
        ui.label(RichText::new(&question.question).size(18.0).strong());
        ui.add_space(8.0);

        let feedback = quiz.feedback_visible();
        let width = ui.available_width();
        for option in &question.options {
            let (fill, text_color) = match (feedback, quiz.option_feedback(option)) {
                (true, OptionFeedback::Correct) => (Color32::from_rgb(220, 252, 231), Color32::from_rgb(22, 101, 52)),
                (true, OptionFeedback::ChosenWrong) => (Color32::from_rgb(254, 226, 226), Color32::from_rgb(153, 27, 27)),
                _ => (ui.visuals().faint_bg_color, ui.visuals().text_color()),
            };
            let button = Button::new(RichText::new(option).color(text_color))
                .fill(fill)
                .min_size(egui::vec2(width, 36.0));
            // durante o feedback as opções ficam travadas
            if ui.add_enabled(!feedback, button).clicked() {
                chosen = Some(option.clone());
            }
            ui.add_space(4.0);
        }
    }

    if let Some(option) = chosen {
        app.answer_quiz(&option);
    }
    if restart {
        app.restart_quiz();
    }
}
