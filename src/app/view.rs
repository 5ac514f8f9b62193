use super::messages::Message;
use super::state::{
    App, FADED_ALPHA, IMAGE_SCROLL_ID, LOADING_BAR_HEIGHT_PX, LOADING_BAR_WIDTH_PX,
    POEM_PADDING_PX, SEGMENT_FONT_SIZE_PX, SEGMENT_SPACING_PX, TITLE_FONT_SIZE_PX,
};
use iced::alignment::Horizontal;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{
    Row, column, container, image, mouse_area, progress_bar, scrollable, stack, text,
};
use iced::{Color, Element, Length};
use unroll_core::Stage;
use unroll_core::poem::Visibility;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let content = column![self.scroll_view(), self.poem_view()].spacing(SEGMENT_SPACING_PX);

        if self.coordinator.stage() == Stage::Interactive {
            return content.into();
        }
        stack![content, self.loading_overlay()].into()
    }

    fn scroll_view(&self) -> Element<'_, Message> {
        let layout = self.coordinator.layout();
        let viewport = self.coordinator.viewport();
        let width = if layout.scaled_content_width > 0.0 {
            Length::Fixed(layout.scaled_content_width)
        } else {
            Length::Fill
        };
        let picture = image(self.scroll_image.clone())
            .width(width)
            .height(Length::Fixed(viewport.height));

        let strip = scrollable(picture)
            .id(IMAGE_SCROLL_ID.clone())
            .direction(Direction::Horizontal(
                Scrollbar::new().width(0.0).scroller_width(0.0),
            ))
            .width(Length::Fill)
            .height(Length::Fixed(viewport.height));

        mouse_area(strip).on_press(Message::ScrollClicked).into()
    }

    fn poem_view(&self) -> Element<'_, Message> {
        let segments = &self.coordinator.config().poem_segments;
        let mut lines = Row::new().spacing(SEGMENT_SPACING_PX);
        for (index, segment) in segments.iter().enumerate() {
            let visibility = self
                .coordinator
                .segment_visibility(index)
                .unwrap_or_default();
            let size = if segment.title {
                TITLE_FONT_SIZE_PX
            } else {
                SEGMENT_FONT_SIZE_PX
            };
            lines = lines.push(
                text(segment.text.as_str())
                    .size(size)
                    .color(segment_color(visibility)),
            );
        }

        container(lines.wrap())
            .padding(POEM_PADDING_PX)
            .width(Length::Fill)
            .into()
    }

    fn loading_overlay(&self) -> Element<'_, Message> {
        let progress = self.coordinator.progress();
        let label = if self.coordinator.stage() == Stage::Loading {
            format!("Loading {}/{}", progress.completed, progress.total)
        } else {
            "Ready".to_string()
        };
        let body = column![
            text(label),
            progress_bar(0.0..=1.0, progress.fraction())
                .width(Length::Fixed(LOADING_BAR_WIDTH_PX))
                .height(Length::Fixed(LOADING_BAR_HEIGHT_PX)),
        ]
        .spacing(SEGMENT_SPACING_PX)
        .align_x(Horizontal::Center);

        container(body)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_| container::background(Color::WHITE))
            .into()
    }
}

fn segment_alpha(visibility: Visibility) -> f32 {
    match visibility {
        Visibility::Hidden => 0.0,
        Visibility::Visible => 1.0,
        Visibility::Fading => FADED_ALPHA,
    }
}

fn segment_color(visibility: Visibility) -> Color {
    Color {
        a: segment_alpha(visibility),
        ..Color::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_segments_keep_their_space_but_draw_nothing() {
        assert_eq!(segment_color(Visibility::Hidden).a, 0.0);
        assert_eq!(segment_color(Visibility::Visible).a, 1.0);
        let faded = segment_alpha(Visibility::Fading);
        assert!(faded > 0.0 && faded < 1.0);
    }
}
