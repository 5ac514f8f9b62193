use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;

pub(crate) static IMAGE_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("image-scroll"));
pub(crate) const TITLE_FONT_SIZE_PX: f32 = 30.0;
pub(crate) const SEGMENT_FONT_SIZE_PX: f32 = 22.0;
pub(crate) const SEGMENT_SPACING_PX: f32 = 18.0;
pub(crate) const POEM_PADDING_PX: f32 = 24.0;
pub(crate) const LOADING_BAR_WIDTH_PX: f32 = 320.0;
pub(crate) const LOADING_BAR_HEIGHT_PX: f32 = 6.0;
/// Opacity of a segment after it has faded.
pub(crate) const FADED_ALPHA: f32 = 0.3;
