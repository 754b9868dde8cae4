pub mod carousel;
pub mod scroll_header;

pub use carousel::{
    AutoplayTick, Carousel, CarouselController, CarouselView, NavKey, Playback, Slide,
};
pub use scroll_header::{
    HeaderTask, HeaderView, ScrollHeader, ScrollHeaderController, Viewport, Visibility,
};
