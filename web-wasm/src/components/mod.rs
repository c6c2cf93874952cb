pub mod header;
pub mod upload_area;
pub mod column_selector;
pub mod message_bar;
pub mod loading_indicator;
