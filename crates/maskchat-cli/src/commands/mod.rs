pub mod dialogues;
pub mod masks;
pub mod messages;
pub mod render;
