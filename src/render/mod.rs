pub mod console;
pub mod html;
pub mod text;
pub mod view;
