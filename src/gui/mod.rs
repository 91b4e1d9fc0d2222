pub mod toasts;
pub mod window;
