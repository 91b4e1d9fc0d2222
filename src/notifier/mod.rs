pub mod impl_fake;
pub mod impl_toast;
pub mod interface;
