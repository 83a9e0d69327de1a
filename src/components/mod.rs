// ABOUTME: UI components for the toast playground: layout, toast overlay and help

pub mod help;
pub mod layout;
pub mod toast_layer;

pub use help::HelpComponent;
pub use layout::LayoutComponent;
pub use toast_layer::ToastLayerComponent;
