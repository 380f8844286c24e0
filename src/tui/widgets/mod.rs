pub mod carousel_view;
pub mod document_view;
pub mod help_popup;
pub mod status_bar;
