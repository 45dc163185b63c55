pub mod books;
pub mod form;
pub mod ui;
