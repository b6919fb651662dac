pub mod folio;
pub mod generate;
pub mod history;
