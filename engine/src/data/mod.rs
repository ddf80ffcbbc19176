// I/O adapters around the pipeline: CSV in, XLSX out, text previews.
pub mod csv_parser;
pub mod preview;
pub mod xlsx_writer;
