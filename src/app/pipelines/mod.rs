pub mod sheet_pipeline;
