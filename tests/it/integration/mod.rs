mod export_tests;
mod workflow_tests;
