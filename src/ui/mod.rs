pub mod analysis_panel;
pub mod chart_panel;
pub mod sidebar;
pub mod table_view;
